/// Terminal frontend: ASCII rasterizer and frame loop for the duel3d demos
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::collections::HashMap;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod demos;
pub mod renderer;

pub use demos::{CubeDemo, Demo, FightDemo};
pub use renderer::AsciiRenderer;

/// Frame pacing; the match rules are tuned for a display-rate tick
const TARGET_FRAME_TIME: Duration = Duration::from_micros(1_000_000 / 60);

/// Without release events a held key is seen as repeated presses; it counts
/// as released once no repeat arrives within this window.
const HOLD_WINDOW: Duration = Duration::from_millis(500);

/// Name of a key the way the DOM's `KeyboardEvent.key` spells it
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Enter => "Enter",
        KeyCode::Esc => "Escape",
        KeyCode::Char(' ') => " ",
        KeyCode::Char(c) => return Some(c.to_string()),
        _ => return None,
    };
    Some(name.to_string())
}

/// Tracks which keys are down, synthesising releases when the terminal
/// cannot report them
#[derive(Debug, Default)]
pub struct KeyTracker {
    reports_release: bool,
    held: HashMap<String, Instant>,
}

impl KeyTracker {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            held: HashMap::new(),
        }
    }

    pub fn press(&mut self, key: &str, at: Instant) {
        self.held.insert(key.to_string(), at);
    }

    /// Returns whether the key was held
    pub fn release(&mut self, key: &str) -> bool {
        self.held.remove(key).is_some()
    }

    /// Keys whose hold window ran out, removed from the held set
    pub fn expire(&mut self, now: Instant) -> Vec<String> {
        if self.reports_release {
            return Vec::new();
        }
        let expired: Vec<String> = self
            .held
            .iter()
            .filter(|(_, &pressed)| now.duration_since(pressed) > HOLD_WINDOW)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.held.remove(key);
        }
        expired
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    demo: Box<dyn Demo>,
    renderer: AsciiRenderer,
    keys: KeyTracker,
    running: bool,
    started: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(demo: Box<dyn Demo>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let now = Instant::now();

        Ok(Self {
            demo,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            keys: KeyTracker::default(),
            running: true,
            started: now,
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        info!(key_release = enhanced, "terminal ready");
        self.keys = KeyTracker::new(enhanced);

        let result = self.main_loop();

        // Cleanup
        if enhanced {
            execute!(stdout(), PopKeyboardEnhancementFlags)?;
        }
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?);
            }
            for key in self.keys.expire(frame_start) {
                self.demo.key_up(&key);
            }

            self.demo.update(frame_start - self.started);
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < TARGET_FRAME_TIME {
                std::thread::sleep(TARGET_FRAME_TIME - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => {
                let quit = matches!(code, KeyCode::Char('q') | KeyCode::Esc)
                    || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));
                if quit {
                    debug!("quit requested");
                    self.running = false;
                    return;
                }

                let Some(key) = key_name(code) else {
                    return;
                };
                match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        self.keys.press(&key, Instant::now());
                        self.demo.key_down(&key);
                    }
                    KeyEventKind::Release => {
                        if self.keys.release(&key) {
                            self.demo.key_up(&key);
                        }
                    }
                }
            }
            Event::Resize(width, height) => {
                debug!(width, height, "resized");
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.demo.render(&mut self.renderer);

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!("{} | FPS: {:.1}", self.demo.status(), self.fps)),
            ResetColor
        )?;

        if let Some(banner) = self.demo.banner() {
            let column = (self.renderer.width().saturating_sub(banner.chars().count()) / 2) as u16;
            let row = (self.renderer.height() / 2) as u16;
            queue!(
                stdout,
                cursor::MoveTo(column, row),
                SetForegroundColor(Color::White),
                Print(banner),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}
