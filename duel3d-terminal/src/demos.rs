/// The two things the terminal app can run
use std::time::Duration;

use duel3d_core::arena::{arena_scene, Arena};
use duel3d_core::{CubeViewer, ProjectionMode, Side};

use crate::renderer::AsciiRenderer;

/// A scene driven by the terminal frame loop
pub trait Demo {
    /// One-line status shown on the top row
    fn status(&self) -> String;

    /// Centred message, if any
    fn banner(&self) -> Option<String> {
        None
    }

    fn key_down(&mut self, key: &str);

    fn key_up(&mut self, key: &str);

    /// Advance one frame; `now` is time since the app started
    fn update(&mut self, now: Duration);

    fn render(&self, renderer: &mut AsciiRenderer);
}

/// The robot fight
pub struct FightDemo {
    arena: Arena,
}

impl FightDemo {
    pub fn new(arena: Arena) -> Self {
        Self { arena }
    }
}

impl Demo for FightDemo {
    fn status(&self) -> String {
        let state = self.arena.state();
        format!(
            "{}: {:>3} HP | {}: {:>3} HP | P1 ←/→ ↑ attack ↓ defend | P2 a/d w attack s defend | Q quit",
            Side::One,
            state.combatant(Side::One).health,
            Side::Two,
            state.combatant(Side::Two).health,
        )
    }

    fn banner(&self) -> Option<String> {
        self.arena.banner()
    }

    fn key_down(&mut self, key: &str) {
        self.arena.key_down(key);
    }

    fn key_up(&mut self, key: &str) {
        self.arena.key_up(key);
    }

    fn update(&mut self, now: Duration) {
        self.arena.tick(now);
    }

    fn render(&self, renderer: &mut AsciiRenderer) {
        renderer.render_shapes(&arena_scene(self.arena.state()));
    }
}

/// The orbiting cubes
pub struct CubeDemo {
    viewer: CubeViewer,
}

impl CubeDemo {
    pub fn new(viewer: CubeViewer) -> Self {
        Self { viewer }
    }
}

impl Demo for CubeDemo {
    fn status(&self) -> String {
        let mode = match self.viewer.mode() {
            ProjectionMode::Orthographic => "orthographic",
            ProjectionMode::Perspective => "perspective",
        };
        format!("Cubes | {mode} | 1 orthographic 2 perspective | Q quit")
    }

    fn key_down(&mut self, key: &str) {
        self.viewer.key_down(key);
    }

    fn key_up(&mut self, _key: &str) {}

    fn update(&mut self, _now: Duration) {
        self.viewer.advance();
    }

    fn render(&self, renderer: &mut AsciiRenderer) {
        let models = self.viewer.model_matrices();
        let frames = self.viewer.frame_matrices();
        for (model, mvp) in models.iter().zip(&frames) {
            renderer.render_mesh(self.viewer.mesh(), model, mvp);
        }
    }
}
