use std::collections::BTreeMap;
use std::str::FromStr;

use super::combatant::{Intent, Side};
use super::state::{Direction, MatchEvent};

/// What a bound key does for its combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Attack,
    Defend,
}

/// A key's meaning: which combatant, which command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub side: Side,
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Down,
    Up,
}

/// Maps key names (as in DOM `KeyboardEvent.key`) to bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    keys: BTreeMap<String, Binding>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, key: impl Into<String>, side: Side, command: Command) {
        self.keys.insert(key.into(), Binding { side, command });
    }

    pub fn lookup(&self, key: &str) -> Option<Binding> {
        self.keys.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Binding)> {
        self.keys.iter().map(|(key, binding)| (key.as_str(), *binding))
    }

    /// Turn a raw key transition into a match event.
    ///
    /// Moves fire on key-down only; attack and defend are held between
    /// key-down and key-up.
    pub fn translate(&self, key: &str, state: KeyState) -> Option<MatchEvent> {
        let Binding { side, command } = self.lookup(key)?;
        let intent = match command {
            Command::MoveLeft | Command::MoveRight => {
                let direction = if command == Command::MoveLeft {
                    Direction::Left
                } else {
                    Direction::Right
                };
                return (state == KeyState::Down).then_some(MatchEvent::Move { side, direction });
            }
            Command::Attack => Intent::Attack,
            Command::Defend => Intent::Defend,
        };
        Some(match state {
            KeyState::Down => MatchEvent::Hold { side, intent },
            KeyState::Up => MatchEvent::Release { side, intent },
        })
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind("ArrowLeft", Side::One, Command::MoveLeft);
        bindings.bind("ArrowRight", Side::One, Command::MoveRight);
        bindings.bind("ArrowUp", Side::One, Command::Attack);
        bindings.bind("ArrowDown", Side::One, Command::Defend);
        bindings.bind("a", Side::Two, Command::MoveLeft);
        bindings.bind("d", Side::Two, Command::MoveRight);
        bindings.bind("w", Side::Two, Command::Attack);
        bindings.bind("s", Side::Two, Command::Defend);
        bindings
    }
}

/// Unrecognised binding text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected `player1|player2.left|right|attack|defend`")]
pub struct ParseBindingError;

impl FromStr for Binding {
    type Err = ParseBindingError;

    /// Parses `player1.left`, `player2.attack`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (player, command) = s.split_once('.').ok_or(ParseBindingError)?;
        let side = match player {
            "player1" => Side::One,
            "player2" => Side::Two,
            _ => return Err(ParseBindingError),
        };
        let command = match command {
            "left" => Command::MoveLeft,
            "right" => Command::MoveRight,
            "attack" => Command::Attack,
            "defend" => Command::Defend,
            _ => return Err(ParseBindingError),
        };
        Ok(Binding { side, command })
    }
}
