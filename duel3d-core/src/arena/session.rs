use std::time::Duration;

use tracing::{debug, info};

use super::input::{KeyBindings, KeyState};
use super::rules::Rules;
use super::state::{MatchEvent, MatchState, Outcome, Step};

/// Owns the authoritative match state for a frontend.
///
/// Frontends feed raw key transitions and frame ticks; the state only
/// changes through [`MatchState::step`].
#[derive(Debug, Clone)]
pub struct Arena {
    rules: Rules,
    bindings: KeyBindings,
    state: MatchState,
}

impl Arena {
    pub fn new(rules: Rules, bindings: KeyBindings) -> Self {
        Self {
            state: MatchState::new(&rules),
            rules,
            bindings,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Returns false when `key` is not bound
    pub fn key_down(&mut self, key: &str) -> bool {
        self.key(key, KeyState::Down)
    }

    /// Returns false when `key` is not bound
    pub fn key_up(&mut self, key: &str) -> bool {
        self.key(key, KeyState::Up)
    }

    fn key(&mut self, key: &str, state: KeyState) -> bool {
        match self.bindings.translate(key, state) {
            Some(event) => {
                self.apply(event);
                true
            }
            None => self.bindings.lookup(key).is_some(),
        }
    }

    pub fn tick(&mut self, now: Duration) {
        self.apply(MatchEvent::Tick { now });
    }

    pub fn banner(&self) -> Option<String> {
        self.state.banner()
    }

    fn apply(&mut self, event: MatchEvent) {
        let Step { state, outcomes } = self.state.step(&self.rules, event);
        self.state = state;
        for outcome in outcomes {
            match outcome {
                Outcome::Won { winner } => info!(%winner, "match over"),
                Outcome::Reset => info!("new match"),
                Outcome::Hit {
                    attacker,
                    damage,
                    remaining,
                } => debug!(%attacker, damage, remaining, "hit"),
                other => debug!(?other, "match event"),
            }
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(Rules::default(), KeyBindings::default())
    }
}
