/// Two-robot ring match: state, rules, key bindings and the draw list.
mod combatant;
mod input;
mod rules;
pub mod scene;
mod session;
mod state;

pub use combatant::{Combatant, Intent, Intents, Side};
pub use input::{Binding, Command, KeyBindings, KeyState, ParseBindingError};
pub use rules::Rules;
pub use scene::{arena_scene, Primitive, Rgba, Shape, CLEAR_COLOR};
pub use session::Arena;
pub use state::{Direction, MatchEvent, MatchState, Outcome, Phase, Step};
