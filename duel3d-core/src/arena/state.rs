use std::time::Duration;

use super::combatant::{Combatant, Intent, Side};
use super::rules::Rules;

/// Whether gameplay is running or a result is on display
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Active,
    /// Gameplay is frozen until the match clock reaches `deadline`
    Resolving { winner: Side, deadline: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// A discrete input to the match
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchEvent {
    Move { side: Side, direction: Direction },
    Hold { side: Side, intent: Intent },
    Release { side: Side, intent: Intent },
    /// One frame; `now` is the monotonic match clock
    Tick { now: Duration },
}

/// What a step changed, for logging and presentation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Moved { side: Side, position: f32 },
    MoveBlocked { side: Side },
    Hit { attacker: Side, damage: u32, remaining: u32 },
    Pushed { side: Side, position: f32 },
    Won { winner: Side },
    Reset,
}

/// Result of [`MatchState::step`]
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: MatchState,
    pub outcomes: Vec<Outcome>,
}

/// Both combatants plus the match phase.
///
/// Combatant 1 never ends up to the right of combatant 2: moves that would
/// cross are rejected and pushes only go outward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchState {
    combatants: [Combatant; 2],
    phase: Phase,
}

impl MatchState {
    /// Fresh match: start positions, full health, nothing held
    pub fn new(rules: &Rules) -> Self {
        Self {
            combatants: rules
                .start_positions
                .map(|position| Combatant::new(position, rules.max_health)),
            phase: Phase::Active,
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active)
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::Active => None,
            Phase::Resolving { winner, .. } => Some(winner),
        }
    }

    /// Text shown while a result is on display
    pub fn banner(&self) -> Option<String> {
        self.winner().map(|winner| format!("{winner} wins!"))
    }

    pub fn distance(&self) -> f32 {
        (self.combatants[0].position - self.combatants[1].position).abs()
    }

    /// Apply one event and return the next state.
    ///
    /// Intents follow key state in every phase; movement and contact only
    /// run while the match is active.
    pub fn step(&self, rules: &Rules, event: MatchEvent) -> Step {
        let mut next = *self;
        let mut outcomes = Vec::new();

        match event {
            MatchEvent::Hold { side, intent } => next.combatants[side.index()].intents.hold(intent),
            MatchEvent::Release { side, intent } => {
                next.combatants[side.index()].intents.release(intent)
            }
            MatchEvent::Move { side, direction } => {
                if next.is_active() {
                    next.apply_move(rules, side, direction, &mut outcomes);
                }
            }
            MatchEvent::Tick { now } => match next.phase {
                Phase::Active => next.apply_contact(rules, now, &mut outcomes),
                Phase::Resolving { deadline, .. } if now >= deadline => {
                    next = MatchState::new(rules);
                    outcomes.push(Outcome::Reset);
                }
                Phase::Resolving { .. } => {}
            },
        }

        Step {
            state: next,
            outcomes,
        }
    }

    fn apply_move(
        &mut self,
        rules: &Rules,
        side: Side,
        direction: Direction,
        outcomes: &mut Vec<Outcome>,
    ) {
        let current = self.combatants[side.index()].position;
        let opponent = self.combatants[side.opponent().index()].position;
        let candidate = rules.clamp(current + direction.sign() * rules.move_step);

        let crosses = match side {
            Side::One => candidate > opponent,
            Side::Two => candidate < opponent,
        };
        if crosses {
            outcomes.push(Outcome::MoveBlocked { side });
            return;
        }

        self.combatants[side.index()].position = candidate;
        outcomes.push(Outcome::Moved {
            side,
            position: candidate,
        });
    }

    fn apply_contact(&mut self, rules: &Rules, now: Duration, outcomes: &mut Vec<Outcome>) {
        let distance = self.distance();

        if distance < rules.attack_distance {
            let damage = ((rules.attack_distance - distance) * 100.0).floor() as u32;
            for attacker in Side::BOTH {
                let a = self.combatants[attacker.index()];
                let defender = &mut self.combatants[attacker.opponent().index()];
                // An attacker level with or past its opponent never connects.
                let facing = match attacker {
                    Side::One => a.position < defender.position,
                    Side::Two => a.position > defender.position,
                };
                if a.is_attacking() && !defender.is_defending() && facing {
                    defender.take_damage(damage);
                    outcomes.push(Outcome::Hit {
                        attacker,
                        damage,
                        remaining: defender.health,
                    });
                }
            }
        }

        let winner = if self.combatant(Side::Two).is_down() {
            Some(Side::One)
        } else if self.combatant(Side::One).is_down() {
            Some(Side::Two)
        } else {
            None
        };
        if let Some(winner) = winner {
            self.phase = Phase::Resolving {
                winner,
                deadline: now + rules.resolve_delay,
            };
            outcomes.push(Outcome::Won { winner });
            return;
        }

        if distance < rules.push_distance {
            let [one, two] = self.combatants.map(|c| c.position.abs());
            let pushed: &[Side] = if one > two {
                &[Side::One]
            } else if two > one {
                &[Side::Two]
            } else {
                &Side::BOTH
            };
            for &side in pushed {
                let combatant = &mut self.combatants[side.index()];
                combatant.position =
                    rules.clamp(combatant.position + side.outward() * rules.push_step);
                outcomes.push(Outcome::Pushed {
                    side,
                    position: combatant.position,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(rules: &Rules, one: f32, two: f32) -> MatchState {
        let mut state = MatchState::new(rules);
        state.combatants[0].position = one;
        state.combatants[1].position = two;
        state
    }

    fn tick(secs: f32) -> MatchEvent {
        MatchEvent::Tick {
            now: Duration::from_secs_f32(secs),
        }
    }

    #[test]
    fn test_new_match() {
        let rules = Rules::default();
        let state = MatchState::new(&rules);
        assert_eq!(state.combatant(Side::One).position, -0.5);
        assert_eq!(state.combatant(Side::Two).position, 0.5);
        assert_eq!(state.combatant(Side::One).health, 100);
        assert!(state.is_active());
        assert_eq!(state.banner(), None);
    }

    #[test]
    fn test_damage_when_close_and_undefended() {
        let rules = Rules::default();
        let mut state = state_at(&rules, -0.05, 0.0);
        state.combatants[0].intents.hold(Intent::Attack);

        let step = state.step(&rules, tick(0.0));
        assert_eq!(step.state.combatant(Side::Two).health, 85);
        assert_eq!(step.state.combatant(Side::One).health, 100);
        assert!(step.outcomes.contains(&Outcome::Hit {
            attacker: Side::One,
            damage: 15,
            remaining: 85,
        }));
    }

    #[test]
    fn test_defending_blocks_damage() {
        let rules = Rules::default();
        let mut state = state_at(&rules, -0.05, 0.0);
        state.combatants[0].intents.hold(Intent::Attack);
        state.combatants[1].intents.hold(Intent::Defend);

        let step = state.step(&rules, tick(0.0));
        assert_eq!(step.state.combatant(Side::Two).health, 100);
    }

    #[test]
    fn test_no_damage_out_of_reach() {
        let rules = Rules::default();
        let mut state = state_at(&rules, -0.2, 0.1);
        state.combatants[0].intents.hold(Intent::Attack);
        state.combatants[1].intents.hold(Intent::Attack);

        let step = state.step(&rules, tick(0.0));
        assert_eq!(step.state.combatant(Side::One).health, 100);
        assert_eq!(step.state.combatant(Side::Two).health, 100);
        assert!(step.outcomes.is_empty());
    }

    #[test]
    fn test_both_attackers_connect() {
        let rules = Rules::default();
        let mut state = state_at(&rules, -0.3, -0.2);
        state.combatants[0].intents.hold(Intent::Attack);
        state.combatants[1].intents.hold(Intent::Attack);

        let step = state.step(&rules, tick(0.0));
        let one = step.state.combatant(Side::One).health;
        let two = step.state.combatant(Side::Two).health;
        assert_eq!(one, two);
        assert!(one < 100);
    }

    #[test]
    fn test_level_attacker_never_connects() {
        let rules = Rules::default();
        let mut state = state_at(&rules, 0.1, 0.1);
        state.combatants[0].intents.hold(Intent::Attack);
        state.combatants[1].intents.hold(Intent::Attack);

        let step = state.step(&rules, tick(0.0));
        assert!(!step
            .outcomes
            .iter()
            .any(|o| matches!(o, Outcome::Hit { .. })));
    }

    #[test]
    fn test_push_clamps_to_ring() {
        let rules = Rules::default();
        let state = state_at(&rules, 0.69, 0.74);

        let step = state.step(&rules, tick(0.0));
        assert_eq!(step.state.combatant(Side::Two).position, 0.75);
        assert_eq!(step.state.combatant(Side::One).position, 0.69);
    }

    #[test]
    fn test_push_moves_outer_combatant() {
        let rules = Rules::default();
        let state = state_at(&rules, -0.3, -0.25);

        let step = state.step(&rules, tick(0.0));
        let one = step.state.combatant(Side::One).position;
        assert!((one - (-0.315)).abs() < 1e-6);
        assert_eq!(step.state.combatant(Side::Two).position, -0.25);
    }

    #[test]
    fn test_push_equidistant_separates_both() {
        let rules = Rules::default();
        let state = state_at(&rules, -0.02, 0.02);

        let step = state.step(&rules, tick(0.0));
        assert!(step.state.combatant(Side::One).position < -0.02);
        assert!(step.state.combatant(Side::Two).position > 0.02);
    }

    #[test]
    fn test_move_blocked_when_crossing() {
        let rules = Rules::default();
        let state = state_at(&rules, 0.09, 0.10);

        let step = state.step(
            &rules,
            MatchEvent::Move {
                side: Side::One,
                direction: Direction::Right,
            },
        );
        assert_eq!(step.state.combatant(Side::One).position, 0.09);
        assert_eq!(step.outcomes, vec![Outcome::MoveBlocked { side: Side::One }]);
    }

    #[test]
    fn test_move_clamps_to_ring() {
        let rules = Rules::default();
        let state = state_at(&rules, -0.73, 0.5);

        let step = state.step(
            &rules,
            MatchEvent::Move {
                side: Side::One,
                direction: Direction::Left,
            },
        );
        assert_eq!(step.state.combatant(Side::One).position, -0.75);

        let step = step.state.step(
            &rules,
            MatchEvent::Move {
                side: Side::Two,
                direction: Direction::Left,
            },
        );
        assert!((step.state.combatant(Side::Two).position - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_intents_follow_keys() {
        let rules = Rules::default();
        let state = MatchState::new(&rules);
        let held = state
            .step(
                &rules,
                MatchEvent::Hold {
                    side: Side::Two,
                    intent: Intent::Defend,
                },
            )
            .state;
        assert!(held.combatant(Side::Two).is_defending());
        assert!(!held.combatant(Side::One).is_defending());

        let released = held
            .step(
                &rules,
                MatchEvent::Release {
                    side: Side::Two,
                    intent: Intent::Defend,
                },
            )
            .state;
        assert!(!released.combatant(Side::Two).is_defending());
    }

    #[test]
    fn test_win_resolves_then_resets() {
        let rules = Rules::default();
        let mut state = state_at(&rules, -0.05, 0.0);
        state.combatants[0].intents.hold(Intent::Attack);
        state.combatants[1].health = 10;

        let step = state.step(&rules, tick(5.0));
        let resolving = step.state;
        assert_eq!(resolving.combatant(Side::Two).health, 0);
        assert_eq!(resolving.winner(), Some(Side::One));
        assert_eq!(resolving.banner().as_deref(), Some("Player 1 wins!"));
        assert!(step.outcomes.contains(&Outcome::Won { winner: Side::One }));

        // frozen while the banner is up
        let moved = resolving.step(
            &rules,
            MatchEvent::Move {
                side: Side::One,
                direction: Direction::Left,
            },
        );
        assert_eq!(moved.state, resolving);
        let early = resolving.step(&rules, tick(6.5));
        assert_eq!(early.state, resolving);

        let reset = resolving.step(&rules, tick(7.0));
        assert_eq!(reset.outcomes, vec![Outcome::Reset]);
        let fresh = reset.state;
        assert!(fresh.is_active());
        assert_eq!(fresh.combatant(Side::One).position, -0.5);
        assert_eq!(fresh.combatant(Side::Two).position, 0.5);
        assert_eq!(fresh.combatant(Side::One).health, 100);
        assert_eq!(fresh.combatant(Side::Two).health, 100);
        assert!(!fresh.combatant(Side::One).is_attacking());
    }

    #[test]
    fn test_player_two_wins() {
        let rules = Rules::default();
        let mut state = state_at(&rules, -0.1, -0.05);
        state.combatants[1].intents.hold(Intent::Attack);
        state.combatants[0].health = 1;

        let step = state.step(&rules, tick(0.0));
        assert_eq!(step.state.winner(), Some(Side::Two));
        assert_eq!(step.state.banner().as_deref(), Some("Player 2 wins!"));
    }

    #[test]
    fn test_no_push_after_lethal_hit() {
        let rules = Rules::default();
        let mut state = state_at(&rules, -0.05, 0.0);
        state.combatants[0].intents.hold(Intent::Attack);
        state.combatants[1].health = 1;

        let step = state.step(&rules, tick(0.0));
        assert_eq!(step.state.combatant(Side::One).position, -0.05);
    }
}
