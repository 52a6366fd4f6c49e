use std::fmt;

/// Which of the two combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Starts on the left, faces right
    One,
    /// Starts on the right, faces left
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    /// Direction pointing away from the opponent
    pub(crate) fn outward(self) -> f32 {
        match self {
            Side::One => -1.0,
            Side::Two => 1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::One => write!(f, "Player 1"),
            Side::Two => write!(f, "Player 2"),
        }
    }
}

/// Something a combatant can keep doing while its key is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Attack,
    Defend,
}

impl Intent {
    fn bit(self) -> u8 {
        match self {
            Intent::Attack => 0b01,
            Intent::Defend => 0b10,
        }
    }
}

/// The set of intents currently held by one combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intents(u8);

impl Intents {
    pub fn hold(&mut self, intent: Intent) {
        self.0 |= intent.bit();
    }

    pub fn release(&mut self, intent: Intent) {
        self.0 &= !intent.bit();
    }

    pub fn contains(self, intent: Intent) -> bool {
        self.0 & intent.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// One robot in the ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Combatant {
    /// Position along the ring axis
    pub position: f32,
    pub health: u32,
    pub intents: Intents,
}

impl Combatant {
    pub fn new(position: f32, health: u32) -> Self {
        Self {
            position,
            health,
            intents: Intents::default(),
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.intents.contains(Intent::Attack)
    }

    pub fn is_defending(&self) -> bool {
        self.intents.contains(Intent::Defend)
    }

    pub fn is_down(&self) -> bool {
        self.health == 0
    }

    /// Subtract `damage`, flooring health at zero
    pub(crate) fn take_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intents_are_independent() {
        let mut intents = Intents::default();
        assert!(intents.is_empty());

        intents.hold(Intent::Attack);
        intents.hold(Intent::Defend);
        intents.release(Intent::Attack);
        assert!(!intents.contains(Intent::Attack));
        assert!(intents.contains(Intent::Defend));

        // holding twice is still one hold
        intents.hold(Intent::Defend);
        intents.release(Intent::Defend);
        assert!(intents.is_empty());
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut c = Combatant::new(0.0, 10);
        c.take_damage(4);
        assert_eq!(c.health, 6);
        c.take_damage(15);
        assert_eq!(c.health, 0);
        assert!(c.is_down());
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::One.opponent(), Side::Two);
        assert_eq!(Side::Two.to_string(), "Player 2");
        assert!(Side::One.outward() < 0.0 && Side::Two.outward() > 0.0);
    }
}
