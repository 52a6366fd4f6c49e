use std::time::Duration;

/// Tunable constants of a match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    /// Attacks land only closer than this
    pub attack_distance: f32,
    /// Combatants closer than this shove each other apart
    pub push_distance: f32,
    pub push_step: f32,
    pub move_step: f32,
    /// Half-width of the ring; positions stay within `±ring_limit`
    pub ring_limit: f32,
    pub start_positions: [f32; 2],
    pub max_health: u32,
    /// How long the winner banner stays up before the next match
    pub resolve_delay: Duration,
}

impl Rules {
    pub fn clamp(&self, position: f32) -> f32 {
        position.clamp(-self.ring_limit, self.ring_limit)
    }

    /// Player 1 starts left of player 2 and both start inside the ring
    pub fn starts_fit(&self) -> bool {
        let [left, right] = self.start_positions;
        self.ring_limit > 0.0 && left < right && -self.ring_limit <= left && right <= self.ring_limit
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            attack_distance: 0.2,
            push_distance: 0.08,
            push_step: 0.015,
            move_step: 0.05,
            ring_limit: 0.75,
            start_positions: [-0.5, 0.5],
            max_health: 100,
            resolve_delay: Duration::from_secs(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_starts_fit() {
        assert!(Rules::default().starts_fit());
    }

    #[test]
    fn test_starts_must_be_ordered_and_inside() {
        let swapped = Rules { start_positions: [0.6, -0.6], ..Rules::default() };
        assert!(!swapped.starts_fit());
        let outside = Rules { start_positions: [-0.5, 0.9], ..Rules::default() };
        assert!(!outside.starts_fit());
        let nan = Rules { start_positions: [f32::NAN, 0.5], ..Rules::default() };
        assert!(!nan.starts_fit());
    }
}
