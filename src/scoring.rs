use serde::{Deserialize, Serialize};

/// Apples between speed-ups when the speed-up rule is enabled.
pub const APPLES_PER_SPEED_UP: u32 = 5;

/// Floor for the tick interval after speed-ups, in milliseconds.
pub const MIN_TICK_MS: u64 = 70;

/// Wrap-walls scaling of apple points, in tenths.
const WRAP_POINTS_TENTHS: u32 = 7;

/// Selectable difficulty; fixes the base tick interval and apple value.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Base tick interval in milliseconds.
    #[must_use]
    pub fn tick_ms(self) -> u64 {
        match self {
            Self::Easy => 150,
            Self::Normal => 110,
            Self::Hard => 80,
        }
    }

    /// Points per apple before the wrap-walls adjustment.
    #[must_use]
    pub fn base_points(self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Normal => 15,
            Self::Hard => 22,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }
}

/// Points awarded for one apple.
///
/// Wrap-walls boards are easier to survive, so their value is scaled by 0.7
/// (rounded half up, never below 1).
#[must_use]
pub fn points_for_apple(difficulty: Difficulty, wrap_walls: bool) -> u32 {
    let base = difficulty.base_points();
    if !wrap_walls {
        return base;
    }

    ((base * WRAP_POINTS_TENTHS + 5) / 10).max(1)
}

/// Next tick interval after a speed-up: 90% of `tick_ms`, floored at
/// [`MIN_TICK_MS`].
#[must_use]
pub fn sped_up_tick_ms(tick_ms: u64) -> u64 {
    (tick_ms * 9 / 10).max(MIN_TICK_MS)
}

#[cfg(test)]
mod tests {
    use super::{points_for_apple, sped_up_tick_ms, Difficulty, MIN_TICK_MS};

    #[test]
    fn walled_points_follow_difficulty_table() {
        assert_eq!(points_for_apple(Difficulty::Easy, false), 10);
        assert_eq!(points_for_apple(Difficulty::Normal, false), 15);
        assert_eq!(points_for_apple(Difficulty::Hard, false), 22);
    }

    #[test]
    fn wrap_walls_scale_points_down() {
        assert_eq!(points_for_apple(Difficulty::Easy, true), 7);
        assert_eq!(points_for_apple(Difficulty::Normal, true), 11);
        assert_eq!(points_for_apple(Difficulty::Hard, true), 15);
    }

    #[test]
    fn harder_difficulties_tick_faster() {
        assert!(Difficulty::Easy.tick_ms() > Difficulty::Normal.tick_ms());
        assert!(Difficulty::Normal.tick_ms() > Difficulty::Hard.tick_ms());
    }

    #[test]
    fn speed_up_shrinks_interval_down_to_floor() {
        assert_eq!(sped_up_tick_ms(110), 99);
        assert_eq!(sped_up_tick_ms(75), MIN_TICK_MS);
        assert_eq!(sped_up_tick_ms(MIN_TICK_MS), MIN_TICK_MS);
    }
}
