//! Difficulty-specific aiming profiles.
//!
//! The search always converges on the best shot it can find. Difficulty
//! only controls how much error is added to that shot before firing.

use barrage_core::enums::Difficulty;

/// Uniform aim error bounds. The applied error lies in `[-angle, angle]`
/// degrees and `[-power, power]` power units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorMargin {
    pub angle: f64,
    pub power: f64,
}

impl ErrorMargin {
    /// No error: fire the search optimum as-is.
    pub const ZERO: Self = Self {
        angle: 0.0,
        power: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        self.angle <= 0.0 && self.power <= 0.0
    }
}

/// Get the aim error for a given difficulty.
pub fn error_margin(difficulty: Difficulty) -> ErrorMargin {
    use barrage_core::constants::*;

    let (angle, power) = match difficulty {
        Difficulty::Easy => AI_EASY_ERROR,
        Difficulty::Medium => AI_MEDIUM_ERROR,
        Difficulty::Hard => AI_HARD_ERROR,
    };
    ErrorMargin { angle, power }
}
