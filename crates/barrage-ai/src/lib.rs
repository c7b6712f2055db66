//! Artillery AI for BARRAGE.
//!
//! Picks angle and power for computer-controlled combatants by brute-force
//! search over simulated trial shots, then degrades the result per difficulty.

pub mod profiles;
pub mod solver;

pub use barrage_core as core;

pub use profiles::{error_margin, ErrorMargin};
pub use solver::{
    apply_error, calculate_shot, search, simulate_shot, HeightProfile, SearchResult,
    TargetingContext,
};
