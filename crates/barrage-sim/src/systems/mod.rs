//! ECS systems that operate on the match world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components, the terrain, or `TurnState`.

pub mod ballistics;
pub mod explosion;
pub mod settle;
pub mod snapshot;
