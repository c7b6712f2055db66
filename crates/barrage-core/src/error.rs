use thiserror::Error;

/// Rejected match configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("World dimensions must be non-zero, got {width}x{height}")]
    EmptyWorld { width: usize, height: usize },

    #[error("Terrain band [{min_surface}, {max_surface}] does not fit a world {height} rows tall")]
    TerrainBand {
        min_surface: f64,
        max_surface: f64,
        height: usize,
    },

    #[error("Roster needs at least two combatants, got {0}")]
    RosterTooSmall(usize),

    #[error("Combatant '{name}' spawns at x={x}, outside [0, {width})")]
    SpawnOutOfBounds { name: String, x: f64, width: usize },

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
