use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MorphError {
    #[error("cycle order must contain at least one layout")]
    EmptyCycle,

    #[error("steps per transition must be at least 1")]
    ZeroSteps,

    #[error("dwell start must be in (0, 1], got {0}")]
    InvalidDwell(f32),

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("animation state lock poisoned")]
    Poisoned,

    #[error("failed to start animation driver: {0}")]
    Spawn(String),
}

pub type Result<T> = std::result::Result<T, MorphError>;
