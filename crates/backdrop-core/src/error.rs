use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color `{0}` must have 3 or 6 hex digits")]
    Length(String),
    #[error("color `{0}` contains a non-hex digit")]
    Digit(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must be between 2 and {max} cells per side, got {value}")]
    Grid { value: u32, max: u32 },
    #[error("particleCount must be at most {max}, got {value}")]
    ParticleCount { value: usize, max: usize },
    #[error("relaxation must lie strictly between 0 and 1, got {0}")]
    Relaxation(f32),
    #[error("imageSrc is required")]
    MissingImage,
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("particleColors[{index}]: {source}")]
    Palette {
        index: usize,
        #[source]
        source: ColorError,
    },
}
