use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HeroError {
    #[error("viewport {width}x{height} has no drawable area")]
    DegenerateViewport { width: f32, height: f32 },

    #[error("drawing context unavailable: {0}")]
    MissingContext(String),

    #[error("invalid hero configuration: {0}")]
    InvalidConfig(String),
}
