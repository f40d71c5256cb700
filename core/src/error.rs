use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be at least 1x1")]
    InvalidSize,
    #[error("Mine density must be between 0.0 and 1.0")]
    InvalidDensity,
}

pub type Result<T> = core::result::Result<T, GameError>;
