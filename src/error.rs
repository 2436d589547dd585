//! Error types for the world engine.
//!
//! Every fallible operation is atomic: when one of these is returned the grid
//! or snapshot involved has not been touched.

use thiserror::Error;

/// Main error type for lifeworld operations.
#[derive(Error, Debug)]
pub enum LifeError {
    /// A flat cell sequence does not match its declared dimensions.
    #[error("snapshot has {actual} cells, dimensions require {expected}")]
    SnapshotMismatch { expected: usize, actual: usize },

    /// `width * height` does not fit in memory addressing.
    #[error("dimensions {width}x{height} overflow")]
    DimensionsOverflow { width: usize, height: usize },

    /// Write to a coordinate the edge policy cannot resolve.
    #[error("cell ({x}, {y}) is outside a {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    /// A pattern row differs in length from the first row.
    #[error("pattern row {row} has {actual} cells, expected {expected}")]
    RaggedPattern {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A stamped pattern would extend past the grid edge.
    #[error("{pattern_width}x{pattern_height} pattern at ({x}, {y}) does not fit a {width}x{height} grid")]
    PatternDoesNotFit {
        x: i64,
        y: i64,
        pattern_width: usize,
        pattern_height: usize,
        width: usize,
        height: usize,
    },

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// Parameters that parsed but make no sense.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for lifeworld operations.
pub type Result<T> = std::result::Result<T, LifeError>;

impl LifeError {
    /// Creates a new invalid configuration error.
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True for errors caused by caller input rather than the environment.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
