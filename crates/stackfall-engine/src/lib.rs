pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when a shape matrix cannot be used as a piece template.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape matrix has no rows")]
    Empty,
    #[display("shape matrix is not square: {rows} rows, row {row} has {len} cells")]
    NotSquare { rows: usize, row: usize, len: usize },
}

/// Error returned when a session configuration is unusable.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board width must be at least 1")]
    ZeroWidth,
    #[display("board height must be at least 1")]
    ZeroHeight,
    #[display("drop interval must be at least 1 ms")]
    ZeroDropInterval,
}
