//! Startup error types
//!
//! Only startup can fail. Once the game is running, bad input is dropped.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid {rows}x{cols} has {cells} cells but {values} values need {needed}")]
    GridMismatch {
        rows: usize,
        cols: usize,
        cells: usize,
        values: usize,
        needed: usize,
    },
    #[error("card value {0} appears more than once in the value pool")]
    DuplicateValue(u8),
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
    #[error("timing `{name}` is {value}, expected {expected}")]
    TimingOutOfRange {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("card image `{path}` failed to load: {reason}")]
    Load { path: String, reason: String },
    #[error("no card image registered for value {0}")]
    MissingValue(u8),
    #[error("card image `{path}` is {width}x{height}, atlas slots are {slot}x{slot}")]
    BadSize {
        path: String,
        width: u32,
        height: u32,
        slot: u32,
    },
}

/// Anything that aborts startup
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
}

impl SetupError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupError::Config(_) => 2,
            SetupError::Asset(_) => 3,
        }
    }
}
