//! CLI module
//!
//! Provides:
//! - Argument parsing for the `validate`, `serve` and `insights` modes
//! - Mode dispatch with deterministic exit codes

pub mod args;
pub mod dispatch;

// Re-exports
pub use args::{parse_args, Args, Mode, ServeArgs, ValidateArgs};
pub use dispatch::{run_cli_mode, run_mode, ExitCode};

use linkprobe_core::StoreError;

use crate::validator::ValidatorError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidatorError),

    #[error("Report error: {0}")]
    Store(#[from] StoreError),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
