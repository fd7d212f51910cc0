//! Process-level failures and their exit codes.
//!
//! In-game refusals are `Rejection`s and never reach this type.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

pub struct ExitCode;

impl ExitCode {
    pub const SUCCESS: u8 = 0;
    /// Unreadable or invalid configuration.
    pub const CONFIG_ERROR: u8 = 2;
    /// stdin/stdout failure.
    pub const IO_ERROR: u8 = 3;
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_mapping() {
        let config = AppError::from(ConfigError::Invalid("starting_budget must be positive".into()));
        assert_eq!(config.exit_code(), ExitCode::CONFIG_ERROR);

        let io = AppError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(io.exit_code(), ExitCode::IO_ERROR);
        assert!(io.to_string().contains("closed"));
    }
}
