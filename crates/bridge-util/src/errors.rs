use miette::Diagnostic;
use thiserror::Error;

/// Error taxonomy for the bridge pipeline, one variant per failure class
/// named in the error-handling design: argument, I/O, parse, cycle,
/// resolution, and validation failures each carry enough context to be
/// printed as the final diagnostic without further wrapping.
#[derive(Debug, Error, Diagnostic)]
pub enum BridgeError {
    #[error("{message}")]
    #[diagnostic(help("check the command-line usage: bridge [--debug] <directory>"))]
    Argument { message: String },

    #[error("{message}")]
    IoFailure { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed POM at {path}: {message}")]
    #[diagnostic(help("a quarantine copy was written to {quarantine_path}"))]
    PomParse {
        path: String,
        quarantine_path: String,
        message: String,
    },

    #[error("dependency cycle detected at {coord}")]
    Cycle { coord: String },

    #[error("{message}")]
    #[diagnostic(help("re-run interactively to supply a corrected value"))]
    Resolution { message: String },

    #[error("{message}")]
    #[diagnostic(help("expected MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD], no leading zeros"))]
    Validation { message: String },
}

impl BridgeError {
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    pub fn io_failure(message: impl Into<String>) -> Self {
        Self::IoFailure {
            message: message.into(),
        }
    }

    pub fn cycle(coord: impl Into<String>) -> Self {
        Self::Cycle {
            coord: coord.into(),
        }
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

pub type BridgeResult<T> = miette::Result<T>;
