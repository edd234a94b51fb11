//! Global error handling for codecopy
//!
//! Every failure the pipeline can hit is one of these variants. Most of them
//! are caught at the boundary where they occur and printed as a diagnostic;
//! only a missing project root or an invalid configuration ends the process.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::stripper::StripError;
use crate::tokenizer::TokenizerError;

/// Global error type for codecopy operations
#[derive(Error, Debug)]
pub enum CodeCopyError {
    /// The project path (or another scan root) does not exist
    #[error("Project path not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A collected file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Comment stripping failed on a file's content
    #[error("Failed to strip comments from {}: {source}", path.display())]
    Tokenization {
        path: PathBuf,
        #[source]
        source: StripError,
    },

    /// The clipboard backend failed
    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(#[from] ClipboardError),

    /// The project file or its ignore entry could not be written
    #[error("Failed to write {}: {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Tokenizer-related errors
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Specialized Result type for codecopy operations
pub type Result<T> = std::result::Result<T, CodeCopyError>;

/// Creates a CodeCopyError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CodeCopyError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_thresholds(warning: usize, critical: usize) -> Result<()> {
        crate::ensure!(
            warning <= critical,
            Config,
            "warning threshold {} exceeds critical threshold {}",
            warning,
            critical
        );
        Ok(())
    }

    #[test]
    fn test_ensure_macro() {
        assert!(check_thresholds(1, 2).is_ok());
        let err = check_thresholds(3, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: warning threshold 3 exceeds critical threshold 2"
        );
    }

    #[test]
    fn test_file_read_message_names_path() {
        let err = CodeCopyError::FileRead {
            path: PathBuf::from("/tmp/a.py"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to read /tmp/a.py: denied");
    }
}
