use std::path::PathBuf;

use thiserror::Error;

/// Typed errors for packaging operations.
/// The CLI wraps these with `anyhow`, but the packager records them per step
/// so callers can tell exactly which operation failed.
#[derive(Debug, Error)]
pub enum PackError {
    /// File system operation failed
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build did not leave its output where packaging expects it
    #[error("{} not found! Build might have failed.", path.display())]
    MissingBuildOutput { path: PathBuf },

    /// Path is on the protected list and will not be deleted
    #[error("Refusing to delete protected path: '{}'", path.display())]
    Protected { path: PathBuf },

    /// Copy from one location to another failed
    #[error("Failed to copy '{}' to '{}': {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The host could not start the executable
    #[error("Failed to launch '{}': {source}", path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is invalid
    #[error("Config error in '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl PackError {
    /// Attach a path to a bare I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PackError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PackResult<T> = Result<T, PackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = PackError::io(
            "/tmp/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_io_error_exposes_source() {
        use std::error::Error as _;
        let err = PackError::io(
            "x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
    }
}
