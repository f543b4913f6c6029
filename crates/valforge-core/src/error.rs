//! Error types for the core symbol and convention layer.

use std::path::PathBuf;

/// Result alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors from symbol, class-descriptor and convention handling.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("failed to read conventions from {path}: {source}")]
    ConventionsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse conventions: {0}")]
    ConventionsParse(#[from] toml::de::Error),

    #[error("invalid conventions: {0}")]
    InvalidConventions(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CoreError::InvalidIdentifier("9lives".into());
        assert_eq!(err.to_string(), "`9lives` is not a valid identifier");
    }

    #[test]
    fn read_error_names_path() {
        let err = CoreError::ConventionsRead {
            path: PathBuf::from("/nowhere/valforge.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/nowhere/valforge.toml"));
    }
}
