//! Error types for Relief

use thiserror::Error;

/// The main error type for Relief operations
#[derive(Debug, Error)]
pub enum ReliefError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Failed to load heightmap '{path}': {reason}")]
    HeightmapLoad { path: String, reason: String },

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Scene error: {0}")]
    SceneError(String),
}

/// Result type alias for Relief operations
pub type Result<T> = std::result::Result<T, ReliefError>;

impl From<toml::de::Error> for ReliefError {
    fn from(err: toml::de::Error) -> Self {
        ReliefError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_errors_convert() {
        let err: ReliefError = toml::from_str::<toml::Value>("= broken")
            .unwrap_err()
            .into();
        assert!(matches!(err, ReliefError::TomlParseError(_)));
    }

    #[test]
    fn heightmap_error_names_path() {
        let err = ReliefError::HeightmapLoad {
            path: "noise.png".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load heightmap 'noise.png': not found"
        );
    }
}
