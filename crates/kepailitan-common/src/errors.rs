use std::path::PathBuf;

use crate::id::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("duplicate container id '{0}'")]
    DuplicateContainer(String),

    #[error("invalid outline: {0}")]
    InvalidOutline(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("pattern error: {0}")]
    Pattern(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("corrupt value for key '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum KepailitanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("search.min_query_chars = 0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: search.min_query_chars = 0"
        );
    }

    #[test]
    fn content_error_display() {
        let err = ContentError::NodeNotFound(NodeId(7));
        assert_eq!(err.to_string(), "node not found: #7");

        let err = ContentError::ContainerNotFound("kurator".into());
        assert_eq!(err.to_string(), "container not found: kurator");
    }

    #[test]
    fn storage_error_display() {
        let err = StorageError::Corrupt {
            key: "pailitProgress".into(),
            reason: "expected array".into(),
        };
        assert_eq!(
            err.to_string(),
            "corrupt value for key 'pailitProgress': expected array"
        );
    }

    #[test]
    fn kepailitan_error_from_content() {
        let err: KepailitanError = ContentError::NodeNotFound(NodeId(3)).into();
        assert!(matches!(err, KepailitanError::Content(_)));
        assert!(err.to_string().contains("#3"));
    }

    #[test]
    fn kepailitan_error_from_config() {
        let err: KepailitanError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, KepailitanError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn kepailitan_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: KepailitanError = io_err.into();
        assert!(matches!(err, KepailitanError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn kepailitan_error_from_json() {
        let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err: KepailitanError = json_err.into();
        assert!(matches!(err, KepailitanError::Json(_)));
    }

    #[test]
    fn other_variant_is_verbatim() {
        let err = KepailitanError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
