pub mod errors;
pub mod id;

pub use errors::{ConfigError, ContentError, KepailitanError, SearchError, StorageError};
pub use id::NodeId;

pub type Result<T> = std::result::Result<T, KepailitanError>;
