//! Browser-facing layer of the Prosedur Kepailitan site.
//!
//! Provides:
//! - JSON IPC protocol between page scripts and Rust
//! - A search bridge binding the site's search inputs to one engine
//! - Reading progress and quiz result storage
//! - Offline cache policy for the service worker

pub mod bridge;
pub mod ipc;
pub mod offline;
pub mod progress;

pub use bridge::{SearchBridge, UiUpdate};
pub use ipc::{IpcMessage, IpcPayload};
pub use offline::{CachePolicy, FetchStrategy};
pub use progress::{FileStore, KeyValueStore, MemoryStore, ProgressTracker, QuizResult};
