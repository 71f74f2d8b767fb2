//! Bridge Watch
//!
//! Filesystem watcher that keeps a running language server's view of the
//! workspace synchronized: gitignore-aware exclusion, dynamic
//! `workspace/didChangeWatchedFiles` pattern registration, debounced
//! propagation, and a one-time initial walk.

pub mod config;
pub mod patterns;
pub mod watcher;

pub use config::WatcherConfig;
pub use watcher::WorkspaceWatcher;
