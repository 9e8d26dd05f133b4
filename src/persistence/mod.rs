//! File-backed persistence for data containers
//!
//! This module provides whole-file text I/O for `GenericDataContainer`
//! values, an optional age-based read cache, and post-read/post-write
//! processor hooks for side-effect chains.

pub mod file_io;
pub mod processor;

// Re-export commonly used items
pub use file_io::{ReadOptions, TextFileIO};
pub use processor::{FileExistsProcessor, IoProcessor};
