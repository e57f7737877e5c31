// Cache module for local filesystem caching.
// Stores fetched comments per project for offline access and incremental updates.

pub mod paths;
pub mod store;

pub use paths::*;
pub use store::{merge_comments, read_comments, update_and_save, write_comments};
