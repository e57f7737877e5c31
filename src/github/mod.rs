// GitHub API module.
// Provides the client and comment types for the GitHub REST API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use endpoints::{CommentQuery, MAX_PER_PAGE};
pub use types::*;
