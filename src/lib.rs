// watchtower: fetch GitHub issue comments and keep a merged local snapshot.

pub mod cache;
pub mod comments;
pub mod config;
pub mod error;
pub mod github;

pub use comments::{UpdateOptions, load_comments, resolve_credentials, update_comments};
pub use config::Config;
pub use error::{Result, WatchtowerError};
