// Comment update and load operations.
// Fetches repository comments, merges them into the on-disk snapshot, and reads it back.

use crate::cache::{self, comments_path};
use crate::config::Config;
use crate::error::{Result, WatchtowerError};
use crate::github::{Comment, CommentQuery, CommentState, Credentials, GitHubClient};

/// Options for [`update_comments`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Explicit `user:token` pair. Falls back to the configured token.
    pub auth: Option<String>,
    pub query: CommentQuery,
}

/// Pick the explicit auth pair if present, otherwise the configured one.
pub fn resolve_credentials(auth: Option<&str>, config: &Config) -> Result<Credentials> {
    let pair = auth
        .or(config.token.as_deref())
        .ok_or(WatchtowerError::MissingToken)?;
    Credentials::parse(pair)
}

/// Fetch the comments of `user/project`, merge them into the cached snapshot,
/// and return the snapshot as re-read from disk.
///
/// `project` defaults to `user`. Fresh comments take precedence over cached
/// ones with the same id.
pub async fn update_comments(
    config: &Config,
    user: &str,
    project: Option<&str>,
    options: &UpdateOptions,
) -> Result<Option<Vec<Comment>>> {
    let credentials = resolve_credentials(options.auth.as_deref(), config)?;
    let project = project.unwrap_or(user);

    let client = GitHubClient::with_base_url(credentials, &config.api_base)?;
    let fresh = client.get_repo_comments(user, project, &options.query).await?;
    log::info!("fetched {} comments for {}/{}", fresh.len(), user, project);

    let path = comments_path(&config.data_home, user, project);
    let old = load_comments(config, user, project, options.query.state)?;
    cache::update_and_save(&path, fresh, old)?;

    load_comments(config, user, project, options.query.state)
}

/// Read the cached comments of `user/project`.
///
/// Returns `None` when nothing usable is cached. `_state` is accepted for
/// symmetry with [`update_comments`] and does not filter the result.
pub fn load_comments(
    config: &Config,
    user: &str,
    project: &str,
    _state: CommentState,
) -> Result<Option<Vec<Comment>>> {
    cache::read_comments(&comments_path(&config.data_home, user, project))
}
