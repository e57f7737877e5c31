// GitHub API types for issue comments.
// Comment records keep every field the API returns; only `id` is required.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, WatchtowerError};

/// One issue or pull request comment.
///
/// Fields other than `id` are stored as returned by the API so that the cache
/// round-trips whatever schema GitHub served at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Comment {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    /// Set an additional field, replacing any previous value.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn body(&self) -> Option<&str> {
        self.fields.get("body").and_then(Value::as_str)
    }

    /// Login of the comment author.
    pub fn author(&self) -> Option<&str> {
        self.fields
            .get("user")
            .and_then(|user| user.get("login"))
            .and_then(Value::as_str)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("created_at")
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("updated_at")
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Issue state filter sent with comment requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentState {
    #[default]
    All,
    Open,
    Closed,
}

impl CommentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentState::All => "all",
            CommentState::Open => "open",
            CommentState::Closed => "closed",
        }
    }
}

impl fmt::Display for CommentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `user:token` pair used for HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub token: String,
}

impl Credentials {
    /// Parse a colon separated `user:token` pair.
    ///
    /// Only the first colon splits, so tokens may themselves contain colons.
    pub fn parse(pair: &str) -> Result<Self> {
        let (user, token) = pair
            .split_once(':')
            .ok_or_else(|| WatchtowerError::InvalidAuth(redact(pair)))?;

        let user = user.trim();
        let token = token.trim();
        if user.is_empty() || token.is_empty() {
            return Err(WatchtowerError::InvalidAuth(redact(pair)));
        }

        Ok(Self {
            user: user.to_string(),
            token: token.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("token", &"***")
            .finish()
    }
}

/// Keep the user half of a malformed pair for error messages, never the token.
fn redact(pair: &str) -> String {
    match pair.split_once(':') {
        Some((user, _)) => format!("{}:***", user),
        None if pair.is_empty() => String::new(),
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comment_keeps_unknown_fields() {
        let raw = json!({
            "id": 42,
            "body": "looks good",
            "user": { "login": "octocat" },
            "issue_url": "https://api.github.com/repos/o/r/issues/7",
            "created_at": "2024-01-02T03:04:05Z",
            "reactions": { "+1": 2 }
        });

        let comment: Comment = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(comment.id, 42);
        assert_eq!(comment.body(), Some("looks good"));
        assert_eq!(comment.author(), Some("octocat"));
        assert_eq!(
            comment.created_at().unwrap().to_rfc3339(),
            "2024-01-02T03:04:05+00:00"
        );
        assert!(comment.updated_at().is_none());

        assert_eq!(serde_json::to_value(&comment).unwrap(), raw);
    }

    #[test]
    fn test_comment_requires_id() {
        let result: std::result::Result<Comment, _> =
            serde_json::from_value(json!({ "body": "no id" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_state_serializes_lowercase() {
        assert_eq!(CommentState::default(), CommentState::All);
        assert_eq!(
            serde_json::to_value(CommentState::Closed).unwrap(),
            json!("closed")
        );
        assert_eq!(CommentState::Open.to_string(), "open");
    }

    #[test]
    fn test_parse_credentials() {
        let creds = Credentials::parse("octocat:ghp_abc:def").unwrap();
        assert_eq!(creds.user, "octocat");
        assert_eq!(creds.token, "ghp_abc:def");
        assert!(!format!("{:?}", creds).contains("ghp_abc"));
    }

    #[test]
    fn test_parse_credentials_rejects_malformed() {
        for bad in ["", "tokenonly", ":token", "user:", " : "] {
            assert!(
                matches!(Credentials::parse(bad), Err(WatchtowerError::InvalidAuth(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_invalid_auth_message_hides_token() {
        let err = Credentials::parse("octocat:").unwrap_err();
        assert_eq!(err.to_string(), "Invalid auth \"octocat:***\": expected user:token");
    }
}
