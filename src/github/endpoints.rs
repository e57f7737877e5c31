// GitHub API endpoint functions.
// Typed, paginated access to repository issue comments.

use chrono::{DateTime, SecondsFormat, Utc};
use log::Level;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Comment, CommentState};

/// GitHub silently caps `per_page` at this value.
pub const MAX_PER_PAGE: u32 = 100;

/// Filters and paging limits for listing repository comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentQuery {
    pub state: CommentState,
    /// Only comments updated at or after this time.
    pub since: Option<DateTime<Utc>>,
    /// Upper bound on the number of pages requested.
    pub max_page: u32,
    pub per_page: u32,
    /// Report each page at info level instead of debug.
    pub verbose: bool,
}

impl Default for CommentQuery {
    fn default() -> Self {
        Self {
            state: CommentState::All,
            since: None,
            max_page: 100,
            per_page: 500,
            verbose: false,
        }
    }
}

impl CommentQuery {
    /// Page size actually sent to the API.
    pub fn page_size(&self) -> u32 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("state", self.state.as_str().to_string()),
            ("page", page.to_string()),
            ("per_page", self.page_size().to_string()),
        ];
        if let Some(since) = self.since {
            params.push(("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        params
    }
}

/// Endpoint listing every issue and pull request comment of a repository.
pub fn repo_comments_endpoint(owner: &str, repo: &str) -> String {
    format!("/repos/{}/{}/issues/comments", owner, repo)
}

impl GitHubClient {
    /// Get one page of issue comments for a repository.
    pub async fn get_repo_comments_page(
        &self,
        owner: &str,
        repo: &str,
        query: &CommentQuery,
        page: u32,
    ) -> Result<Vec<Comment>> {
        let response = self
            .get_with_params(&repo_comments_endpoint(owner, repo), &query.params(page))
            .await?;
        let comments: Vec<Comment> = response.json().await?;
        Ok(comments)
    }

    /// Get issue comments for a repository, walking pages until a short page
    /// or `max_page` is reached. Any failed page fails the whole listing.
    pub async fn get_repo_comments(
        &self,
        owner: &str,
        repo: &str,
        query: &CommentQuery,
    ) -> Result<Vec<Comment>> {
        let level = if query.verbose {
            Level::Info
        } else {
            Level::Debug
        };
        let page_size = query.page_size() as usize;
        let mut comments = Vec::new();

        for page in 1..=query.max_page {
            let batch = self.get_repo_comments_page(owner, repo, query, page).await?;
            let fetched = batch.len();
            comments.extend(batch);

            log::log!(
                level,
                "{}/{}: page {}/{} returned {} comments ({} total)",
                owner,
                repo,
                page,
                query.max_page,
                fetched,
                comments.len()
            );

            if fetched < page_size {
                break;
            }
        }

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WatchtowerError;
    use crate::github::types::Credentials;
    use chrono::TimeZone;
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENDPOINT: &str = "/repos/octo/hello/issues/comments";

    fn comments_json(ids: std::ops::Range<u64>) -> Value {
        Value::Array(
            ids.map(|id| json!({ "id": id, "body": format!("comment {}", id) }))
                .collect(),
        )
    }

    async fn client(server: &MockServer) -> GitHubClient {
        GitHubClient::with_base_url(Credentials::parse("octo:token").unwrap(), &server.uri())
            .unwrap()
    }

    #[test]
    fn test_page_size_is_clamped() {
        let query = CommentQuery::default();
        assert_eq!(query.per_page, 500);
        assert_eq!(query.page_size(), MAX_PER_PAGE);

        let query = CommentQuery {
            per_page: 0,
            ..CommentQuery::default()
        };
        assert_eq!(query.page_size(), 1);
    }

    #[test]
    fn test_params_include_since_in_iso8601() {
        let query = CommentQuery {
            state: CommentState::Closed,
            since: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            per_page: 30,
            ..CommentQuery::default()
        };
        let params = query.params(2);
        assert!(params.contains(&("state", "closed".to_string())));
        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("per_page", "30".to_string())));
        assert!(params.contains(&("since", "2024-03-01T12:00:00Z".to_string())));
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(repo_comments_endpoint("octo", "hello"), ENDPOINT);
    }

    #[tokio::test]
    async fn test_walks_pages_until_short_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "2"))
            .and(query_param("state", "all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(comments_json(1..3)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(comments_json(3..4)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let query = CommentQuery {
            per_page: 2,
            ..CommentQuery::default()
        };
        let comments = client(&server)
            .await
            .get_repo_comments("octo", "hello", &query)
            .await
            .unwrap();

        let ids: Vec<u64> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_stops_at_max_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(comments_json(1..3)))
            .expect(2)
            .mount(&server)
            .await;

        let query = CommentQuery {
            per_page: 2,
            max_page: 2,
            ..CommentQuery::default()
        };
        let comments = client(&server)
            .await
            .get_repo_comments("octo", "hello", &query)
            .await
            .unwrap();

        // Both pages return the same ids; deduplication is the cache's job.
        assert_eq!(comments.len(), 4);
    }

    #[tokio::test]
    async fn test_failed_page_fails_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(comments_json(1..3)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let query = CommentQuery {
            per_page: 2,
            ..CommentQuery::default()
        };
        let result = client(&server)
            .await
            .get_repo_comments("octo", "hello", &query)
            .await;

        assert!(matches!(
            result,
            Err(WatchtowerError::Http { status: 500, .. })
        ));
    }
}
