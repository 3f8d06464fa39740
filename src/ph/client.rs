use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::http::{HttpClient, ReqwestClient};
use super::types::{ApiErrorBody, Post, PostsResponse};
use crate::error::{ActionError, ErrorKind};
use crate::prefs::PrefStore;

const API_BASE_URL: &str = "https://api.producthunt.com/v1/";

/// Product Hunt v1 API client
///
/// Owns the current credential and persists it through the preference store.
/// Generic over the HTTP client implementation for testability.
pub struct PhClient<H: HttpClient = ReqwestClient> {
    http: H,
    store: Arc<dyn PrefStore>,
    token: RwLock<Option<String>>,
}

impl PhClient<ReqwestClient> {
    /// Creates a new API client with the default HTTP implementation
    pub fn new(store: Arc<dyn PrefStore>) -> Self {
        Self {
            http: ReqwestClient::new(),
            store,
            token: RwLock::new(None),
        }
    }
}

impl<H: HttpClient> PhClient<H> {
    /// Loads the persisted credential into memory, if one exists
    ///
    /// Called once at the start of a run; afterwards the in-memory copy is
    /// authoritative until `set_token` or `clear_token`. An empty persisted
    /// string counts as no credential, so the acquisition prompt still runs.
    pub async fn restore_token(&self) -> anyhow::Result<()> {
        if let Some(token) = self.store.load_token().await? {
            if !token.is_empty() {
                *self.token.write().await = Some(token);
            }
        }
        Ok(())
    }

    /// Returns the current credential
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Stores a credential in memory and in the preference store
    ///
    /// No validation happens here; callers probe with `test_token` first.
    pub async fn set_token(&self, token: &str) -> anyhow::Result<()> {
        self.store.save_token(token).await?;
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    /// Drops the credential from memory and from the preference store
    pub async fn clear_token(&self) -> anyhow::Result<()> {
        self.store.clear_token().await?;
        *self.token.write().await = None;
        Ok(())
    }

    /// Probes the `me` endpoint to check whether a token works
    ///
    /// Fails closed: an absent or empty token short-circuits to `false`
    /// without a network call, and any error reports `false`, so a network
    /// failure looks the same as a rejected token here.
    pub async fn test_token(&self, token: Option<&str>) -> bool {
        let Some(token) = token else {
            return false;
        };
        if token.is_empty() {
            return false;
        }

        self.request::<serde_json::Value>("me", Method::GET, Some(token))
            .await
            .is_ok()
    }

    /// Fetches the ranked posts for a day offset (0 = today)
    ///
    /// Omitting the offset fetches the most recent window. Server ranking
    /// order is preserved in the returned sequence.
    ///
    /// Returns `ErrorKind::TokenInvalid` for 401 responses; the stored
    /// credential is left in place so the caller decides whether to clear it.
    pub async fn get_posts(&self, days_ago: Option<u32>) -> Result<Vec<Post>, ActionError> {
        let path = match days_ago {
            Some(n) => format!("posts?days_ago={n}"),
            None => "posts".to_string(),
        };

        let response: PostsResponse = self.request(&path, Method::GET, None).await?;
        Ok(response.posts)
    }

    /// Issues an authenticated request against the API
    ///
    /// An explicit token overrides the stored one; with neither present the
    /// call fails before touching the network.
    async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        token: Option<&str>,
    ) -> Result<T, ActionError> {
        let token = match token {
            Some(t) => t.to_string(),
            None => self
                .token()
                .await
                .ok_or_else(|| ActionError::new(ErrorKind::TokenMissing))?,
        };
        if token.is_empty() {
            return Err(ActionError::new(ErrorKind::TokenMissing));
        }
        if path.is_empty() {
            return Err(ActionError::with_message(
                ErrorKind::ParameterMissing,
                "Product Hunt API: path is missing",
            ));
        }

        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {token}").parse().map_err(|_| {
            ActionError::with_message(ErrorKind::Unknown, "Token contains invalid characters")
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let url = format!("{API_BASE_URL}{path}");
        let response = self
            .http
            .send(method, &url, &headers)
            .await
            .map_err(|e| ActionError::with_message(ErrorKind::Unknown, e.to_string()))?;

        if response.is_unauthorized() {
            // Presumed revoked. Clearing the stored token is the caller's job.
            return Err(ActionError::new(ErrorKind::TokenInvalid));
        }

        if !response.is_success() {
            let body: ApiErrorBody = response.json().unwrap_or_default();
            return Err(match (body.error, body.error_description) {
                (Some(error), Some(description)) => {
                    ActionError::with_description(ErrorKind::Api, error, description)
                }
                (Some(error), None) => ActionError::with_message(ErrorKind::Api, error),
                _ => ActionError::new(ErrorKind::Api),
            });
        }

        response.json().map_err(|e| {
            ActionError::with_description(
                ErrorKind::Api,
                "Unexpected response from API server",
                e.to_string(),
            )
        })
    }
}

impl<H: HttpClient> PhClient<H> {
    /// Creates an API client with a custom HTTP implementation
    ///
    /// Mainly for injecting a mock transport in tests.
    pub fn with_http_client(store: Arc<dyn PrefStore>, http: H) -> Self {
        Self {
            http,
            store,
            token: RwLock::new(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ph::http::mock::MockHttpClient;
    use crate::ph::types::PostUser;
    use crate::prefs::mock::MemoryPrefStore;

    const POSTS_URL: &str = "https://api.producthunt.com/v1/posts";
    const POSTS_YESTERDAY_URL: &str = "https://api.producthunt.com/v1/posts?days_ago=1";
    const ME_URL: &str = "https://api.producthunt.com/v1/me";

    fn make_post(name: &str) -> Post {
        Post {
            name: name.to_string(),
            tagline: format!("{name} tagline"),
            redirect_url: format!("https://www.producthunt.com/r/{name}"),
            discussion_url: format!("https://www.producthunt.com/posts/{name}"),
            votes_count: 100,
            comments_count: 10,
            user: PostUser {
                name: "Jane Hunter".to_string(),
                profile_url: "https://www.producthunt.com/@jane".to_string(),
            },
            created_at: "2016-05-12T09:00:00-07:00".to_string(),
        }
    }

    fn make_posts_response(names: &[&str]) -> PostsResponse {
        PostsResponse {
            posts: names.iter().map(|n| make_post(n)).collect(),
        }
    }

    async fn client_with_token(mock: MockHttpClient) -> PhClient<MockHttpClient> {
        let client = PhClient::with_http_client(Arc::new(MemoryPrefStore::new()), mock);
        client.set_token("stored_token").await.unwrap();
        client
    }

    #[tokio::test]
    async fn get_posts_preserves_server_order() {
        let mock = MockHttpClient::new()
            .on_get_json(POSTS_URL, &make_posts_response(&["Zebra", "Apple", "Mango"]));
        let client = client_with_token(mock).await;

        let posts = client.get_posts(None).await.unwrap();

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].name, "Zebra");
        assert_eq!(posts[1].name, "Apple");
        assert_eq!(posts[2].name, "Mango");
    }

    #[tokio::test]
    async fn get_posts_serializes_day_offset() {
        let mock = MockHttpClient::new()
            .on_get_json(POSTS_YESTERDAY_URL, &make_posts_response(&["Old"]));
        let client = client_with_token(mock.clone()).await;

        let posts = client.get_posts(Some(1)).await.unwrap();

        assert_eq!(posts.len(), 1);
        let requests = mock.get_requests();
        assert_eq!(requests[0].url, POSTS_YESTERDAY_URL);
    }

    #[tokio::test]
    async fn get_posts_without_token_fails_before_network() {
        let mock = MockHttpClient::new();
        let client = PhClient::with_http_client(Arc::new(MemoryPrefStore::new()), mock.clone());

        let err = client.get_posts(None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TokenMissing);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn unauthorized_maps_to_token_invalid_without_clearing() {
        let mock = MockHttpClient::new().on_get(POSTS_URL, 401, "{}");
        let client = client_with_token(mock).await;

        let err = client.get_posts(None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TokenInvalid);
        assert_eq!(err.message(), "Invalid token");
        // The client leaves revocation handling to the orchestrator.
        assert_eq!(client.token().await.as_deref(), Some("stored_token"));
    }

    #[tokio::test]
    async fn server_error_carries_api_error_fields() {
        let mock = MockHttpClient::new().on_get(
            POSTS_URL,
            429,
            r#"{"error": "rate_limited", "error_description": "slow down"}"#,
        );
        let client = client_with_token(mock).await;

        let err = client.get_posts(None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), "rate_limited");
        assert_eq!(err.description(), Some("slow down"));
    }

    #[tokio::test]
    async fn server_error_without_fields_uses_default_message() {
        let mock = MockHttpClient::new().on_get(POSTS_URL, 500, "not even json");
        let client = client_with_token(mock).await;

        let err = client.get_posts(None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), "Error occurred on API server");
    }

    #[tokio::test]
    async fn malformed_success_body_is_an_api_error() {
        let mock = MockHttpClient::new().on_get(POSTS_URL, 200, r#"{"unexpected": true}"#);
        let client = client_with_token(mock).await;

        let err = client.get_posts(None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), "Unexpected response from API server");
        assert!(err.description().is_some());
    }

    #[tokio::test]
    async fn transport_failure_maps_to_unknown() {
        // No response configured, so the mock fails the send itself.
        let mock = MockHttpClient::new();
        let client = client_with_token(mock).await;

        let err = client.get_posts(None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[tokio::test]
    async fn request_sends_auth_and_content_type_headers() {
        let mock = MockHttpClient::new().on_get_json(POSTS_URL, &make_posts_response(&["One"]));
        let client = client_with_token(mock.clone()).await;

        client.get_posts(None).await.unwrap();

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].headers.get("Authorization").unwrap(),
            "Bearer stored_token"
        );
        assert_eq!(
            requests[0].headers.get("Content-Type").unwrap(),
            "application/json"
        );
    }

    // === test_token ===

    #[tokio::test]
    async fn test_token_absent_or_empty_is_false_without_network() {
        let mock = MockHttpClient::new();
        let client = PhClient::with_http_client(Arc::new(MemoryPrefStore::new()), mock.clone());

        assert!(!client.test_token(None).await);
        assert!(!client.test_token(Some("")).await);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_token_probes_me_with_candidate_token() {
        let mock = MockHttpClient::new().on_get(ME_URL, 200, r#"{"user": {}}"#);
        let client = PhClient::with_http_client(Arc::new(MemoryPrefStore::new()), mock.clone());

        assert!(client.test_token(Some("candidate")).await);

        let requests = mock.get_requests();
        assert_eq!(requests[0].url, ME_URL);
        assert_eq!(
            requests[0].headers.get("Authorization").unwrap(),
            "Bearer candidate"
        );
    }

    #[tokio::test]
    async fn test_token_swallows_rejection_and_transport_failure() {
        let rejecting = MockHttpClient::new().on_get(ME_URL, 401, "{}");
        let client = PhClient::with_http_client(Arc::new(MemoryPrefStore::new()), rejecting);
        assert!(!client.test_token(Some("revoked")).await);

        // Nothing configured: the send itself errors, still just `false`.
        let failing = MockHttpClient::new();
        let client = PhClient::with_http_client(Arc::new(MemoryPrefStore::new()), failing);
        assert!(!client.test_token(Some("whatever")).await);
    }

    // === token lifecycle ===

    #[tokio::test]
    async fn set_token_persists_to_store() {
        let store = Arc::new(MemoryPrefStore::new());
        let client = PhClient::with_http_client(store.clone(), MockHttpClient::new());

        client.set_token("fresh").await.unwrap();

        assert_eq!(client.token().await.as_deref(), Some("fresh"));
        assert_eq!(store.load_token().await.unwrap().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn clear_token_removes_memory_and_store_copies() {
        let store = Arc::new(MemoryPrefStore::new());
        let client = PhClient::with_http_client(store.clone(), MockHttpClient::new());
        client.set_token("doomed").await.unwrap();

        client.clear_token().await.unwrap();

        assert_eq!(client.token().await, None);
        assert_eq!(store.load_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn restore_token_treats_persisted_empty_string_as_absent() {
        let store = Arc::new(MemoryPrefStore::with_token(""));
        let client = PhClient::with_http_client(store, MockHttpClient::new());

        client.restore_token().await.unwrap();

        assert_eq!(client.token().await, None);
    }

    #[tokio::test]
    async fn restore_token_loads_persisted_credential() {
        let store = Arc::new(MemoryPrefStore::with_token("persisted"));
        let client = PhClient::with_http_client(store, MockHttpClient::new());

        assert_eq!(client.token().await, None);
        client.restore_token().await.unwrap();
        assert_eq!(client.token().await.as_deref(), Some("persisted"));
    }
}
