//! Common test utilities for integration tests

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;
use reqwest::Method;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use producthunt_menu::host::{HostEnvironment, PromptChoice};
use producthunt_menu::ph::{HttpClient, HttpResponse, Post, PostUser, PostsResponse};
use producthunt_menu::prefs::PrefStore;
use producthunt_menu::time::Clock;

pub const POSTS_URL: &str = "https://api.producthunt.com/v1/posts";
pub const POSTS_YESTERDAY_URL: &str = "https://api.producthunt.com/v1/posts?days_ago=1";
pub const ME_URL: &str = "https://api.producthunt.com/v1/me";

/// Creates a test post
pub fn make_post(name: &str, created_at: &str) -> Post {
    Post {
        name: name.to_string(),
        tagline: format!("{name} tagline"),
        redirect_url: format!("https://www.producthunt.com/r/{name}"),
        discussion_url: format!("https://www.producthunt.com/posts/{name}"),
        votes_count: 100,
        comments_count: 25,
        user: PostUser {
            name: "Jane Hunter".to_string(),
            profile_url: "https://www.producthunt.com/@jane".to_string(),
        },
        created_at: created_at.to_string(),
    }
}

/// Creates a listings envelope for the given post names
pub fn posts_response(names: &[&str]) -> PostsResponse {
    PostsResponse {
        posts: names
            .iter()
            .map(|n| make_post(n, "2016-05-12T09:00:00+00:00"))
            .collect(),
    }
}

/// A fixed point in time for deterministic relative dates
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 5, 12, 15, 0, 0).unwrap()
}

/// Clock pinned to `test_now`
#[derive(Debug, Clone, Copy)]
pub struct TestClock;

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        test_now()
    }
}

/// Mock HTTP transport with canned per-URL responses
#[derive(Debug, Clone, Default)]
pub struct MockHttp {
    responses: Arc<RwLock<HashMap<String, (u16, String)>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.to_string(), (status, body.into()));
        self
    }

    pub fn on_get_json<T: serde::Serialize>(self, url: &str, data: &T) -> Self {
        let body = serde_json::to_string(data).expect("Failed to serialize mock data");
        self.on_get(url, 200, body)
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttp {
    async fn send(&self, _method: Method, url: &str, _headers: &HeaderMap) -> Result<HttpResponse> {
        self.requests.write().unwrap().push(url.to_string());

        let responses = self.responses.read().unwrap();
        let (status, body) = responses
            .get(url)
            .ok_or_else(|| anyhow::anyhow!("No mock response configured for URL: {}", url))?;

        Ok(HttpResponse {
            status: *status,
            body: body.clone(),
        })
    }
}

/// In-memory preference store
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

#[async_trait]
impl PrefStore for MemoryStore {
    async fn load_token(&self) -> Result<Option<String>> {
        Ok(self.token.read().unwrap().clone())
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        *self.token.write().unwrap() = Some(token.to_string());
        Ok(())
    }

    async fn clear_token(&self) -> Result<()> {
        *self.token.write().unwrap() = None;
        Ok(())
    }
}

/// Scripted host: canned prompt choice and clipboard, recorded effects
pub struct ScriptedHost {
    pub choice: PromptChoice,
    pub clipboard: Option<String>,
    pub opened_urls: Mutex<Vec<String>>,
    pub notifications: Mutex<Vec<String>>,
}

impl ScriptedHost {
    pub fn new(choice: PromptChoice, clipboard: Option<&str>) -> Self {
        Self {
            choice,
            clipboard: clipboard.map(str::to_string),
            opened_urls: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// A host that is never expected to interact
    pub fn idle() -> Self {
        Self::new(PromptChoice::Cancelled, None)
    }
}

impl HostEnvironment for ScriptedHost {
    fn open_url(&self, url: &str) -> Result<()> {
        self.opened_urls.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn prompt_for_token(
        &self,
        _title: &str,
        _message: &str,
        _ok_label: &str,
        _cancel_label: &str,
    ) -> PromptChoice {
        self.choice
    }

    fn read_clipboard(&self) -> Option<String> {
        self.clipboard.clone()
    }

    fn notify(&self, _title: &str, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }
}
