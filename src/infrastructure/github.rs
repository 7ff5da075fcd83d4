use crate::domain::{
    error::{Result, SearchError},
    models::{GithubUser, SearchResponse},
    search::SearchFacade,
};
use crate::infrastructure::{cache::ExpiringCache, store::KeyValueStore};

use async_trait::async_trait;
use reqwest::{header, Client, Response, Url};
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("typeahead/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

type SharedCache = Mutex<ExpiringCache<Box<dyn KeyValueStore>>>;

pub struct GitHubClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
    cache: SharedCache,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

impl GitHubClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        cache: ExpiringCache<Box<dyn KeyValueStore>>,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| anyhow::anyhow!("Invalid API base URL {base_url}: {e}"))?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;
        Ok(Self {
            http,
            base_url,
            token,
            cache: Mutex::new(cache),
        })
    }

    /// `{base}/search/users?q={prefix}+in:login`
    pub fn search_url(&self, prefix: &str) -> Result<Url> {
        let mut url = self.endpoint(&["search", "users"])?;
        url.query_pairs_mut()
            .append_pair("q", &format!("{prefix} in:login"));
        Ok(url)
    }

    /// `{base}/users/{login}`
    pub fn user_url(&self, login: &str) -> Result<Url> {
        if login.trim().is_empty() {
            return Err(SearchError::InvalidRequest("empty login".to_string()));
        }
        self.endpoint(&["users", login])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                SearchError::InvalidRequest(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn cached<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.cache.lock().ok()?.get(key)
    }

    fn remember<T: serde::Serialize>(&self, key: &str, value: &T) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, value);
        }
    }

    async fn get(&self, url: Url) -> Result<Response> {
        log::info!("GET {url}");
        let mut request = self
            .http
            .get(url.clone())
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ApiMessage>()
            .await
            .ok()
            .map(|body| body.message);
        log::warn!("GET {url} failed with {status}");
        Err(SearchError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            message,
        })
    }
}

#[async_trait]
impl SearchFacade for GitHubClient {
    async fn search_by_prefix(&self, prefix: &str) -> Result<Vec<GithubUser>> {
        let url = self.search_url(prefix)?;
        let key = url.to_string();
        if let Some(users) = self.cached::<Vec<GithubUser>>(&key) {
            return Ok(users);
        }

        let body: SearchResponse = self
            .get(url)
            .await?
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        self.remember(&key, &body.items);
        Ok(body.items)
    }

    async fn fetch_exact(&self, login: &str) -> Result<GithubUser> {
        let url = self.user_url(login)?;
        let key = url.to_string();
        if let Some(user) = self.cached::<GithubUser>(&key) {
            return Ok(user);
        }

        let user: GithubUser = self
            .get(url)
            .await?
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        self.remember(&key, &user);
        Ok(user)
    }

    fn origin(&self) -> String {
        self.base_url.origin().ascii_serialization()
    }
}
