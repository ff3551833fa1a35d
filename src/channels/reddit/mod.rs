mod api;
mod handler;

use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::sync::Mutex;

use crate::channels::traits::Comment;
use crate::config::RedditConfig;
use crate::error::{ConfigError, TransportError};
use crate::llm::{build_provider_client_with_timeout, sanitize_api_error};
use api::{Listing, MeResponse, TokenResponse};

const DEFAULT_AUTH_BASE: &str = "https://www.reddit.com";
const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";
/// Refresh the bearer token this long before Reddit expires it.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);
const LISTING_LIMIT: &str = "100";
/// Upper bound on remembered comment ids.
const SEEN_CAPACITY: usize = 2048;

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Streams new comments from a set of subreddits and posts replies.
pub struct RedditChannel {
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
    user_agent: String,
    subreddits: Vec<String>,
    poll_interval: Duration,
    auth_base: String,
    api_base: String,
    token: Mutex<Option<CachedToken>>,
    client: reqwest::Client,
}

impl RedditChannel {
    pub fn new(
        client_id: String,
        client_secret: String,
        username: String,
        password: String,
        subreddits: Vec<String>,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            username,
            password,
            user_agent: "roastbot/0.1".into(),
            subreddits,
            poll_interval: Duration::from_secs(5),
            auth_base: DEFAULT_AUTH_BASE.into(),
            api_base: DEFAULT_API_BASE.into(),
            token: Mutex::new(None),
            client: build_provider_client_with_timeout(30),
        }
    }

    pub fn from_config(config: &RedditConfig) -> Result<Self, ConfigError> {
        let required = |value: &Option<String>, key: &'static str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self::new(
            required(&config.client_id, "reddit.client_id")?,
            required(&config.client_secret, "reddit.client_secret")?,
            required(&config.username, "reddit.username")?,
            required(&config.password, "reddit.password")?,
            config.subreddits.clone(),
        )
        .with_user_agent(&config.user_agent)
        .with_poll_interval(Duration::from_secs(config.poll_interval_secs.max(1))))
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Point the channel at other hosts (self-hosted proxies, tests).
    #[must_use]
    pub fn with_base_urls(mut self, auth_base: &str, api_base: &str) -> Self {
        self.auth_base = auth_base.trim_end_matches('/').to_string();
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    fn stream_url(&self) -> String {
        self.api_url(&format!("/r/{}/comments", self.subreddits.join("+")))
    }

    fn auth_error(&self, message: impl Into<String>) -> anyhow::Error {
        TransportError::Auth {
            channel: "reddit".into(),
            message: message.into(),
        }
        .into()
    }

    /// Current bearer token, fetching a new one when absent or near expiry.
    async fn access_token(&self) -> anyhow::Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref()
            && Instant::now() < cached.expires_at
        {
            return Ok(cached.access_token.clone());
        }

        let fresh = self.fetch_token().await?;
        let access_token = fresh.access_token.clone();
        *guard = Some(fresh);
        Ok(access_token)
    }

    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    async fn fetch_token(&self) -> anyhow::Result<CachedToken> {
        let response = self
            .client
            .post(format!("{}/api/v1/access_token", self.auth_base))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header("User-Agent", &self.user_agent)
            .form(&[
                ("grant_type", "password"),
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await
            .context("Reddit token request failed")?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.auth_error(format!(
                "token request rejected ({status}): {}",
                sanitize_api_error(&body)
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Reddit token request failed ({status}): {}",
                sanitize_api_error(&body)
            );
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Reddit token response decode failed")?;

        // Reddit answers bad passwords with 200 and an `error` field.
        let Some(access_token) = token.access_token.filter(|t| !t.is_empty()) else {
            let reason = token.error.unwrap_or_else(|| "no access token".into());
            return Err(self.auth_error(reason));
        };

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        Ok(CachedToken {
            access_token,
            expires_at: Instant::now() + lifetime,
        })
    }

    /// Authorized GET against the OAuth API host.
    async fn get_authorized(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> anyhow::Result<reqwest::Response> {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&token)
            .header("User-Agent", &self.user_agent)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Reddit request to {url} failed"))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.invalidate_token().await;
            anyhow::bail!("Reddit rejected the bearer token; refreshing");
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Reddit API error ({status}): {}", sanitize_api_error(&body));
        }

        Ok(response)
    }

    async fn fetch_me(&self) -> anyhow::Result<String> {
        let me: MeResponse = self
            .get_authorized(&self.api_url("/api/v1/me"), &[])
            .await?
            .json()
            .await
            .context("Reddit identity response decode failed")?;
        Ok(me.name)
    }

    /// Latest comments across the configured subreddits, oldest first.
    async fn fetch_recent_comments(&self) -> anyhow::Result<Vec<Comment>> {
        let listing: Listing = self
            .get_authorized(
                &self.stream_url(),
                &[("limit", LISTING_LIMIT), ("raw_json", "1")],
            )
            .await?
            .json()
            .await
            .context("Reddit listing decode failed")?;
        Ok(listing.into_comments())
    }
}

/// Remembers delivered comment ids so overlapping polls don't repeat them.
#[derive(Default)]
struct SeenComments {
    ids: HashSet<String>,
    order: VecDeque<String>,
}

impl SeenComments {
    /// Returns `true` when `id` was not seen before.
    fn insert(&mut self, id: &str) -> bool {
        if !self.ids.insert(id.to_string()) {
            return false;
        }
        self.order.push_back(id.to_string());
        while self.order.len() > SEEN_CAPACITY {
            if let Some(evicted) = self.order.pop_front() {
                self.ids.remove(&evicted);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests;
