use super::api::CommentReplyResponse;
use super::{RedditChannel, SeenComments};
use crate::channels::traits::{Channel, Comment, ReplySink};
use crate::error::TransportError;
use crate::llm::sanitize_api_error;
use anyhow::Context;
use async_trait::async_trait;

fn is_auth_failure(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<TransportError>(),
        Some(TransportError::Auth { .. })
    )
}

#[async_trait]
impl ReplySink for RedditChannel {
    async fn reply(&self, comment_id: &str, text: &str) -> anyhow::Result<()> {
        let token = self.access_token().await?;
        let thing_id = format!("t1_{comment_id}");

        let response = self
            .client
            .post(self.api_url("/api/comment"))
            .bearer_auth(&token)
            .header("User-Agent", &self.user_agent)
            .form(&[
                ("api_type", "json"),
                ("thing_id", thing_id.as_str()),
                ("text", text),
            ])
            .send()
            .await
            .context("Reddit comment request failed")?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.invalidate_token().await;
        }
        if !response.status().is_success() {
            let status = response.status();
            let err = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(TransportError::Reply {
                channel: "reddit".into(),
                message: format!("{status}: {}", sanitize_api_error(&err)),
            }
            .into());
        }

        let body: CommentReplyResponse = response
            .json()
            .await
            .context("Reddit comment response decode failed")?;
        if !body.json.errors.is_empty() {
            let errors = serde_json::Value::Array(body.json.errors).to_string();
            return Err(TransportError::Reply {
                channel: "reddit".into(),
                message: sanitize_api_error(&errors),
            }
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl Channel for RedditChannel {
    fn name(&self) -> &str {
        "reddit"
    }

    async fn authenticate(&self) -> anyhow::Result<()> {
        let name = self.fetch_me().await.map_err(|e| {
            if is_auth_failure(&e) {
                e
            } else {
                self.auth_error(e.to_string())
            }
        })?;

        if !name.eq_ignore_ascii_case(&self.username) {
            tracing::warn!(
                "Reddit authenticated as u/{name}, but reddit.username is {}",
                self.username
            );
        }
        tracing::info!("Reddit authenticated as u/{name}");
        Ok(())
    }

    async fn listen(&self, tx: tokio::sync::mpsc::Sender<Comment>) -> anyhow::Result<()> {
        if self.subreddits.is_empty() {
            return Err(TransportError::Stream {
                channel: "reddit".into(),
                message: "no subreddits configured".into(),
            }
            .into());
        }

        let mut seen = SeenComments::default();
        let mut primed = false;

        tracing::info!(
            "Reddit channel streaming r/{}...",
            self.subreddits.join("+")
        );

        loop {
            if tx.is_closed() {
                return Ok(());
            }

            match self.fetch_recent_comments().await {
                Ok(comments) => {
                    for comment in comments {
                        if !seen.insert(&comment.id) || !primed {
                            continue;
                        }
                        if tx.send(comment).await.is_err() {
                            return Ok(());
                        }
                    }
                    if !primed {
                        tracing::debug!("Reddit stream primed; skipping existing comments");
                        primed = true;
                    }
                }
                Err(e) if is_auth_failure(&e) => return Err(e),
                Err(e) => tracing::warn!("Reddit poll error: {e}"),
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn health_check(&self) -> bool {
        self.fetch_me().await.is_ok()
    }
}
