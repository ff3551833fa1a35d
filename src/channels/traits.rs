use async_trait::async_trait;

/// A comment received from a discussion platform.
///
/// `author` is `None` when the account has been deleted.
/// `channel` identifies where the comment was posted (e.g. the subreddit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub author: Option<String>,
    pub channel: String,
    pub permalink: Option<String>,
    pub created_utc: i64,
}

impl Comment {
    pub fn new(
        id: impl Into<String>,
        body: impl Into<String>,
        author: Option<&str>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            author: author.map(ToString::to_string),
            channel: channel.into(),
            permalink: None,
            created_utc: chrono::Utc::now().timestamp(),
        }
    }
}

/// Where replies are delivered.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Post `text` as a reply to the comment identified by `comment_id`.
    async fn reply(&self, comment_id: &str, text: &str) -> anyhow::Result<()>;
}

/// Core channel trait — implement for any discussion platform.
#[async_trait]
pub trait Channel: ReplySink {
    /// Human-readable channel name
    fn name(&self) -> &str;

    /// Verify credentials before streaming starts.
    async fn authenticate(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stream new comments into `tx` until the receiver closes (long-running).
    ///
    /// Only comments created after the call starts are delivered. An `Err`
    /// ends the session; the caller does not reconnect.
    async fn listen(&self, tx: tokio::sync::mpsc::Sender<Comment>) -> anyhow::Result<()>;

    /// Check if channel is healthy
    async fn health_check(&self) -> bool {
        true
    }
}
