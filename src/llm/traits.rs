use async_trait::async_trait;

/// A text-completion backend.
///
/// Any error is a generation failure for the comment at hand; callers never
/// propagate it further.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider identifier, used in logs and errors.
    fn name(&self) -> &str;

    async fn chat_with_system(
        &self,
        system_prompt: Option<&str>,
        message: &str,
        model: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> anyhow::Result<String>;

    /// Warm up the HTTP connection pool.
    async fn warmup(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
