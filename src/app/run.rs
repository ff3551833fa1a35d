use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::channels::{Channel, RedditChannel, spawn_listener};
use crate::config::Config;
use crate::error::{BotError, TransportError};
use crate::learning::{JsonFileStore, StyleMemory};
use crate::llm::{Provider, create_provider};
use crate::pipeline::{Decision, DecisionPipeline, SkipReason, pause};

/// Comments buffered between the listener and the worker.
const COMMENT_BUFFER: usize = 256;

/// Tally of decisions over one session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub seen: u64,
    pub replied: u64,
    pub guarded: u64,
    pub probability_misses: u64,
    pub rate_limited: u64,
    pub failures: u64,
}

impl SessionStats {
    fn record(&mut self, decision: &Decision) {
        self.seen += 1;
        match decision {
            Decision::Replied { .. } => self.replied += 1,
            Decision::Skipped(SkipReason::Guard(_)) => self.guarded += 1,
            Decision::Skipped(SkipReason::ProbabilityMiss) => self.probability_misses += 1,
            Decision::Skipped(SkipReason::RateLimited) => self.rate_limited += 1,
            Decision::Skipped(SkipReason::GenerationFailed | SkipReason::PostFailed) => {
                self.failures += 1;
            }
            Decision::Skipped(SkipReason::Cancelled) => {}
        }
    }
}

/// Open the persisted style memory for `config`.
pub fn open_style_memory(config: &Config) -> StyleMemory {
    let store = JsonFileStore::new(config.learning_data_path());
    StyleMemory::load(Box::new(store), config.learning.recent_capacity)
}

/// Start the bot: authenticate, then answer comments until `cancel` fires
/// or the stream fails.
pub async fn run(config: &Config, cancel: CancellationToken) -> anyhow::Result<()> {
    config.require_credentials()?;

    let provider: Arc<dyn Provider> = Arc::from(create_provider(&config.llm)?);
    let channel = Arc::new(RedditChannel::from_config(&config.reddit)?);

    channel
        .authenticate()
        .await
        .context("Reddit authentication failed")?;

    if let Err(e) = provider.warmup().await {
        tracing::warn!("Provider warmup failed (non-fatal): {e}");
    }

    let memory = open_style_memory(config);
    tracing::info!(
        store = %memory.location(),
        enabled = config.learning.enabled,
        "style memory ready"
    );

    let pipeline = DecisionPipeline::new(config, memory, provider, channel.clone())?;

    tracing::info!(
        subreddits = %config.reddit.subreddits.join("+"),
        probability = config.behavior.reply_probability,
        max_per_hour = config.behavior.max_replies_per_hour,
        "RoastBot started"
    );

    let stats = run_session(
        &pipeline,
        channel,
        Duration::from_secs(config.behavior.error_pause_secs),
        &cancel,
    )
    .await?;

    tracing::info!(
        seen = stats.seen,
        replied = stats.replied,
        rate_limited = stats.rate_limited,
        failures = stats.failures,
        "RoastBot stopped"
    );
    Ok(())
}

/// Consume `channel` one comment at a time until cancelled or the stream ends.
///
/// A listener error ends the session with that error. Cancellation ends it
/// cleanly, interrupting any in-flight reply or pause.
pub async fn run_session(
    pipeline: &DecisionPipeline,
    channel: Arc<dyn Channel>,
    error_pause: Duration,
    cancel: &CancellationToken,
) -> crate::Result<SessionStats> {
    let channel_name = channel.name().to_string();
    let (tx, mut rx) = tokio::sync::mpsc::channel(COMMENT_BUFFER);
    let listener = spawn_listener(channel, tx);
    let mut stats = SessionStats::default();

    loop {
        let comment = tokio::select! {
            () = cancel.cancelled() => break,
            next = rx.recv() => match next {
                Some(comment) => comment,
                None => break,
            },
        };

        let decision = pipeline.process(&comment, cancel).await;
        stats.record(&decision);

        let keep_going = match decision {
            Decision::Replied { .. } => {
                let delay = pipeline.pacing_delay();
                tracing::info!("Sleeping for {} seconds...", delay.as_secs());
                pause(delay, cancel).await
            }
            Decision::Skipped(SkipReason::Cancelled) => false,
            Decision::Skipped(reason) if reason.is_failure() => pause(error_pause, cancel).await,
            Decision::Skipped(_) => true,
        };
        if !keep_going {
            break;
        }
    }

    if cancel.is_cancelled() {
        tracing::info!("Stopping...");
        listener.abort();
        return Ok(stats);
    }

    drop(rx);
    match listener.await {
        Ok(Ok(())) => Ok(stats),
        Ok(Err(e)) => Err(TransportError::Stream {
            channel: channel_name,
            message: format!("{e:#}"),
        }
        .into()),
        Err(e) => Err(BotError::Other(anyhow::anyhow!(
            "{channel_name} listener task failed: {e}"
        ))),
    }
}
