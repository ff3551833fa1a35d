use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::sampler::{RandomSampler, Sampler};
use crate::channels::traits::{Comment, ReplySink};
use crate::config::Config;
use crate::learning::StyleMemory;
use crate::llm::Provider;
use crate::prompt::PromptBuilder;
use crate::reply::ReplyFormatter;
use crate::security::{ContentGuard, GuardVerdict, RejectReason, ReplyRateLimiter};
use crate::util::log_snippet;

const COMMENT_LOG_CHARS: usize = 50;
const REPLY_LOG_CHARS: usize = 80;

/// Why a comment was not answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Guard(RejectReason),
    ProbabilityMiss,
    RateLimited,
    GenerationFailed,
    PostFailed,
    Cancelled,
}

impl SkipReason {
    pub fn is_rate_limited(self) -> bool {
        matches!(self, Self::RateLimited)
    }

    /// Failures against an external service; the runner backs off after these.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::GenerationFailed | Self::PostFailed)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guard(reason) => write!(f, "guard:{}", reason.code()),
            Self::ProbabilityMiss => f.write_str("probability_miss"),
            Self::RateLimited => f.write_str("rate_limited"),
            Self::GenerationFailed => f.write_str("generation_failed"),
            Self::PostFailed => f.write_str("post_failed"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Outcome of running one comment through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Replied { reply: String },
    Skipped(SkipReason),
}

impl Decision {
    pub fn is_replied(&self) -> bool {
        matches!(self, Self::Replied { .. })
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Replied { .. } => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

struct ReplySettings {
    reply_probability: f64,
    learning_enabled: bool,
    base_prompt: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    min_delay_secs: u64,
    max_delay_secs: u64,
}

/// Decides whether and how to answer each comment.
///
/// Owns the rate limiter and style memory for the session. One worker drives
/// it; both structures sit behind their own mutex so check-then-update stays
/// atomic if that ever changes.
pub struct DecisionPipeline {
    guard: ContentGuard,
    limiter: ReplyRateLimiter,
    memory: StyleMemory,
    prompts: PromptBuilder,
    formatter: ReplyFormatter,
    provider: Arc<dyn Provider>,
    sink: Arc<dyn ReplySink>,
    sampler: Box<dyn Sampler>,
    settings: ReplySettings,
}

impl DecisionPipeline {
    pub fn new(
        config: &Config,
        memory: StyleMemory,
        provider: Arc<dyn Provider>,
        sink: Arc<dyn ReplySink>,
    ) -> anyhow::Result<Self> {
        let behavior = &config.behavior;
        Ok(Self {
            guard: ContentGuard::from_config(config),
            limiter: ReplyRateLimiter::new(
                behavior.max_replies_per_hour,
                Duration::from_secs(behavior.rate_window_secs),
            ),
            memory,
            prompts: PromptBuilder::new()?,
            formatter: ReplyFormatter::default(),
            provider,
            sink,
            sampler: Box::new(RandomSampler),
            settings: ReplySettings {
                reply_probability: behavior.reply_probability,
                learning_enabled: config.learning.enabled,
                base_prompt: config.llm.system_prompt.clone(),
                model: config.llm.model.clone(),
                temperature: config.llm.temperature,
                max_tokens: config.llm.max_tokens,
                min_delay_secs: behavior.min_reply_delay_secs,
                max_delay_secs: behavior.max_reply_delay_secs,
            },
        })
    }

    #[must_use]
    pub fn with_sampler(mut self, sampler: Box<dyn Sampler>) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn rate_limiter(&self) -> &ReplyRateLimiter {
        &self.limiter
    }

    pub fn style_memory(&self) -> &StyleMemory {
        &self.memory
    }

    /// Random inter-reply delay within the configured bounds.
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_secs(
            self.sampler
                .delay_secs(self.settings.min_delay_secs, self.settings.max_delay_secs),
        )
    }

    fn should_observe(&self, comment: &Comment) -> bool {
        self.settings.learning_enabled
            && !comment.body.is_empty()
            && comment
                .author
                .as_deref()
                .is_some_and(|author| author != self.guard.bot_username())
    }

    /// Run one comment through every gate and, if it passes, answer it.
    ///
    /// `cancel` abandons an in-flight generation or post; an abandoned
    /// attempt leaves the rate limiter untouched.
    pub async fn process(&self, comment: &Comment, cancel: &CancellationToken) -> Decision {
        if self.should_observe(comment) {
            self.memory.observe(&comment.body);
        }

        if let GuardVerdict::Rejected(reason) = self.guard.validate(comment) {
            tracing::debug!(
                comment_id = %comment.id,
                reason = reason.code(),
                "comment rejected by guard"
            );
            return Decision::Skipped(SkipReason::Guard(reason));
        }

        let roll = self.sampler.probability();
        if roll > self.settings.reply_probability {
            tracing::debug!(comment_id = %comment.id, roll, "probability gate skipped comment");
            return Decision::Skipped(SkipReason::ProbabilityMiss);
        }

        if !self.limiter.can_reply(Instant::now()) {
            tracing::info!(
                comment_id = %comment.id,
                max = self.limiter.max_per_window(),
                "rate limit reached; skipping comment"
            );
            return Decision::Skipped(SkipReason::RateLimited);
        }

        tracing::info!(
            comment_id = %comment.id,
            author = comment.author.as_deref().unwrap_or_default(),
            channel = %comment.channel,
            permalink = comment.permalink.as_deref().unwrap_or_default(),
            created_utc = comment.created_utc,
            "replying to: {}",
            log_snippet(&comment.body, COMMENT_LOG_CHARS)
        );

        let context = if self.settings.learning_enabled {
            self.memory.build_context()
        } else {
            String::new()
        };

        let raw = tokio::select! {
            () = cancel.cancelled() => return Decision::Skipped(SkipReason::Cancelled),
            generated = self.generate(&comment.body, &context) => match generated {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(comment_id = %comment.id, "reply generation failed: {e:#}");
                    return Decision::Skipped(SkipReason::GenerationFailed);
                }
            },
        };

        let reply = self.formatter.format(&raw);

        let posted = tokio::select! {
            () = cancel.cancelled() => return Decision::Skipped(SkipReason::Cancelled),
            posted = self.sink.reply(&comment.id, &reply) => posted,
        };
        if let Err(e) = posted {
            tracing::warn!(comment_id = %comment.id, "posting reply failed: {e:#}");
            return Decision::Skipped(SkipReason::PostFailed);
        }

        self.limiter.record_reply(Instant::now());
        tracing::info!(
            comment_id = %comment.id,
            "replied: {}",
            log_snippet(&reply, REPLY_LOG_CHARS)
        );

        Decision::Replied { reply }
    }

    async fn generate(&self, body: &str, context: &str) -> anyhow::Result<String> {
        let system_prompt = self
            .prompts
            .system_prompt(&self.settings.base_prompt, context)?;
        let user_prompt = self.prompts.user_prompt(body)?;

        let text = self
            .provider
            .chat_with_system(
                Some(&system_prompt),
                &user_prompt,
                &self.settings.model,
                self.settings.temperature,
                self.settings.max_tokens,
            )
            .await?;

        if text.trim().is_empty() {
            anyhow::bail!("{} returned an empty reply", self.provider.name());
        }
        Ok(text)
    }
}
