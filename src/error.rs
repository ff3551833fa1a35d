use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `RoastBot`.
///
/// Startup and session failures surface through these variants so `main` can
/// decide whether to abort. Per-comment failures never reach this type; they
/// resolve to a [`crate::pipeline::SkipReason`] instead.
#[derive(Debug, Error)]
pub enum BotError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Transport / Channel ─────────────────────────────────────────────
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    // ── Learning / Style memory ─────────────────────────────────────────
    #[error("learning: {0}")]
    Learning(#[from] LearningError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("provider {provider} returned an empty completion")]
    EmptyCompletion { provider: String },

    #[error("provider {provider} authentication failed")]
    Auth { provider: String },
}

// ─── Transport errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("channel {channel} authentication failed: {message}")]
    Auth { channel: String, message: String },

    #[error("channel {channel} stream failed: {message}")]
    Stream { channel: String, message: String },

    #[error("channel {channel} reply failed: {message}")]
    Reply { channel: String, message: String },
}

// ─── Learning errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LearningError {
    #[error("style store read failed: {0}")]
    Read(String),

    #[error("style store write failed: {0}")]
    Write(String),

    #[error("style state is corrupt: {0}")]
    Corrupt(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, BotError>;
