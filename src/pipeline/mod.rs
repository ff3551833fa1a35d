//! Per-comment decision flow: observe, gate, generate, format, post, record.

pub mod decision;
pub mod pacing;
pub mod sampler;

pub use decision::{Decision, DecisionPipeline, SkipReason};
pub use pacing::pause;
pub use sampler::{FixedSampler, RandomSampler, Sampler};
