mod behavior;
mod core;
mod learning;
mod llm;
mod reddit;
mod safety;

pub use behavior::BehaviorConfig;
pub use self::core::Config;
pub use learning::LearningConfig;
pub use llm::LlmConfig;
pub use reddit::RedditConfig;
pub use safety::SafetyConfig;
