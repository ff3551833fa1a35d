pub mod schema;

pub use schema::{
    BehaviorConfig, Config, LearningConfig, LlmConfig, RedditConfig, SafetyConfig,
};
