mod builder;
mod engine;

pub use builder::PromptBuilder;
pub use engine::TeraEngine;
