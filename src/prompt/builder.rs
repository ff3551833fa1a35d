use super::engine::TeraEngine;
use tera::Context;

const SYSTEM_PROMPT_TEMPLATE: &str = "\
{{ base_prompt }}{% if style_context %}

Context from other users (Learn from this style):
{{ style_context }}{% endif %}";

const USER_PROMPT_TEMPLATE: &str = "\
Reddit Comment: \"{{ comment }}\"

Reply:";

const SYSTEM_PROMPT_NAME: &str = "system_prompt";
const USER_PROMPT_NAME: &str = "user_prompt";

/// Renders the two halves of a generation request.
pub struct PromptBuilder {
    engine: TeraEngine,
}

impl PromptBuilder {
    pub fn new() -> anyhow::Result<Self> {
        let mut engine = TeraEngine::new();
        engine.add_template(SYSTEM_PROMPT_NAME, SYSTEM_PROMPT_TEMPLATE)?;
        engine.add_template(USER_PROMPT_NAME, USER_PROMPT_TEMPLATE)?;
        Ok(Self { engine })
    }

    /// Configured system prompt, followed by the learned style context if any.
    pub fn system_prompt(&self, base_prompt: &str, style_context: &str) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("base_prompt", base_prompt);
        ctx.insert("style_context", style_context);
        self.engine.render(SYSTEM_PROMPT_NAME, &ctx)
    }

    pub fn user_prompt(&self, comment_body: &str) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("comment", comment_body);
        self.engine.render(USER_PROMPT_NAME, &ctx)
    }
}
