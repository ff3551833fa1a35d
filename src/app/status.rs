use crate::config::Config;

fn configured(value: Option<&str>) -> &'static str {
    if value.is_some_and(|v| !v.trim().is_empty()) {
        "✓ set"
    } else {
        "✗ missing"
    }
}

/// Human-readable summary of the effective configuration. Secrets are
/// reported as set or missing, never printed.
pub fn render_status(config: &Config) -> String {
    let reddit = &config.reddit;
    let behavior = &config.behavior;
    let subreddits = if reddit.subreddits.is_empty() {
        "(none)".to_string()
    } else {
        reddit.subreddits.join(", ")
    };

    let mut lines = vec![
        "◆ RoastBot status".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Workspace   {}", config.workspace_dir.display()),
        format!("Config      {}", config.config_path.display()),
        String::new(),
        "Reddit".to_string(),
        format!("  client id      {}", configured(reddit.client_id.as_deref())),
        format!("  client secret  {}", configured(reddit.client_secret.as_deref())),
        format!("  username       {}", reddit.username.as_deref().unwrap_or("✗ missing")),
        format!("  password       {}", configured(reddit.password.as_deref())),
        format!("  subreddits     {subreddits}"),
        String::new(),
        "LLM".to_string(),
        format!("  endpoint       {}", config.llm.base_url),
        format!("  api key        {}", configured(config.llm.api_key.as_deref())),
        format!(
            "  model          {} (temperature {:.2}, max {} tokens)",
            config.llm.model, config.llm.temperature, config.llm.max_tokens
        ),
        String::new(),
        "Behavior".to_string(),
        format!("  probability    {:.2}", behavior.reply_probability),
        format!(
            "  rate limit     {} per {}s",
            behavior.max_replies_per_hour, behavior.rate_window_secs
        ),
        format!(
            "  reply delay    {}-{}s",
            behavior.min_reply_delay_secs, behavior.max_reply_delay_secs
        ),
        format!("  banned terms   {}", config.safety.banned_keywords.len()),
    ];

    lines.push(format!(
        "  learning       {}",
        if config.learning.enabled {
            format!("on ({})", config.learning_data_path().display())
        } else {
            "off".into()
        }
    ));

    lines.join("\n")
}
