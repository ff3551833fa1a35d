use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::app::run::{open_style_memory, run};
use crate::app::status::render_status;
use crate::channels::{Channel, RedditChannel};
use crate::cli::{Cli, Commands, LearningCommands};
use crate::config::Config;
use crate::learning::StyleMemory;
use crate::llm::{Provider, create_provider};

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Run => {
            let cancel = CancellationToken::new();
            let trigger = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Ctrl-C received; shutting down");
                    trigger.cancel();
                }
            });
            run(&config, cancel).await
        }
        Commands::Check => check(&config).await,
        Commands::Learning { learning_command } => {
            handle_learning(learning_command, &open_style_memory(&config))
        }
    }
}

async fn check(config: &Config) -> Result<()> {
    println!("{}", render_status(config));
    println!();

    config.require_credentials()?;
    println!("✓ configuration valid");

    let channel = RedditChannel::from_config(&config.reddit)?;
    channel.authenticate().await?;
    println!("✓ Reddit authentication ok");
    if channel.health_check().await {
        println!("✓ Reddit API healthy");
    } else {
        println!("✗ Reddit API health check failed");
    }

    let provider = create_provider(&config.llm)?;
    match provider.warmup().await {
        Ok(()) => println!("✓ LLM endpoint reachable ({})", config.llm.base_url),
        Err(e) => println!("✗ LLM endpoint unreachable: {e}"),
    }

    Ok(())
}

fn handle_learning(command: LearningCommands, memory: &StyleMemory) -> Result<()> {
    match command {
        LearningCommands::Show { top } => {
            println!("Style memory: {}", memory.location());
            println!(
                "Recent comments: {}",
                memory.snapshot().recent_texts.len()
            );
            println!();
            println!("Top terms:");
            for (term, count) in memory.top_terms(top) {
                println!("  {term:12} {count}");
            }
            println!();
            println!("Prompt context:{}", memory.build_context());
            Ok(())
        }
        LearningCommands::Reset => {
            memory.reset()?;
            println!("✓ style memory reset to baseline ({})", memory.location());
            Ok(())
        }
        LearningCommands::Observe { text } => {
            memory.observe(&text);
            let hits = crate::learning::count_catalogue_matches(&text);
            if hits.is_empty() {
                println!("Stored; no catalogue terms matched.");
            } else {
                let summary: Vec<String> = hits
                    .iter()
                    .map(|(term, count)| format!("{term}×{count}"))
                    .collect();
                println!("Stored; matched {}", summary.join(", "));
            }
            Ok(())
        }
    }
}
