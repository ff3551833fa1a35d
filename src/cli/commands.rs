use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `RoastBot` - community-adaptive Reddit reply bot.
#[derive(Parser, Debug)]
#[command(name = "roastbot")]
#[command(author = "theonlyhennygod")]
#[command(version)]
#[command(about = "Replies to Reddit comments in the community's own voice.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.roastbot/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream comments and reply until interrupted
    Run,

    /// Validate config, authenticate, and warm up the provider
    Check,

    /// Inspect or modify the learned community style
    Learning {
        #[command(subcommand)]
        learning_command: LearningCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum LearningCommands {
    /// Print the current style context and top slang counts
    Show {
        /// Number of terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Reset learned style to the baseline vocabulary
    Reset,
    /// Feed a text into the style memory by hand
    Observe {
        /// Text to learn from
        text: String,
    },
}
