//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dbot")]
#[command(about = "Telegram bots: server time, AI chat, product brief", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// One subcommand per bot. Config comes from env; `--token` overrides BOT_TOKEN.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Reply to every message with the current server time.
    Time {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Answer each message with the completion backend (no memory).
    Chat {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Interview the user and generate a product brief document.
    Brief {
        #[arg(short, long)]
        token: Option<String>,
    },
}

impl Commands {
    /// Short bot name, used for the default log file `logs/dbot-<name>.log`.
    pub fn bot_name(&self) -> &'static str {
        match self {
            Commands::Time { .. } => "time",
            Commands::Chat { .. } => "chat",
            Commands::Brief { .. } => "brief",
        }
    }

    pub fn token(&self) -> Option<String> {
        match self {
            Commands::Time { token } | Commands::Chat { token } | Commands::Brief { token } => {
                token.clone()
            }
        }
    }

    pub fn default_log_file(&self) -> String {
        format!("logs/dbot-{}.log", self.bot_name())
    }
}
