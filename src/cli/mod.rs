// CLI module for invchat
// Author: kelexine (https://github.com/kelexine)

use crate::chatbot::ServerChatbot;
use crate::config::AppConfig;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const EXIT_COMMANDS: &[&str] = &["exit", "quit"];

/// invchat - ask questions about the server inventory in plain language
#[derive(Parser, Debug)]
#[command(name = "invchat", version, about, long_about = None)]
pub struct Args {
    /// Config file to load instead of ~/.invchat/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Inventory API base URL (overrides config and API_BASE_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Answer a single question and exit
    #[arg(long, value_name = "TEXT", conflicts_with_all = ["serve", "health"])]
    pub query: Option<String>,

    /// Run the HTTP server
    #[arg(long, conflicts_with = "health")]
    pub serve: bool,

    /// Print the health report as JSON and exit
    #[arg(long)]
    pub health: bool,
}

/// What the binary should do once the chatbot is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    Query(String),
    Serve,
    Health,
}

impl Args {
    pub fn mode(&self) -> Mode {
        if let Some(query) = &self.query {
            Mode::Query(query.clone())
        } else if self.serve {
            Mode::Serve
        } else if self.health {
            Mode::Health
        } else {
            Mode::Interactive
        }
    }

    /// Apply flag overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.api_url {
            config.inventory.base_url = url.clone();
        }
    }
}

fn is_exit_command(line: &str) -> bool {
    EXIT_COMMANDS.contains(&line.to_ascii_lowercase().as_str())
}

/// Read questions line by line until EOF or `exit`/`quit`, printing one answer each.
pub async fn run_interactive<R: BufRead, W: Write>(
    chatbot: &ServerChatbot,
    input: R,
    mut output: W,
) -> io::Result<()> {
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let query = line.trim();
        if is_exit_command(query) {
            break;
        }
        if !query.is_empty() {
            let answer = chatbot.generate_response(query).await;
            writeln!(output, "{}\n", answer)?;
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    Ok(())
}
