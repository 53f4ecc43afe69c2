//! Command line arguments

use crate::search::{SearchMode, SearchQuery};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "slack-search",
    version,
    about = "Search Slack files and messages from the terminal",
    after_help = "The API token is read from SLACK_API_TOKEN."
)]
pub struct Cli {
    /// Search query
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Search Slack files only
    #[arg(short = 'f', long)]
    pub files: bool,

    /// Search Slack messages only
    #[arg(short = 'm', long)]
    pub messages: bool,

    /// Open each match's permalink in the default browser instead of logging it
    #[arg(short = 'o', long = "open")]
    pub open: bool,

    /// Path to a settings.yml file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn mode(&self) -> SearchMode {
        SearchMode::from_flags(self.files, self.messages)
    }

    /// The query as given; a missing `-q` is treated as blank
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(self.query.clone().unwrap_or_default(), self.mode())
    }

    /// Default tracing filter when `RUST_LOG` is unset
    pub fn default_filter(&self) -> &'static str {
        if self.verbose {
            "slack_search=debug,info"
        } else {
            "info"
        }
    }
}
