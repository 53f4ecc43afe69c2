//! slack-search: search Slack files and messages from the terminal
//!
//! This is the main entry point for the application.

use anyhow::Result;
use clap::Parser;
use slack_search::{
    cache::NameCache,
    cli::{Cli, LogFormat},
    config,
    network::HttpClient,
    Search, SearchConfig, SlackClient,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    // Load configuration
    let settings = config::load_settings(cli.config.as_deref())?;
    let query = cli.search_query();

    // Token and query are checked before any API call
    settings.validate(&query.text)?;

    // Initialize HTTP client
    let http = HttpClient::with_settings(&settings.outgoing)?;
    let client = SlackClient::new(http, &settings.slack);

    let search_config =
        SearchConfig::from_settings(&settings.search).with_open_in_browser(cli.open);
    let mut search = Search::new(Arc::new(client), search_config);
    if settings.search.cache_lookups {
        search = search.with_cache(NameCache::new(settings.search.lookup_cache_ttl));
    }

    info!(
        "slack-search v{}: searching {:?} for '{}'",
        slack_search::VERSION,
        query.mode,
        query.text
    );

    search.run(&query).await;

    let metrics = search.metrics();
    info!(
        page_fetches = metrics.page_fetches,
        page_failures = metrics.page_failures,
        matches = metrics.matches_emitted,
        lookup_failures = metrics.lookup_failures,
        lookup_reliability = %format!("{:.1}%", metrics.lookup_reliability()),
        "Search complete"
    );

    Ok(())
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_filter()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal());

    match cli.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
