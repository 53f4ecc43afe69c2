//! Where resolved matches go: the log or the browser

use super::types::ResolvedMatch;
use std::sync::Arc;
use tracing::{info, warn};

/// Receives every resolved match of a run, tagged with its page
pub trait MatchSink: Send + Sync {
    fn emit(&self, page: u32, resolved: &ResolvedMatch);
}

/// Emits one structured `info` record per match
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl MatchSink for LogSink {
    fn emit(&self, page: u32, resolved: &ResolvedMatch) {
        match resolved {
            ResolvedMatch::File(f) => info!(
                title = %f.title,
                url = %f.url,
                permalink = %f.permalink,
                user = %f.user,
                channels = %f.channels,
                page,
                "File [Page: {}]",
                page
            ),
            ResolvedMatch::Message(m) => info!(
                text = %m.text,
                permalink = %m.permalink,
                username = %m.username,
                channel = %m.channel,
                page,
                "Message [Page: {}]",
                page
            ),
        }
    }
}

/// Opens a URL with the platform's default handler
pub trait PermalinkOpener: Send + Sync {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

impl<O: PermalinkOpener + ?Sized> PermalinkOpener for Arc<O> {
    fn open(&self, url: &str) -> std::io::Result<()> {
        (**self).open(url)
    }
}

/// `PermalinkOpener` backed by the `open` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl PermalinkOpener for SystemOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        open::that_detached(url)
    }
}

/// Opens each match's permalink instead of logging it
#[derive(Debug, Clone, Default)]
pub struct BrowserSink<O = SystemOpener> {
    opener: O,
}

impl<O: PermalinkOpener> BrowserSink<O> {
    pub fn new(opener: O) -> Self {
        Self { opener }
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }
}

impl<O: PermalinkOpener> MatchSink for BrowserSink<O> {
    fn emit(&self, page: u32, resolved: &ResolvedMatch) {
        let permalink = resolved.permalink();
        if let Err(e) = self.opener.open(permalink) {
            warn!(page, permalink, "Could not open permalink: {}", e);
        }
    }
}
