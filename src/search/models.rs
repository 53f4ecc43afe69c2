//! Search query and run configuration

use crate::config::SearchSettings;
use crate::results::MatchKind;
use serde::{Deserialize, Serialize};

/// Which flows a run executes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Files,
    Messages,
    #[default]
    All,
}

impl SearchMode {
    /// Build a mode from the `-f` / `-m` flags; neither or both means `All`
    pub fn from_flags(files: bool, messages: bool) -> Self {
        match (files, messages) {
            (true, false) => Self::Files,
            (false, true) => Self::Messages,
            _ => Self::All,
        }
    }

    /// Flows to run, in order
    pub fn kinds(&self) -> &'static [MatchKind] {
        match self {
            Self::Files => &[MatchKind::Files],
            Self::Messages => &[MatchKind::Messages],
            Self::All => &[MatchKind::Files, MatchKind::Messages],
        }
    }
}

/// The query for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Text handed to Slack's search
    pub text: String,
    pub mode: SearchMode,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }

    /// Query over files and messages
    pub fn simple(text: impl Into<String>) -> Self {
        Self::new(text, SearchMode::All)
    }

    /// Check if query is empty
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Immutable knobs for the orchestrator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Open permalinks in the browser instead of logging matches
    pub open_in_browser: bool,
    /// Maximum page tasks in flight; `None` fans out to every page at once
    pub max_concurrency: Option<usize>,
    /// Reuse the page-1 probe instead of fetching page 1 again
    pub reuse_first_page: bool,
}

impl SearchConfig {
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self {
            open_in_browser: false,
            max_concurrency: settings.max_concurrency,
            reuse_first_page: settings.reuse_first_page,
        }
    }

    pub fn with_open_in_browser(mut self, open: bool) -> Self {
        self.open_in_browser = open;
        self
    }

    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit.max(1));
        self
    }

    pub fn with_reuse_first_page(mut self, reuse: bool) -> Self {
        self.reuse_first_page = reuse;
        self
    }
}
