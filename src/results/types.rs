//! Match and resolved-match types

use crate::slack::{FileMatch, MessageMatch};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which search flow a match came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Files,
    Messages,
}

impl MatchKind {
    /// Human readable label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Files => "Files",
            Self::Messages => "Messages",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single search hit, before name resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    File(FileMatch),
    Message(MessageMatch),
}

/// A file with owner and channels replaced by display names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFile {
    pub title: String,
    pub url: String,
    pub permalink: String,
    /// Owner display name, empty when the lookup failed
    pub user: String,
    /// Comma-joined channel names, in the file's channel order
    pub channels: String,
}

/// A message with its author and channel as display names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMessage {
    pub text: String,
    pub permalink: String,
    pub username: String,
    pub channel: String,
}

/// A match ready to be emitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolvedMatch {
    File(ResolvedFile),
    Message(ResolvedMessage),
}

impl ResolvedMatch {
    pub fn kind(&self) -> MatchKind {
        match self {
            Self::File(_) => MatchKind::Files,
            Self::Message(_) => MatchKind::Messages,
        }
    }

    pub fn permalink(&self) -> &str {
        match self {
            Self::File(f) => &f.permalink,
            Self::Message(m) => &m.permalink,
        }
    }
}
