//! Search match types and output sinks

mod sink;
mod types;

pub use sink::{BrowserSink, LogSink, MatchSink, PermalinkOpener, SystemOpener};
pub use types::*;
