//! Search orchestration module
//!
//! Paginates Slack file and message searches, resolves user and
//! channel names for each match, and hands the results to a sink.

mod executor;
mod models;
mod resolver;

pub use executor::{PageOutcome, Search};
pub use models::*;
pub use resolver::NameResolver;
