//! Query intents and per-query analysis results.
//!
//! A free-text question is classified into an [`Intent`] plus a
//! [`FetchAction`]; running the action yields the [`QueryData`] that the
//! response composer and the text-generation gateway branch on.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod classifier;

pub use classifier::{analyze, classify, extract_server_name, Classification, FetchAction};

use crate::models::{Server, Summary};
use std::fmt;

/// The classifier's output category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Conversational,
    Summary,
    StatusQuery,
    AllServers,
    EnvironmentQuery,
    SpecificServer,
    Search,
    /// Environment keyword matched but no canonical environment did.
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Conversational => "conversational",
            Intent::Summary => "summary",
            Intent::StatusQuery => "status_query",
            Intent::AllServers => "all_servers",
            Intent::EnvironmentQuery => "environment_query",
            Intent::SpecificServer => "specific_server",
            Intent::Search => "search",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data fetched for a query.
///
/// Fetch failures arrive as `Error` rather than as a propagated error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryData {
    #[default]
    None,
    Summary(Summary),
    Servers(Vec<Server>),
    Server(Server),
    Error(String),
}

/// Result of classifying and fetching for one query. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAnalysis {
    pub intent: Intent,
    pub data: QueryData,
    pub needs_api: bool,
}

impl QueryAnalysis {
    pub fn new(intent: Intent, data: QueryData) -> Self {
        let needs_api = !matches!(data, QueryData::None);
        Self {
            intent,
            data,
            needs_api,
        }
    }
}
