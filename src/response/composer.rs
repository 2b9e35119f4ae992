// Response composition - deterministic answers and the rule-based fallback
// Author: kelexine (https://github.com/kelexine)

use super::format::{format_server_info, format_summary, wants_names_only};
use crate::models::Server;
use crate::query::{Intent, QueryAnalysis, QueryData};
use std::fmt::Write;

/// Detailed blocks shown for status queries.
const STATUS_DETAIL_LIMIT: usize = 10;
/// Detailed blocks shown for search and environment queries.
const SEARCH_DETAIL_LIMIT: usize = 5;

const NO_STATUS_MATCHES: &str = "No servers found matching that status.";
const NO_QUERY_MATCHES: &str = "No servers found matching your query.";

/// Used when the backend cannot answer and there is no data to fall back on.
pub const GENERIC_APOLOGY: &str = "I'm having trouble accessing the Gemini service right now. \
Please try again later or rephrase your question.";

/// Outcome of composing a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composed {
    /// A finished deterministic answer.
    Text(String),
    /// Hand the query to the text-generation gateway.
    Delegate,
}

/// Produce the deterministic answer for `analysis`, or ask for delegation.
///
/// Conversational queries and intents without a template always delegate.
pub fn compose(query: &str, analysis: &QueryAnalysis) -> Composed {
    match (analysis.intent, &analysis.data) {
        (Intent::Summary, QueryData::Summary(summary)) => Composed::Text(format_summary(summary)),
        (Intent::Summary, QueryData::Error(message)) => Composed::Text(format!(
            "Sorry, I couldn't get the server summary: {}",
            message
        )),

        (Intent::StatusQuery, QueryData::Servers(servers)) => Composed::Text(render_server_list(
            query,
            servers,
            STATUS_DETAIL_LIMIT,
            NO_STATUS_MATCHES,
        )),
        (Intent::StatusQuery, QueryData::Error(message)) => Composed::Text(format!(
            "Sorry, I couldn't get the server status: {}",
            message
        )),

        (Intent::SpecificServer, QueryData::Server(server)) => {
            Composed::Text(format_server_info(server))
        }
        (Intent::SpecificServer, QueryData::Error(message)) => Composed::Text(format!(
            "Sorry, I couldn't find that server: {}",
            message
        )),

        (Intent::Search | Intent::EnvironmentQuery, QueryData::Servers(servers)) => {
            Composed::Text(render_server_list(
                query,
                servers,
                SEARCH_DETAIL_LIMIT,
                NO_QUERY_MATCHES,
            ))
        }
        (Intent::Search | Intent::EnvironmentQuery, QueryData::Error(message)) => Composed::Text(
            format!("Sorry, I couldn't search for servers: {}", message),
        ),

        _ => Composed::Delegate,
    }
}

/// Rule-based answer used when the text-generation backend is unavailable,
/// returns nothing, or fails.
///
/// Intents with a deterministic template reuse it; the rest render whatever
/// data was fetched, or apologise when there is none.
pub fn fallback_response(query: &str, analysis: &QueryAnalysis) -> String {
    if let Composed::Text(text) = compose(query, analysis) {
        return text;
    }

    match &analysis.data {
        QueryData::Summary(summary) => format_summary(summary),
        QueryData::Servers(servers) => {
            render_server_list(query, servers, STATUS_DETAIL_LIMIT, NO_QUERY_MATCHES)
        }
        QueryData::Server(server) => format_server_info(server),
        QueryData::None | QueryData::Error(_) => GENERIC_APOLOGY.to_string(),
    }
}

/// Names-only list, or up to `limit` detailed blocks with a truncation note.
fn render_server_list(query: &str, servers: &[Server], limit: usize, empty_message: &str) -> String {
    if servers.is_empty() {
        return empty_message.to_string();
    }

    if wants_names_only(query) {
        return servers
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut response = format!("Found {} servers:\n\n", servers.len());
    for server in servers.iter().take(limit) {
        response.push_str(&format_server_info(server));
        response.push('\n');
    }
    if servers.len() > limit {
        let _ = write!(response, "\n... and {} more servers.", servers.len() - limit);
    }
    response
}
