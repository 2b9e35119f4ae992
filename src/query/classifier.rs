// Query classification - ordered keyword rules mapping text to an intent and fetch action
// Author: kelexine (https://github.com/kelexine)

use super::{Intent, QueryAnalysis, QueryData};
use crate::inventory::InventoryClient;
use crate::models::ServerStatus;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const CONVERSATIONAL_KEYWORDS: &[&str] = &[
    "explain",
    "tell me about",
    "describe",
    "what do you think",
    "analyze",
    "recommend",
    "suggest",
    "advice",
    "opinion",
    "insight",
    "interpretation",
    "simple terms",
    "in summary",
    "overall",
    "situation",
    "health",
    "assessment",
    "evaluation",
    "report",
    "brief",
    "rundown",
    "breakdown",
];

const SUMMARY_KEYWORDS: &[&str] = &["how many", "total", "count", "summary", "overview"];

const STATUS_KEYWORDS: &[&str] = &["up", "down", "running", "offline", "maintenance", "status"];

const ENVIRONMENT_KEYWORDS: &[&str] = &["production", "prod", "staging", "development", "dev", "test"];

/// Canonical environments, checked in order by full word or 4-letter prefix.
const ENVIRONMENTS: &[&str] = &["production", "staging", "development"];

const SERVER_HINTS: &[&str] = &["web", "db", "api", "cache"];

/// Server-name patterns in priority order; the first pattern with a match wins.
static SERVER_NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"chennai-[\w-]+",
        r"web-?\d*",
        r"db-?\d*",
        r"api-?\d*",
        r"cache-?\d*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex pattern"))
    .collect()
});

/// The inventory call a classification asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchAction {
    None,
    Summary,
    ServersByStatus(ServerStatus),
    AllServers,
    ServersByEnvironment(&'static str),
    ServerByName(String),
    Search(String),
}

/// Intent plus the fetch to run for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub action: FetchAction,
}

impl Classification {
    fn new(intent: Intent, action: FetchAction) -> Self {
        Self { intent, action }
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Map free text to an intent and fetch action.
///
/// Rules are evaluated in order and the first match wins; matching is
/// case-insensitive substring containment.
pub fn classify(text: &str) -> Classification {
    let query = text.to_lowercase();

    if contains_any(&query, CONVERSATIONAL_KEYWORDS) {
        return Classification::new(Intent::Conversational, FetchAction::Summary);
    }

    if contains_any(&query, SUMMARY_KEYWORDS) {
        return Classification::new(Intent::Summary, FetchAction::Summary);
    }

    if contains_any(&query, STATUS_KEYWORDS) {
        let status = if query.contains("down") || query.contains("offline") {
            Some(ServerStatus::Down)
        } else if query.contains("up") || query.contains("running") {
            Some(ServerStatus::Up)
        } else if query.contains("maintenance") {
            Some(ServerStatus::Maintenance)
        } else {
            None
        };
        return match status {
            Some(status) => {
                Classification::new(Intent::StatusQuery, FetchAction::ServersByStatus(status))
            }
            None => Classification::new(Intent::AllServers, FetchAction::AllServers),
        };
    }

    if contains_any(&query, ENVIRONMENT_KEYWORDS) {
        let environment = ENVIRONMENTS
            .iter()
            .find(|env| query.contains(*env) || query.contains(&env[..4]));
        // A bare "dev" or "test" matches no canonical environment: no filter, no data.
        return match environment {
            Some(env) => Classification::new(
                Intent::EnvironmentQuery,
                FetchAction::ServersByEnvironment(env),
            ),
            None => Classification::new(Intent::General, FetchAction::None),
        };
    }

    if query.contains("chennai-") || contains_any(&query, SERVER_HINTS) {
        return match extract_server_name(&query) {
            Some(name) => Classification::new(Intent::SpecificServer, FetchAction::ServerByName(name)),
            None => Classification::new(Intent::Search, FetchAction::Search(text.to_string())),
        };
    }

    Classification::new(Intent::Conversational, FetchAction::Summary)
}

/// First match of the first server-name pattern that matches at all.
pub fn extract_server_name(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    SERVER_NAME_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(&lowered))
        .map(|m| m.as_str().to_string())
}

/// Classify `text` and run the winning branch's fetch.
pub async fn analyze(text: &str, client: &InventoryClient) -> QueryAnalysis {
    let Classification { intent, action } = classify(text);
    debug!("Query analysis result: type='{}'", intent);

    let needs_api = action != FetchAction::None;
    let data = match action {
        FetchAction::None => QueryData::None,
        FetchAction::Summary => client.summary().await,
        FetchAction::ServersByStatus(status) => {
            QueryData::Servers(client.servers_by_status(status.as_str()).await)
        }
        FetchAction::AllServers => QueryData::Servers(client.all_servers().await),
        FetchAction::ServersByEnvironment(env) => {
            QueryData::Servers(client.servers_by_environment(env).await)
        }
        FetchAction::ServerByName(name) => client.server_by_name(&name).await,
        FetchAction::Search(query) => QueryData::Servers(client.search_servers(&query).await),
    };

    QueryAnalysis {
        intent,
        data,
        needs_api,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn intent(text: &str) -> Intent {
        classify(text).intent
    }

    #[test]
    fn test_conversational_precedes_summary() {
        assert_eq!(intent("Explain the total count"), Intent::Conversational);
        assert_eq!(classify("explain").action, FetchAction::Summary);
    }

    #[test]
    fn test_summary() {
        let c = classify("How many servers do we have?");
        assert_eq!(c.intent, Intent::Summary);
        assert_eq!(c.action, FetchAction::Summary);
    }

    #[test]
    fn test_status_sub_dispatch() {
        assert_eq!(
            classify("Which servers are down?").action,
            FetchAction::ServersByStatus(ServerStatus::Down)
        );
        assert_eq!(
            classify("anything offline?").action,
            FetchAction::ServersByStatus(ServerStatus::Down)
        );
        assert_eq!(
            classify("what is running").action,
            FetchAction::ServersByStatus(ServerStatus::Up)
        );
        assert_eq!(
            classify("servers in maintenance").action,
            FetchAction::ServersByStatus(ServerStatus::Maintenance)
        );
        let c = classify("What's the status of chennai-web-01?");
        assert_eq!(c.intent, Intent::AllServers);
        assert_eq!(c.action, FetchAction::AllServers);
    }

    #[test]
    fn test_environment_by_word_or_prefix() {
        assert_eq!(
            classify("Show me production servers").action,
            FetchAction::ServersByEnvironment("production")
        );
        assert_eq!(
            classify("list prod boxes").action,
            FetchAction::ServersByEnvironment("production")
        );
        assert_eq!(
            classify("staging machines").action,
            FetchAction::ServersByEnvironment("staging")
        );
        assert_eq!(
            classify("development hosts").action,
            FetchAction::ServersByEnvironment("development")
        );
    }

    #[test]
    fn test_environment_keyword_without_canonical_match_falls_through() {
        let c = classify("show dev machines");
        assert_eq!(c.intent, Intent::General);
        assert_eq!(c.action, FetchAction::None);

        let c = classify("test boxes please");
        assert_eq!(c.intent, Intent::General);
    }

    #[test]
    fn test_specific_server_extraction() {
        let c = classify("Tell chennai-db-01 details");
        assert_eq!(c.intent, Intent::SpecificServer);
        assert_eq!(c.action, FetchAction::ServerByName("chennai-db-01".to_string()));

        assert_eq!(
            classify("details for web-03").action,
            FetchAction::ServerByName("web-03".to_string())
        );
        assert_eq!(
            classify("the cache2 box").action,
            FetchAction::ServerByName("cache2".to_string())
        );
    }

    #[test]
    fn test_chennai_prefix_without_name_searches() {
        let c = classify("Find chennai- hosts");
        assert_eq!(c.intent, Intent::Search);
        assert_eq!(c.action, FetchAction::Search("Find chennai- hosts".to_string()));
    }

    #[test]
    fn test_default_is_conversational() {
        let c = classify("hello there");
        assert_eq!(c.intent, Intent::Conversational);
        assert_eq!(c.action, FetchAction::Summary);
    }

    #[test]
    fn test_extract_pattern_priority() {
        assert_eq!(
            extract_server_name("compare web-01 and chennai-api-02").as_deref(),
            Some("chennai-api-02")
        );
        assert_eq!(extract_server_name("db7 vs web2").as_deref(), Some("web2"));
        assert_eq!(extract_server_name("nothing here"), None);
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(text in "[a-zA-Z0-9 ?'-]{0,40}") {
            prop_assert_eq!(classify(&text), classify(&text));
        }

        #[test]
        fn conversational_keyword_always_wins(prefix in "[a-z ]{0,12}", suffix in "[a-z ]{0,12}") {
            let text = format!("{} explain total status production web {}", prefix, suffix);
            prop_assert_eq!(classify(&text).intent, Intent::Conversational);
        }
    }
}
