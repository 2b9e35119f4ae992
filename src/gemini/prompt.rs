// Prompt and context construction for the text-generation backend
// Author: kelexine (https://github.com/kelexine)

use crate::query::QueryData;

/// Number of records sampled into the context for list-shaped data.
const CONTEXT_SAMPLE_SIZE: usize = 3;

/// Fixed assistant persona prepended to every prompt.
pub const SYSTEM_PROMPT: &str = "You are a helpful server management assistant for a Chennai data center.

You have access to live server data and can answer questions about:
- Server status, specifications, and details
- Server ownership and management
- Server environments (production, staging, development)
- Server locations and configurations

Guidelines:
- Always provide accurate, up-to-date information from live data
- Be concise but comprehensive in responses
- Use proper formatting with line breaks and structure
- If information is unavailable, state this clearly
- Focus on actionable insights when possible
";

/// Short context line describing the fetched data.
pub fn build_context(data: &QueryData) -> String {
    match data {
        QueryData::Summary(summary) => {
            let field = |v: Option<u64>| v.map(|n| n.to_string()).unwrap_or_else(|| "N/A".into());
            format!(
                "Total servers: {}, Active: {}, Up: {}, Down: {}",
                field(summary.total_servers),
                field(summary.active_servers),
                field(summary.servers_up),
                field(summary.servers_down)
            )
        }
        QueryData::Servers(servers) if !servers.is_empty() => {
            let sample = servers
                .iter()
                .take(CONTEXT_SAMPLE_SIZE)
                .map(|s| format!("{} ({})", s.name, s.status))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Found {} servers. Sample: {}", servers.len(), sample)
        }
        QueryData::Server(server) => format!("{} ({})", server.name, server.status),
        _ => String::new(),
    }
}

/// Full prompt: persona, context, then the user's question.
pub fn build_prompt(context: &str, query: &str) -> String {
    format!(
        "{}\n\nContext about the servers:\n{}\n\nUser query: {}\n\n\
         Please provide a helpful response based on the available server data. \
         Keep it concise and informative.",
        SYSTEM_PROMPT, context, query
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Server, ServerStatus, Summary};

    #[test]
    fn test_summary_context() {
        let summary = Summary {
            total_servers: Some(10),
            active_servers: Some(9),
            servers_up: Some(8),
            servers_down: None,
            ..Default::default()
        };
        assert_eq!(
            build_context(&QueryData::Summary(summary)),
            "Total servers: 10, Active: 9, Up: 8, Down: N/A"
        );
    }

    #[test]
    fn test_list_context_samples_three() {
        let servers: Vec<Server> = (1..=5)
            .map(|i| Server::new(format!("web-{}", i), "10.0.0.1", ServerStatus::Up))
            .collect();
        assert_eq!(
            build_context(&QueryData::Servers(servers)),
            "Found 5 servers. Sample: web-1 (up), web-2 (up), web-3 (up)"
        );
    }

    #[test]
    fn test_empty_context() {
        assert_eq!(build_context(&QueryData::None), "");
        assert_eq!(build_context(&QueryData::Error("x".into())), "");
        assert_eq!(build_context(&QueryData::Servers(vec![])), "");
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt("Total servers: 1", "Explain things");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.contains("Context about the servers:\nTotal servers: 1\n"));
        assert!(prompt.contains("User query: Explain things\n"));
        assert!(prompt.ends_with("Keep it concise and informative."));
    }
}
