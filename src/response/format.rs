// Text rendering for inventory records
// Author: kelexine (https://github.com/kelexine)

use crate::models::{Server, Summary};
use std::fmt::Write;

const NOT_AVAILABLE: &str = "N/A";

/// Phrases that ask for a bare list of names.
const NAMES_ONLY_PHRASES: &[&str] = &[
    "only",
    "just",
    "names only",
    "only names",
    "just names",
    "list names",
    "server names",
    "name only",
    "only the names",
    "just the names",
    "names of",
    "which servers",
    "what servers",
];

/// Full multi-line block for one server.
pub fn format_server_info(server: &Server) -> String {
    let mut info = String::new();
    let _ = writeln!(info, "**{}**", server.name);
    let _ = writeln!(info, " IP: {}", server.ip_address);
    let _ = writeln!(info, " Status: {}", server.status.as_str().to_uppercase());
    let _ = writeln!(
        info,
        " Environment: {}",
        server.environment.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    let os = format!(
        "{} {}",
        server.os.as_deref().unwrap_or(NOT_AVAILABLE),
        server.os_version.as_deref().unwrap_or("")
    );
    let _ = writeln!(info, " OS: {}", os.trim_end());
    let _ = writeln!(
        info,
        " Resources: {} cores, {}GB RAM",
        display_or_na(server.cpu_cores),
        display_or_na(server.memory_gb)
    );
    if let Some(owner) = server.owner_name.as_deref().filter(|o| !o.is_empty()) {
        let _ = writeln!(info, " Owner: {}", owner);
    }
    if let Some(seen) = server.last_seen.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(info, " Last seen: {}", seen);
    }
    info
}

/// Fleet summary with per-environment breakdown.
pub fn format_summary(summary: &Summary) -> String {
    let mut response = String::from("**Server Summary for Chennai Data Center:**\n\n");
    let _ = writeln!(response, " Total servers: {}", display_or_na(summary.total_servers));
    let _ = writeln!(response, " Active servers: {}", display_or_na(summary.active_servers));
    let _ = writeln!(response, " Servers up: {}", display_or_na(summary.servers_up));
    let _ = writeln!(response, " Servers down: {}", display_or_na(summary.servers_down));
    let _ = writeln!(
        response,
        " Servers in maintenance: {}",
        display_or_na(summary.servers_maintenance)
    );

    if !summary.environments.is_empty() {
        response.push_str("\n**By Environment:**\n");
        for (env, count) in &summary.environments {
            let _ = writeln!(response, " {}: {} servers", title_case(env), count);
        }
    }
    response
}

/// Does the phrasing ask for names without per-server detail?
pub fn wants_names_only(query: &str) -> bool {
    let query = query.to_lowercase();

    if NAMES_ONLY_PHRASES.iter().any(|p| query.contains(p)) {
        return true;
    }

    // "which servers are down" implies a name list
    (query.starts_with("which ") || query.starts_with("what ")) && query.contains("server")
}

fn display_or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Capitalise the first letter of every word, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut start_of_word = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if start_of_word {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(c);
            start_of_word = true;
        }
    }
    out
}
