// Cache key generation
// Author: kelexine (https://github.com/kelexine)

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Build the API cache key: endpoint followed by the sorted-key JSON of the params.
///
/// Parameter order never changes the key.
pub fn api_cache_key(endpoint: &str, params: &[(&str, &str)]) -> String {
    let sorted: BTreeMap<&str, &str> = params.iter().copied().collect();
    let encoded = serde_json::to_string(&sorted).unwrap_or_else(|_| "{}".to_string());
    format!("{}:{}", endpoint, encoded)
}

/// Content hash of the raw query text, used as the generated-text cache key.
pub fn prompt_cache_key(query: &str) -> String {
    hex::encode(Sha256::digest(query.as_bytes()))
}
