// Response composition module
// Author: kelexine (https://github.com/kelexine)

mod composer;
mod format;

pub use composer::{compose, fallback_response, Composed, GENERIC_APOLOGY};
pub use format::{format_server_info, format_summary, title_case, wants_names_only};
