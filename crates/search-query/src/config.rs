//! Parser configuration

use serde::{Deserialize, Serialize};

/// Default limit on query length, in runes
pub const DEFAULT_MAX_QUERY_LEN: usize = 1024;

/// Options for scanning and assembling a query.
///
/// Constructed by the caller and passed in; there is no process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Accept `-` and `.` inside words that start with a digit, so that values
    /// like `2006-08-10` or `1.2.3` scan as a single identifier.
    pub date_values: bool,
    /// Reject queries longer than this many runes. `None` disables the check.
    pub max_query_len: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            date_values: true,
            max_query_len: Some(DEFAULT_MAX_QUERY_LEN),
        }
    }
}

impl ParserConfig {
    /// The scanning rules of the bare grammar: words are letters, digits and
    /// `_` only, and input length is unbounded.
    pub fn strict() -> Self {
        Self {
            date_values: false,
            max_query_len: None,
        }
    }

    /// Load a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
