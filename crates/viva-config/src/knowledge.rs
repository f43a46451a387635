//! Knowledge store configuration.

use serde::{Deserialize, Serialize};

fn default_db_path() -> String {
    ".viva/knowledge.duckdb".to_string()
}

fn default_topic() -> String {
    "Binary Search".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KnowledgeConfig {
    /// DuckDB file holding embedded knowledge records.
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Minimum cosine similarity for a lookup to count as a match.
    /// `0.0` returns the nearest record whatever its distance.
    #[serde(default)]
    pub min_score: f64,

    /// Topic used when a caller does not name one.
    #[serde(default = "default_topic")]
    pub default_topic: String,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            min_score: 0.0,
            default_topic: default_topic(),
        }
    }
}
