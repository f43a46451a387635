//! Offline responder configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OfflineConfig {
    /// Fixed RNG seed for the phrase picker. Unset draws from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}
