//! Navigation core configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL partials are fetched from; required for the built-in
    /// HTTP fetcher, ignored when the host supplies its own
    pub partials_base_url: Option<String>,
    /// Per-asset load timeout in milliseconds; unbounded when unset
    pub asset_load_timeout_ms: Option<u64>,
    /// Path resolved instead when a requested path matches no route
    pub fallback_path: Option<String>,
}
