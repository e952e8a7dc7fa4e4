//! Navigation lifecycle event types

use serde::{Deserialize, Serialize};

/// Lifecycle checkpoints inside a navigation, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadPhase {
    /// Resolving the requested path against the route table
    FetchingRoute,
    /// Reconciling style assets
    ReloadingLinks,
    /// Re-binding declarative navigation triggers
    OverridingHref,
    /// Reconciling script assets
    ReloadingScripts,
    /// Running the route's preload tasks
    PreloadingRoute,
    /// Fetching the partial and swapping the surface content
    LoadingHtml,
}

impl LoadPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPhase::FetchingRoute => "FETCHING_ROUTE",
            LoadPhase::ReloadingLinks => "RELOADING_LINKS",
            LoadPhase::OverridingHref => "OVERRIDING_HREF",
            LoadPhase::ReloadingScripts => "RELOADING_SCRIPTS",
            LoadPhase::PreloadingRoute => "PRELOADING_ROUTE",
            LoadPhase::LoadingHtml => "LOADING_HTML",
        }
    }
}

impl std::fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LoadPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FETCHING_ROUTE" => Ok(LoadPhase::FetchingRoute),
            "RELOADING_LINKS" => Ok(LoadPhase::ReloadingLinks),
            "OVERRIDING_HREF" => Ok(LoadPhase::OverridingHref),
            "RELOADING_SCRIPTS" => Ok(LoadPhase::ReloadingScripts),
            "PRELOADING_ROUTE" => Ok(LoadPhase::PreloadingRoute),
            "LOADING_HTML" => Ok(LoadPhase::LoadingHtml),
            _ => Err(format!("Unknown load phase: {}", s)),
        }
    }
}

/// Fired whenever the controller's navigating flag changes, and on a
/// deactivate refusal (where the flag stays `false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadChange {
    pub previous_loading: bool,
    pub new_loading: bool,
    pub cancelled_by_deactivate: bool,
}

/// A lifecycle notification published on the [`crate::EventBus`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavigationEvent {
    LoadChange(LoadChange),
    Phase(LoadPhase),
}
