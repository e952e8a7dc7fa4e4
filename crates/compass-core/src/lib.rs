//! COMPASS Core
//!
//! Central entry point for the COMPASS navigation core. Wires the
//! route table, asset reconciler and navigation controller together
//! behind one facade; the host supplies the rendering surface, the
//! history sink and the partial content source.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use compass_assets::{AssetError, AssetReconciler, ReconcileOutcome};
pub use compass_events::{EventBus, LoadChange, LoadPhase, NavigationEvent};
pub use compass_navigation::{
    CallbackRegistry, NavigationController, NavigationError, StateHandle,
};
pub use compass_routing::{
    PreloadTask, Route, RouteDefinition, RouteMatch, RoutePattern, RouteTable, RouteVariable,
    RoutingError,
};
pub use compass_surface::{
    AssetKind, HistoryHandle, HttpPartialFetcher, InjectedAsset, MemoryHistory, MemorySurface,
    PartialFetcher, RenderSurface, StaticPartials, SurfaceError,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
