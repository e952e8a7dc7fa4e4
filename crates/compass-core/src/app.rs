//! Application facade

use std::sync::Arc;
use std::time::Duration;

use compass_events::EventBus;
use compass_navigation::{CallbackRegistry, NavigationController, StateHandle};
use compass_routing::{RouteDefinition, RouteTable};
use compass_surface::{HistoryHandle, HttpPartialFetcher, PartialFetcher, RenderSurface};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// Central entry point for host applications.
///
/// Owns the route table and the navigation controller; the host
/// supplies the rendering surface, the history sink and the partial
/// content source, then registers its routes and preload callbacks
/// before triggering the initial load.
pub struct App {
    config: Config,
    table: Arc<RouteTable>,
    controller: NavigationController,
}

impl App {
    /// Build an app around an explicit partial fetcher.
    pub fn new(
        config: Config,
        surface: Arc<dyn RenderSurface>,
        history: Arc<dyn HistoryHandle>,
        fetcher: Arc<dyn PartialFetcher>,
    ) -> Self {
        let table = Arc::new(RouteTable::new());
        let mut controller =
            NavigationController::new(Arc::clone(&table), surface, history, fetcher);

        if let Some(path) = &config.fallback_path {
            controller = controller.with_fallback_path(path);
        }
        if let Some(ms) = config.asset_load_timeout_ms {
            controller = controller.with_asset_load_timeout(Duration::from_millis(ms));
        }

        tracing::info!("Navigation core initialized");

        Self {
            config,
            table,
            controller,
        }
    }

    /// Build an app fetching partials over HTTP from
    /// [`Config::partials_base_url`].
    pub fn with_http_fetcher(
        config: Config,
        surface: Arc<dyn RenderSurface>,
        history: Arc<dyn HistoryHandle>,
    ) -> Result<Self> {
        let base = config.partials_base_url.as_deref().ok_or_else(|| {
            CoreError::Config("partials_base_url is required for the HTTP fetcher".to_string())
        })?;
        let fetcher = Arc::new(HttpPartialFetcher::new(base)?);

        Ok(Self::new(config, surface, history, fetcher))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn route_table(&self) -> &RouteTable {
        &self.table
    }

    pub fn register_route(&self, definition: RouteDefinition) -> Result<()> {
        Ok(self.table.register(definition)?)
    }

    /// Register routes in the caller's order; earlier routes win ties.
    pub fn register_routes(&self, definitions: Vec<RouteDefinition>) -> Result<()> {
        Ok(self.table.register_all(definitions)?)
    }

    pub fn registry(&self) -> &CallbackRegistry {
        self.controller.registry()
    }

    pub fn events(&self) -> &EventBus {
        self.controller.events()
    }

    pub fn state(&self) -> StateHandle {
        self.controller.state()
    }

    pub async fn navigate(&self, path: &str) -> Result<bool> {
        Ok(self.controller.navigate(path).await?)
    }

    pub async fn initial_load(&self, path: &str) -> Result<bool> {
        Ok(self.controller.initial_load(path).await?)
    }

    pub async fn handle_history_pop(&self, path: &str) -> Result<bool> {
        Ok(self.controller.handle_history_pop(path).await?)
    }
}
