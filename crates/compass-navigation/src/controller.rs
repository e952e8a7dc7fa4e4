//! Navigation lifecycle controller
//!
//! Phase sequence for a successful navigation:
//!
//! ```text
//! IDLE
//!   deactivate guard          (only cancellation point)
//! FETCHING_ROUTE              resolve path, commit state, push history
//! RELOADING_LINKS             reconcile style assets
//! OVERRIDING_HREF             rebind declarative navigation triggers
//! RELOADING_SCRIPTS           reconcile script assets
//! PRELOADING_ROUTE            run registered preload tasks
//! LOADING_HTML                fetch partial, swap content, detach obsolete
//! IDLE                        finished load-change, activation hook
//! ```
//!
//! Phases never advance until every operation inside them has settled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;

use compass_assets::AssetReconciler;
use compass_events::{EventBus, LoadChange, LoadPhase, NavigationEvent};
use compass_routing::{Route, RouteMatch, RouteTable, RoutingError};
use compass_surface::{AssetKind, HistoryHandle, PartialFetcher, RenderSurface};

use crate::registry::CallbackRegistry;
use crate::state::StateHandle;
use crate::{NavigationError, Result};

/// Drives the navigation lifecycle against the host's collaborators.
///
/// Owns the navigation state; everything else reads it through
/// [`StateHandle`]. `navigate` must not run concurrently with itself;
/// a second call while one is in flight is rejected with
/// [`NavigationError::AlreadyNavigating`].
pub struct NavigationController {
    table: Arc<RouteTable>,
    surface: Arc<dyn RenderSurface>,
    history: Arc<dyn HistoryHandle>,
    fetcher: Arc<dyn PartialFetcher>,
    reconciler: AssetReconciler,
    registry: CallbackRegistry,
    events: EventBus,
    state: StateHandle,
    fallback_path: Option<String>,
    in_flight: Arc<AtomicBool>,
}

impl NavigationController {
    pub fn new(
        table: Arc<RouteTable>,
        surface: Arc<dyn RenderSurface>,
        history: Arc<dyn HistoryHandle>,
        fetcher: Arc<dyn PartialFetcher>,
    ) -> Self {
        let reconciler = AssetReconciler::new(Arc::clone(&surface));

        Self {
            table,
            surface,
            history,
            fetcher,
            reconciler,
            registry: CallbackRegistry::new(),
            events: EventBus::new(),
            state: StateHandle::new(),
            fallback_path: None,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Path resolved instead when a requested path matches no route.
    pub fn with_fallback_path(mut self, path: &str) -> Self {
        self.fallback_path = Some(path.to_string());
        self
    }

    /// Bound the wait for each asset load signal.
    pub fn with_asset_load_timeout(mut self, timeout: Duration) -> Self {
        self.reconciler = self.reconciler.with_load_timeout(timeout);
        self
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn registry(&self) -> &CallbackRegistry {
        &self.registry
    }

    /// Read-only handle onto the navigation state.
    pub fn state(&self) -> StateHandle {
        self.state.clone()
    }

    /// Drive a full navigation to `path`.
    ///
    /// Returns `Ok(false)` when the current page's deactivate hook
    /// vetoed the navigation, `Ok(true)` once the new page is in place.
    pub async fn navigate(&self, path: &str) -> Result<bool> {
        let _guard = self.begin()?;

        // Deactivate guard: the only cancellation point. Consulted only
        // when some page is actually loaded.
        if self.state.current_route().is_some() {
            if let Some(hook) = self.registry.on_deactivate() {
                if !hook().await {
                    tracing::info!(path = %path, "Navigation cancelled by deactivate hook");
                    self.set_loading(false, true);
                    return Ok(false);
                }
            }
        }

        self.set_loading(true, false);

        match self.run_to_completion(path).await {
            Ok(()) => {
                self.set_loading(false, false);
                // The finished load-change hands control to the newly
                // loaded page's setup, if it registered one.
                if let Some(hook) = self.registry.on_activate() {
                    hook();
                }
                tracing::info!(path = %path, "Navigation finished");
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Navigation aborted");
                self.set_loading(false, false);
                Err(e)
            }
        }
    }

    /// Entry point for the initial page load.
    pub async fn initial_load(&self, path: &str) -> Result<bool> {
        self.navigate(path).await
    }

    /// Entry point for a back/forward history move: navigates only when
    /// `path` differs from the current one.
    pub async fn handle_history_pop(&self, path: &str) -> Result<bool> {
        if self.state.current_path().as_deref() == Some(path) {
            return Ok(false);
        }
        self.navigate(path).await
    }

    async fn run_to_completion(&self, path: &str) -> Result<()> {
        self.enter_phase(LoadPhase::FetchingRoute);
        let matched = self.resolve_with_fallback(path)?;
        let route = Arc::clone(&matched.route);

        {
            let mut state = self.state.write();
            state.current_path = Some(path.to_string());
            state.current_route = Some(Arc::clone(&route));
            state.params = matched.params;
        }
        // Hooks are per-page; the pair registered by the outgoing page
        // must never survive into the incoming one.
        self.registry.clear_hooks();

        self.history.set_title(route.title());
        self.history.push_path(path, route.title());

        self.enter_phase(LoadPhase::ReloadingLinks);
        let style_outcome = self
            .reconciler
            .reconcile(AssetKind::Style, route.style_urls())
            .await?;

        self.enter_phase(LoadPhase::OverridingHref);
        self.surface.rebind_navigation_triggers();

        self.enter_phase(LoadPhase::ReloadingScripts);
        let script_outcome = self
            .reconciler
            .reconcile(AssetKind::Script, route.script_urls())
            .await?;

        self.enter_phase(LoadPhase::PreloadingRoute);
        self.run_preload_tasks(&route).await;

        self.enter_phase(LoadPhase::LoadingHtml);
        let markup = self.fetcher.fetch_partial(route.partial_name()).await?;
        self.surface.set_content(&markup);

        for asset in style_outcome
            .obsolete
            .iter()
            .chain(script_outcome.obsolete.iter())
        {
            self.surface.detach_asset(asset)?;
        }

        Ok(())
    }

    fn resolve_with_fallback(&self, path: &str) -> Result<RouteMatch> {
        match self.table.resolve(path) {
            Err(RoutingError::NotFound(missed)) => match &self.fallback_path {
                Some(fallback) => {
                    tracing::debug!(path = %missed, fallback = %fallback, "No route matched, using fallback");
                    Ok(self.table.resolve(fallback)?)
                }
                None => Err(RoutingError::NotFound(missed).into()),
            },
            other => other.map_err(NavigationError::from),
        }
    }

    /// Runs every preload task whose callback is registered; all tasks
    /// run concurrently and the phase waits for all of them.
    async fn run_preload_tasks(&self, route: &Route) {
        let mut pending = Vec::new();
        for task in route.preload_tasks() {
            match self.registry.preload(&task.name) {
                Some(callback) => pending.push(callback(task.params.clone())),
                // Unregistered names are skipped, not an error
                None => {
                    tracing::debug!(task = %task.name, "Preload task not registered, skipping")
                }
            }
        }
        join_all(pending).await;
    }

    fn set_loading(&self, value: bool, cancelled_by_deactivate: bool) {
        let previous = {
            let mut state = self.state.write();
            let previous = state.navigating;
            state.navigating = value;
            previous
        };

        self.events.emit(NavigationEvent::LoadChange(LoadChange {
            previous_loading: previous,
            new_loading: value,
            cancelled_by_deactivate,
        }));
    }

    fn enter_phase(&self, phase: LoadPhase) {
        tracing::debug!(phase = %phase, "Entering phase");
        self.events.emit(NavigationEvent::Phase(phase));
    }

    fn begin(&self) -> Result<InFlightGuard> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(NavigationError::AlreadyNavigating);
        }
        Ok(InFlightGuard {
            flag: Arc::clone(&self.in_flight),
        })
    }
}

/// Releases the in-flight flag on every exit path.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
