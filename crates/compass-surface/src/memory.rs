//! In-memory collaborators for tests and headless embedding

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use scraper::{Html, Selector};

use crate::asset::{AssetKind, InjectedAsset};
use crate::surface::{HistoryHandle, RenderSurface};
use crate::{Result, SurfaceError, NAV_TRIGGER_ATTRIBUTE};

#[derive(Default)]
struct SurfaceState {
    content: String,
    assets: Vec<InjectedAsset>,
    next_asset_id: u64,
    bound_targets: Vec<String>,
    stalled_urls: HashSet<String>,
}

/// An in-memory rendering surface.
///
/// Plays the role a live DOM plays in production: it holds the current
/// markup and the list of framework-managed assets, and it resolves
/// trigger rebinding against the markup it holds. URLs registered via
/// [`MemorySurface::stall_url`] never signal load completion, which is
/// how stalled-asset handling is exercised in tests.
#[derive(Clone, Default)]
pub struct MemorySurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> String {
        self.state.lock().content.clone()
    }

    /// Target paths discovered by the most recent trigger rebind.
    pub fn bound_targets(&self) -> Vec<String> {
        self.state.lock().bound_targets.clone()
    }

    /// Mark `url` as never signalling load completion.
    pub fn stall_url(&self, url: &str) {
        self.state.lock().stalled_urls.insert(url.to_string());
    }

    /// Seed an already-attached asset, as if a previous navigation had
    /// injected it.
    pub fn seed_asset(&self, kind: AssetKind, url: &str) -> InjectedAsset {
        let mut state = self.state.lock();
        state.next_asset_id += 1;
        let asset = InjectedAsset {
            id: state.next_asset_id,
            kind,
            url: url.to_string(),
        };
        state.assets.push(asset.clone());
        asset
    }
}

#[async_trait]
impl RenderSurface for MemorySurface {
    fn set_content(&self, markup: &str) {
        self.state.lock().content = markup.to_string();
    }

    fn injected_assets(&self, kind: AssetKind) -> Vec<InjectedAsset> {
        self.state
            .lock()
            .assets
            .iter()
            .filter(|asset| asset.kind == kind)
            .cloned()
            .collect()
    }

    async fn attach_asset(&self, kind: AssetKind, url: &str) -> Result<InjectedAsset> {
        let (asset, stalled) = {
            let mut state = self.state.lock();
            state.next_asset_id += 1;
            let asset = InjectedAsset {
                id: state.next_asset_id,
                kind,
                url: url.to_string(),
            };
            state.assets.push(asset.clone());
            (asset, state.stalled_urls.contains(url))
        };

        if stalled {
            // The element is attached but its load signal never fires.
            std::future::pending::<()>().await;
        }

        Ok(asset)
    }

    fn detach_asset(&self, asset: &InjectedAsset) -> Result<()> {
        let mut state = self.state.lock();
        let before = state.assets.len();
        state.assets.retain(|a| a.id != asset.id);

        if state.assets.len() == before {
            return Err(SurfaceError::AssetNotFound(asset.url.clone()));
        }

        Ok(())
    }

    fn rebind_navigation_triggers(&self) {
        let mut state = self.state.lock();
        let fragment = Html::parse_fragment(&state.content);

        let mut targets = Vec::new();
        if let Ok(selector) = Selector::parse(&format!("[{}]", NAV_TRIGGER_ATTRIBUTE)) {
            for element in fragment.select(&selector) {
                if let Some(target) = element.value().attr(NAV_TRIGGER_ATTRIBUTE) {
                    targets.push(target.to_string());
                }
            }
        }

        tracing::debug!(count = targets.len(), "Rebound navigation triggers");
        state.bound_targets = targets;
    }
}

#[derive(Default)]
struct HistoryState {
    title: String,
    entries: Vec<(String, String)>,
}

/// Records title updates and history pushes.
#[derive(Clone, Default)]
pub struct MemoryHistory {
    state: Arc<Mutex<HistoryState>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> String {
        self.state.lock().title.clone()
    }

    /// All `(path, title)` pairs pushed so far, oldest first.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.state.lock().entries.clone()
    }
}

impl HistoryHandle for MemoryHistory {
    fn set_title(&self, title: &str) {
        self.state.lock().title = title.to_string();
    }

    fn push_path(&self, path: &str, title: &str) {
        self.state
            .lock()
            .entries
            .push((path.to_string(), title.to_string()));
    }
}
