//! Idempotent script/style asset reconciliation

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::try_join_all;

use compass_surface::{AssetKind, InjectedAsset, RenderSurface};

use crate::{AssetError, Result};

/// Result of a reconcile pass.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    /// Previously injected assets no longer required. Detachment timing
    /// is the caller's policy; the reconciler never detaches.
    pub obsolete: Vec<InjectedAsset>,
}

/// Transitions the injected asset set of one kind to a route's
/// required URLs with the minimal set of insertions.
pub struct AssetReconciler {
    surface: Arc<dyn RenderSurface>,
    load_timeout: Option<Duration>,
}

impl AssetReconciler {
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            surface,
            load_timeout: None,
        }
    }

    /// Surface a stalled asset load as [`AssetError::LoadStalled`]
    /// after `timeout` instead of waiting forever.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    /// Reconcile the injected assets of `kind` against `required`.
    ///
    /// URLs already injected are kept and contribute already-resolved
    /// units of work; the rest of `required` is attached exactly once
    /// per URL. All new loads settle concurrently and the call returns
    /// only once every one of them has signalled completion. Insertion
    /// order does not imply load order.
    pub async fn reconcile(
        &self,
        kind: AssetKind,
        required: &[String],
    ) -> Result<ReconcileOutcome> {
        let current = self.surface.injected_assets(kind);
        let required_set: HashSet<&str> = required.iter().map(String::as_str).collect();

        let mut duplicates: HashSet<&str> = HashSet::new();
        let mut obsolete = Vec::new();
        for asset in &current {
            if required_set.contains(asset.url.as_str()) {
                duplicates.insert(asset.url.as_str());
            } else {
                obsolete.push(asset.clone());
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut loads = Vec::new();
        for url in required {
            if duplicates.contains(url.as_str()) || !seen.insert(url.as_str()) {
                continue;
            }
            loads.push(self.attach(kind, url));
        }

        let attached = try_join_all(loads).await?;

        tracing::debug!(
            kind = %kind,
            attached = attached.len(),
            kept = duplicates.len(),
            obsolete = obsolete.len(),
            "Reconciled assets"
        );

        Ok(ReconcileOutcome { obsolete })
    }

    async fn attach(&self, kind: AssetKind, url: &str) -> Result<InjectedAsset> {
        match self.load_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.surface.attach_asset(kind, url))
                .await
                .map_err(|_| AssetError::LoadStalled {
                    url: url.to_string(),
                })?
                .map_err(AssetError::from),
            None => Ok(self.surface.attach_asset(kind, url).await?),
        }
    }
}

impl Clone for AssetReconciler {
    fn clone(&self) -> Self {
        Self {
            surface: Arc::clone(&self.surface),
            load_timeout: self.load_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_surface::MemorySurface;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_keep_remove_insert() {
        let surface = MemorySurface::new();
        let kept = surface.seed_asset(AssetKind::Script, "/js/x.js");
        let stale = surface.seed_asset(AssetKind::Script, "/js/z.js");

        let reconciler = AssetReconciler::new(Arc::new(surface.clone()));
        let outcome = reconciler
            .reconcile(AssetKind::Script, &urls(&["/js/x.js", "/js/y.js"]))
            .await
            .unwrap();

        // Z is reported obsolete, X untouched, Y attached
        assert_eq!(outcome.obsolete, vec![stale]);
        let injected = surface.injected_assets(AssetKind::Script);
        assert_eq!(injected.len(), 3);
        assert!(injected.contains(&kept));
        assert!(injected.iter().any(|a| a.url == "/js/y.js"));
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent() {
        let surface = MemorySurface::new();
        let reconciler = AssetReconciler::new(Arc::new(surface.clone()));
        let required = urls(&["/css/a.css", "/css/b.css"]);

        let first = reconciler
            .reconcile(AssetKind::Style, &required)
            .await
            .unwrap();
        assert!(first.obsolete.is_empty());
        let after_first = surface.injected_assets(AssetKind::Style);

        let second = reconciler
            .reconcile(AssetKind::Style, &required)
            .await
            .unwrap();
        assert!(second.obsolete.is_empty());
        assert_eq!(surface.injected_assets(AssetKind::Style), after_first);
    }

    #[tokio::test]
    async fn test_duplicate_required_url_attached_once() {
        let surface = MemorySurface::new();
        let reconciler = AssetReconciler::new(Arc::new(surface.clone()));

        reconciler
            .reconcile(AssetKind::Script, &urls(&["/js/a.js", "/js/a.js"]))
            .await
            .unwrap();

        assert_eq!(surface.injected_assets(AssetKind::Script).len(), 1);
    }

    #[tokio::test]
    async fn test_kinds_are_reconciled_independently() {
        let surface = MemorySurface::new();
        surface.seed_asset(AssetKind::Style, "/css/a.css");

        let reconciler = AssetReconciler::new(Arc::new(surface.clone()));
        let outcome = reconciler
            .reconcile(AssetKind::Script, &urls(&["/js/a.js"]))
            .await
            .unwrap();

        // The style asset is not obsolete for a script reconcile
        assert!(outcome.obsolete.is_empty());
        assert_eq!(surface.injected_assets(AssetKind::Style).len(), 1);
    }

    #[tokio::test]
    async fn test_stalled_load_times_out() {
        let surface = MemorySurface::new();
        surface.stall_url("/js/slow.js");

        let reconciler = AssetReconciler::new(Arc::new(surface))
            .with_load_timeout(Duration::from_millis(20));
        let result = reconciler
            .reconcile(AssetKind::Script, &urls(&["/js/slow.js"]))
            .await;

        assert!(matches!(
            result,
            Err(AssetError::LoadStalled { url }) if url == "/js/slow.js"
        ));
    }
}
