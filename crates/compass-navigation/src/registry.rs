//! Host callback registry
//!
//! An explicit name-to-callback mapping in place of ambient global
//! probing: hosts register preload tasks by name, and each loaded page
//! registers at most one activate/deactivate hook pair. The hook pair
//! is cleared by the controller on every navigation; preload callbacks
//! persist for the process lifetime.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use parking_lot::RwLock;
use serde_json::Value;

/// Async callback run before a navigation completes, with the params
/// declared by the route's preload task.
pub type PreloadFn = Arc<dyn Fn(Vec<Value>) -> BoxFuture<'static, ()> + Send + Sync>;

/// Veto hook awaited before leaving the current page; `false` cancels
/// the navigation.
pub type DeactivateFn = Arc<dyn Fn() -> BoxFuture<'static, bool> + Send + Sync>;

/// Setup hook invoked once the new page is in place.
pub type ActivateFn = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct RegistryState {
    preload: HashMap<String, PreloadFn>,
    on_activate: Option<ActivateFn>,
    on_deactivate: Option<DeactivateFn>,
}

#[derive(Clone, Default)]
pub struct CallbackRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_preload<F, Fut>(&self, name: &str, callback: F)
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let wrapped: PreloadFn = Arc::new(move |params| Box::pin(callback(params)));
        self.state.write().preload.insert(name.to_string(), wrapped);
    }

    pub fn preload(&self, name: &str) -> Option<PreloadFn> {
        self.state.read().preload.get(name).cloned()
    }

    pub fn set_on_activate<F>(&self, hook: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.state.write().on_activate = Some(Arc::new(hook));
    }

    pub fn set_on_deactivate<F, Fut>(&self, hook: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let wrapped: DeactivateFn = Arc::new(move || Box::pin(hook()));
        self.state.write().on_deactivate = Some(wrapped);
    }

    pub fn on_activate(&self) -> Option<ActivateFn> {
        self.state.read().on_activate.clone()
    }

    pub fn on_deactivate(&self) -> Option<DeactivateFn> {
        self.state.read().on_deactivate.clone()
    }

    /// Remove the per-page hook pair. Preload callbacks are untouched.
    pub fn clear_hooks(&self) {
        let mut state = self.state.write();
        state.on_activate = None;
        state.on_deactivate = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[tokio::test]
    async fn test_preload_lookup_and_invocation() {
        let registry = CallbackRegistry::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&received);
        registry.register_preload("loadUser", move |params| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().extend(params);
            }
        });

        assert!(registry.preload("missing").is_none());

        let callback = registry.preload("loadUser").unwrap();
        callback(vec![Value::from(7)]).await;
        assert_eq!(*received.lock(), vec![Value::from(7)]);
    }

    #[tokio::test]
    async fn test_hooks_are_cleared_together() {
        let registry = CallbackRegistry::new();
        registry.set_on_activate(|| {});
        registry.set_on_deactivate(|| async { true });

        assert!(registry.on_activate().is_some());
        assert!(registry.on_deactivate().is_some());

        registry.clear_hooks();
        assert!(registry.on_activate().is_none());
        assert!(registry.on_deactivate().is_none());
    }

    #[test]
    fn test_clearing_hooks_keeps_preload_callbacks() {
        let registry = CallbackRegistry::new();
        registry.register_preload("warmCache", |_| async {});
        registry.clear_hooks();
        assert!(registry.preload("warmCache").is_some());
    }
}
