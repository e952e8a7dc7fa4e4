//! Navigation state container

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockWriteGuard};

use compass_routing::Route;

#[derive(Default)]
pub(crate) struct NavigationState {
    pub navigating: bool,
    pub current_path: Option<String>,
    pub current_route: Option<Arc<Route>>,
    pub params: HashMap<String, String>,
}

/// Read-only view of the navigation state.
///
/// The controller is the single writer; everything else observes
/// through cloned handles instead of sharing mutable globals.
#[derive(Clone, Default)]
pub struct StateHandle {
    inner: Arc<RwLock<NavigationState>>,
}

impl StateHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, NavigationState> {
        self.inner.write()
    }

    /// True while a navigation is running.
    pub fn is_navigating(&self) -> bool {
        self.inner.read().navigating
    }

    pub fn current_path(&self) -> Option<String> {
        self.inner.read().current_path.clone()
    }

    pub fn current_route(&self) -> Option<Arc<Route>> {
        self.inner.read().current_route.clone()
    }

    /// Parameters extracted by the most recent successful resolution.
    pub fn params(&self) -> HashMap<String, String> {
        self.inner.read().params.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_empty() {
        let handle = StateHandle::new();
        assert!(!handle.is_navigating());
        assert!(handle.current_path().is_none());
        assert!(handle.current_route().is_none());
        assert!(handle.params().is_empty());
    }
}
