//! COMPASS Navigation
//!
//! The navigation lifecycle state machine: guards against in-flight
//! navigations, sequences the transition phases, runs host callbacks
//! and commits the navigation state it owns.

mod controller;
mod error;
mod registry;
mod state;

pub use controller::NavigationController;
pub use error::NavigationError;
pub use registry::{ActivateFn, CallbackRegistry, DeactivateFn, PreloadFn};
pub use state::StateHandle;

pub type Result<T> = std::result::Result<T, NavigationError>;
