//! COMPASS Events
//!
//! Lifecycle notifications published during navigation: the
//! loading-state change event and the per-phase checkpoint events,
//! delivered synchronously and in emission order.

mod bus;
mod event;

pub use bus::EventBus;
pub use event::{LoadChange, LoadPhase, NavigationEvent};
