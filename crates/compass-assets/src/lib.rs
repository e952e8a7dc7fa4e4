//! COMPASS Assets
//!
//! Reconciles the set of framework-managed script/style elements
//! against a route's required assets: duplicates are kept, obsolete
//! elements are reported for detachment, and missing assets are
//! attached exactly once and awaited concurrently.

mod error;
mod reconciler;

pub use error::AssetError;
pub use reconciler::{AssetReconciler, ReconcileOutcome};

pub type Result<T> = std::result::Result<T, AssetError>;
