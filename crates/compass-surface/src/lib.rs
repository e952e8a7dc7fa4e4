//! COMPASS Surface Layer
//!
//! Collaborator boundary between the navigation core and the host:
//! the rendering surface, the history/title sink and the partial
//! content fetcher. Also provides in-memory implementations used by
//! the rest of the workspace's tests and by headless embedders.

mod asset;
mod error;
mod fetcher;
mod memory;
mod surface;

pub use asset::{AssetKind, InjectedAsset};
pub use error::SurfaceError;
pub use fetcher::{HttpPartialFetcher, StaticPartials};
pub use memory::{MemoryHistory, MemorySurface};
pub use surface::{HistoryHandle, PartialFetcher, RenderSurface};

pub type Result<T> = std::result::Result<T, SurfaceError>;

/// Attribute carried by declarative internal-link elements, holding the
/// in-app target path (separate from the element's resolved `href`).
pub const NAV_TRIGGER_ATTRIBUTE: &str = "compass-href";
