//! Collaborator traits consumed by the navigation core

use async_trait::async_trait;

use crate::asset::{AssetKind, InjectedAsset};
use crate::Result;

/// The rendering surface a navigation drives.
///
/// Implementations own the live markup and the set of framework-managed
/// script/style elements. Assets attached through this trait carry the
/// marker attribute for their kind so they can be told apart from
/// hand-authored elements on later enumerations.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Replace the surface's content with the given markup.
    fn set_content(&self, markup: &str);

    /// Enumerate currently attached framework-managed assets of `kind`.
    fn injected_assets(&self, kind: AssetKind) -> Vec<InjectedAsset>;

    /// Attach a new marked element for `url`, resolving once the
    /// element has signalled load completion.
    async fn attach_asset(&self, kind: AssetKind, url: &str) -> Result<InjectedAsset>;

    /// Detach a previously attached asset.
    fn detach_asset(&self, asset: &InjectedAsset) -> Result<()>;

    /// Re-bind the declarative internal-link elements (those carrying
    /// [`crate::NAV_TRIGGER_ATTRIBUTE`]) in the currently rendered
    /// markup so their activation navigates in-app instead of
    /// performing a full document load.
    fn rebind_navigation_triggers(&self);
}

/// History and document-title collaborator.
pub trait HistoryHandle: Send + Sync {
    fn set_title(&self, title: &str);

    /// Push `path` onto the navigation history under `title`.
    fn push_path(&self, path: &str, title: &str);
}

/// Fetches the markup fragment associated with a route.
#[async_trait]
pub trait PartialFetcher: Send + Sync {
    async fn fetch_partial(&self, name: &str) -> Result<String>;
}
