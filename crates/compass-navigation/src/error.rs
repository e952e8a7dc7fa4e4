//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("A navigation is already in flight")]
    AlreadyNavigating,

    #[error("Routing error: {0}")]
    Routing(#[from] compass_routing::RoutingError),

    #[error("Asset error: {0}")]
    Asset(#[from] compass_assets::AssetError),

    #[error("Surface error: {0}")]
    Surface(#[from] compass_surface::SurfaceError),
}
