//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Surface error: {0}")]
    Surface(#[from] compass_surface::SurfaceError),

    #[error("Routing error: {0}")]
    Routing(#[from] compass_routing::RoutingError),

    #[error("Asset error: {0}")]
    Asset(#[from] compass_assets::AssetError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] compass_navigation::NavigationError),

    #[error("Configuration error: {0}")]
    Config(String),
}
