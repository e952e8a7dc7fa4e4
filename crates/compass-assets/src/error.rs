//! Asset reconciliation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset load stalled: {url}")]
    LoadStalled { url: String },

    #[error(transparent)]
    Surface(#[from] compass_surface::SurfaceError),
}
