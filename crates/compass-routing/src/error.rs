//! Routing error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("No route matches path: {0}")]
    NotFound(String),

    #[error("Invalid encoding in parameter '{name}': {value}")]
    Decode { name: String, value: String },

    #[error("Invalid route pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },
}
