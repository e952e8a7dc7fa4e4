//! COMPASS Routing
//!
//! Route pattern compilation, the registration-ordered route table and
//! first-match-wins path resolution with percent-decoded parameters.

mod error;
mod pattern;
mod route;
mod table;

pub use error::RoutingError;
pub use pattern::{RoutePattern, RouteVariable};
pub use route::{PreloadTask, Route, RouteDefinition};
pub use table::{RouteMatch, RouteTable};

pub type Result<T> = std::result::Result<T, RoutingError>;
