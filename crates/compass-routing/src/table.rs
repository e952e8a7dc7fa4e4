//! Route table and path resolution

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use percent_encoding::percent_decode_str;

use crate::route::{Route, RouteDefinition};
use crate::{Result, RoutingError};

/// A successfully resolved route with its extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: Arc<Route>,
    pub params: HashMap<String, String>,
}

/// Append-only route table, insertion order = registration order.
///
/// Matching tries routes in registration order and the first match
/// wins; more specific routes must be registered before more general
/// or wildcard ones.
#[derive(Default)]
pub struct RouteTable {
    routes: RwLock<Vec<Arc<Route>>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and append one route.
    pub fn register(&self, definition: RouteDefinition) -> Result<()> {
        let route = Route::compile(definition)?;
        tracing::debug!(pattern = %route.pattern(), "Registered route");
        self.routes.write().push(Arc::new(route));
        Ok(())
    }

    /// Compile and append routes in the caller's order.
    pub fn register_all(&self, definitions: Vec<RouteDefinition>) -> Result<()> {
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(())
    }

    /// Snapshot of the registered routes in registration order.
    pub fn routes(&self) -> Vec<Arc<Route>> {
        self.routes.read().clone()
    }

    pub fn len(&self) -> usize {
        self.routes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.read().is_empty()
    }

    /// Find the first matching route for `path` and extract its
    /// parameter values.
    ///
    /// An optional variable whose capture did not participate yields no
    /// entry in the parameter map. A malformed percent-encoded value is
    /// a [`RoutingError::Decode`], distinct from
    /// [`RoutingError::NotFound`].
    pub fn resolve(&self, path: &str) -> Result<RouteMatch> {
        for route in self.routes.read().iter() {
            let Some(caps) = route.pattern().captures(path) else {
                continue;
            };

            let mut params = HashMap::new();
            for variable in route.variables() {
                if let Some(capture) = caps.get(variable.capture_index) {
                    let value = decode_param(&variable.name, capture.as_str())?;
                    params.insert(variable.name.clone(), value);
                }
            }

            tracing::debug!(path = %path, pattern = %route.pattern(), "Resolved route");
            return Ok(RouteMatch {
                route: Arc::clone(route),
                params,
            });
        }

        Err(RoutingError::NotFound(path.to_string()))
    }
}

/// Percent-decodes a captured parameter value, with embedded `/`
/// characters stripped first.
///
/// `percent_decode_str` alone passes malformed `%` sequences through
/// untouched, so they are rejected up front to keep the failure
/// distinguishable from a clean miss.
fn decode_param(name: &str, raw: &str) -> Result<String> {
    let stripped: String = raw.chars().filter(|c| *c != '/').collect();

    if !has_valid_percent_sequences(&stripped) {
        return Err(RoutingError::Decode {
            name: name.to_string(),
            value: raw.to_string(),
        });
    }

    percent_decode_str(&stripped)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| RoutingError::Decode {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

fn has_valid_percent_sequences(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(patterns: &[&str]) -> RouteTable {
        let table = RouteTable::new();
        for pattern in patterns {
            table
                .register(RouteDefinition::new(pattern, "page.html", "Page"))
                .unwrap();
        }
        table
    }

    #[test]
    fn test_exact_match_yields_empty_params() {
        let table = table_with(&["/about"]);
        let matched = table.resolve("/about").unwrap();
        assert!(matched.params.is_empty());
    }

    #[test]
    fn test_variable_extraction() {
        let table = table_with(&["/users/:id"]);
        let matched = table.resolve("/users/42").unwrap();
        assert_eq!(matched.params.get("id"), Some(&"42".to_string()));

        assert!(matches!(
            table.resolve("/users/"),
            Err(RoutingError::NotFound(_))
        ));
    }

    #[test]
    fn test_optional_variable_absent() {
        let table = table_with(&["/users/:id?"]);

        let matched = table.resolve("/users").unwrap();
        assert!(!matched.params.contains_key("id"));

        let matched = table.resolve("/users/7").unwrap();
        assert_eq!(matched.params.get("id"), Some(&"7".to_string()));
    }

    #[test]
    fn test_registration_order_wins() {
        let table = RouteTable::new();
        table
            .register(RouteDefinition::new("/a/:x", "var.html", "Var"))
            .unwrap();
        table
            .register(RouteDefinition::new("/a/b", "lit.html", "Lit"))
            .unwrap();

        let matched = table.resolve("/a/b").unwrap();
        assert_eq!(matched.route.partial_name(), "var.html");
        assert_eq!(matched.params.get("x"), Some(&"b".to_string()));
    }

    #[test]
    fn test_percent_decoding() {
        let table = table_with(&["/search/:term"]);

        let matched = table.resolve("/search/rust%20lang").unwrap();
        assert_eq!(matched.params.get("term"), Some(&"rust lang".to_string()));

        let matched = table.resolve("/search/%7Bid%7D").unwrap();
        assert_eq!(matched.params.get("term"), Some(&"{id}".to_string()));
    }

    #[test]
    fn test_malformed_encoding_is_distinct_error() {
        let table = table_with(&["/search/:term"]);

        assert!(matches!(
            table.resolve("/search/50%"),
            Err(RoutingError::Decode { .. })
        ));
        assert!(matches!(
            table.resolve("/search/%zz"),
            Err(RoutingError::Decode { .. })
        ));
        // Decodes to invalid UTF-8
        assert!(matches!(
            table.resolve("/search/%FF"),
            Err(RoutingError::Decode { .. })
        ));
    }

    #[test]
    fn test_not_found_is_explicit() {
        let table = table_with(&["/home"]);
        match table.resolve("/missing") {
            Err(RoutingError::NotFound(path)) => assert_eq!(path, "/missing"),
            other => panic!("Expected NotFound, got {:?}", other.map(|m| m.params)),
        }
    }

    #[test]
    fn test_wildcard_after_specific() {
        let table = RouteTable::new();
        table
            .register(RouteDefinition::new("/docs/intro", "intro.html", "Intro"))
            .unwrap();
        table
            .register(RouteDefinition::new("/docs/*", "docs.html", "Docs"))
            .unwrap();

        assert_eq!(
            table.resolve("/docs/intro").unwrap().route.partial_name(),
            "intro.html"
        );
        assert_eq!(
            table
                .resolve("/docs/guide/advanced")
                .unwrap()
                .route
                .partial_name(),
            "docs.html"
        );
    }
}
