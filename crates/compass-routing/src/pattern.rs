//! Route pattern compilation
//!
//! Pattern syntax:
//! - `/users`: literal segments, matched exactly
//! - `/users/:id`: `:name` captures one path segment
//! - `/users/:id?`: trailing `?` makes the segment optional
//! - `/files/*`: `*` greedily matches one or more of any character,
//!   including `/`; wildcards are unnamed and never captured
//!
//! A pattern not ending in `/` also accepts the path with one trailing
//! slash. Compilation is a pure function of the pattern string.

use serde::{Deserialize, Serialize};

use crate::{Result, RoutingError};

/// A named variable declared by a pattern segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteVariable {
    /// 1-based position among the pattern's capturing groups.
    pub capture_index: usize,
    pub name: String,
    pub optional: bool,
}

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20;

/// A compiled route pattern: the anchored matching regex plus the
/// ordered variable descriptors derived from it.
///
/// Immutable once compiled; the variable descriptors are consistent
/// with the regex's capture groups by construction, since only
/// variable segments emit capturing groups.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    pattern: String,
    regex: regex::Regex,
    variables: Vec<RouteVariable>,
}

impl RoutePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = if pattern.starts_with('/') {
            pattern.to_string()
        } else {
            format!("/{}", pattern)
        };

        let (regex_src, variables) = compile_pattern(&pattern);

        let regex = regex::RegexBuilder::new(&regex_src)
            .size_limit(MAX_REGEX_SIZE)
            .build()
            .map_err(|e| RoutingError::Pattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            pattern,
            regex,
            variables,
        })
    }

    /// The normalized pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Variable descriptors in declaration order.
    pub fn variables(&self) -> &[RouteVariable] {
        &self.variables
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Raw capture groups for `path`, indexable by
    /// [`RouteVariable::capture_index`].
    pub fn captures<'t>(&self, path: &'t str) -> Option<regex::Captures<'t>> {
        self.regex.captures(path)
    }
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for RoutePattern {}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// Builds the anchored regex source and the variable list for a
/// normalized (leading-`/`) pattern.
fn compile_pattern(pattern: &str) -> (String, Vec<RouteVariable>) {
    let mut regex_src = String::from("^");
    let mut variables = Vec::new();
    let mut capture_count = 0;

    let trailing_slash = pattern.ends_with('/');
    let body = pattern.strip_suffix('/').unwrap_or(pattern);

    for segment in body.split('/').skip(1) {
        if let Some(declared) = segment.strip_prefix(':') {
            let (name, optional) = match declared.strip_suffix('?') {
                Some(name) => (name, true),
                None => (declared, false),
            };

            capture_count += 1;
            variables.push(RouteVariable {
                capture_index: capture_count,
                name: name.to_string(),
                optional,
            });

            if optional {
                // The optional unit swallows its leading slash, so
                // `/users/:id?` accepts both `/users` and `/users/7`.
                regex_src.push_str("(?:/([^/]+))?");
            } else {
                regex_src.push_str("/([^/]+)");
            }
        } else {
            regex_src.push('/');
            push_literal_segment(&mut regex_src, segment);
        }
    }

    if body.is_empty() {
        // Root pattern "/"
        regex_src.push('/');
    } else if trailing_slash {
        regex_src.push('/');
    } else {
        regex_src.push_str("/?");
    }

    regex_src.push('$');
    (regex_src, variables)
}

/// Escapes a literal segment, translating `*` into a greedy wildcard.
fn push_literal_segment(regex_src: &mut String, segment: &str) {
    for c in segment.chars() {
        match c {
            '*' => regex_src.push_str(".+"),
            '.' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\' => {
                regex_src.push('\\');
                regex_src.push(c);
            }
            _ => regex_src.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let pattern = RoutePattern::new("/users").unwrap();
        assert!(pattern.is_match("/users"));
        assert!(pattern.is_match("/users/"));
        assert!(!pattern.is_match("/users/42"));
        assert!(pattern.variables().is_empty());
    }

    #[test]
    fn test_leading_slash_normalized() {
        let pattern = RoutePattern::new("users").unwrap();
        assert_eq!(pattern.pattern(), "/users");
        assert!(pattern.is_match("/users"));
    }

    #[test]
    fn test_root_pattern() {
        let pattern = RoutePattern::new("/").unwrap();
        assert!(pattern.is_match("/"));
        assert!(!pattern.is_match("/home"));
    }

    #[test]
    fn test_trailing_slash_is_exact() {
        let pattern = RoutePattern::new("/users/").unwrap();
        assert!(pattern.is_match("/users/"));
        assert!(!pattern.is_match("/users"));
    }

    #[test]
    fn test_single_variable() {
        let pattern = RoutePattern::new("/users/:id").unwrap();
        assert!(pattern.is_match("/users/42"));
        assert!(pattern.is_match("/users/42/"));
        assert!(!pattern.is_match("/users/"));
        assert!(!pattern.is_match("/users"));

        let caps = pattern.captures("/users/42").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "42");
    }

    #[test]
    fn test_optional_variable() {
        let pattern = RoutePattern::new("/users/:id?").unwrap();
        assert!(pattern.is_match("/users"));
        assert!(pattern.is_match("/users/7"));

        let caps = pattern.captures("/users").unwrap();
        assert!(caps.get(1).is_none());

        let caps = pattern.captures("/users/7").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "7");
    }

    #[test]
    fn test_variable_descriptors() {
        let pattern = RoutePattern::new("/orders/:order_id/items/:item?").unwrap();
        assert_eq!(
            pattern.variables(),
            &[
                RouteVariable {
                    capture_index: 1,
                    name: "order_id".to_string(),
                    optional: false,
                },
                RouteVariable {
                    capture_index: 2,
                    name: "item".to_string(),
                    optional: true,
                },
            ]
        );
    }

    #[test]
    fn test_wildcard() {
        let pattern = RoutePattern::new("/files/*").unwrap();
        assert!(pattern.is_match("/files/a"));
        assert!(pattern.is_match("/files/css/styles/main.css"));
        assert!(!pattern.is_match("/files/"));
        // Wildcards are unnamed and never captured
        assert!(pattern.variables().is_empty());
    }

    #[test]
    fn test_literal_metacharacters_escaped() {
        let pattern = RoutePattern::new("/api/v1.0").unwrap();
        assert!(pattern.is_match("/api/v1.0"));
        assert!(!pattern.is_match("/api/v1X0"));
    }

    #[test]
    fn test_compilation_is_total() {
        // Arbitrary strings compile; odd segments are treated literally
        for odd in ["", "///", "/a b/c", "/(((", "/:?", "/:x?/:y?"] {
            assert!(RoutePattern::new(odd).is_ok(), "pattern {:?}", odd);
        }
    }
}
