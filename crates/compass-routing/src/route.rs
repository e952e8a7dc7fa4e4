//! Route definitions and compiled routes

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pattern::{RoutePattern, RouteVariable};
use crate::Result;

/// A named callback to invoke before a navigation completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreloadTask {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Value>,
}

impl PreloadTask {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
        }
    }

    pub fn with_params(name: &str, params: Vec<Value>) -> Self {
        Self {
            name: name.to_string(),
            params,
        }
    }
}

/// Registration input for a single navigation target.
///
/// Deserializable so hosts can keep their route table in data and feed
/// it to [`crate::RouteTable::register_all`] in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub pattern: String,
    pub partial: String,
    pub title: String,
    #[serde(default)]
    pub scripts: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub preload: Vec<PreloadTask>,
}

impl RouteDefinition {
    pub fn new(pattern: &str, partial: &str, title: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            partial: partial.to_string(),
            title: title.to_string(),
            scripts: Vec::new(),
            styles: Vec::new(),
            preload: Vec::new(),
        }
    }

    pub fn with_scripts(mut self, scripts: Vec<String>) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn with_styles(mut self, styles: Vec<String>) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_preload(mut self, preload: Vec<PreloadTask>) -> Self {
        self.preload = preload;
        self
    }
}

/// A compiled, immutable navigation target.
#[derive(Debug)]
pub struct Route {
    pattern: RoutePattern,
    partial_name: String,
    title: String,
    script_urls: Vec<String>,
    style_urls: Vec<String>,
    preload_tasks: Vec<PreloadTask>,
}

impl Route {
    pub(crate) fn compile(definition: RouteDefinition) -> Result<Self> {
        let pattern = RoutePattern::new(&definition.pattern)?;

        Ok(Self {
            pattern,
            partial_name: definition.partial,
            title: definition.title,
            script_urls: definition.scripts,
            style_urls: definition.styles,
            preload_tasks: definition.preload,
        })
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Identifier of the markup fragment to load for this route.
    pub fn partial_name(&self) -> &str {
        &self.partial_name
    }

    /// Default document title for this route.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Required script assets, insertion order significant.
    pub fn script_urls(&self) -> &[String] {
        &self.script_urls
    }

    /// Required style assets, insertion order significant.
    pub fn style_urls(&self) -> &[String] {
        &self.style_urls
    }

    pub fn preload_tasks(&self) -> &[PreloadTask] {
        &self.preload_tasks
    }

    pub fn variables(&self) -> &[RouteVariable] {
        self.pattern.variables()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_from_definition() {
        let route = Route::compile(
            RouteDefinition::new("/users/:id", "user.html", "User")
                .with_scripts(vec!["/js/user.js".to_string()])
                .with_styles(vec!["/css/user.css".to_string()]),
        )
        .unwrap();

        assert_eq!(route.partial_name(), "user.html");
        assert_eq!(route.title(), "User");
        assert_eq!(route.script_urls(), &["/js/user.js".to_string()]);
        assert_eq!(route.variables().len(), 1);
    }

    #[test]
    fn test_definition_deserializes_with_defaults() {
        let definition: RouteDefinition = serde_json::from_str(
            r#"{ "pattern": "/about", "partial": "about.html", "title": "About" }"#,
        )
        .unwrap();

        assert!(definition.scripts.is_empty());
        assert!(definition.styles.is_empty());
        assert!(definition.preload.is_empty());
    }

    #[test]
    fn test_preload_task_params_deserialize() {
        let task: PreloadTask =
            serde_json::from_str(r#"{ "name": "loadUser", "params": [7, "admin"] }"#).unwrap();

        assert_eq!(task.name, "loadUser");
        assert_eq!(task.params.len(), 2);
    }
}
