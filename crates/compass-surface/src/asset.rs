//! Injected asset identity

use serde::{Deserialize, Serialize};

/// Kind of a framework-managed asset element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// A script element, attached to the document body
    Script,
    /// A stylesheet link element, attached to the document head
    Style,
}

impl AssetKind {
    /// Marker attribute identifying framework-managed elements of this
    /// kind, distinguishing them from hand-authored ones.
    pub fn marker_attribute(&self) -> &'static str {
        match self {
            AssetKind::Script => "compass-injected-script",
            AssetKind::Style => "compass-injected-link",
        }
    }

    /// Attribute carrying the source URL on elements of this kind.
    pub fn url_attribute(&self) -> &'static str {
        match self {
            AssetKind::Script => "src",
            AssetKind::Style => "href",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Script => "script",
            AssetKind::Style => "style",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "script" => Ok(AssetKind::Script),
            "style" => Ok(AssetKind::Style),
            _ => Err(format!("Unknown asset kind: {}", s)),
        }
    }
}

/// A script or style element currently attached to the rendering
/// surface, tagged with the marker attribute for its kind.
///
/// The `id` is a surface-scoped element identity; it is what makes a
/// later detach unambiguous when the same URL was attached more than
/// once across navigations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectedAsset {
    pub id: u64,
    pub kind: AssetKind,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [AssetKind::Script, AssetKind::Style] {
            let parsed: AssetKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("image".parse::<AssetKind>().is_err());
    }

    #[test]
    fn test_marker_attributes_are_distinct() {
        assert_ne!(
            AssetKind::Script.marker_attribute(),
            AssetKind::Style.marker_attribute()
        );
    }
}
