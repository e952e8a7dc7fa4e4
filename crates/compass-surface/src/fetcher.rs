//! Partial content fetchers

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use url::Url;

use crate::surface::PartialFetcher;
use crate::{Result, SurfaceError};

/// Fetches partials over HTTP from `<base>/partials/<name>`.
pub struct HttpPartialFetcher {
    client: reqwest::Client,
    base: Url,
}

impl HttpPartialFetcher {
    pub fn new(base: &str) -> Result<Self> {
        // A trailing slash keeps Url::join from replacing the last path
        // segment of the base.
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{}/", base))?
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(12))
            .build()?;

        Ok(Self { client, base })
    }

    fn partial_url(&self, name: &str) -> Result<Url> {
        Ok(self.base.join(&format!("partials/{}", name))?)
    }
}

#[async_trait]
impl PartialFetcher for HttpPartialFetcher {
    async fn fetch_partial(&self, name: &str) -> Result<String> {
        let url = self.partial_url(name)?;
        let response = self.client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SurfaceError::MissingPartial(name.to_string()));
        }

        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// In-memory partial store for tests and embedders that bundle their
/// markup fragments instead of fetching them.
#[derive(Clone, Default)]
pub struct StaticPartials {
    partials: Arc<RwLock<HashMap<String, String>>>,
}

impl StaticPartials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: &str, markup: &str) {
        self.partials
            .write()
            .insert(name.to_string(), markup.to_string());
    }
}

#[async_trait]
impl PartialFetcher for StaticPartials {
    async fn fetch_partial(&self, name: &str) -> Result<String> {
        self.partials
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| SurfaceError::MissingPartial(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_url_join() {
        let fetcher = HttpPartialFetcher::new("https://example.com/app").unwrap();
        assert_eq!(
            fetcher.partial_url("index.html").unwrap().as_str(),
            "https://example.com/app/partials/index.html"
        );

        let fetcher = HttpPartialFetcher::new("https://example.com/").unwrap();
        assert_eq!(
            fetcher.partial_url("about.html").unwrap().as_str(),
            "https://example.com/partials/about.html"
        );
    }

    #[tokio::test]
    async fn test_static_partials() {
        let partials = StaticPartials::new();
        partials.insert("home.html", "<h1>Home</h1>");

        let markup = partials.fetch_partial("home.html").await.unwrap();
        assert_eq!(markup, "<h1>Home</h1>");

        let missing = partials.fetch_partial("nope.html").await;
        assert!(matches!(missing, Err(SurfaceError::MissingPartial(_))));
    }
}
