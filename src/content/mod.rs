//! In-memory help content tree and its loader.

mod model;

pub use model::{ActionType, Category, Contact, Link, Step, Topic};

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching or parsing the content document
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read content file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch content from '{url}': {message}")]
    Http { url: String, message: String },

    #[error("failed to parse content document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the content document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    File(PathBuf),
    Url(String),
}

impl ContentSource {
    /// Interpret a configured source string. Anything starting with
    /// `http://` or `https://` is fetched, everything else is a path.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            ContentSource::Url(value.to_string())
        } else {
            ContentSource::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::File(path) => write!(f, "{}", path.display()),
            ContentSource::Url(url) => f.write_str(url),
        }
    }
}

/// Counts over the loaded tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentStats {
    pub categories: usize,
    pub topics: usize,
    pub steps: usize,
}

/// Read-only category/topic/step tree, in document order
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    categories: Vec<Category>,
}

impl ContentStore {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// An empty store, used as the fallback when loading fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fetch and parse the document at `source`.
    pub async fn load(source: &ContentSource) -> Result<Self, LoadError> {
        let raw = match source {
            ContentSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
            ContentSource::Url(url) => fetch(url).await?,
        };

        let store = Self::from_json(&raw)?;
        let stats = store.stats();
        tracing::info!(
            source = %source,
            categories = stats.categories,
            topics = stats.topics,
            steps = stats.steps,
            "Loaded help content"
        );
        Ok(store)
    }

    /// Parse a document held in memory. A `null` document is an empty tree.
    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        let categories: Option<Vec<Category>> = serde_json::from_str(raw)?;
        Ok(Self::new(categories.unwrap_or_default()))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn find_category(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Look up a topic within an already resolved category
    pub fn find_topic<'a>(&self, category: Option<&'a Category>, slug: &str) -> Option<&'a Topic> {
        category?.topics.iter().find(|t| t.slug == slug)
    }

    pub fn topic(&self, category_slug: &str, topic_slug: &str) -> Option<&Topic> {
        self.find_topic(self.find_category(category_slug), topic_slug)
    }

    pub fn step(&self, category_slug: &str, topic_slug: &str, index: usize) -> Option<&Step> {
        self.topic(category_slug, topic_slug)?.steps.get(index)
    }

    pub fn stats(&self) -> ContentStats {
        let topics = self.categories.iter().map(|c| c.topics.len()).sum();
        let steps = self
            .categories
            .iter()
            .flat_map(|c| &c.topics)
            .map(|t| t.steps.len())
            .sum();
        ContentStats {
            categories: self.categories.len(),
            topics,
            steps,
        }
    }
}

async fn fetch(url: &str) -> Result<String, LoadError> {
    let http_err = |e: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        message: e.to_string(),
    };

    let response = reqwest::Client::new()
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(http_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Http {
            url: url.to_string(),
            message: format!("server responded with {status}"),
        });
    }

    response.text().await.map_err(http_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"[
        {
            "slug": "wartung-pflege",
            "category": "Wartung & Pflege",
            "topics": [
                {"slug": "oelwechsel", "title": "Ölwechsel", "steps": [{"title": "Motor warmfahren"}]},
                {"slug": "reifen", "title": "Reifen prüfen", "steps": []}
            ]
        },
        {"slug": "service-kontakt", "title": "Service & Kontakt", "topics": []}
    ]"#;

    #[test]
    fn test_find_category_present_and_absent() {
        let store = ContentStore::from_json(DOC).unwrap();
        assert_eq!(
            store.find_category("wartung-pflege").map(|c| c.title.as_str()),
            Some("Wartung & Pflege")
        );
        assert!(store.find_category("nope").is_none());
    }

    #[test]
    fn test_find_topic_requires_category() {
        let store = ContentStore::from_json(DOC).unwrap();
        let category = store.find_category("wartung-pflege");
        assert_eq!(
            store.find_topic(category, "reifen").map(|t| t.title.as_str()),
            Some("Reifen prüfen")
        );
        assert!(store.find_topic(category, "nope").is_none());
        assert!(store.find_topic(None, "reifen").is_none());
    }

    #[test]
    fn test_document_order_preserved() {
        let store = ContentStore::from_json(DOC).unwrap();
        let slugs: Vec<_> = store.categories().iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["wartung-pflege", "service-kontakt"]);
    }

    #[test]
    fn test_step_lookup() {
        let store = ContentStore::from_json(DOC).unwrap();
        assert!(store.step("wartung-pflege", "oelwechsel", 0).is_some());
        assert!(store.step("wartung-pflege", "oelwechsel", 1).is_none());
        assert!(store.step("service-kontakt", "oelwechsel", 0).is_none());
    }

    #[test]
    fn test_stats() {
        let store = ContentStore::from_json(DOC).unwrap();
        assert_eq!(
            store.stats(),
            ContentStats {
                categories: 2,
                topics: 2,
                steps: 1
            }
        );
    }

    #[test]
    fn test_null_document_is_empty() {
        let store = ContentStore::from_json("null").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_category_with_category_and_title_keys_loads() {
        let store =
            ContentStore::from_json(r#"[{"slug": "c", "category": "A", "title": "B"}]"#).unwrap();
        assert_eq!(store.find_category("c").map(|c| c.title.as_str()), Some("A"));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = ContentStore::from_json("[{").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_content_source_parse() {
        assert_eq!(
            ContentSource::parse("https://example.com/data.json"),
            ContentSource::Url("https://example.com/data.json".to_string())
        );
        assert_eq!(
            ContentSource::parse("data/hilfecenter.json"),
            ContentSource::File(PathBuf::from("data/hilfecenter.json"))
        );
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let source = ContentSource::File(PathBuf::from("/nonexistent/helpcenter.json"));
        let err = ContentStore::load(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, DOC).unwrap();

        let store = ContentStore::load(&ContentSource::File(path)).await.unwrap();
        assert_eq!(store.categories().len(), 2);
    }
}
