//! Read-only content store.
//!
//! Two documents are loaded once at startup and never mutated afterwards:
//!
//! ```text
//! content/
//! ├── slugs.json     # { "<slugId>": SlugLayout, ... }
//! └── pages.json     # { "<pageId>": Page, ... }
//! ```
//!
//! Lookups never fail: an unknown id or url is `None`, and callers render
//! their not-found view for it. Both maps keep document order, which is the
//! order [`ContentStore::page_by_url`] scans in.
//!
//! The store is an ordinary value. Build it once and hand references to
//! whatever renders; nothing here is global.

use crate::config::ContentConfig;
use crate::copy::{Page, SlugLayout};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Slug layouts keyed by slug id, in document order.
pub type SlugData = IndexMap<String, SlugLayout>;
/// Pages keyed by page id, in document order.
pub type PageData = IndexMap<String, Page>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error in {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    slugs: SlugData,
    pages: PageData,
}

impl ContentStore {
    pub fn new(slugs: SlugData, pages: PageData) -> Self {
        Self { slugs, pages }
    }

    /// Parse both documents from JSON text.
    pub fn from_json(slugs_json: &str, pages_json: &str) -> Result<Self, StoreError> {
        let slugs: SlugData = serde_json::from_str(slugs_json).map_err(|source| StoreError::Json {
            file: "slug layouts".to_string(),
            source,
        })?;
        let pages: PageData = serde_json::from_str(pages_json).map_err(|source| StoreError::Json {
            file: "pages".to_string(),
            source,
        })?;
        Ok(Self::new(slugs, pages))
    }

    /// Load the slug and page documents named by `content` from `root`.
    pub fn load(root: &Path, content: &ContentConfig) -> Result<Self, StoreError> {
        let slugs_path = root.join(&content.slugs_file);
        let pages_path = root.join(&content.pages_file);

        let slugs: SlugData = read_document(&slugs_path)?;
        let pages: PageData = read_document(&pages_path)?;

        info!(
            slugs = slugs.len(),
            pages = pages.len(),
            root = %root.display(),
            "loaded content"
        );
        Ok(Self::new(slugs, pages))
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        let page = self.pages.get(page_id);
        if page.is_none() {
            debug!(page_id, "page not found");
        }
        page
    }

    pub fn slug_layout(&self, slug_id: &str) -> Option<&SlugLayout> {
        self.slugs.get(slug_id)
    }

    /// First page, in document order, whose `url` equals `url` exactly.
    ///
    /// Urls aren't required to be unique; later duplicates are unreachable
    /// through this lookup.
    pub fn page_by_url(&self, url: &str) -> Option<&Page> {
        self.pages.values().find(|page| page.url == url)
    }

    /// The layout a page follows, if its reference resolves.
    pub fn layout_for(&self, page: &Page) -> Option<&SlugLayout> {
        self.slugs.get(&page.slug_layout)
    }

    pub fn slug_layouts(&self) -> &SlugData {
        &self.slugs
    }

    pub fn pages(&self) -> &PageData {
        &self.pages
    }
}

fn read_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| StoreError::Json {
        file: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    const SLUGS: &str = r#"{
        "basic": { "title": "Basic", "url": "/basic", "components": [
            { "required": true, "component": { "type": "Heading" } }
        ] }
    }"#;

    const PAGES: &str = r#"{
        "zeta": { "title": "Zeta", "url": "/shared", "slugLayout": "basic", "components": [] },
        "about": { "title": "About", "url": "/about", "slugLayout": "basic", "components": [] },
        "alpha": { "title": "Alpha", "url": "/shared", "slugLayout": "basic", "components": [] }
    }"#;

    fn store() -> ContentStore {
        ContentStore::from_json(SLUGS, PAGES).unwrap()
    }

    #[test]
    fn page_lookup_by_id() {
        assert_eq!(store().page("about").unwrap().title, "About");
    }

    #[test]
    fn unknown_page_is_absent() {
        assert!(store().page("unknown").is_none());
    }

    #[test]
    fn unknown_slug_is_absent() {
        assert!(store().slug_layout("nope").is_none());
        assert_eq!(store().slug_layout("basic").unwrap().title, "Basic");
    }

    #[test]
    fn page_by_url_returns_first_in_document_order() {
        // "zeta" precedes "alpha" in the document, even though it sorts later.
        assert_eq!(store().page_by_url("/shared").unwrap().title, "Zeta");
    }

    #[test]
    fn page_by_url_requires_exact_match() {
        let store = store();
        assert!(store.page_by_url("/about/").is_none());
        assert!(store.page_by_url("about").is_none());
        assert!(store.page_by_url("/missing").is_none());
    }

    #[test]
    fn snapshots_keep_document_order() {
        let binding = store();
        let ids: Vec<&str> = binding.pages().keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["zeta", "about", "alpha"]);
        assert_eq!(store().slug_layouts().len(), 1);
    }

    #[test]
    fn layout_for_resolves_reference() {
        let store = store();
        let page = store.page("about").unwrap();
        assert_eq!(store.layout_for(page).unwrap().url, "/basic");
    }

    #[test]
    fn empty_store_answers_absent() {
        let store = ContentStore::default();
        assert!(store.page("navigation").is_none());
        assert!(store.page_by_url("/").is_none());
        assert!(store.pages().is_empty());
    }

    #[test]
    fn invalid_json_names_the_document() {
        let err = ContentStore::from_json(SLUGS, "{ nope").unwrap_err();
        assert!(err.to_string().contains("pages"));
    }

    #[test]
    fn load_reads_fixture_documents() {
        let tmp = setup_fixtures();
        let store = ContentStore::load(tmp.path(), &ContentConfig::default()).unwrap();
        assert!(store.page("navigation").is_some());
        assert!(store.slug_layout("navigation").is_some());
    }

    #[test]
    fn load_fails_when_document_missing() {
        let tmp = TempDir::new().unwrap();
        let err = ContentStore::load(tmp.path(), &ContentConfig::default()).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
