//! A fixture backed catalog client.
//!
//! [MockClient] answers every [ClientTrait] call from a [MockCatalog]
//! held in memory, and records the calls it received so tests can assert
//! against the number of network round trips a real client would have made.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::client::{ClientTrait, DetailOutcome};
use crate::error::CatalogClientError;
use crate::translation::Category;
use crate::types::{CatalogEntry, CatalogItem, ListingPage};

/// If set to a path, the CLI uses a [MockClient] reading its data from there.
pub const POKEDEX_CATALOG_MOCK_DATA_VAR: &str = "_POKEDEX_USE_CATALOG_MOCK";

const MOCK_URL_PREFIX: &str = "mock://pokemon/";

// Arc allows you to inspect the calls from outside the client
// Mutex allows you to share across threads (necessary because of tokio)
type MockField<T> = Arc<Mutex<T>>;

#[derive(Debug, Error)]
pub enum MockDataError {
    #[error("failed to read mock catalog file")]
    ReadMockFile(#[source] std::io::Error),
    #[error("failed to parse mock catalog as JSON")]
    ParseJson(#[source] serde_json::Error),
}

/// The data served by a [MockClient].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockCatalog {
    /// Items in listing order.
    pub items: Vec<CatalogItem>,
    /// Names whose detail and exact lookups fail with a server error.
    #[serde(default)]
    pub failing: BTreeSet<String>,
    /// Whether every request fails with a server error.
    #[serde(default)]
    pub unavailable: bool,
    /// Whether listing requests fail with a server error.
    #[serde(default)]
    pub listing_unavailable: bool,
}

impl MockCatalog {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MockDataError> {
        let contents = std::fs::read_to_string(path).map_err(MockDataError::ReadMockFile)?;
        serde_json::from_str(&contents).map_err(MockDataError::ParseJson)
    }

    fn item(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

/// Calls received by a [MockClient].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockCalls {
    /// `(offset, limit)` of each listing request.
    pub pages: Vec<(u64, u64)>,
    /// Names of each detail request.
    pub details: Vec<String>,
    pub exact_lookups: Vec<String>,
    pub categories: Vec<Category>,
}

impl MockCalls {
    /// Number of listing requests for the full listing.
    pub fn full_listing_fetches(&self) -> usize {
        self.pages
            .iter()
            .filter(|(_, limit)| *limit == crate::client::FULL_LISTING_LIMIT)
            .count()
    }
}

/// A catalog client serving a [MockCatalog]
#[derive(Debug, Default)]
pub struct MockClient {
    catalog: MockCatalog,
    calls: MockField<MockCalls>,
    exact_lookup_delays: HashMap<String, Duration>,
}

impl MockClient {
    /// Create a new mock client, potentially reading the catalog from disk
    pub fn new(mock_data_path: Option<impl AsRef<Path>>) -> Result<Self, MockDataError> {
        let catalog = match mock_data_path {
            Some(path) => MockCatalog::from_file(path)?,
            None => MockCatalog::default(),
        };
        Ok(Self::from_catalog(catalog))
    }

    pub fn from_catalog(catalog: MockCatalog) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    /// Delay exact lookups of `name` by `delay`.
    pub fn delay_exact_lookup(&mut self, name: impl Into<String>, delay: Duration) {
        self.exact_lookup_delays.insert(name.into(), delay);
    }

    /// A snapshot of the calls received so far.
    pub fn calls(&self) -> MockCalls {
        self.calls.lock().expect("couldn't acquire mock lock").clone()
    }

    fn record(&self, f: impl FnOnce(&mut MockCalls)) {
        f(&mut self.calls.lock().expect("couldn't acquire mock lock"));
    }

    fn server_error(&self, what: &str) -> CatalogClientError {
        CatalogClientError::Network {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            url: format!("{MOCK_URL_PREFIX}{what}"),
        }
    }

    fn entry(name: &str) -> CatalogEntry {
        CatalogEntry::new(name, format!("{MOCK_URL_PREFIX}{name}"))
    }
}

impl ClientTrait for MockClient {
    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<ListingPage, CatalogClientError> {
        self.record(|calls| calls.pages.push((offset, limit)));
        if self.catalog.unavailable || self.catalog.listing_unavailable {
            return Err(self.server_error("?offset"));
        }

        let results = self
            .catalog
            .items
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|item| Self::entry(&item.name))
            .collect();

        Ok(ListingPage {
            count: self.catalog.items.len() as u64,
            results,
        })
    }

    async fn fetch_detail(&self, entry: &CatalogEntry) -> DetailOutcome {
        self.record(|calls| calls.details.push(entry.name.clone()));
        if self.catalog.unavailable || self.catalog.failing.contains(&entry.name) {
            return Err(self.server_error(&entry.name));
        }

        self.catalog
            .item(&entry.name)
            .cloned()
            .ok_or_else(|| CatalogClientError::Network {
                status: StatusCode::NOT_FOUND,
                url: entry.url.clone(),
            })
    }

    async fn fetch_by_exact_name(
        &self,
        name: &str,
    ) -> Result<Option<CatalogItem>, CatalogClientError> {
        self.record(|calls| calls.exact_lookups.push(name.to_string()));
        if let Some(delay) = self.exact_lookup_delays.get(name) {
            debug!(name, ?delay, "delaying mock exact lookup");
            tokio::time::sleep(*delay).await;
        }
        if self.catalog.unavailable || self.catalog.failing.contains(name) {
            return Err(self.server_error(name));
        }

        Ok(self.catalog.item(name).cloned())
    }

    async fn fetch_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<CatalogEntry>, CatalogClientError> {
        self.record(|calls| calls.categories.push(category));
        if self.catalog.unavailable {
            return Err(self.server_error(category.api_name()));
        }

        Ok(self
            .catalog
            .items
            .iter()
            .filter(|item| item.categories.iter().any(|c| c == category.api_name()))
            .map(|item| Self::entry(&item.name))
            .collect())
    }

    fn entry_for(&self, name: &str) -> CatalogEntry {
        Self::entry(name)
    }
}
