//! Client, cache and browsing session for a remote Pokémon catalog.
//!
//! This crate provides:
//! - an HTTP client for the catalog REST API and a fixture backed mock
//! - memoized full and per category listings
//! - a [Session] paging through the catalog or through search results
//! - Portuguese/English names and colors of the catalog categories
//!
//! ## Usage
//!
//! ```ignore
//! use pokedex_catalog::{CatalogClient, CatalogClientConfig, Client, Session};
//!
//! let client = Client::Catalog(CatalogClient::new(CatalogClientConfig::default())?);
//! let session = Session::new(client, presenter);
//! session.start().await;
//! session.submit_search("fogo").await;
//! ```

mod cache;
mod client;
mod config;
mod error;
mod mock;
pub mod presenter;
pub mod session;
pub mod translation;
pub mod types;

pub use cache::{CatalogCache, Listing};
pub use client::{
    CatalogClient,
    Client,
    ClientTrait,
    DetailOutcome,
    FULL_LISTING_LIMIT,
    successful_items,
};
pub use config::{CatalogClientConfig, DEFAULT_CATALOG_URL};
pub use error::CatalogClientError;
pub use mock::{MockCalls, MockCatalog, MockClient, MockDataError, POKEDEX_CATALOG_MOCK_DATA_VAR};
pub use presenter::{Notice, PaginationView, Presenter};
pub use session::{Mode, PAGE_SIZE, SearchState, Session};
pub use translation::{Category, Language};
