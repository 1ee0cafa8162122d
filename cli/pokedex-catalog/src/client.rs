//! Catalog client for the remote creature API.

use std::fmt::Debug;
use std::str::FromStr;
use std::time::Duration;

use enum_dispatch::enum_dispatch;
use futures::future::join_all;
use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::CatalogClientError;
use crate::mock::MockClient;
use crate::translation::Category;
use crate::types::*;

/// Number of entries requested when loading the full listing.
///
/// The API holds fewer entries than this, so one request covers everything.
pub const FULL_LISTING_LIMIT: u64 = 2000;

/// The result of fetching the details of a single entry.
pub type DetailOutcome = Result<CatalogItem, CatalogClientError>;

/// Either a client for the actual catalog service,
/// or a mock client for testing.
#[derive(Debug)]
#[enum_dispatch(ClientTrait)]
pub enum Client {
    Catalog(CatalogClient),
    Mock(MockClient),
}

/// The catalog API interface.
///
/// This trait enables alternate implementations:
/// - **HTTP**: REST calls to the catalog API via [`CatalogClient`]
/// - **Mock**: fixture backed responses without HTTP via [`MockClient`]
#[enum_dispatch]
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// Fetch one page of the listing.
    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<ListingPage, CatalogClientError>;

    /// Fetch the details of a single entry.
    async fn fetch_detail(&self, entry: &CatalogEntry) -> DetailOutcome;

    /// Look up an item by its exact name.
    ///
    /// Returns `Ok(None)` if the catalog does not know the name.
    async fn fetch_by_exact_name(
        &self,
        name: &str,
    ) -> Result<Option<CatalogItem>, CatalogClientError>;

    /// Fetch every entry that has `category` among its categories.
    async fn fetch_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<CatalogEntry>, CatalogClientError>;

    /// An entry addressing the detail endpoint of `name`.
    fn entry_for(&self, name: &str) -> CatalogEntry;

    /// Fetch every entry of the catalog in a single request.
    async fn fetch_full_listing(&self) -> Result<Vec<CatalogEntry>, CatalogClientError> {
        let page = self.fetch_page(0, FULL_LISTING_LIMIT).await?;
        Ok(page.results)
    }

    /// Fetch the details of all `entries` concurrently.
    ///
    /// All requests are sent at once, without a concurrency limit.
    /// The outcomes are index aligned with `entries`,
    /// use [successful_items] to drop failed fetches.
    async fn fetch_details_batch(&self, entries: &[CatalogEntry]) -> Vec<DetailOutcome> {
        debug!(n_entries = entries.len(), "fetching details");
        join_all(entries.iter().map(|entry| self.fetch_detail(entry))).await
    }
}

/// Keep the items that were fetched successfully, in order.
///
/// Failed fetches are not reported to the caller, they are only logged.
pub fn successful_items(outcomes: Vec<DetailOutcome>) -> Vec<CatalogItem> {
    outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(%err, "dropping entry whose details could not be fetched");
                None
            },
        })
        .collect()
}

/// A client for the catalog service.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    config: CatalogClientConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("catalog_url", &self.config.catalog_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogClientError> {
        let base_url = Url::parse(&config.catalog_url).map_err(|source| {
            CatalogClientError::InvalidUrl {
                url: config.catalog_url.clone(),
                source,
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogClientError::Other(format!(
                "catalog url '{}' cannot be used as a base url",
                config.catalog_url
            )));
        }

        let http = build_http_client(&config)?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Get the configured catalog URL.
    pub fn catalog_url(&self) -> &str {
        &self.config.catalog_url
    }

    /// Build the url for an endpoint below the base url.
    ///
    /// Each segment is percent encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in [CatalogClient::new]
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogClientError> {
        debug!(%url, "sending request");
        let response = self.http.get(url.clone()).send().await.map_err(|source| {
            CatalogClientError::Request {
                url: url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "request failed");
            return Err(CatalogClientError::Network {
                status,
                url: url.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| CatalogClientError::Decode {
                url: url.to_string(),
                source,
            })
    }
}

impl ClientTrait for CatalogClient {
    #[instrument(skip(self))]
    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<ListingPage, CatalogClientError> {
        let mut url = self.endpoint(&["pokemon"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());

        let raw: RawListing = self.get_json(url).await?;
        debug!(
            count = raw.count,
            n_results = raw.results.len(),
            "received listing page"
        );
        Ok(raw.into())
    }

    #[instrument(skip_all, fields(name = %entry.name))]
    async fn fetch_detail(&self, entry: &CatalogEntry) -> DetailOutcome {
        let url = Url::from_str(&entry.url).map_err(|source| CatalogClientError::InvalidUrl {
            url: entry.url.clone(),
            source,
        })?;
        let raw: RawDetail = self.get_json(url).await?;
        Ok(raw.into())
    }

    #[instrument(skip(self))]
    async fn fetch_by_exact_name(
        &self,
        name: &str,
    ) -> Result<Option<CatalogItem>, CatalogClientError> {
        let url = self.endpoint(&["pokemon", name]);
        match self.get_json::<RawDetail>(url).await {
            Ok(raw) => Ok(Some(raw.into())),
            Err(CatalogClientError::Network { status, .. }) if status == StatusCode::NOT_FOUND => {
                debug!("no exact match");
                Ok(None)
            },
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self))]
    async fn fetch_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<CatalogEntry>, CatalogClientError> {
        let url = self.endpoint(&["type", category.api_name()]);
        let raw: RawCategoryListing = self.get_json(url).await?;
        let entries: Vec<CatalogEntry> = raw.into();
        debug!(n_entries = entries.len(), "received category listing");
        Ok(entries)
    }

    fn entry_for(&self, name: &str) -> CatalogEntry {
        CatalogEntry::new(name, self.endpoint(&["pokemon", name]).to_string())
    }
}

// ---------------------------------------------------------------------------
// HTTP client builder
// ---------------------------------------------------------------------------

fn build_http_client(config: &CatalogClientConfig) -> Result<reqwest::Client, CatalogClientError> {
    let mut headers = HeaderMap::new();

    for (key, value) in &config.extra_headers {
        headers.insert(
            header::HeaderName::from_str(key).map_err(
                |e: reqwest::header::InvalidHeaderName| CatalogClientError::Other(e.to_string()),
            )?,
            header::HeaderValue::from_str(value).map_err(
                |e: reqwest::header::InvalidHeaderValue| CatalogClientError::Other(e.to_string()),
            )?,
        );
    }

    debug!(
        catalog_url = %config.catalog_url,
        extra_headers = config.extra_headers.len(),
        "building catalog HTTP client"
    );

    let client_builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(60));

    let client_builder = if let Some(ref user_agent) = config.user_agent {
        client_builder.user_agent(user_agent)
    } else {
        client_builder
    };

    client_builder
        .build()
        .map_err(|e| CatalogClientError::Other(e.to_string()))
}
