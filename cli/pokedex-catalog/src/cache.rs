//! Memoized listings.
//!
//! Both listings are fetched on first use and kept for the lifetime of the
//! cache. There is no expiry and no invalidation.
//! A failed fetch is not memoized, the next call tries again.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::client::ClientTrait;
use crate::error::CatalogClientError;
use crate::translation::Category;
use crate::types::CatalogEntry;

pub type Listing = Arc<[CatalogEntry]>;

#[derive(Debug, Default)]
pub struct CatalogCache {
    full_listing: Option<Listing>,
    by_category: HashMap<Category, Listing>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full name/url listing of the catalog.
    pub async fn full_listing(
        &mut self,
        client: &impl ClientTrait,
    ) -> Result<Listing, CatalogClientError> {
        if let Some(listing) = &self.full_listing {
            debug!(n_entries = listing.len(), "using cached full listing");
            return Ok(Arc::clone(listing));
        }

        let listing: Listing = client.fetch_full_listing().await?.into();
        debug!(n_entries = listing.len(), "caching full listing");
        self.full_listing = Some(Arc::clone(&listing));
        Ok(listing)
    }

    /// Every entry with `category` among its categories.
    pub async fn category_listing(
        &mut self,
        client: &impl ClientTrait,
        category: Category,
    ) -> Result<Listing, CatalogClientError> {
        if let Some(listing) = self.by_category.get(&category) {
            debug!(%category, n_entries = listing.len(), "using cached category listing");
            return Ok(Arc::clone(listing));
        }

        let listing: Listing = client.fetch_by_category(category).await?.into();
        debug!(%category, n_entries = listing.len(), "caching category listing");
        self.by_category.insert(category, Arc::clone(&listing));
        Ok(listing)
    }

    #[cfg(test)]
    fn has_full_listing(&self) -> bool {
        self.full_listing.is_some()
    }

    #[cfg(test)]
    fn has_category_listing(&self, category: Category) -> bool {
        self.by_category.contains_key(&category)
    }
}
