//! Browsing and searching the catalog page by page.
//!
//! A [Session] is in one of two modes:
//!
//! * [Mode::Browse] pages through the remote listing,
//!   each page is requested with an offset and limit.
//! * [Mode::Search] pages through a result set held in memory,
//!   each page is a slice of that set.
//!
//! In both modes `total_pages = ceil(total_count / PAGE_SIZE)`.
//!
//! Every user action starts a new operation and invalidates the operations
//! started before it. A stale operation may still finish its requests,
//! but neither updates the state nor reaches the presenter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, instrument, warn};

use crate::cache::CatalogCache;
use crate::client::{ClientTrait, successful_items};
use crate::presenter::{Notice, PaginationView, Presenter};
use crate::translation::{Category, category_from_portuguese};
use crate::types::CatalogEntry;

/// Number of items per page, in both modes.
pub const PAGE_SIZE: u64 = 18;

/// Number of pages needed to show `total_count` items.
pub fn total_pages(total_count: u64) -> u64 {
    total_count.div_ceil(PAGE_SIZE)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display)]
pub enum Mode {
    #[default]
    #[display("browse")]
    Browse,
    #[display("search")]
    Search,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub mode: Mode,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub search_result_set: Arc<[CatalogEntry]>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            mode: Mode::Browse,
            current_page: 1,
            total_pages: 0,
            total_count: 0,
            search_result_set: Vec::new().into(),
        }
    }
}

impl SearchState {
    /// The entries of the result set on the current page.
    pub fn page_slice(&self) -> &[CatalogEntry] {
        let len = self.search_result_set.len();
        let start = ((self.current_page.saturating_sub(1) * PAGE_SIZE) as usize).min(len);
        let end = (start + PAGE_SIZE as usize).min(len);
        &self.search_result_set[start..end]
    }

    fn enter_search(&mut self, results: Vec<CatalogEntry>) {
        self.mode = Mode::Search;
        self.current_page = 1;
        self.total_count = results.len() as u64;
        self.total_pages = total_pages(self.total_count);
        self.search_result_set = results.into();
    }
}

/// Identifies one user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationToken(u64);

/// An owned browsing/searching session against a catalog.
pub struct Session<C, P> {
    client: C,
    presenter: P,
    cache: tokio::sync::Mutex<CatalogCache>,
    state: Mutex<SearchState>,
    generation: AtomicU64,
}

impl<C: ClientTrait, P: Presenter> Session<C, P> {
    pub fn new(client: C, presenter: P) -> Self {
        Self {
            client,
            presenter,
            cache: tokio::sync::Mutex::new(CatalogCache::new()),
            state: Mutex::new(SearchState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.lock_state().clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, SearchState> {
        // no update can leave the state half written
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new operation, invalidating all earlier ones.
    pub fn begin(&self) -> OperationToken {
        OperationToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: OperationToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    /// Apply `update` to the state if `token` is still current.
    fn commit(&self, token: OperationToken, update: impl FnOnce(&mut SearchState)) -> bool {
        let mut state = self.lock_state();
        if !self.is_current(token) {
            debug!(?token, "discarding state update of stale operation");
            return false;
        }
        update(&mut state);
        true
    }

    /// Call the presenter if `token` is still current.
    fn present(&self, token: OperationToken, show: impl FnOnce(&P)) {
        if !self.is_current(token) {
            debug!(?token, "discarding output of stale operation");
            return;
        }
        show(&self.presenter);
    }

    /// Load the first browse page.
    pub async fn start(&self) {
        self.load_browse_page(1).await
    }

    /// Handle a submitted search term.
    ///
    /// Empty terms return to browsing.
    /// Portuguese category names search by category,
    /// anything else is looked up by exact name and then by prefix.
    #[instrument(skip(self))]
    pub async fn submit_search(&self, raw_term: &str) {
        let term = raw_term.trim().to_lowercase();
        if term.is_empty() {
            return self.load_browse_page(1).await;
        }

        // state is only written once results land
        let token = self.begin();
        self.present(token, |p| p.show_loading());

        if let Some(category) = category_from_portuguese(&term) {
            info!(%category, "searching by category");
            return self.category_search(token, category).await;
        }

        match self.client.fetch_by_exact_name(&term).await {
            Ok(Some(item)) => {
                info!(name = %item.name, "exact match");
                let entry = self.client.entry_for(&item.name);
                if self.commit(token, |state| state.enter_search(vec![entry])) {
                    self.present(token, |p| {
                        p.render_items(std::slice::from_ref(&item));
                        p.disable_pagination();
                    });
                }
            },
            Ok(None) => self.prefix_search(token, &term).await,
            Err(err) => {
                error!(%err, "exact lookup failed");
                self.show_empty_search(token, Notice::NotFound);
            },
        }
    }

    /// Handle a change of the search input.
    ///
    /// Clearing the input while searching returns to the first browse page.
    pub async fn input_changed(&self, raw_input: &str) {
        if raw_input.trim().is_empty() && self.state().mode == Mode::Search {
            debug!("search cleared");
            self.load_browse_page(1).await;
        }
    }

    /// Navigate to `page`.
    ///
    /// Pages outside `1..=total_pages` are ignored.
    #[instrument(skip(self))]
    pub async fn go_to_page(&self, page: u64) {
        let state = self.state();
        if page < 1 || page > state.total_pages {
            debug!(total_pages = state.total_pages, "ignoring out of range page");
            return;
        }

        match state.mode {
            Mode::Browse => self.load_browse_page(page).await,
            Mode::Search => {
                let token = self.begin();
                self.commit(token, |state| state.current_page = page);
                self.render_search_page(token).await;
            },
        }
    }

    pub async fn next_page(&self) {
        let current = self.state().current_page;
        self.go_to_page(current + 1).await
    }

    pub async fn previous_page(&self) {
        let current = self.state().current_page;
        self.go_to_page(current.saturating_sub(1)).await
    }

    /// Load `page` of the remote listing and switch to browsing.
    #[instrument(skip(self))]
    pub async fn load_browse_page(&self, page: u64) {
        let page = page.max(1);
        let token = self.begin();
        self.commit(token, |state| {
            state.mode = Mode::Browse;
            state.current_page = page;
            state.search_result_set = Vec::new().into();
        });
        self.present(token, |p| p.show_loading());

        let offset = (page - 1) * PAGE_SIZE;
        let listing = match self.client.fetch_page(offset, PAGE_SIZE).await {
            Ok(listing) => listing,
            Err(err) => {
                error!(%err, "failed to load browse page");
                self.present(token, |p| p.show_notice(&Notice::BrowseFailed));
                return;
            },
        };

        let items = successful_items(self.client.fetch_details_batch(&listing.results).await);

        let committed = self.commit(token, |state| {
            state.total_count = listing.count;
            state.total_pages = total_pages(listing.count);
        });
        if !committed {
            return;
        }

        let view = PaginationView::new(page, total_pages(listing.count));
        self.present(token, |p| {
            p.render_items(&items);
            p.render_pagination(&view);
        });
    }

    /// Search every entry whose name starts with `prefix`.
    pub async fn search_by_prefix(&self, prefix: &str) {
        let token = self.begin();
        self.present(token, |p| p.show_loading());
        self.prefix_search(token, &prefix.trim().to_lowercase()).await
    }

    /// Search every entry whose primary category is `category`.
    pub async fn search_by_category(&self, category: Category) {
        let token = self.begin();
        self.present(token, |p| p.show_loading());
        self.category_search(token, category).await
    }

    async fn prefix_search(&self, token: OperationToken, prefix: &str) {
        let listing = {
            let mut cache = self.cache.lock().await;
            cache.full_listing(&self.client).await
        };
        let listing = match listing {
            Ok(listing) => listing,
            Err(err) => {
                error!(%err, "failed to load full listing");
                self.show_empty_search(token, Notice::PrefixSearchFailed);
                return;
            },
        };

        let prefix = prefix.to_lowercase();
        let matches = listing
            .iter()
            .filter(|entry| entry.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect::<Vec<_>>();
        debug!(%prefix, n_matches = matches.len(), "filtered full listing");

        if matches.is_empty() {
            self.show_empty_search(token, Notice::NoPrefixMatch(prefix));
            return;
        }

        if self.commit(token, |state| state.enter_search(matches)) {
            self.render_search_page(token).await;
        }
    }

    async fn category_search(&self, token: OperationToken, category: Category) {
        let listing = {
            let mut cache = self.cache.lock().await;
            cache.category_listing(&self.client, category).await
        };
        let listing = match listing {
            Ok(listing) => listing,
            Err(err) => {
                error!(%err, %category, "failed to load category listing");
                self.show_empty_search(token, Notice::CategorySearchFailed);
                return;
            },
        };

        if listing.is_empty() {
            self.show_empty_search(token, Notice::NoCategoryMembers);
            return;
        }

        // The category listing also contains entries where the category is
        // only secondary, their details tell them apart.
        let outcomes = self.client.fetch_details_batch(&listing).await;
        let primary = listing
            .iter()
            .zip(outcomes)
            .filter_map(|(entry, outcome)| match outcome {
                Ok(item) if item.has_primary_category(category) => Some(entry.clone()),
                Ok(_) => None,
                Err(err) => {
                    warn!(%err, name = %entry.name, "dropping entry whose details could not be fetched");
                    None
                },
            })
            .collect::<Vec<_>>();
        debug!(
            %category,
            n_members = listing.len(),
            n_primary = primary.len(),
            "filtered category listing by primary category"
        );

        if primary.is_empty() {
            self.show_empty_search(token, Notice::NoPrimaryCategoryMembers);
            return;
        }

        if self.commit(token, |state| state.enter_search(primary)) {
            self.render_search_page(token).await;
        }
    }

    /// Render the current page of the search result set.
    async fn render_search_page(&self, token: OperationToken) {
        let (entries, view) = {
            let state = self.lock_state();
            (
                state.page_slice().to_vec(),
                PaginationView::new(state.current_page, state.total_pages),
            )
        };

        let items = successful_items(self.client.fetch_details_batch(&entries).await);
        self.present(token, |p| {
            p.render_items(&items);
            p.render_pagination(&view);
        });
    }

    /// Enter search mode without results and show `notice`.
    fn show_empty_search(&self, token: OperationToken, notice: Notice) {
        if self.commit(token, |state| state.enter_search(Vec::new())) {
            self.present(token, |p| {
                p.show_notice(&notice);
                p.disable_pagination();
            });
        }
    }
}
