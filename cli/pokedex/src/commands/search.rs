use anyhow::{Result, bail};
use bpaf::Bpaf;
use pokedex_catalog::{Client, Session};
use tracing::{debug, instrument};

use super::page_is_positive;
use crate::config::Config;
use crate::utils::display::Styling;
use crate::utils::presenter::{FramePresenter, print_frame};

// Search the catalog
#[derive(Debug, Bpaf, Clone)]
pub struct Search {
    /// Display the results as JSON
    #[bpaf(long)]
    pub json: bool,

    /// Page of the results to show, starting at 1
    #[bpaf(
        long,
        short,
        argument("N"),
        guard(page_is_positive, "page must be at least 1"),
        fallback(1)
    )]
    pub page: u64,

    /// A name, the start of a name, or a type in Portuguese.
    ///
    /// ex. pikachu, char, fogo
    #[bpaf(positional("search-term"))]
    pub search_term: String,
}

impl Search {
    #[instrument(name = "search", fields(json = self.json, page = self.page, search_term = self.search_term), skip_all)]
    pub async fn handle(self, config: Config, client: Client) -> Result<()> {
        debug!("performing search for term: {}", self.search_term);

        let session = Session::new(client, FramePresenter::default());
        session.submit_search(&self.search_term).await;

        // without any results there is nothing to page through,
        // the notice explains why
        let total_pages = session.state().total_pages;
        if self.page > 1 && total_pages > 0 {
            if self.page > total_pages {
                bail!(
                    "page {} is out of range, the search '{}' has {} page(s)",
                    self.page,
                    self.search_term,
                    total_pages
                );
            }
            session.go_to_page(self.page).await;
        }

        let styling = Styling::detect(config.language);
        print_frame(
            &session.presenter().frame(),
            &session.state(),
            styling,
            self.json,
        )
    }
}
