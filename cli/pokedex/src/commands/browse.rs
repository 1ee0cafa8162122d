use anyhow::Result;
use bpaf::Bpaf;
use pokedex_catalog::{Client, Session};
use tracing::{debug, instrument};

use super::page_is_positive;
use crate::config::Config;
use crate::utils::display::Styling;
use crate::utils::presenter::{FramePresenter, print_frame};

// Page through the catalog
#[derive(Debug, Bpaf, Clone)]
pub struct Browse {
    /// Display the page as JSON
    #[bpaf(long)]
    pub json: bool,

    /// Page to show, starting at 1
    #[bpaf(
        long,
        short,
        argument("N"),
        guard(page_is_positive, "page must be at least 1"),
        fallback(1)
    )]
    pub page: u64,
}

impl Browse {
    #[instrument(name = "browse", fields(json = self.json, page = self.page), skip_all)]
    pub async fn handle(self, config: Config, client: Client) -> Result<()> {
        let session = Session::new(client, FramePresenter::default());
        session.load_browse_page(self.page).await;

        let state = session.state();
        debug!(
            total_pages = state.total_pages,
            total_count = state.total_count,
            "loaded browse page"
        );

        let styling = Styling::detect(config.language);
        print_frame(&session.presenter().frame(), &state, styling, self.json)
    }
}
