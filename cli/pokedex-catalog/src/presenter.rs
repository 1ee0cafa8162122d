//! The seam between the session and whatever displays its results.

use crate::translation::Language;
use crate::types::CatalogItem;

/// Maximum number of page numbers offered at once.
pub const MAX_VISIBLE_PAGES: u64 = 3;

/// Receives everything a [crate::session::Session] wants to show.
pub trait Presenter {
    /// An operation started fetching data.
    fn show_loading(&self);

    /// Replace the result area with `items`.
    ///
    /// An empty slice should be shown as [Notice::NoResults].
    fn render_items(&self, items: &[CatalogItem]);

    /// Replace the pagination controls.
    fn render_pagination(&self, view: &PaginationView);

    /// Hide the page list and disable previous/next.
    fn disable_pagination(&self);

    /// Replace the result area with a message.
    fn show_notice(&self, notice: &Notice);
}

/// Pagination controls derived from the current and total page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u64,
    pub total_pages: u64,
    /// Page numbers to offer, empty if there is at most one page.
    pub pages: Vec<u64>,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationView {
    pub fn new(current_page: u64, total_pages: u64) -> Self {
        if total_pages <= 1 {
            return Self {
                current_page,
                total_pages,
                pages: Vec::new(),
                previous_enabled: false,
                next_enabled: false,
            };
        }

        Self {
            current_page,
            total_pages,
            pages: pages_to_show(current_page, total_pages),
            previous_enabled: current_page > 1,
            next_enabled: current_page < total_pages,
        }
    }

    pub fn is_active(&self, page: u64) -> bool {
        page == self.current_page
    }
}

/// A window of at most [MAX_VISIBLE_PAGES] page numbers around `current_page`.
///
/// The window starts one page before the current page and is shifted left
/// when it would run past the last page.
pub fn pages_to_show(current_page: u64, total_pages: u64) -> Vec<u64> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut start = current_page.saturating_sub(1).max(1);
    let end = total_pages.min(start + MAX_VISIBLE_PAGES - 1);

    if end + 1 - start < MAX_VISIBLE_PAGES {
        start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
    }

    (start..=end).collect()
}

/// A user visible message replacing the result area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Nothing to show.
    NoResults,
    /// Loading a browse page failed.
    BrowseFailed,
    /// The exact lookup failed with something other than "not found".
    NotFound,
    /// Loading the full listing for a prefix search failed.
    PrefixSearchFailed,
    /// No name starts with the given prefix.
    NoPrefixMatch(String),
    /// Loading a category listing failed.
    CategorySearchFailed,
    /// The category has no members at all.
    NoCategoryMembers,
    /// No member has the category as its primary category.
    NoPrimaryCategoryMembers,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::BrowseFailed
                | Notice::NotFound
                | Notice::PrefixSearchFailed
                | Notice::CategorySearchFailed
        )
    }

    pub fn message(&self, language: Language) -> String {
        match language {
            Language::Pt => match self {
                Notice::NoResults => "Nenhum pokémon encontrado.".to_string(),
                Notice::BrowseFailed => "Erro ao carregar pokémons. Tente novamente.".to_string(),
                Notice::NotFound => "Pokémon não encontrado. Tente outro nome.".to_string(),
                Notice::PrefixSearchFailed => "Erro ao buscar pokémons.".to_string(),
                Notice::NoPrefixMatch(prefix) => {
                    format!("Nenhum pokémon encontrado começando com \"{prefix}\".")
                },
                Notice::CategorySearchFailed => "Erro ao buscar pokémons por tipo.".to_string(),
                Notice::NoCategoryMembers => "Nenhum pokémon encontrado deste tipo.".to_string(),
                Notice::NoPrimaryCategoryMembers => {
                    "Nenhum pokémon encontrado com este tipo primário.".to_string()
                },
            },
            Language::En => match self {
                Notice::NoResults => "No pokémon found.".to_string(),
                Notice::BrowseFailed => "Failed to load pokémon. Please try again.".to_string(),
                Notice::NotFound => "Pokémon not found. Try another name.".to_string(),
                Notice::PrefixSearchFailed => "Failed to search pokémon.".to_string(),
                Notice::NoPrefixMatch(prefix) => {
                    format!("No pokémon found starting with \"{prefix}\".")
                },
                Notice::CategorySearchFailed => "Failed to search pokémon by type.".to_string(),
                Notice::NoCategoryMembers => "No pokémon found with this type.".to_string(),
                Notice::NoPrimaryCategoryMembers => {
                    "No pokémon found with this primary type.".to_string()
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn window_starts_before_current_page() {
        assert_eq!(pages_to_show(1, 10), vec![1, 2, 3]);
        assert_eq!(pages_to_show(2, 10), vec![1, 2, 3]);
        assert_eq!(pages_to_show(5, 10), vec![4, 5, 6]);
    }

    #[test]
    fn window_shifts_left_at_the_end() {
        assert_eq!(pages_to_show(10, 10), vec![8, 9, 10]);
        assert_eq!(pages_to_show(2, 2), vec![1, 2]);
    }

    #[test]
    fn single_page_hides_controls() {
        let view = PaginationView::new(1, 1);
        assert!(view.pages.is_empty());
        assert!(!view.previous_enabled);
        assert!(!view.next_enabled);

        let view = PaginationView::new(1, 0);
        assert!(view.pages.is_empty());
    }

    #[test]
    fn buttons_follow_position() {
        let first = PaginationView::new(1, 5);
        assert!(!first.previous_enabled);
        assert!(first.next_enabled);

        let last = PaginationView::new(5, 5);
        assert!(last.previous_enabled);
        assert!(!last.next_enabled);
        assert!(last.is_active(5));
    }

    #[test]
    fn prefix_is_echoed_in_message() {
        let notice = Notice::NoPrefixMatch("zzz".to_string());
        assert_eq!(
            notice.message(Language::Pt),
            "Nenhum pokémon encontrado começando com \"zzz\"."
        );
        assert!(!notice.is_error());
        assert!(Notice::BrowseFailed.is_error());
    }

    proptest! {
        #[test]
        fn window_contains_current_page_and_stays_in_bounds(total in 1_u64..200, offset in 0_u64..200) {
            let current = 1 + offset % total;
            let pages = pages_to_show(current, total);

            prop_assert!(pages.contains(&current));
            prop_assert_eq!(pages.len() as u64, total.min(MAX_VISIBLE_PAGES));
            prop_assert!(pages.iter().all(|page| (1..=total).contains(page)));
            prop_assert!(pages.windows(2).all(|pair| pair[1] == pair[0] + 1));
        }
    }
}
