//! Text rendering of catalog items, pagination controls and notices.

use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};
use itertools::Itertools;
use pokedex_catalog::translation::{category_color, display_category};
use pokedex_catalog::types::CatalogItem;
use pokedex_catalog::{Language, Notice, PaginationView};

/// How to render text for the terminal.
#[derive(Debug, Clone, Copy)]
pub struct Styling {
    pub language: Language,
    /// Whether to emit ANSI colors and attributes
    pub colors: bool,
}

impl Styling {
    /// Colors are enabled if stdout is a terminal.
    pub fn detect(language: Language) -> Self {
        Self {
            language,
            colors: std::io::stdout().is_terminal(),
        }
    }

    pub fn plain(language: Language) -> Self {
        Self {
            language,
            colors: false,
        }
    }
}

/// Parse a `#rrggbb` color.
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

fn category_label(api_name: &str, styling: Styling) -> String {
    let label = display_category(api_name, styling.language);
    if !styling.colors {
        return label;
    }
    match hex_to_color(category_color(api_name)) {
        Some(color) => label.with(color).to_string(),
        None => label,
    }
}

/// A single line describing `item`.
///
/// ```text
/// #0006  Charizard     Fogo / Voador  https://...
/// ```
pub fn item_line(item: &CatalogItem, styling: Styling) -> String {
    let id = format!("#{}", item.formatted_id());
    let name = format!("{:<12}", item.display_name());
    let categories = item
        .categories
        .iter()
        .map(|category| category_label(category, styling))
        .join(" / ");

    let mut line = if styling.colors {
        format!("{}  {}  {categories}", id.dim(), name.bold())
    } else {
        format!("{id}  {name}  {categories}")
    };

    let image = if item.image_url.is_empty() {
        match styling.language {
            Language::Pt => "Sem imagem",
            Language::En => "No image",
        }
    } else {
        item.image_url.as_str()
    };
    line.push_str("  ");
    if styling.colors {
        line.push_str(&image.dim().to_string());
    } else {
        line.push_str(image);
    }
    line
}

/// The pagination controls in one line.
///
/// Disabled controls are dimmed, or left out without colors.
pub fn pagination_line(view: &PaginationView, styling: Styling) -> String {
    let (previous, next, page, of) = match styling.language {
        Language::Pt => ("‹ anterior", "próxima ›", "página", "de"),
        Language::En => ("‹ previous", "next ›", "page", "of"),
    };

    let control = |label: &str, enabled: bool| match (enabled, styling.colors) {
        (true, _) => Some(label.to_string()),
        (false, true) => Some(label.dim().to_string()),
        (false, false) => None,
    };

    let pages = view.pages.iter().map(|&number| {
        if !view.is_active(number) {
            number.to_string()
        } else if styling.colors {
            format!("[{number}]").bold().to_string()
        } else {
            format!("[{number}]")
        }
    });

    let controls = control(previous, view.previous_enabled)
        .into_iter()
        .chain(pages)
        .chain(control(next, view.next_enabled))
        .join("  ");

    format!(
        "{controls}  {page} {} {of} {}",
        view.current_page, view.total_pages
    )
}

pub fn notice_text(notice: &Notice, styling: Styling) -> String {
    let message = notice.message(styling.language);
    if styling.colors && !notice.is_error() {
        message.italic().to_string()
    } else {
        message
    }
}

pub fn loading_text(styling: Styling) -> String {
    let message = match styling.language {
        Language::Pt => "Carregando...",
        Language::En => "Loading...",
    };
    if styling.colors {
        message.dim().to_string()
    } else {
        message.to_string()
    }
}
