//! Category names, their Portuguese translations and display colors.
//!
//! The API speaks English category names (`water`, `fire`, ...).
//! Users may search with the Portuguese name instead, with or without
//! accents, so the reverse table carries both spellings.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color used for categories without an entry in the color table.
pub const FALLBACK_COLOR: &str = "#10b981";

/// Language used for user facing text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
}

#[derive(Debug, Error)]
#[error("unknown language '{0}', expected one of: pt, en")]
pub struct UnknownLanguage(String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pt" | "pt-br" | "portuguese" => Ok(Language::Pt),
            "en" | "english" => Ok(Language::En),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// A creature category ("type") as named by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Grass,
    Fire,
    Water,
    Bug,
    Normal,
    Poison,
    Electric,
    Ground,
    Fairy,
    Fighting,
    Psychic,
    Rock,
    Ghost,
    Ice,
    Dragon,
    Steel,
    Dark,
    Flying,
}

impl Category {
    pub const ALL: [Category; 18] = [
        Category::Grass,
        Category::Fire,
        Category::Water,
        Category::Bug,
        Category::Normal,
        Category::Poison,
        Category::Electric,
        Category::Ground,
        Category::Fairy,
        Category::Fighting,
        Category::Psychic,
        Category::Rock,
        Category::Ghost,
        Category::Ice,
        Category::Dragon,
        Category::Steel,
        Category::Dark,
        Category::Flying,
    ];

    /// The name used by the API, e.g. in `/type/{name}`.
    pub fn api_name(&self) -> &'static str {
        match self {
            Category::Grass => "grass",
            Category::Fire => "fire",
            Category::Water => "water",
            Category::Bug => "bug",
            Category::Normal => "normal",
            Category::Poison => "poison",
            Category::Electric => "electric",
            Category::Ground => "ground",
            Category::Fairy => "fairy",
            Category::Fighting => "fighting",
            Category::Psychic => "psychic",
            Category::Rock => "rock",
            Category::Ghost => "ghost",
            Category::Ice => "ice",
            Category::Dragon => "dragon",
            Category::Steel => "steel",
            Category::Dark => "dark",
            Category::Flying => "flying",
        }
    }

    pub fn portuguese_name(&self) -> &'static str {
        match self {
            Category::Grass => "Planta",
            Category::Fire => "Fogo",
            Category::Water => "Água",
            Category::Bug => "Inseto",
            Category::Normal => "Normal",
            Category::Poison => "Veneno",
            Category::Electric => "Elétrico",
            Category::Ground => "Terra",
            Category::Fairy => "Fada",
            Category::Fighting => "Lutador",
            Category::Psychic => "Psíquico",
            Category::Rock => "Pedra",
            Category::Ghost => "Fantasma",
            Category::Ice => "Gelo",
            Category::Dragon => "Dragão",
            Category::Steel => "Aço",
            Category::Dark => "Sombrio",
            Category::Flying => "Voador",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Category::Grass => "#10b981",
            Category::Fire => "#ef4444",
            Category::Water => "#3b82f6",
            Category::Bug => "#84cc16",
            Category::Normal => "#6b7280",
            Category::Poison => "#a855f7",
            Category::Electric => "#eab308",
            Category::Ground => "#d97706",
            Category::Fairy => "#ec4899",
            Category::Fighting => "#dc2626",
            Category::Psychic => "#ec4899",
            Category::Rock => "#78716c",
            Category::Ghost => "#7c3aed",
            Category::Ice => "#06b6d4",
            Category::Dragon => "#6366f1",
            Category::Steel => "#64748b",
            Category::Dark => "#1f2937",
            Category::Flying => "#8b5cf6",
        }
    }

    /// Look up a category by its API name.
    pub fn from_api_name(name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.api_name() == name)
    }

    pub fn display_name(&self, language: Language) -> String {
        match language {
            Language::Pt => self.portuguese_name().to_string(),
            Language::En => capitalize(self.api_name()),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Translate a Portuguese category name into a [Category].
///
/// Matching is case-insensitive and accepts the unaccented spelling of
/// accented names. Returns [None] for anything else.
pub fn category_from_portuguese(term: &str) -> Option<Category> {
    let category = match term.to_lowercase().as_str() {
        "planta" => Category::Grass,
        "fogo" => Category::Fire,
        "água" | "agua" => Category::Water,
        "inseto" => Category::Bug,
        "normal" => Category::Normal,
        "veneno" => Category::Poison,
        "elétrico" | "eletrico" => Category::Electric,
        "terra" => Category::Ground,
        "fada" => Category::Fairy,
        "lutador" => Category::Fighting,
        "psíquico" | "psiquico" => Category::Psychic,
        "pedra" => Category::Rock,
        "fantasma" => Category::Ghost,
        "gelo" => Category::Ice,
        "dragão" | "dragao" => Category::Dragon,
        "aço" | "aco" => Category::Steel,
        "sombrio" => Category::Dark,
        "voador" => Category::Flying,
        _ => return None,
    };
    Some(category)
}

/// Display name for a raw API category name.
///
/// Names that are not in the table are shown verbatim.
pub fn display_category(api_name: &str, language: Language) -> String {
    match Category::from_api_name(api_name) {
        Some(category) => category.display_name(language),
        None => api_name.to_string(),
    }
}

/// Display color for a raw API category name.
pub fn category_color(api_name: &str) -> &'static str {
    Category::from_api_name(api_name)
        .map(|category| category.color())
        .unwrap_or(FALLBACK_COLOR)
}

pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn accented_and_plain_spellings_resolve_to_same_category() {
        assert_eq!(category_from_portuguese("água"), Some(Category::Water));
        assert_eq!(category_from_portuguese("agua"), Some(Category::Water));
        assert_eq!(category_from_portuguese("Dragão"), Some(Category::Dragon));
        assert_eq!(category_from_portuguese("aco"), Some(Category::Steel));
    }

    #[test]
    fn unknown_term_is_not_a_category() {
        assert_eq!(category_from_portuguese("pikachu"), None);
        assert_eq!(category_from_portuguese(""), None);
        // English names are looked up through the API, not the reverse table
        assert_eq!(category_from_portuguese("water"), None);
    }

    #[test]
    fn every_category_round_trips_through_portuguese() {
        for category in Category::ALL {
            let name = category.portuguese_name();
            assert_eq!(category_from_portuguese(name), Some(category), "{name}");
            assert_eq!(Category::from_api_name(category.api_name()), Some(category));
        }
    }

    #[test]
    fn unknown_api_names_display_verbatim() {
        assert_eq!(display_category("stellar", Language::Pt), "stellar");
        assert_eq!(display_category("water", Language::Pt), "Água");
        assert_eq!(display_category("water", Language::En), "Water");
        assert_eq!(category_color("stellar"), FALLBACK_COLOR);
        assert_eq!(category_color("fire"), "#ef4444");
    }

    #[test]
    fn parses_language() {
        assert_eq!("PT".parse::<Language>().unwrap(), Language::Pt);
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert!("de".parse::<Language>().is_err());
    }
}
