//! Catalog interaction types.
//!
//! [CatalogEntry] and [CatalogItem] are the domain model used by the rest of
//! the crate. The `Raw*` types mirror the JSON payloads of the API and are
//! only used to decode responses.

use serde::{Deserialize, Serialize};

use crate::translation::{Category, capitalize};

/// A lightweight reference to a catalog item,
/// as returned by the listing and category endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A normalized detail record.
///
/// `categories` keeps the order of the source, the first entry is the
/// primary category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub name: String,
    pub image_url: String,
    pub categories: Vec<String>,
}

impl CatalogItem {
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    /// Whether `category` is the primary category of this item.
    pub fn has_primary_category(&self, category: Category) -> bool {
        self.primary_category() == Some(category.api_name())
    }

    /// The id zero padded to four digits, e.g. `0025`.
    pub fn formatted_id(&self) -> String {
        format!("{:04}", self.id)
    }

    /// The name with its first letter upper-cased.
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }
}

/// A page of results together with the total number of results on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsPage<T> {
    pub count: u64,
    pub results: Vec<T>,
}

pub type ListingPage = ResultsPage<CatalogEntry>;

// ---------------------------------------------------------------------------
// Raw API payloads
// ---------------------------------------------------------------------------

/// `GET /pokemon?limit=&offset=`
#[derive(Debug, Clone, Deserialize)]
pub struct RawListing {
    pub count: u64,
    #[serde(default)]
    pub results: Vec<CatalogEntry>,
}

impl From<RawListing> for ListingPage {
    fn from(raw: RawListing) -> Self {
        ResultsPage {
            count: raw.count,
            results: raw.results,
        }
    }
}

/// `GET /type/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategoryListing {
    #[serde(default)]
    pub pokemon: Vec<RawCategoryMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategoryMember {
    pub pokemon: CatalogEntry,
}

impl From<RawCategoryListing> for Vec<CatalogEntry> {
    fn from(raw: RawCategoryListing) -> Self {
        raw.pokemon.into_iter().map(|member| member.pokemon).collect()
    }
}

/// `GET /pokemon/{name}`, reduced to the fields we consume.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDetail {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub sprites: Option<RawSprites>,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<RawOtherSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<RawArtwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArtwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTypeSlot {
    #[serde(rename = "type")]
    pub type_: RawNamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNamedResource {
    pub name: String,
}

impl RawDetail {
    /// Official artwork if present, the default sprite otherwise,
    /// and an empty string if neither is set.
    fn image_url(&self) -> String {
        let Some(sprites) = &self.sprites else {
            return String::new();
        };

        let artwork = sprites
            .other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|artwork| artwork.front_default.as_deref());

        [artwork, sprites.front_default.as_deref()]
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}

impl From<RawDetail> for CatalogItem {
    fn from(raw: RawDetail) -> Self {
        let image_url = raw.image_url();
        CatalogItem {
            id: raw.id,
            name: raw.name,
            image_url,
            categories: raw
                .types
                .into_iter()
                .map(|slot| slot.type_.name)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn item_from_json(value: serde_json::Value) -> CatalogItem {
        serde_json::from_value::<RawDetail>(value).unwrap().into()
    }

    #[test]
    fn prefers_official_artwork() {
        let item = item_from_json(json!({
            "id": 6,
            "name": "charizard",
            "sprites": {
                "front_default": "sprite.png",
                "other": { "official-artwork": { "front_default": "artwork.png" } }
            },
            "types": [
                { "slot": 1, "type": { "name": "fire", "url": "" } },
                { "slot": 2, "type": { "name": "flying", "url": "" } }
            ]
        }));

        assert_eq!(item, CatalogItem {
            id: 6,
            name: "charizard".to_string(),
            image_url: "artwork.png".to_string(),
            categories: vec!["fire".to_string(), "flying".to_string()],
        });
        assert_eq!(item.primary_category(), Some("fire"));
        assert!(item.has_primary_category(Category::Fire));
        assert!(!item.has_primary_category(Category::Flying));
    }

    #[test]
    fn falls_back_to_default_sprite() {
        let item = item_from_json(json!({
            "id": 1,
            "name": "bulbasaur",
            "sprites": {
                "front_default": "sprite.png",
                "other": { "official-artwork": { "front_default": null } }
            },
            "types": []
        }));
        assert_eq!(item.image_url, "sprite.png");

        let item = item_from_json(json!({
            "id": 1,
            "name": "bulbasaur",
            "sprites": { "front_default": "sprite.png", "other": null }
        }));
        assert_eq!(item.image_url, "sprite.png");
    }

    #[test]
    fn missing_images_yield_empty_url() {
        let item = item_from_json(json!({
            "id": 10001,
            "name": "deoxys-attack",
            "sprites": { "front_default": null }
        }));
        assert_eq!(item.image_url, "");
        assert_eq!(item.primary_category(), None);

        let item = item_from_json(json!({ "id": 2, "name": "ivysaur" }));
        assert_eq!(item.image_url, "");
    }

    #[test]
    fn formats_id_and_name() {
        let item = CatalogItem {
            id: 25,
            name: "pikachu".to_string(),
            image_url: String::new(),
            categories: vec![],
        };
        assert_eq!(item.formatted_id(), "0025");
        assert_eq!(item.display_name(), "Pikachu");
    }

    #[test]
    fn category_listing_flattens_members() {
        let raw: RawCategoryListing = serde_json::from_value(json!({
            "name": "water",
            "pokemon": [
                { "slot": 1, "pokemon": { "name": "squirtle", "url": "u/7" } },
                { "slot": 2, "pokemon": { "name": "lapras", "url": "u/131" } }
            ]
        }))
        .unwrap();
        let entries: Vec<CatalogEntry> = raw.into();
        assert_eq!(entries, vec![
            CatalogEntry::new("squirtle", "u/7"),
            CatalogEntry::new("lapras", "u/131"),
        ]);
    }
}
