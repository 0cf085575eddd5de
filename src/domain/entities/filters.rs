use std::str::FromStr;

use serde::Deserialize;

use crate::{
    entities::{
        clothing_item::{ClothingCategory, ClothingItem},
        collection::Collection,
        outfit::Outfit,
    },
    errors::AppError,
};

/// Equality predicates over a user's clothing items. `None` or an empty
/// value means "do not filter on this field".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub category: Option<ClothingCategory>,
    pub color: Option<String>,
    pub brand: Option<String>,
    /// Matches when the item carries at least one of these tags.
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutfitFilter {
    pub occasion: Option<String>,
    pub season: Option<String>,
    pub weather: Option<String>,
    pub tags: Vec<String>,
    pub liked: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionFilter {
    pub is_wishlist: Option<bool>,
    pub tags: Vec<String>,
}

/// Raw query-string shape; tags arrive comma separated.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemFilterQuery {
    pub category: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutfitFilterQuery {
    pub occasion: Option<String>,
    pub season: Option<String>,
    pub weather: Option<String>,
    pub tags: Option<String>,
    pub liked: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CollectionFilterQuery {
    pub is_wishlist: Option<bool>,
    pub tags: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &ClothingItem) -> bool {
        self.category.is_none_or(|c| item.category == c)
            && field_matches(&self.color, &item.color)
            && field_matches(&self.brand, &item.brand)
            && tags_intersect(&self.tags, &item.tags)
    }
}

impl OutfitFilter {
    pub fn matches(&self, outfit: &Outfit) -> bool {
        field_matches(&self.occasion, &outfit.occasion)
            && field_matches(&self.season, &outfit.season)
            && field_matches(&self.weather, &outfit.weather)
            && tags_intersect(&self.tags, &outfit.tags)
            && self.liked.is_none_or(|liked| outfit.liked == liked)
    }
}

impl CollectionFilter {
    pub fn matches(&self, collection: &Collection) -> bool {
        self.is_wishlist.is_none_or(|w| collection.is_wishlist == w)
            && tags_intersect(&self.tags, &collection.tags)
    }
}

/// Absent or empty predicate passes everything; otherwise exact equality.
fn field_matches(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match wanted.as_deref() {
        None | Some("") => true,
        Some(wanted) => actual.as_deref() == Some(wanted),
    }
}

fn tags_intersect(wanted: &[String], actual: &[String]) -> bool {
    wanted.is_empty() || wanted.iter().any(|tag| actual.contains(tag))
}

/// Splits `a,b, c` into trimmed, non-empty tags.
pub fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

impl TryFrom<ItemFilterQuery> for ItemFilter {
    type Error = AppError;

    fn try_from(query: ItemFilterQuery) -> Result<Self, Self::Error> {
        let category = match query.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(ClothingCategory::from_str(raw)?),
        };

        Ok(ItemFilter {
            category,
            color: query.color,
            brand: query.brand,
            tags: split_tags(query.tags.as_deref()),
        })
    }
}

impl From<OutfitFilterQuery> for OutfitFilter {
    fn from(query: OutfitFilterQuery) -> Self {
        OutfitFilter {
            occasion: query.occasion,
            season: query.season,
            weather: query.weather,
            tags: split_tags(query.tags.as_deref()),
            liked: query.liked,
        }
    }
}

impl From<CollectionFilterQuery> for CollectionFilter {
    fn from(query: CollectionFilterQuery) -> Self {
        CollectionFilter {
            is_wishlist: query.is_wishlist,
            tags: split_tags(query.tags.as_deref()),
        }
    }
}
