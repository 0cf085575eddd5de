use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    entities::{
        clothing_item::{ClothingCategory, ClothingItem},
        stats::WardrobeStats,
    },
    errors::AppError,
    repositories::{
        clothing_item::ClothingItemRepository,
        collection::CollectionRepository,
        outfit::OutfitRepository,
    },
};

// Optional leading symbol or code, one non-negative decimal, optional trailing code.
static PRICE_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\d.\-]*?(\d+(?:\.\d+)?)\D*$").ok());

/// Parses `"$1,299.99"`, `"USD 40"` or `"12.50 EUR"`. Anything else is `None`.
pub fn parse_price(raw: &str) -> Option<f64> {
    let pattern = PRICE_PATTERN.as_ref()?;
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();

    pattern
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// Highest count wins; ties go to the category declared first.
pub fn most_common_category(by_category: &HashMap<ClothingCategory, usize>) -> Option<ClothingCategory> {
    ClothingCategory::ALL
        .into_iter()
        .filter_map(|category| by_category.get(&category).map(|count| (category, *count)))
        .filter(|(_, count)| *count > 0)
        .fold(None, |best: Option<(ClothingCategory, usize)>, (category, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((category, count)),
        })
        .map(|(category, _)| category)
}

/// Newest first; equal timestamps fall back to ascending id.
pub fn most_recent(mut items: Vec<ClothingItem>, limit: usize) -> Vec<ClothingItem> {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    items.truncate(limit);
    items
}

/// Pure aggregation over one user's records.
pub fn summarize(
    user_id: &str,
    items: Vec<ClothingItem>,
    total_outfits: usize,
    total_collections: usize,
    recent_limit: usize,
) -> WardrobeStats {
    let mut by_category: HashMap<ClothingCategory, usize> = HashMap::new();
    let mut by_color: HashMap<String, usize> = HashMap::new();
    let mut by_brand: HashMap<String, usize> = HashMap::new();
    let mut total_value = 0.0;

    for item in &items {
        *by_category.entry(item.category).or_insert(0) += 1;

        if let Some(color) = item.color.as_deref().filter(|c| !c.is_empty()) {
            *by_color.entry(color.to_string()).or_insert(0) += 1;
        }
        if let Some(brand) = item.brand.as_deref().filter(|b| !b.is_empty()) {
            *by_brand.entry(brand.to_string()).or_insert(0) += 1;
        }
        if let Some(price) = item.price.as_deref().and_then(parse_price) {
            total_value += price;
        }
    }

    WardrobeStats {
        user_id: user_id.to_string(),
        total_clothing_items: items.len(),
        total_outfits,
        total_collections,
        most_common_category: most_common_category(&by_category),
        by_category,
        by_color,
        by_brand,
        estimated_wardrobe_value: format_price(total_value),
        total_value,
        recent_items: most_recent(items, recent_limit),
    }
}

pub struct StatsAggregator<I, O, C>
where
    I: ClothingItemRepository,
    O: OutfitRepository,
    C: CollectionRepository,
{
    pub item_repo: I,
    pub outfit_repo: O,
    pub collection_repo: C,
    pub recent_limit: usize,
}

impl<I, O, C> StatsAggregator<I, O, C>
where
    I: ClothingItemRepository,
    O: OutfitRepository,
    C: CollectionRepository,
{
    pub fn new(item_repo: I, outfit_repo: O, collection_repo: C, recent_limit: usize) -> Self {
        StatsAggregator { item_repo, outfit_repo, collection_repo, recent_limit }
    }

    /// A bad price never fails the whole computation; it is just left out of the sum.
    pub async fn get_wardrobe_stats(&self, user_id: &str) -> Result<WardrobeStats, AppError> {
        let items = self.item_repo.list_items_by_user(user_id).await?;
        let outfits = self.outfit_repo.list_outfits_by_user(user_id).await?;
        let collections = self.collection_repo.list_collections_by_user(user_id).await?;

        tracing::debug!(
            user_id,
            items = items.len(),
            outfits = outfits.len(),
            collections = collections.len(),
            "Computing wardrobe stats"
        );

        Ok(summarize(user_id, items, outfits.len(), collections.len(), self.recent_limit))
    }
}
