use std::collections::HashMap;

use serde::Serialize;

use crate::entities::clothing_item::{ClothingCategory, ClothingItem};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WardrobeStats {
    pub user_id: String,
    pub total_clothing_items: usize,
    pub total_outfits: usize,
    pub total_collections: usize,
    pub by_category: HashMap<ClothingCategory, usize>,
    /// Items without a color are left out.
    pub by_color: HashMap<String, usize>,
    /// Items without a brand are left out.
    pub by_brand: HashMap<String, usize>,
    pub most_common_category: Option<ClothingCategory>,
    /// Sum of every price that parses; the rest are skipped.
    pub total_value: f64,
    /// `total_value` rendered as `$x.xx`.
    pub estimated_wardrobe_value: String,
    pub recent_items: Vec<ClothingItem>,
}
