//! Read-side narrowing of `list_by_user` results. Nothing here touches the store.

use crate::entities::{
    clothing_item::ClothingItem,
    collection::Collection,
    filters::{CollectionFilter, ItemFilter, OutfitFilter},
    outfit::Outfit,
};

pub fn filter_items(items: Vec<ClothingItem>, filter: &ItemFilter) -> Vec<ClothingItem> {
    items.into_iter().filter(|item| filter.matches(item)).collect()
}

pub fn filter_outfits(outfits: Vec<Outfit>, filter: &OutfitFilter) -> Vec<Outfit> {
    outfits.into_iter().filter(|outfit| filter.matches(outfit)).collect()
}

pub fn filter_collections(collections: Vec<Collection>, filter: &CollectionFilter) -> Vec<Collection> {
    collections
        .into_iter()
        .filter(|collection| filter.matches(collection))
        .collect()
}
