mod test_utils;

use std::collections::HashMap;

use chrono::{Duration, TimeZone, Utc};
use test_utils::*;
use wardrobe_backend::{
    entities::clothing_item::{ClothingCategory, ClothingItemInsert, NewClothingItemRequest},
    repositories::{clothing_item::ClothingItemRepository, store_repo::StoreClothingItemRepo},
    settings::AppConfig,
    use_cases::stats::{most_common_category, parse_price},
};

#[test]
fn parses_common_price_formats() {
    assert_eq!(parse_price("$10.00"), Some(10.0));
    assert_eq!(parse_price("$1,299.99"), Some(1299.99));
    assert_eq!(parse_price("USD 40"), Some(40.0));
    assert_eq!(parse_price("12.50 EUR"), Some(12.5));
    assert_eq!(parse_price("  7 "), Some(7.0));
}

#[test]
fn rejects_unparseable_prices() {
    for raw in ["bad", "", "$", "-5", "1.2.3", "10 to 20"] {
        assert_eq!(parse_price(raw), None, "{raw:?} should not parse");
    }
}

#[test]
fn most_common_category_breaks_ties_by_declaration_order() {
    let counts = HashMap::from([
        (ClothingCategory::Shoes, 2),
        (ClothingCategory::Bottoms, 2),
        (ClothingCategory::Other, 1),
    ]);

    assert_eq!(most_common_category(&counts), Some(ClothingCategory::Bottoms));
    assert_eq!(most_common_category(&HashMap::new()), None);
}

#[tokio::test]
async fn sums_only_parseable_prices() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    app.add_item("u1", priced_item("a", "tops", "$10.00")).await;
    app.add_item("u1", priced_item("b", "tops", "$5.50")).await;
    app.add_item("u1", priced_item("c", "tops", "bad")).await;
    app.add_item("u1", item("d", "tops")).await;

    let stats = app.state.stats_aggregator.get_wardrobe_stats("u1").await.unwrap();

    assert!((stats.total_value - 15.50).abs() < 1e-9);
    assert_eq!(stats.estimated_wardrobe_value, "$15.50");
    assert_eq!(stats.total_clothing_items, 4);
}

#[tokio::test]
async fn groupings_skip_missing_color_and_brand() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    app.add_item("u1", NewClothingItemRequest { brand: Some("Acme".into()), ..colored_item("a", "tops", "blue") }).await;
    app.add_item("u1", colored_item("b", "shoes", "blue")).await;
    app.add_item("u1", NewClothingItemRequest { brand: Some("Acme".into()), ..item("c", "shoes") }).await;
    app.add_item("u1", item("d", "accessories")).await;

    let stats = app.state.stats_aggregator.get_wardrobe_stats("u1").await.unwrap();

    assert_eq!(stats.by_color, HashMap::from([("blue".to_string(), 2)]));
    assert_eq!(stats.by_brand, HashMap::from([("Acme".to_string(), 2)]));
    assert_eq!(stats.by_category[&ClothingCategory::Shoes], 2);
    assert_eq!(stats.most_common_category, Some(ClothingCategory::Shoes));
}

#[tokio::test]
async fn counts_outfits_and_collections() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    app.create_user("u2").await;
    app.create_outfit("u1", outfit("a", &[])).await;
    app.create_outfit("u1", outfit("b", &[])).await;
    app.create_outfit("u2", outfit("c", &[])).await;
    app.create_collection("u1", collection("faves")).await;

    let stats = app.state.stats_aggregator.get_wardrobe_stats("u1").await.unwrap();

    assert_eq!(stats.total_outfits, 2);
    assert_eq!(stats.total_collections, 1);
    assert_eq!(stats.total_clothing_items, 0);
}

#[tokio::test]
async fn empty_wardrobe_has_zeroed_stats() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;

    let stats = app.state.stats_aggregator.get_wardrobe_stats("u1").await.unwrap();

    assert_eq!(stats.total_clothing_items, 0);
    assert!(stats.by_category.is_empty());
    assert_eq!(stats.most_common_category, None);
    assert_eq!(stats.estimated_wardrobe_value, "$0.00");
    assert!(stats.recent_items.is_empty());
}

#[tokio::test]
async fn recent_items_are_newest_first_with_id_tie_break() {
    let mut config = AppConfig::for_testing();
    config.recent_items_limit = 3;
    let app = TestApp::with_config(config).await;
    app.create_user("u1").await;

    let repo = StoreClothingItemRepo::new(app.store.clone());
    let base = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let stamps = [
        ("a", base),
        ("b", base + Duration::hours(2)),
        ("c", base + Duration::hours(2)),
        ("d", base + Duration::hours(1)),
        ("e", base - Duration::hours(1)),
    ];

    for (id, created_at) in stamps {
        let mut insert: ClothingItemInsert = item(id, "tops").prepare_for_insert("u1").unwrap();
        insert.id = Some(id.to_string());
        insert.created_at = Some(created_at);
        repo.create_item(&insert).await.unwrap();
    }

    let stats = app.state.stats_aggregator.get_wardrobe_stats("u1").await.unwrap();

    let recent: Vec<&str> = stats.recent_items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(recent, vec!["b", "c", "d"]);
}
