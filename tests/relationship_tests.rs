mod test_utils;

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use test_utils::*;
use wardrobe_backend::{
    entities::{clothing_item::ClothingCategory, collection::NewCollectionRequest},
    errors::AppError,
};

#[tokio::test]
async fn resolves_items_in_reference_order() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let jeans = app.add_item("u1", item("jeans", "bottoms")).await;
    let shirt = app.add_item("u1", item("shirt", "tops")).await;
    let look = app.create_outfit("u1", outfit("look", &[shirt.id.as_str(), jeans.id.as_str(), shirt.id.as_str()])).await;

    let resolved = app.state.resolver.get_outfit_with_items(&look.id).await.unwrap();

    let ids: Vec<&str> = resolved.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec![shirt.id.as_str(), jeans.id.as_str(), shirt.id.as_str()]);
    assert_eq!(resolved.outfit, look);
}

#[tokio::test]
async fn dangling_item_references_are_skipped() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let shirt = app.add_item("u1", item("shirt", "tops")).await;
    let look = app.create_outfit("u1", outfit("look", &["deleted-item", shirt.id.as_str(), "never-existed"])).await;

    let resolved = app.state.resolver.resolve_outfit_items(look).await.unwrap();

    assert_eq!(resolved.items, vec![shirt]);
}

#[tokio::test]
async fn resolving_a_missing_outfit_is_not_found() {
    let app = TestApp::spawn().await;

    let result = app.state.resolver.get_outfit_with_items("ghost").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn collection_outfits_resolve_and_skip_deleted_ones() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let kept = app.create_outfit("u1", outfit("kept", &[])).await;
    let gone = app.create_outfit("u1", outfit("gone", &[])).await;
    let faves = app
        .create_collection("u1", NewCollectionRequest {
            outfit_ids: vec![gone.id.clone(), kept.id.clone()],
            ..collection("faves")
        })
        .await;

    app.state.outfit_handler.delete_outfit(&gone.id).await.unwrap();
    let resolved = app.state.resolver.get_collection_with_outfits(&faves.id).await.unwrap();

    assert_eq!(resolved.outfits, vec![kept]);
    assert_eq!(resolved.collection.outfit_ids.len(), 2);
}

#[tokio::test]
async fn mark_worn_three_times_counts_three() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let look = app.create_outfit("u1", outfit("look", &[])).await;
    assert_eq!(look.times_worn, 0);
    assert_eq!(look.last_worn, None);

    let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    let worn_at: Vec<_> = (0..3).map(|day| start + Duration::days(day)).collect();
    for at in &worn_at {
        app.state.resolver.mark_outfit_worn(&look.id, *at).await.unwrap();
    }

    let stored = app.state.outfit_handler.get_outfit(&look.id).await.unwrap();
    assert_eq!(stored.times_worn, 3);
    assert_eq!(stored.last_worn, Some(worn_at[2]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_mark_worn_loses_no_updates() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let look = app.create_outfit("u1", outfit("look", &[])).await;
    let state = Arc::clone(&app.state);

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let state = Arc::clone(&state);
            let id = look.id.clone();
            tokio::spawn(async move { state.resolver.mark_outfit_worn(&id, Utc::now()).await })
        })
        .collect();

    for task in tasks {
        task.await.expect("task panicked").expect("mark worn failed");
    }

    let stored = app.state.outfit_handler.get_outfit(&look.id).await.unwrap();
    assert_eq!(stored.times_worn, 50);
    assert!(stored.last_worn.is_some());
}

#[tokio::test]
async fn mark_worn_on_missing_outfit_is_not_found() {
    let app = TestApp::spawn().await;

    let result = app.state.resolver.mark_outfit_worn("ghost", Utc::now()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn adding_twice_keeps_duplicates_and_removal_clears_all() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let faves = app.create_collection("u1", collection("faves")).await;

    app.state.resolver.add_outfit_to_collection(&faves.id, "outfit_X").await.unwrap();
    let after_adds = app.state.resolver.add_outfit_to_collection(&faves.id, "outfit_X").await.unwrap();
    assert_eq!(after_adds.outfit_ids, vec!["outfit_X", "outfit_X"]);

    let after_remove = app.state.resolver.remove_outfit_from_collection(&faves.id, "outfit_X").await.unwrap();
    assert!(after_remove.outfit_ids.is_empty());
}

#[tokio::test]
async fn removal_keeps_other_outfits_in_order() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let trip = app
        .create_collection("u1", NewCollectionRequest {
            outfit_ids: vec!["a".into(), "x".into(), "b".into(), "x".into(), "c".into()],
            ..collection("trip")
        })
        .await;

    let updated = app.state.resolver.remove_outfit_from_collection(&trip.id, "x").await.unwrap();

    assert_eq!(updated.outfit_ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn collection_mutations_on_missing_collection_are_not_found() {
    let app = TestApp::spawn().await;

    let add = app.state.resolver.add_outfit_to_collection("ghost", "o1").await;
    let remove = app.state.resolver.remove_outfit_from_collection("ghost", "o1").await;

    assert!(matches!(add, Err(AppError::NotFound(_))));
    assert!(matches!(remove, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn end_to_end_wardrobe_flow() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let i1 = app.add_item("u1", colored_item("i1", "tops", "blue")).await;
    let i2 = app.add_item("u1", colored_item("i2", "bottoms", "black")).await;
    let o1 = app.create_outfit("u1", outfit("o1", &[i1.id.as_str(), i2.id.as_str()])).await;

    let resolved = app.state.resolver.resolve_outfit_items(o1).await.unwrap();
    assert_eq!(resolved.items, vec![i1, i2]);

    let stats = app.state.stats_aggregator.get_wardrobe_stats("u1").await.unwrap();
    assert_eq!(stats.by_category.len(), 2);
    assert_eq!(stats.by_category[&ClothingCategory::Tops], 1);
    assert_eq!(stats.by_category[&ClothingCategory::Bottoms], 1);
    assert_eq!(stats.total_outfits, 1);
}
