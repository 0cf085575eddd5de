mod test_utils;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use test_utils::*;
use wardrobe_backend::constants::USER_ID_HEADER;

fn profile_body(user_id: &str) -> Value {
    json!({
        "user_id": user_id,
        "username": "ada",
        "email": "ada@example.com",
        "body_size_data": { "height": "170cm" }
    })
}

fn item_body() -> Value {
    json!({
        "name": "denim jacket",
        "category": "outerwear",
        "images": ["https://cdn.example.com/jacket.jpg"],
        "color": "blue",
        "price": "$80.00"
    })
}

#[actix_rt::test]
async fn profile_lifecycle_over_http() {
    let app = TestApp::spawn().await;
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header((USER_ID_HEADER, "u1"))
        .set_json(profile_body("u1"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::patch()
        .uri("/api/users/u1")
        .insert_header((USER_ID_HEADER, "u1"))
        .set_json(json!({ "location": "Accra", "user_id": "hijack" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body["location"], "Accra");
    assert_eq!(body["user_id"], "u1");

    let req = test::TestRequest::delete()
        .uri("/api/users/u1")
        .insert_header((USER_ID_HEADER, "u1"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/users/u1")
        .insert_header((USER_ID_HEADER, "u1"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn missing_identity_header_is_unauthorized() {
    let app = TestApp::spawn().await;
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get().uri("/api/users/u1").to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn other_users_records_are_forbidden() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let jacket = app.add_item("u1", item("jacket", "outerwear")).await;
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/clothing/{}", jacket.id))
        .insert_header((USER_ID_HEADER, "mallory"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/users/u1/clothing")
        .insert_header((USER_ID_HEADER, "mallory"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn clothing_create_list_and_validation() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/users/u1/clothing")
        .insert_header((USER_ID_HEADER, "u1"))
        .set_json(item_body())
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let mut invalid = item_body();
    invalid["images"] = json!([]);
    let req = test::TestRequest::post()
        .uri("/api/users/u1/clothing")
        .insert_header((USER_ID_HEADER, "u1"))
        .set_json(invalid)
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/users/u1/clothing?category=outerwear&color=blue")
        .insert_header((USER_ID_HEADER, "u1"))
        .to_request();
    let items: Vec<Value> = test::call_and_read_body_json(&service, req).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "outerwear");

    let req = test::TestRequest::get()
        .uri("/api/users/u1/clothing?category=capes")
        .insert_header((USER_ID_HEADER, "u1"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::spawn().await;
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header((USER_ID_HEADER, "u1"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn creating_for_unknown_user_is_not_found() {
    let app = TestApp::spawn().await;
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/users/ghost/outfits")
        .insert_header((USER_ID_HEADER, "ghost"))
        .set_json(json!({ "name": "look" }))
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn outfit_wear_and_resolution_over_http() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let jacket = app.add_item("u1", item("jacket", "outerwear")).await;
    let look = app
        .create_outfit("u1", outfit("look", &[jacket.id.as_str(), "gone"]))
        .await;
    let service = test::init_service(app.app()).await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/outfits/{}/worn", look.id))
            .insert_header((USER_ID_HEADER, "u1"))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/outfits/{}", look.id))
        .insert_header((USER_ID_HEADER, "u1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;

    assert_eq!(body["outfit"]["times_worn"], 2);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["items"][0]["id"], jacket.id.as_str());
}

#[actix_rt::test]
async fn collection_membership_over_http() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    let faves = app.create_collection("u1", collection("faves")).await;
    let service = test::init_service(app.app()).await;
    let uri = format!("/api/collections/{}/outfits/o1", faves.id);

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header((USER_ID_HEADER, "u1"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&service, req).await;
        assert!(body["outfit_ids"].is_array());
    }

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header((USER_ID_HEADER, "u1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body["outfit_ids"], json!([]));

    let req = test::TestRequest::post()
        .uri("/api/collections/ghost/outfits/o1")
        .insert_header((USER_ID_HEADER, "u1"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn stats_endpoint_reports_value() {
    let app = TestApp::spawn().await;
    app.create_user("u1").await;
    app.add_item("u1", priced_item("a", "tops", "$10.00")).await;
    app.add_item("u1", priced_item("b", "tops", "$5.50")).await;
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/users/u1/stats")
        .insert_header((USER_ID_HEADER, "u1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;

    assert_eq!(body["estimated_wardrobe_value"], "$15.50");
    assert_eq!(body["by_category"]["tops"], 2);
    assert_eq!(body["most_common_category"], "tops");
}

#[actix_rt::test]
async fn health_reports_store_status() {
    let app = TestApp::spawn().await;
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    app.store.close().await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_rt::test]
async fn service_outlives_the_app_builder() {
    let service = {
        let app = TestApp::spawn().await;
        app.create_user("u1").await;
        test::init_service(app.app()).await
    };

    let req = test::TestRequest::get()
        .uri("/api/users/u1")
        .insert_header((USER_ID_HEADER, "u1"))
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn unknown_route_answers_json_404() {
    let app = TestApp::spawn().await;
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get().uri("/api/nowhere").to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
