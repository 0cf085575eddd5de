#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::NormalizePath,
    web, App, Error,
};
use serde_json::json;
use wardrobe_backend::{
    db::open_store,
    entities::{
        clothing_item::{ClothingItem, NewClothingItemRequest},
        collection::{Collection, NewCollectionRequest},
        outfit::{NewOutfitRequest, Outfit},
        user_profile::{NewUserProfileRequest, UserProfile},
    },
    repositories::document_store::SharedStore,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};

/// An application wired to a fresh in-memory store.
#[derive(Clone)]
pub struct TestApp {
    pub state: Arc<AppState>,
    pub store: SharedStore,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::with_config(AppConfig::for_testing()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let store = open_store(&config)
            .await
            .expect("Failed to open in-memory store");

        let state = Arc::new(AppState::new(&config, store.clone()));

        Self { state, store, config }
    }

    /// Builds the actix app for `actix_web::test::init_service`.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Response = ServiceResponse<impl MessageBody + use<>>,
            Config = (),
            InitError = (),
            Error = Error,
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::from(self.state.clone()))
            .wrap(NormalizePath::trim())
            .configure(configure_routes)
    }

    pub async fn create_user(&self, user_id: &str) -> UserProfile {
        self.state
            .profile_handler
            .create_profile(new_profile(user_id))
            .await
            .expect("Failed to create user profile")
    }

    pub async fn add_item(&self, user_id: &str, request: NewClothingItemRequest) -> ClothingItem {
        self.state
            .clothing_handler
            .add_item(user_id, request)
            .await
            .expect("Failed to add clothing item")
    }

    pub async fn create_outfit(&self, user_id: &str, request: NewOutfitRequest) -> Outfit {
        self.state
            .outfit_handler
            .create_outfit(user_id, request)
            .await
            .expect("Failed to create outfit")
    }

    pub async fn create_collection(&self, user_id: &str, request: NewCollectionRequest) -> Collection {
        self.state
            .collection_handler
            .create_collection(user_id, request)
            .await
            .expect("Failed to create collection")
    }
}

pub fn new_profile(user_id: &str) -> NewUserProfileRequest {
    serde_json::from_value(json!({
        "user_id": user_id,
        "username": format!("{}-name", user_id),
        "email": format!("{}@example.com", user_id),
        "body_size_data": { "height": "180cm", "shoe_size": "44" },
        "preferences": { "style": "casual" }
    }))
    .expect("Invalid profile fixture")
}

/// Minimal valid item; tweak the public fields for specific cases.
pub fn item(name: &str, category: &str) -> NewClothingItemRequest {
    NewClothingItemRequest {
        id: None,
        name: name.to_string(),
        category: category.to_string(),
        images: vec![format!("https://cdn.example.com/{}.jpg", name)],
        color: None,
        size: None,
        brand: None,
        price: None,
        source: None,
        purchase_link: None,
        purchase_date: None,
        tags: Vec::new(),
    }
}

pub fn colored_item(name: &str, category: &str, color: &str) -> NewClothingItemRequest {
    NewClothingItemRequest {
        color: Some(color.to_string()),
        ..item(name, category)
    }
}

pub fn priced_item(name: &str, category: &str, price: &str) -> NewClothingItemRequest {
    NewClothingItemRequest {
        price: Some(price.to_string()),
        ..item(name, category)
    }
}

pub fn outfit(name: &str, item_ids: &[&str]) -> NewOutfitRequest {
    NewOutfitRequest {
        id: None,
        name: name.to_string(),
        description: None,
        clothing_item_ids: item_ids.iter().map(|id| id.to_string()).collect(),
        occasion: None,
        season: None,
        weather: None,
        liked: false,
        tags: Vec::new(),
    }
}

pub fn collection(name: &str) -> NewCollectionRequest {
    NewCollectionRequest {
        id: None,
        name: name.to_string(),
        description: None,
        outfit_ids: Vec::new(),
        is_wishlist: false,
        tags: Vec::new(),
    }
}
