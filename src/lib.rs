mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::db;

use repositories::{
    document_store::SharedStore,
    store_repo::{StoreClothingItemRepo, StoreCollectionRepo, StoreOutfitRepo, StoreUserRepo},
};
use use_cases::{
    clothing::ClothingHandler,
    collections::CollectionHandler,
    outfits::OutfitHandler,
    profile::ProfileHandler,
    resolver::RelationshipResolver,
    stats::StatsAggregator,
};

pub struct AppState {
    pub config: settings::AppConfig,
    pub store: SharedStore,
    pub profile_handler: AppProfileHandler,
    pub clothing_handler: AppClothingHandler,
    pub outfit_handler: AppOutfitHandler,
    pub collection_handler: AppCollectionHandler,
    pub resolver: AppResolver,
    pub stats_aggregator: AppStatsAggregator,
}

pub type AppProfileHandler = ProfileHandler<StoreUserRepo>;
pub type AppClothingHandler = ClothingHandler<StoreUserRepo, StoreClothingItemRepo>;
pub type AppOutfitHandler = OutfitHandler<StoreUserRepo, StoreOutfitRepo>;
pub type AppCollectionHandler = CollectionHandler<StoreUserRepo, StoreCollectionRepo>;
pub type AppResolver = RelationshipResolver<StoreClothingItemRepo, StoreOutfitRepo, StoreCollectionRepo>;
pub type AppStatsAggregator = StatsAggregator<StoreClothingItemRepo, StoreOutfitRepo, StoreCollectionRepo>;

impl AppState {
    /// Wires every handler to the one shared store handle.
    pub fn new(config: &settings::AppConfig, store: SharedStore) -> Self {
        let user_repo = StoreUserRepo::new(store.clone());
        let item_repo = StoreClothingItemRepo::new(store.clone());
        let outfit_repo = StoreOutfitRepo::new(store.clone());
        let collection_repo = StoreCollectionRepo::new(store.clone());

        AppState {
            config: config.clone(),
            store,
            profile_handler: ProfileHandler::new(user_repo.clone()),
            clothing_handler: ClothingHandler::new(user_repo.clone(), item_repo.clone()),
            outfit_handler: OutfitHandler::new(user_repo.clone(), outfit_repo.clone()),
            collection_handler: CollectionHandler::new(user_repo, collection_repo.clone()),
            resolver: RelationshipResolver::new(item_repo.clone(), outfit_repo.clone(), collection_repo.clone()),
            stats_aggregator: StatsAggregator::new(
                item_repo,
                outfit_repo,
                collection_repo,
                config.recent_items_limit,
            ),
        }
    }
}
