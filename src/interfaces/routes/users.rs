use actix_web::web;

use crate::handlers::{clothing, collections, outfits, profiles};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(
                web::resource("")
                    .route(web::post().to(profiles::create_profile))
            )
            .service(
                web::resource("/{user_id}")
                    .route(web::get().to(profiles::get_profile))
                    .route(web::patch().to(profiles::update_profile))
                    .route(web::delete().to(profiles::delete_profile))
            )
            .service(
                web::resource("/{user_id}/stats")
                    .route(web::get().to(profiles::get_wardrobe_stats))
            )
            .service(
                web::resource("/{user_id}/clothing")
                    .route(web::post().to(clothing::add_clothing_item))
                    .route(web::get().to(clothing::list_clothing_items))
            )
            .service(
                web::resource("/{user_id}/outfits")
                    .route(web::post().to(outfits::create_outfit))
                    .route(web::get().to(outfits::list_outfits))
            )
            .service(
                web::resource("/{user_id}/collections")
                    .route(web::post().to(collections::create_collection))
                    .route(web::get().to(collections::list_collections))
            )
    );
}
