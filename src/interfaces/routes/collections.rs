use actix_web::web;

use crate::handlers::collections;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/collections")
            .service(
                web::resource("/{collection_id}")
                    .route(web::get().to(collections::get_collection))
                    .route(web::patch().to(collections::update_collection))
                    .route(web::delete().to(collections::delete_collection))
            )
            .service(
                web::resource("/{collection_id}/outfits/{outfit_id}")
                    .route(web::post().to(collections::add_outfit_to_collection))
                    .route(web::delete().to(collections::remove_outfit_from_collection))
            )
    );
}
