use actix_web::web;

use crate::handlers::outfits;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/outfits")
            .service(
                web::resource("/{outfit_id}")
                    .route(web::get().to(outfits::get_outfit))
                    .route(web::patch().to(outfits::update_outfit))
                    .route(web::delete().to(outfits::delete_outfit))
            )
            .service(
                web::resource("/{outfit_id}/worn")
                    .route(web::post().to(outfits::mark_outfit_worn))
            )
    );
}
