use actix_web::web;

use crate::handlers::clothing;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clothing")
            .service(
                web::resource("/{item_id}")
                    .route(web::get().to(clothing::get_clothing_item))
                    .route(web::patch().to(clothing::update_clothing_item))
                    .route(web::delete().to(clothing::delete_clothing_item))
            )
            .service(
                web::resource("/{item_id}/images")
                    .route(web::post().to(clothing::add_clothing_image))
            )
    );
}
