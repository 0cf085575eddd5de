use actix_web::web;

use crate::handlers::{home::home, json_error::route_not_found, system::health_check};

mod clothing;
mod collections;
mod json_error;
mod outfits;
mod users;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .service(health_check)
            .configure(users::config_routes)
            .configure(clothing::config_routes)
            .configure(outfits::config_routes)
            .configure(collections::config_routes)
    );

    cfg.configure(json_error::config_routes);
    cfg.default_service(web::route().to(route_not_found));
}
