//! app.rs
use crate::handlers::{health_handler, schedule_handler};
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health_handler::health_endpoint))
        .service(
            web::scope("/api").service(
                web::scope("/schedules")
                    .route(
                        "",
                        web::post().to(schedule_handler::create_schedule_endpoint),
                    )
                    .route(
                        "",
                        web::get().to(schedule_handler::list_schedules_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::get().to(schedule_handler::get_schedule_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::put().to(schedule_handler::update_schedule_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::delete().to(schedule_handler::cancel_schedule_endpoint),
                    ),
            ),
        )
        .default_service(web::route().to(health_handler::not_found_endpoint));
}
