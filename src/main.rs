use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use sqlx::{Pool, Sqlite};

use crate::logger::init_logger;
use crate::repository::schedule_repository::SqliteScheduleRepository;
use crate::services::schedule_service::ScheduleService;

mod app;
mod errors;
mod handlers;
mod logger;
mod models;
mod repository;
mod services;
mod validation;

#[cfg(test)]
mod tests;

async fn setup_database() -> Pool<Sqlite> {
    // 1) Crear carpeta "data"
    std::fs::create_dir_all("data").expect("No se pudo crear directorio 'data'");

    // 2) Ruta final: ./data/schedules.db
    let db_path = std::env::current_dir()
        .expect("No se pudo obtener el current_dir")
        .join("data")
        .join("schedules.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.to_string_lossy());

    log::info!("Conectando a SQLite en {}", db_url);

    // 3) Conectarnos con SQLx
    let db_pool = Pool::<Sqlite>::connect(&db_url)
        .await
        .expect("No se pudo conectar a la base de datos SQLite.");

    db_pool
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    // Conectarnos a la DB
    let db_pool = setup_database().await;

    // Repositorio de agendamientos
    let repository = SqliteScheduleRepository::new(db_pool);
    if let Err(e) = repository.run_migrations().await {
        panic!("Fallo en migraciones de 'schedules': {:?}", e);
    }

    // Inyección explícita: repositorio -> servicio -> handlers
    let schedule_service = ScheduleService::new(Arc::new(repository));

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5023);

    // Levantar servidor
    log::info!("Levantando servidor en 0.0.0.0:{}", port);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(schedule_service.clone()))
            .configure(app::init_app)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
