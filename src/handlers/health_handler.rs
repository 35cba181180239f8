//! handlers/health_handler.rs
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde_json::json;

use crate::services::schedule_service::ScheduleService;

/// GET /
/// Ruta básica para verificar que la API está en línea.
pub async fn health_endpoint(service: web::Data<ScheduleService>) -> HttpResponse {
    match service.health_check().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "message": "API de agendamiento de comunicaciones en línea",
            "status": "healthy",
            "timestamp": Utc::now().to_rfc3339(),
        })),
        Err(e) => {
            log::error!("Health check falló: {e:?}");
            HttpResponse::InternalServerError().json(json!({
                "status": "unhealthy",
                "timestamp": Utc::now().to_rfc3339(),
            }))
        }
    }
}

/// Fallback para rutas desconocidas.
pub async fn not_found_endpoint(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": "Ruta no encontrada",
        "path": req.path(),
    }))
}
