//! handlers/schedule_handler.rs
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::errors::AppError;
use crate::models::schedule_model::{
    CreateScheduleRequest, ListSchedulesQuery, UpdateScheduleRequest,
};
use crate::services::schedule_service::ScheduleService;

/// Mapea un `AppError` a la respuesta HTTP uniforme `{error, code, field?}`.
/// La causa interna de los errores de base de datos sólo va al log.
pub fn error_response(error: &AppError) -> HttpResponse {
    match error {
        AppError::Validation { message, field } => HttpResponse::BadRequest().json(json!({
            "error": message,
            "field": field,
            "code": error.code(),
        })),
        AppError::NotFound { .. } => HttpResponse::NotFound().json(json!({
            "error": error.to_string(),
            "code": error.code(),
        })),
        AppError::Database { message, cause } => {
            log::error!("Error de base de datos: {message}: {cause:?}");
            HttpResponse::InternalServerError().json(json!({
                "error": message,
                "code": error.code(),
            }))
        }
        AppError::App {
            message,
            status_code,
            code,
        } => {
            let status = StatusCode::from_u16(*status_code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).json(json!({
                "error": message,
                "code": code,
            }))
        }
    }
}

/// POST /api/schedules
pub async fn create_schedule_endpoint(
    service: web::Data<ScheduleService>,
    body: web::Json<CreateScheduleRequest>,
) -> HttpResponse {
    match service.create_schedule(body.into_inner()).await {
        Ok(created) => HttpResponse::Created().json(json!({
            "success": true,
            "data": created,
            "message": "Agendamiento creado con éxito",
        })),
        Err(e) => error_response(&e),
    }
}

/// GET /api/schedules/{id}
pub async fn get_schedule_endpoint(
    service: web::Data<ScheduleService>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();

    match service.get_schedule_by_id(&id).await {
        Ok(schedule) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": schedule,
        })),
        Err(e) => error_response(&e),
    }
}

/// PUT /api/schedules/{id}
pub async fn update_schedule_endpoint(
    service: web::Data<ScheduleService>,
    path: web::Path<String>,
    body: web::Json<UpdateScheduleRequest>,
) -> HttpResponse {
    let id = path.into_inner();

    match service.update_schedule(&id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": updated,
            "message": "Agendamiento actualizado con éxito",
        })),
        Err(e) => error_response(&e),
    }
}

/// DELETE /api/schedules/{id}
pub async fn cancel_schedule_endpoint(
    service: web::Data<ScheduleService>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();

    match service.cancel_schedule(&id).await {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// GET /api/schedules
pub async fn list_schedules_endpoint(
    service: web::Data<ScheduleService>,
    query: web::Query<ListSchedulesQuery>,
) -> HttpResponse {
    match service.list_schedules(query.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": result.schedules,
            "pagination": {
                "total": result.total,
                "page": result.page,
                "limit": result.limit,
                "totalPages": result.total_pages,
            },
        })),
        Err(e) => error_response(&e),
    }
}
