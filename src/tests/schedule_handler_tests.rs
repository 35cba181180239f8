//! tests/schedule_handler_tests.rs
//! Pruebas de extremo a extremo de los endpoints, con el repositorio
//! en memoria detrás del servicio real.

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use actix_web::{test, web, App};
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::app;
    use crate::errors::AppError;
    use crate::handlers::schedule_handler::error_response;
    use crate::tests::mocks::{sample_record, service_with, MockScheduleRepository};

    // El tipo de retorno de init_service no se puede nombrar, así que
    // cada test arma la app con este macro.
    macro_rules! init_test_app {
        ($repository:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(service_with(Arc::clone(&$repository))))
                    .configure(app::init_app),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn post_creates_schedule_and_normalizes_channel() {
        let repository = MockScheduleRepository::new();
        let app = init_test_app!(repository);

        let body = json!({
            "recipient": "a@b.com",
            "message": "hi",
            "channel": "EMAIL",
            "scheduledAt": (Utc::now() + Duration::days(1)).to_rfc3339(),
        });
        let request = test::TestRequest::post()
            .uri("/api/schedules")
            .set_json(&body)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 201);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["channel"], json!("email"));
        assert_eq!(body["data"]["status"], json!("pendente"));

        let records = repository.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].channel, "email");
    }

    #[actix_web::test]
    async fn post_without_fields_reports_all_missing() {
        let app = init_test_app!(MockScheduleRepository::new());

        let request = test::TestRequest::post()
            .uri("/api/schedules")
            .set_json(json!({}))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 400);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], json!("VALIDATION_ERROR"));
        assert_eq!(
            body["field"],
            json!(["recipient", "message", "scheduledAt"])
        );
    }

    #[actix_web::test]
    async fn get_with_malformed_id_is_bad_request() {
        let app = init_test_app!(MockScheduleRepository::new());

        let request = test::TestRequest::get()
            .uri("/api/schedules/not-a-uuid")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 400);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["field"], json!("id"));
        assert_eq!(body["code"], json!("VALIDATION_ERROR"));
    }

    #[actix_web::test]
    async fn get_unknown_id_is_not_found() {
        let app = init_test_app!(MockScheduleRepository::new());

        let uri = format!("/api/schedules/{}", Uuid::new_v4());
        let request = test::TestRequest::get().uri(&uri).to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 404);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], json!("NOT_FOUND"));
    }

    #[actix_web::test]
    async fn put_applies_partial_update() {
        let repository = MockScheduleRepository::new();
        let record = sample_record("pendente");
        let id = record.id.clone();
        repository.seed(record);

        let app = init_test_app!(repository);

        let request = test::TestRequest::put()
            .uri(&format!("/api/schedules/{id}"))
            .set_json(json!({ "status": "ENVIADO" }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 200);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["data"]["status"], json!("enviado"));
        // El resto del registro queda intacto
        assert_eq!(body["data"]["recipient"], json!("a@b.com"));
    }

    #[actix_web::test]
    async fn delete_sent_schedule_is_rejected_and_kept() {
        let repository = MockScheduleRepository::new();
        let record = sample_record("enviado");
        let id = record.id.clone();
        repository.seed(record);

        let app = init_test_app!(repository);

        let request = test::TestRequest::delete()
            .uri(&format!("/api/schedules/{id}"))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 400);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["field"], json!("status"));

        assert!(repository.contains(&id));
        assert_eq!(repository.delete_calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn delete_pending_schedule_returns_no_content() {
        let repository = MockScheduleRepository::new();
        let record = sample_record("pendente");
        let id = record.id.clone();
        repository.seed(record);

        let app = init_test_app!(repository);

        let request = test::TestRequest::delete()
            .uri(&format!("/api/schedules/{id}"))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 204);
        assert!(!repository.contains(&id));
    }

    #[actix_web::test]
    async fn list_includes_pagination_block() {
        let repository = MockScheduleRepository::new();
        for _ in 0..3 {
            repository.seed(sample_record("pendente"));
        }

        let app = init_test_app!(repository);

        let request = test::TestRequest::get()
            .uri("/api/schedules?limit=2")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 200);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["pagination"]["total"], json!(3));
        assert_eq!(body["pagination"]["page"], json!(1));
        assert_eq!(body["pagination"]["limit"], json!(2));
        assert_eq!(body["pagination"]["totalPages"], json!(2));
    }

    #[actix_web::test]
    async fn health_route_reports_healthy() {
        let app = init_test_app!(MockScheduleRepository::new());

        let request = test::TestRequest::get().uri("/").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 200);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["status"], json!("healthy"));
    }

    #[actix_web::test]
    async fn list_with_huge_page_answers_with_json_error() {
        let app = init_test_app!(MockScheduleRepository::new());

        let uri = format!("/api/schedules?page={}&limit=100", i64::MAX);
        let request = test::TestRequest::get().uri(&uri).to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 400);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["field"], json!("page"));
        assert_eq!(body["code"], json!("VALIDATION_ERROR"));
    }

    #[actix_web::test]
    async fn cors_is_permissive_like_the_server_config() {
        let repository = MockScheduleRepository::new();
        // mismo middleware que arma main.rs
        let app = test::init_service(
            App::new()
                .wrap(actix_cors::Cors::permissive())
                .app_data(web::Data::new(service_with(Arc::clone(&repository))))
                .configure(app::init_app),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/api/schedules")
            .insert_header(("Origin", "http://localhost:3000"))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 200);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }

    #[actix_web::test]
    async fn generic_app_errors_keep_their_status_and_code() {
        let error = AppError::App {
            message: "Conflicto de agendamiento".to_string(),
            status_code: 409,
            code: "CONFLICT",
        };
        let response = error_response(&error);
        assert_eq!(response.status(), 409);
    }

    #[actix_web::test]
    async fn unknown_route_returns_structured_404() {
        let app = init_test_app!(MockScheduleRepository::new());

        let request = test::TestRequest::get().uri("/no/existe").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 404);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], json!("Ruta no encontrada"));
        assert_eq!(body["path"], json!("/no/existe"));
    }
}
