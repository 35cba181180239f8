//! validation.rs
//! Reglas de validación puras: sin efectos secundarios, sólo errores tipados.

use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::schedule_model::CreateScheduleRequest;

pub const VALID_CHANNELS: [&str; 4] = ["email", "sms", "push", "whatsapp"];
pub const ALLOWED_STATUSES: [&str; 3] = ["pendente", "enviado", "cancelado"];

/// Recolecta TODOS los campos obligatorios ausentes (no sólo el primero),
/// siempre en el orden recipient, message, scheduledAt.
pub fn validate_required_fields(data: &CreateScheduleRequest) -> Result<(), AppError> {
    let mut missing: Vec<String> = Vec::new();

    if data.recipient.as_deref().map_or(true, str::is_empty) {
        missing.push("recipient".to_string());
    }
    if data.message.as_deref().map_or(true, str::is_empty) {
        missing.push("message".to_string());
    }
    if data.scheduled_at.as_deref().map_or(true, str::is_empty) {
        missing.push("scheduledAt".to_string());
    }

    if !missing.is_empty() {
        return Err(AppError::validation(
            format!("Campos obligatorios ausentes: {}", missing.join(", ")),
            missing,
        ));
    }
    Ok(())
}

/// Normaliza el canal (trim + minúsculas) y lo valida contra la lista fija.
pub fn validate_channel(channel: Option<&str>) -> Result<String, AppError> {
    let raw = match channel {
        Some(c) if !c.is_empty() => c,
        _ => {
            return Err(AppError::validation(
                "El canal de comunicación es obligatorio",
                "channel",
            ))
        }
    };

    let normalized = raw.trim().to_lowercase();

    if !VALID_CHANNELS.contains(&normalized.as_str()) {
        return Err(AppError::validation(
            format!(
                "Canal de comunicación inválido. Canales válidos: {}",
                VALID_CHANNELS.join(", ")
            ),
            "channel",
        ));
    }
    Ok(normalized)
}

/// El id debe ser un UUID sintácticamente válido (cualquier versión RFC 4122).
pub fn validate_id(id: &str) -> Result<(), AppError> {
    if id.is_empty() {
        return Err(AppError::validation("El ID es obligatorio", "id"));
    }
    if Uuid::parse_str(id).is_err() {
        return Err(AppError::validation(
            "ID inválido. Se espera un UUID.",
            "id",
        ));
    }
    Ok(())
}

/// El status es opcional en filtros y updates; ausente o vacío => no-op.
/// Si viene, debe pertenecer al conjunto permitido. Devuelve la forma
/// canónica en minúsculas.
pub fn validate_status(status: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(status) = status.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let normalized = status.to_lowercase();
    if !ALLOWED_STATUSES.contains(&normalized.as_str()) {
        return Err(AppError::validation(
            format!(
                "Status inválido. Use: {}",
                ALLOWED_STATUSES.join(", ")
            ),
            "status",
        ));
    }
    Ok(Some(normalized))
}

/// Parsea la fecha de agendamiento y exige que sea futura respecto al
/// instante de validación. Ausente => no-op.
pub fn validate_scheduled_at(scheduled_at: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(raw) = scheduled_at else {
        return Ok(None);
    };

    let parsed = parse_instant(raw).ok_or_else(|| {
        AppError::validation("Fecha de agendamiento inválida", "scheduledAt")
    })?;

    if parsed < Utc::now() {
        return Err(AppError::validation(
            "La fecha de agendamiento no puede estar en el pasado",
            "scheduledAt",
        ));
    }
    Ok(Some(parsed))
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Sin zona horaria se interpreta como UTC
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
