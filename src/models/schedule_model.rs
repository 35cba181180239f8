use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registro persistido de un agendamiento de comunicación.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub id: String,
    pub recipient: String,
    pub message: String,
    pub channel: String, // "email", "sms", "push", "whatsapp"
    pub scheduled_at: DateTime<Utc>,
    pub status: String, // "pendente", "enviado", "cancelado"
    pub created_at: DateTime<Utc>,
}

/// Request para crear un agendamiento.
/// Todos los campos son opcionales para poder reportar juntos
/// todos los obligatorios ausentes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub recipient: Option<String>,
    pub message: Option<String>,
    pub channel: Option<String>,
    pub scheduled_at: Option<String>,
}

/// Request de actualización parcial: sólo los campos presentes se tocan.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    pub recipient: Option<String>,
    pub message: Option<String>,
    pub channel: Option<String>,
    pub scheduled_at: Option<String>,
    pub status: Option<String>,
}

/// Datos ya validados y normalizados que el repositorio inserta.
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub recipient: String,
    pub message: String,
    pub channel: String,
    pub scheduled_at: DateTime<Utc>,
    /// None => el repositorio aplica el default 'pendente'
    pub status: Option<String>,
}

/// Subconjunto validado para el UPDATE parcial.
#[derive(Debug, Clone, Default)]
pub struct ScheduleUpdate {
    pub recipient: Option<String>,
    pub message: Option<String>,
    pub channel: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

/// Filtros del listado, tal como llegan por query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSchedulesQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Consulta que recibe el repositorio para la página de resultados.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub status: Option<String>,
    pub skip: i64,
    pub take: i64,
}

/// Resultado paginado del listado.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSchedulesResponse {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub schedules: Vec<ScheduleRecord>,
}
