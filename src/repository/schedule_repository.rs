use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use crate::models::schedule_model::{ListQuery, NewSchedule, ScheduleRecord, ScheduleUpdate};

/// Contrato de persistencia que consume el servicio. Los fallos se
/// devuelven como `anyhow::Error` y el servicio los envuelve en un
/// error tipado de base de datos.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create(&self, data: NewSchedule) -> Result<ScheduleRecord>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ScheduleRecord>>;
    async fn update(&self, id: &str, data: ScheduleUpdate) -> Result<ScheduleRecord>;
    async fn delete(&self, id: &str) -> Result<ScheduleRecord>;
    async fn find_many(&self, query: ListQuery) -> Result<Vec<ScheduleRecord>>;
    async fn count(&self, status: Option<&str>) -> Result<i64>;
    async fn health_check(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct SqliteScheduleRepository {
    db_pool: Pool<Sqlite>,
}

impl SqliteScheduleRepository {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        SqliteScheduleRepository { db_pool }
    }

    /// Corre migraciones con sqlx
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.db_pool).await?;
        Ok(())
    }
}

const SELECT_COLUMNS: &str =
    "id, recipient, message, channel, scheduled_at, status, created_at";

// Los timestamps se guardan como TEXT en RFC 3339 y se parsean al leer.
fn row_to_record(row: &SqliteRow) -> Result<ScheduleRecord> {
    let scheduled_at: String = row.try_get("scheduled_at")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(ScheduleRecord {
        id: row.try_get("id")?,
        recipient: row.try_get("recipient")?,
        message: row.try_get("message")?,
        channel: row.try_get("channel")?,
        scheduled_at: scheduled_at.parse()?,
        status: row.try_get("status")?,
        created_at: created_at.parse()?,
    })
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepository {
    async fn create(&self, data: NewSchedule) -> Result<ScheduleRecord> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let status = data.status.unwrap_or_else(|| "pendente".to_string());

        sqlx::query(
            r#"
            INSERT INTO schedules (
                id, recipient, message, channel,
                scheduled_at, status, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&id)
        .bind(&data.recipient)
        .bind(&data.message)
        .bind(&data.channel)
        .bind(data.scheduled_at.to_rfc3339())
        .bind(&status)
        .bind(now.to_rfc3339())
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar schedule")?;

        Ok(ScheduleRecord {
            id,
            recipient: data.recipient,
            message: data.message,
            channel: data.channel,
            scheduled_at: data.scheduled_at,
            status,
            created_at: now,
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ScheduleRecord>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM schedules WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .context("Fallo al buscar schedule por id")?;

        match row {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: &str, data: ScheduleUpdate) -> Result<ScheduleRecord> {
        // Construimos el SET sólo con los campos presentes (update parcial)
        let mut assignments: Vec<&str> = Vec::new();
        if data.recipient.is_some() {
            assignments.push("recipient = ?");
        }
        if data.message.is_some() {
            assignments.push("message = ?");
        }
        if data.channel.is_some() {
            assignments.push("channel = ?");
        }
        if data.scheduled_at.is_some() {
            assignments.push("scheduled_at = ?");
        }
        if data.status.is_some() {
            assignments.push("status = ?");
        }

        if !assignments.is_empty() {
            let sql = format!(
                "UPDATE schedules SET {} WHERE id = ?",
                assignments.join(", ")
            );

            let mut query = sqlx::query(&sql);
            if let Some(recipient) = &data.recipient {
                query = query.bind(recipient);
            }
            if let Some(message) = &data.message {
                query = query.bind(message);
            }
            if let Some(channel) = &data.channel {
                query = query.bind(channel);
            }
            if let Some(scheduled_at) = &data.scheduled_at {
                query = query.bind(scheduled_at.to_rfc3339());
            }
            if let Some(status) = &data.status {
                query = query.bind(status);
            }

            query
                .bind(id)
                .execute(&self.db_pool)
                .await
                .context("Fallo al actualizar schedule")?;
        }

        self.find_by_id(id)
            .await?
            .context("El schedule desapareció durante el update")
    }

    async fn delete(&self, id: &str) -> Result<ScheduleRecord> {
        let record = self
            .find_by_id(id)
            .await?
            .context("No existe schedule con ese id")?;

        sqlx::query("DELETE FROM schedules WHERE id = ?1")
            .bind(id)
            .execute(&self.db_pool)
            .await
            .context("Fallo al eliminar schedule")?;

        Ok(record)
    }

    async fn find_many(&self, query: ListQuery) -> Result<Vec<ScheduleRecord>> {
        let rows = if let Some(status) = &query.status {
            let sql = format!(
                "SELECT {SELECT_COLUMNS} FROM schedules \
                 WHERE status = ?1 \
                 ORDER BY created_at DESC LIMIT ?2 OFFSET ?3"
            );
            sqlx::query(&sql)
                .bind(status)
                .bind(query.take)
                .bind(query.skip)
                .fetch_all(&self.db_pool)
                .await
        } else {
            let sql = format!(
                "SELECT {SELECT_COLUMNS} FROM schedules \
                 ORDER BY created_at DESC LIMIT ?1 OFFSET ?2"
            );
            sqlx::query(&sql)
                .bind(query.take)
                .bind(query.skip)
                .fetch_all(&self.db_pool)
                .await
        }
        .context("Fallo al listar schedules")?;

        rows.iter().map(row_to_record).collect()
    }

    async fn count(&self, status: Option<&str>) -> Result<i64> {
        let row = if let Some(status) = status {
            sqlx::query("SELECT COUNT(*) as cnt FROM schedules WHERE status = ?1")
                .bind(status)
                .fetch_one(&self.db_pool)
                .await
        } else {
            sqlx::query("SELECT COUNT(*) as cnt FROM schedules")
                .fetch_one(&self.db_pool)
                .await
        }
        .context("Fallo al contar schedules")?;

        Ok(row.try_get("cnt")?)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .context("Health check de la base de datos falló")?;
        Ok(())
    }
}
