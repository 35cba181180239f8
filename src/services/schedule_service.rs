//! services/schedule_service.rs
//! Reglas de negocio de agendamientos: validación, normalización y
//! llamadas al repositorio. Los errores de validación y not-found se
//! propagan intactos; cualquier otro fallo de persistencia se envuelve
//! en un error de base de datos genérico.

use std::sync::Arc;

use crate::errors::AppError;
use crate::models::schedule_model::{
    CreateScheduleRequest, ListQuery, ListSchedulesQuery, ListSchedulesResponse, NewSchedule,
    ScheduleRecord, ScheduleUpdate, UpdateScheduleRequest,
};
use crate::repository::schedule_repository::ScheduleRepository;
use crate::validation;

#[derive(Clone)]
pub struct ScheduleService {
    repository: Arc<dyn ScheduleRepository>,
}

impl ScheduleService {
    pub fn new(repository: Arc<dyn ScheduleRepository>) -> Self {
        ScheduleService { repository }
    }

    pub async fn create_schedule(
        &self,
        data: CreateScheduleRequest,
    ) -> Result<ScheduleRecord, AppError> {
        validation::validate_required_fields(&data)?;

        let channel = validation::validate_channel(data.channel.as_deref())?;
        let scheduled_at = validation::validate_scheduled_at(data.scheduled_at.as_deref())?
            // los campos obligatorios ya pasaron, así que siempre hay valor
            .ok_or_else(|| {
                AppError::validation("Campos obligatorios ausentes: scheduledAt", "scheduledAt")
            })?;

        let new_schedule = NewSchedule {
            recipient: data.recipient.unwrap_or_default().trim().to_string(),
            message: data.message.unwrap_or_default().trim().to_string(),
            channel,
            scheduled_at,
            status: None, // el repositorio aplica 'pendente'
        };

        self.repository
            .create(new_schedule)
            .await
            .map_err(|e| AppError::database("Error al crear el agendamiento", e))
    }

    pub async fn get_schedule_by_id(&self, id: &str) -> Result<ScheduleRecord, AppError> {
        validation::validate_id(id)?;

        let schedule = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|e| AppError::database("Error al buscar el agendamiento", e))?;

        schedule.ok_or_else(|| AppError::not_found("Agendamiento"))
    }

    pub async fn update_schedule(
        &self,
        id: &str,
        data: UpdateScheduleRequest,
    ) -> Result<ScheduleRecord, AppError> {
        validation::validate_id(id)?;

        let existing = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|e| AppError::database("Error al actualizar el agendamiento", e))?;
        if existing.is_none() {
            return Err(AppError::not_found("Agendamiento"));
        }

        // Update parcial: sólo los campos presentes entran al subconjunto
        let mut update = ScheduleUpdate::default();

        if let Some(recipient) = &data.recipient {
            let trimmed = recipient.trim();
            if trimmed.is_empty() {
                return Err(AppError::validation(
                    "El destinatario no puede estar vacío",
                    "recipient",
                ));
            }
            update.recipient = Some(trimmed.to_string());
        }

        if let Some(message) = &data.message {
            let trimmed = message.trim();
            if trimmed.is_empty() {
                return Err(AppError::validation(
                    "El mensaje no puede estar vacío",
                    "message",
                ));
            }
            update.message = Some(trimmed.to_string());
        }

        if data.channel.is_some() {
            update.channel = Some(validation::validate_channel(data.channel.as_deref())?);
        }

        if data.scheduled_at.is_some() {
            update.scheduled_at =
                validation::validate_scheduled_at(data.scheduled_at.as_deref())?;
        }

        if data.status.is_some() {
            update.status = validation::validate_status(data.status.as_deref())?;
        }

        self.repository
            .update(id, update)
            .await
            .map_err(|e| AppError::database("Error al actualizar el agendamiento", e))
    }

    /// Cancelar es un hard delete tras la guarda de estado: un
    /// agendamiento ya enviado no se puede cancelar.
    pub async fn cancel_schedule(&self, id: &str) -> Result<ScheduleRecord, AppError> {
        validation::validate_id(id)?;

        let existing = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|e| AppError::database("Error al cancelar el agendamiento", e))?
            .ok_or_else(|| AppError::not_found("Agendamiento"))?;

        if existing.status == "enviado" {
            return Err(AppError::validation(
                "No es posible cancelar un agendamiento ya enviado",
                "status",
            ));
        }

        self.repository
            .delete(id)
            .await
            .map_err(|e| AppError::database("Error al cancelar el agendamiento", e))
    }

    pub async fn list_schedules(
        &self,
        filters: ListSchedulesQuery,
    ) -> Result<ListSchedulesResponse, AppError> {
        let status = validation::validate_status(filters.status.as_deref())?;

        let page = filters.page.unwrap_or(1);
        let limit = filters.limit.unwrap_or(10);

        if page < 1 {
            return Err(AppError::validation(
                "La página debe ser mayor que 0",
                "page",
            ));
        }
        if limit < 1 || limit > 100 {
            return Err(AppError::validation(
                "El límite debe estar entre 1 y 100",
                "limit",
            ));
        }

        // page llega sin cota superior desde la query string; el offset
        // se calcula con aritmética chequeada para no desbordar
        let skip = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| AppError::validation("Página fuera de rango", "page"))?;

        let query = ListQuery {
            status: status.clone(),
            skip,
            take: limit,
        };

        // Página y total no dependen entre sí: se piden en paralelo
        let (schedules, total) = tokio::try_join!(
            self.repository.find_many(query),
            self.repository.count(status.as_deref()),
        )
        .map_err(|e| AppError::database("Error al listar los agendamientos", e))?;

        let total_pages = (total + limit - 1) / limit;

        Ok(ListSchedulesResponse {
            total,
            page,
            limit,
            total_pages,
            schedules,
        })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository
            .health_check()
            .await
            .map_err(|e| AppError::database("Error en el health check", e))
    }
}
