//! services/mod.rs
//! Módulo que agrupa las capas de negocio de la app.

pub mod schedule_service;
