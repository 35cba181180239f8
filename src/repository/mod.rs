//! repository/mod.rs
//! Acceso a datos: contrato del repositorio y su implementación SQLite.

pub mod schedule_repository;
