//! handlers/mod.rs
pub mod health_handler;
pub mod schedule_handler;
