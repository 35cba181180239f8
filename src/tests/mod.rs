//! tests/mod.rs

mod schedule_handler_tests;
