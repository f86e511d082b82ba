//! Use-case services built on typed repositories.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep CLI callers decoupled from repository internals.

pub mod care_service;
pub mod finance_service;
pub mod grading_service;
pub mod records_service;
pub mod warehouse_service;
