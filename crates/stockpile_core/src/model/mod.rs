//! Entity model shared by all repositories.
//!
//! # Responsibility
//! - Define the capability traits (`Entity`, `Stocked`) repositories rely on.
//! - Provide the concrete value records used by the warehouse, inventory
//!   records, healthcare, finance and grading use-cases.
//!
//! # Invariants
//! - Every entity is identified by a caller-assigned integer `EntityId`.
//! - Entities are immutable values; a changed entity is a fresh copy.

pub mod care;
pub mod entity;
pub mod finance;
pub mod item;
pub mod student;
