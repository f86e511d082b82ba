//! Repository layer: typed keyed collections and their snapshot files.
//!
//! # Responsibility
//! - Define the keyed CRUD contracts services depend on.
//! - Keep JSON file details inside the persistence boundary.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`DuplicateKey`, `NotFound`,
//!   `InvalidValue`) distinct from persistence failures.

pub mod snapshot;
pub mod typed_repo;
