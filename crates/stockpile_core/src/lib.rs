//! Typed in-memory entity repositories with JSON snapshot persistence.
//! This crate owns every repository invariant; the CLI only prints.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, DemoConfig, LogLevel};
pub use logging::{init_logging, logging_status};
pub use model::care::{Patient, Prescription};
pub use model::entity::{Entity, EntityId, Stocked};
pub use model::finance::{Cents, PaymentChannel, Transaction};
pub use model::item::{ElectronicItem, GroceryItem, InventoryItem, WarehouseItem};
pub use model::student::{Grade, Student};
pub use repo::snapshot::PersistenceError;
pub use repo::typed_repo::{
    EntityRepository, InMemoryRepository, RepoError, RepoResult, StockRepository,
};
pub use service::care_service::CareService;
pub use service::finance_service::{
    Account, AccountKind, FinanceError, FinanceResult, FinanceService, FinanceSummary, Receipt,
};
pub use service::grading_service::{GradeError, GradeResult};
pub use service::records_service::InventoryRecordsService;
pub use service::warehouse_service::{Section, WarehouseService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
