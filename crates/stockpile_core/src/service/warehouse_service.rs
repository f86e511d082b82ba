//! Warehouse stock use-cases over electronics and grocery repositories.
//!
//! # Responsibility
//! - Keep one typed repository per warehouse section.
//! - Provide stock adjustments built on `update_quantity`.
//!
//! # Invariants
//! - Stock changes go through repository validation; services never write
//!   quantities directly.

use crate::model::entity::{EntityId, Stocked};
use crate::model::item::{ElectronicItem, GroceryItem, WarehouseItem};
use crate::repo::typed_repo::{EntityRepository, InMemoryRepository, RepoResult, StockRepository};
use chrono::{Days, NaiveDate};
use log::info;

/// Warehouse section an item id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Electronics,
    Groceries,
}

/// Adds `amount` to the stored quantity of `id` and returns the new quantity.
///
/// # Errors
/// - `NotFound` when `id` is absent.
/// - `InvalidValue` when the sum overflows the quantity range.
pub fn increase_stock<T, R>(repo: &mut R, id: EntityId, amount: u32) -> RepoResult<u32>
where
    T: Stocked,
    R: StockRepository<T>,
{
    let current = repo.get_by_id(id)?.quantity();
    let target = i64::from(current) + i64::from(amount);
    let updated = repo.update_quantity(id, target)?;
    Ok(updated.quantity())
}

/// Subtracts `amount` from the stored quantity of `id`.
///
/// # Errors
/// - `InvalidValue` when the result would be negative; stock is unchanged.
/// - `NotFound` when `id` is absent.
pub fn decrease_stock<T, R>(repo: &mut R, id: EntityId, amount: u32) -> RepoResult<u32>
where
    T: Stocked,
    R: StockRepository<T>,
{
    let current = repo.get_by_id(id)?.quantity();
    let target = i64::from(current) - i64::from(amount);
    let updated = repo.update_quantity(id, target)?;
    Ok(updated.quantity())
}

/// Two-section warehouse inventory.
#[derive(Debug, Default)]
pub struct WarehouseService {
    electronics: InMemoryRepository<ElectronicItem>,
    groceries: InMemoryRepository<GroceryItem>,
}

impl WarehouseService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the sample catalogue; grocery expiry dates are relative to `today`.
    ///
    /// Fails with `DuplicateKey` when called on an already seeded warehouse.
    pub fn seed(&mut self, today: NaiveDate) -> RepoResult<()> {
        self.electronics
            .add(ElectronicItem::new(1, "Samsung Galaxy S23", 15, "Samsung", 24))?;
        self.electronics
            .add(ElectronicItem::new(2, "MacBook Pro M3", 8, "Apple", 12))?;
        self.electronics
            .add(ElectronicItem::new(3, "Sony WH-1000XM5", 25, "Sony", 12))?;

        self.groceries
            .add(GroceryItem::new(101, "Organic Milk", 50, days_after(today, 7)))?;
        self.groceries
            .add(GroceryItem::new(102, "Whole Wheat Bread", 30, days_after(today, 5)))?;
        self.groceries
            .add(GroceryItem::new(103, "Free-Range Eggs", 40, days_after(today, 14)))?;

        info!(
            "event=warehouse_seed module=service status=ok electronics={} groceries={}",
            self.electronics.len(),
            self.groceries.len()
        );
        Ok(())
    }

    pub fn electronics(&self) -> &InMemoryRepository<ElectronicItem> {
        &self.electronics
    }

    pub fn electronics_mut(&mut self) -> &mut InMemoryRepository<ElectronicItem> {
        &mut self.electronics
    }

    pub fn groceries(&self) -> &InMemoryRepository<GroceryItem> {
        &self.groceries
    }

    pub fn groceries_mut(&mut self) -> &mut InMemoryRepository<GroceryItem> {
        &mut self.groceries
    }

    /// Increases stock of `id` in `section`; returns the new quantity.
    pub fn increase_stock(&mut self, section: Section, id: EntityId, amount: u32) -> RepoResult<u32> {
        match section {
            Section::Electronics => increase_stock(&mut self.electronics, id, amount),
            Section::Groceries => increase_stock(&mut self.groceries, id, amount),
        }
    }

    /// Removes `id` from `section` and returns the removed item.
    pub fn remove_item(&mut self, section: Section, id: EntityId) -> RepoResult<WarehouseItem> {
        match section {
            Section::Electronics => self.electronics.remove_by_id(id).map(WarehouseItem::from),
            Section::Groceries => self.groceries.remove_by_id(id).map(WarehouseItem::from),
        }
    }

    /// Every item across both sections, electronics first.
    pub fn catalog(&self) -> Vec<WarehouseItem> {
        self.electronics
            .iter()
            .cloned()
            .map(WarehouseItem::from)
            .chain(self.groceries.iter().cloned().map(WarehouseItem::from))
            .collect()
    }

    /// Groceries already expired on `today`.
    pub fn expired_groceries(&self, today: NaiveDate) -> Vec<GroceryItem> {
        self.groceries
            .iter()
            .filter(|item| item.is_expired(today))
            .cloned()
            .collect()
    }
}

fn days_after(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_add_days(Days::new(days)).unwrap_or(today)
}
