//! Stock-bearing records: inventory log entries and warehouse items.
//!
//! # Invariants
//! - Snapshot field names are camelCase (`dateAdded`, `warrantyMonths`).
//! - Unknown fields are rejected when reading snapshots.

use crate::model::entity::{Entity, EntityId, Stocked};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Immutable inventory log record persisted to snapshot files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InventoryItem {
    pub id: EntityId,
    pub name: String,
    pub quantity: u32,
    /// Serialized as RFC 3339.
    pub date_added: DateTime<Utc>,
}

impl InventoryItem {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        quantity: u32,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            date_added,
        }
    }

    /// Returns a renamed copy, leaving `self` untouched.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl Entity for InventoryItem {
    const KIND: &'static str = "inventory_item";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Stocked for InventoryItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

impl Display for InventoryItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InventoryItem {{ Id = {}, Name = {}, Quantity = {}, DateAdded = {} }}",
            self.id,
            self.name,
            self.quantity,
            self.date_added.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Electronics stocked by the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ElectronicItem {
    pub id: EntityId,
    pub name: String,
    pub quantity: u32,
    pub brand: String,
    pub warranty_months: u32,
}

impl ElectronicItem {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        quantity: u32,
        brand: impl Into<String>,
        warranty_months: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            brand: brand.into(),
            warranty_months,
        }
    }
}

impl Entity for ElectronicItem {
    const KIND: &'static str = "electronic_item";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Stocked for ElectronicItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

impl Display for ElectronicItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Electronic - ID: {}, Name: {}, Quantity: {}, Brand: {}, Warranty: {} months",
            self.id, self.name, self.quantity, self.brand, self.warranty_months
        )
    }
}

/// Perishable groceries stocked by the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GroceryItem {
    pub id: EntityId,
    pub name: String,
    pub quantity: u32,
    pub expiry_date: NaiveDate,
}

impl GroceryItem {
    pub fn new(id: EntityId, name: impl Into<String>, quantity: u32, expiry_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            expiry_date,
        }
    }

    /// Whether the item is past its expiry date on `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }
}

impl Entity for GroceryItem {
    const KIND: &'static str = "grocery_item";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Stocked for GroceryItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

impl Display for GroceryItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grocery - ID: {}, Name: {}, Quantity: {}, Expires: {}",
            self.id,
            self.name,
            self.quantity,
            self.expiry_date.format("%Y-%m-%d")
        )
    }
}

/// Closed set of warehouse item variants.
///
/// Lets mixed electronics/groceries share one listing or one repository while
/// keeping variant-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarehouseItem {
    Electronic(ElectronicItem),
    Grocery(GroceryItem),
}

impl Entity for WarehouseItem {
    const KIND: &'static str = "warehouse_item";

    fn id(&self) -> EntityId {
        match self {
            Self::Electronic(item) => item.id,
            Self::Grocery(item) => item.id,
        }
    }
}

impl Stocked for WarehouseItem {
    fn name(&self) -> &str {
        match self {
            Self::Electronic(item) => &item.name,
            Self::Grocery(item) => &item.name,
        }
    }

    fn quantity(&self) -> u32 {
        match self {
            Self::Electronic(item) => item.quantity,
            Self::Grocery(item) => item.quantity,
        }
    }

    fn with_quantity(&self, quantity: u32) -> Self {
        match self {
            Self::Electronic(item) => Self::Electronic(item.with_quantity(quantity)),
            Self::Grocery(item) => Self::Grocery(item.with_quantity(quantity)),
        }
    }
}

impl Display for WarehouseItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Electronic(item) => item.fmt(f),
            Self::Grocery(item) => item.fmt(f),
        }
    }
}

impl From<ElectronicItem> for WarehouseItem {
    fn from(value: ElectronicItem) -> Self {
        Self::Electronic(value)
    }
}

impl From<GroceryItem> for WarehouseItem {
    fn from(value: GroceryItem) -> Self {
        Self::Grocery(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ElectronicItem, GroceryItem, InventoryItem, WarehouseItem};
    use crate::model::entity::{Entity, Stocked};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn with_quantity_keeps_identity_and_leaves_original_unchanged() {
        let added = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let original = InventoryItem::new(999, "Test Item", 10, added);

        let modified = original.with_quantity(20).with_name("Modified Test Item");

        assert_eq!(original.quantity, 10);
        assert_eq!(original.name, "Test Item");
        assert_eq!(modified.id, 999);
        assert_eq!(modified.quantity, 20);
        assert_eq!(modified.date_added, added);
        assert_ne!(original, modified);
    }

    #[test]
    fn warehouse_item_dispatches_to_variant_fields() {
        let phone: WarehouseItem = ElectronicItem::new(1, "Phone", 15, "Samsung", 24).into();
        let milk: WarehouseItem =
            GroceryItem::new(101, "Milk", 50, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()).into();

        assert_eq!(phone.id(), 1);
        assert_eq!(milk.name(), "Milk");
        assert_eq!(milk.with_quantity(3).quantity(), 3);
        assert!(matches!(phone.with_quantity(0), WarehouseItem::Electronic(_)));
    }

    #[test]
    fn inventory_item_serializes_camel_case_fields() {
        let added = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let item = InventoryItem::new(1, "Cable", 100, added);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["dateAdded"], "2024-03-01T09:30:00Z");
        assert!(json.get("date_added").is_none());
    }

    #[test]
    fn grocery_expiry_is_strictly_after_date() {
        let expiry = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let bread = GroceryItem::new(102, "Bread", 30, expiry);

        assert!(!bread.is_expired(expiry));
        assert!(bread.is_expired(expiry.succ_opt().unwrap()));
    }
}
