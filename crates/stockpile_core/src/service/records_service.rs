//! Inventory records session bound to one snapshot file.
//!
//! # Responsibility
//! - Keep an `InventoryItem` log in memory.
//! - Save it to, and restore it from, the configured snapshot path.
//! - Simulate session restarts by discarding in-memory state.

use crate::model::entity::EntityId;
use crate::model::item::InventoryItem;
use crate::repo::typed_repo::{EntityRepository, InMemoryRepository, RepoResult};
use chrono::{DateTime, Duration, Utc};
use log::info;
use std::path::{Path, PathBuf};

pub struct InventoryRecordsService {
    path: PathBuf,
    log: InMemoryRepository<InventoryItem>,
}

impl InventoryRecordsService {
    /// Creates an empty session persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            log: InMemoryRepository::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add(&mut self, item: InventoryItem) -> RepoResult<EntityId> {
        self.log.add(item)
    }

    /// Seeds five sample records added over the days before `now`.
    pub fn seed(&mut self, now: DateTime<Utc>) -> RepoResult<()> {
        let samples = [
            (1, "Wireless Headphones", 25, 10),
            (2, "Gaming Keyboard", 15, 8),
            (3, "USB-C Cable", 100, 5),
            (4, "Bluetooth Mouse", 30, 3),
            (5, "Tablet Stand", 20, 1),
        ];
        for (id, name, quantity, days_ago) in samples {
            self.log
                .add(InventoryItem::new(id, name, quantity, now - Duration::days(days_ago)))?;
        }
        Ok(())
    }

    /// Writes the current log to the snapshot path.
    pub fn save(&self) -> RepoResult<usize> {
        self.log.save_to_file(&self.path)
    }

    /// Replaces the in-memory log with the snapshot contents.
    pub fn load(&mut self) -> RepoResult<usize> {
        self.log.load_from_file(&self.path)
    }

    /// Drops all in-memory records, keeping the snapshot path.
    pub fn new_session(&mut self) {
        self.log = InMemoryRepository::new();
        info!("event=records_new_session module=service status=ok");
    }

    pub fn items(&self) -> Vec<InventoryItem> {
        self.log.get_all()
    }
}
