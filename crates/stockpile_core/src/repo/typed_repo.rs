//! Typed entity repository contracts and the in-memory implementation.
//!
//! # Responsibility
//! - Own a unique-keyed collection of one entity type.
//! - Enforce identity (duplicate/not-found) and quantity invariants.
//! - Persist and restore the whole collection through JSON snapshots.
//!
//! # Invariants
//! - At most one entity per id; `add` never overwrites.
//! - Every operation fully succeeds or leaves the collection untouched,
//!   except `load_from_file`, whose failure state is "empty".
//! - Returned entities are clones and never alias storage.
//! - Iteration order is insertion order.

use crate::model::entity::{Entity, EntityId, Stocked};
use crate::repo::snapshot::{read_snapshot, write_snapshot, PersistenceError};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error kinds callers can branch on.
#[derive(Debug)]
pub enum RepoError {
    /// `add` with an id that is already stored.
    DuplicateKey { kind: &'static str, id: EntityId },
    /// Lookup, update or removal of an id that is not stored.
    NotFound { kind: &'static str, id: EntityId },
    /// A field value violates its constraint (e.g. negative quantity).
    InvalidValue {
        field: &'static str,
        value: i64,
        reason: &'static str,
    },
    /// Snapshot file could not be written or read.
    Persistence(PersistenceError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey { kind, id } => write!(f, "{kind} with id {id} already exists"),
            Self::NotFound { kind, id } => write!(f, "{kind} with id {id} not found"),
            Self::InvalidValue {
                field,
                value,
                reason,
            } => write!(f, "invalid {field} {value}: {reason}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersistenceError> for RepoError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Keyed CRUD contract over one entity type.
pub trait EntityRepository<T: Entity> {
    /// Stores `entity`; fails with `DuplicateKey` when its id is taken.
    fn add(&mut self, entity: T) -> RepoResult<EntityId>;
    /// Returns a copy of the entity stored under `id`.
    fn get_by_id(&self, id: EntityId) -> RepoResult<T>;
    /// Removes and returns the entity stored under `id`.
    fn remove_by_id(&mut self, id: EntityId) -> RepoResult<T>;
    /// Snapshot copy of every stored entity.
    fn get_all(&self) -> Vec<T>;
}

/// Quantity updates for repositories of `Stocked` entities.
pub trait StockRepository<T: Stocked>: EntityRepository<T> {
    /// Replaces the stored entity with a copy carrying `new_quantity`.
    ///
    /// # Errors
    /// - `InvalidValue` when `new_quantity` is negative or exceeds `u32`;
    ///   checked before the id lookup.
    /// - `NotFound` when `id` is absent.
    fn update_quantity(&mut self, id: EntityId, new_quantity: i64) -> RepoResult<T>;
}

/// In-memory repository keeping insertion order for listings.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T: Entity> {
    entries: HashMap<EntityId, T>,
    order: Vec<EntityId>,
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Borrowing iterator in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// First entity (in insertion order) matching `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|entity| predicate(entity)).cloned()
    }

    /// Removes the first entity matching `predicate`, if any.
    pub fn remove_where<P>(&mut self, mut predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let id = self.iter().find(|entity| predicate(entity))?.id();
        self.take(id)
    }

    /// Groups a snapshot of the collection by `key`.
    ///
    /// Each group keeps insertion order; groups are ordered by key.
    pub fn group_by<K, F>(&self, mut key: F) -> BTreeMap<K, Vec<T>>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
        for entity in self.iter() {
            groups.entry(key(entity)).or_default().push(entity.clone());
        }
        groups
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn take(&mut self, id: EntityId) -> Option<T> {
        let removed = self.entries.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        Some(removed)
    }

    fn not_found(&self, operation: &str, id: EntityId) -> RepoError {
        warn!(
            "event=repo_{operation} module=repo status=rejected kind={} id={id} error_code=not_found",
            T::KIND
        );
        RepoError::NotFound { kind: T::KIND, id }
    }
}

impl<T: Entity + Serialize> InMemoryRepository<T> {
    /// Writes the whole collection to `path`, replacing any existing file.
    ///
    /// Returns the number of entities written. The in-memory collection is
    /// never modified.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> RepoResult<usize> {
        let entities = self.get_all();
        write_snapshot(path.as_ref(), &entities)?;
        Ok(entities.len())
    }
}

impl<T: Entity + DeserializeOwned> InMemoryRepository<T> {
    /// Replaces the collection with the snapshot stored at `path`.
    ///
    /// A missing or blank file leaves the repository empty and is not an
    /// error. A file whose whole document is the JSON literal `null` is read
    /// as an empty collection, also without error. Returns the number of
    /// entities loaded.
    ///
    /// # Errors
    /// - `Persistence` when the file cannot be read, does not parse, or
    ///   repeats an id. The repository is empty afterwards.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> RepoResult<usize> {
        let path = path.as_ref();
        self.clear();

        let Some(entities) = read_snapshot::<T>(path)? else {
            debug!(
                "event=repo_load module=repo status=empty kind={}",
                T::KIND
            );
            return Ok(0);
        };

        let mut restored = Self::new();
        for entity in entities {
            let id = entity.id();
            if restored.entries.insert(id, entity).is_some() {
                return Err(PersistenceError::DuplicateKey {
                    path: path.to_path_buf(),
                    id,
                }
                .into());
            }
            restored.order.push(id);
        }

        *self = restored;
        debug!(
            "event=repo_load module=repo status=ok kind={} count={}",
            T::KIND,
            self.len()
        );
        Ok(self.len())
    }
}

impl<T: Entity> EntityRepository<T> for InMemoryRepository<T> {
    fn add(&mut self, entity: T) -> RepoResult<EntityId> {
        let id = entity.id();
        if self.entries.contains_key(&id) {
            warn!(
                "event=repo_add module=repo status=rejected kind={} id={id} error_code=duplicate_key",
                T::KIND
            );
            return Err(RepoError::DuplicateKey { kind: T::KIND, id });
        }

        self.entries.insert(id, entity);
        self.order.push(id);
        debug!("event=repo_add module=repo status=ok kind={} id={id}", T::KIND);
        Ok(id)
    }

    fn get_by_id(&self, id: EntityId) -> RepoResult<T> {
        match self.entries.get(&id) {
            Some(entity) => Ok(entity.clone()),
            None => Err(self.not_found("get", id)),
        }
    }

    fn remove_by_id(&mut self, id: EntityId) -> RepoResult<T> {
        match self.take(id) {
            Some(entity) => {
                debug!(
                    "event=repo_remove module=repo status=ok kind={} id={id}",
                    T::KIND
                );
                Ok(entity)
            }
            None => Err(self.not_found("remove", id)),
        }
    }

    fn get_all(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Stocked> StockRepository<T> for InMemoryRepository<T> {
    fn update_quantity(&mut self, id: EntityId, new_quantity: i64) -> RepoResult<T> {
        let quantity = validate_quantity(new_quantity)?;

        let Some(current) = self.entries.get(&id) else {
            return Err(self.not_found("update_quantity", id));
        };

        let updated = current.with_quantity(quantity);
        self.entries.insert(id, updated.clone());
        debug!(
            "event=repo_update_quantity module=repo status=ok kind={} id={id} quantity={quantity}",
            T::KIND
        );
        Ok(updated)
    }
}

fn validate_quantity(value: i64) -> RepoResult<u32> {
    if value < 0 {
        warn!(
            "event=repo_update_quantity module=repo status=rejected value={value} error_code=negative_quantity"
        );
        return Err(RepoError::InvalidValue {
            field: "quantity",
            value,
            reason: "quantity cannot be negative",
        });
    }
    u32::try_from(value).map_err(|_| RepoError::InvalidValue {
        field: "quantity",
        value,
        reason: "quantity exceeds the supported maximum",
    })
}

#[cfg(test)]
mod tests {
    use super::{validate_quantity, RepoError};

    #[test]
    fn validate_quantity_accepts_zero_and_max() {
        assert_eq!(validate_quantity(0).unwrap(), 0);
        assert_eq!(validate_quantity(i64::from(u32::MAX)).unwrap(), u32::MAX);
    }

    #[test]
    fn validate_quantity_rejects_negative_and_overflow() {
        let negative = validate_quantity(-1).unwrap_err();
        assert!(matches!(
            negative,
            RepoError::InvalidValue { value: -1, .. }
        ));
        assert_eq!(
            negative.to_string(),
            "invalid quantity -1: quantity cannot be negative"
        );

        let overflow = validate_quantity(i64::from(u32::MAX) + 1).unwrap_err();
        assert!(matches!(overflow, RepoError::InvalidValue { .. }));
    }
}
