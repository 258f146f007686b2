//! JSON-backed repository shared by all per-user record types
//!
//! Records live in memory behind an `RwLock` and are written back as a
//! single JSON document (`{"records": [...]}`) on save.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{PaydayError, PaydayResult};
use crate::models::{
    Category, CategoryId, Limit, LimitId, Target, TargetId, Transaction, TransactionId, UserId,
};

use super::file_io::{read_json, write_json_atomic};

/// A persisted record owned by a user
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + fmt::Display;

    /// Name used in error messages
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;

    fn user_id(&self) -> &UserId;

    /// Whether a user-typed reference names this record
    fn matches_reference(&self, reference: &str) -> bool;

    /// Ordering key for listings (oldest first)
    fn sort_key(&self) -> chrono::DateTime<chrono::Utc>;
}

impl Record for Transaction {
    type Id = TransactionId;
    const ENTITY: &'static str = "Transaction";

    fn id(&self) -> TransactionId {
        self.id
    }

    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn matches_reference(&self, reference: &str) -> bool {
        self.id.matches_reference(reference)
    }

    fn sort_key(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }
}

impl Record for Category {
    type Id = CategoryId;
    const ENTITY: &'static str = "Category";

    fn id(&self) -> CategoryId {
        self.id
    }

    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn matches_reference(&self, reference: &str) -> bool {
        self.name.eq_ignore_ascii_case(reference.trim()) || self.id.matches_reference(reference)
    }

    fn sort_key(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }
}

impl Record for Limit {
    type Id = LimitId;
    const ENTITY: &'static str = "Limit";

    fn id(&self) -> LimitId {
        self.id
    }

    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn matches_reference(&self, reference: &str) -> bool {
        self.id.matches_reference(reference)
    }

    fn sort_key(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }
}

impl Record for Target {
    type Id = TargetId;
    const ENTITY: &'static str = "Target";

    fn id(&self) -> TargetId {
        self.id
    }

    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn matches_reference(&self, reference: &str) -> bool {
        self.id.matches_reference(reference)
    }

    fn sort_key(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }
}

/// On-disk layout of a repository file
#[derive(Serialize, Deserialize)]
struct RecordFile<R> {
    #[serde(default = "Vec::new")]
    records: Vec<R>,
}

impl<R> Default for RecordFile<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/// Repository for one record type
pub struct JsonRepository<R: Record> {
    path: PathBuf,
    data: RwLock<HashMap<R::Id, R>>,
}

pub type TransactionRepository = JsonRepository<Transaction>;
pub type CategoryRepository = JsonRepository<Category>;
pub type LimitRepository = JsonRepository<Limit>;
pub type TargetRepository = JsonRepository<Target>;

fn lock_error(e: impl fmt::Display) -> PaydayError {
    PaydayError::Storage(format!("Failed to acquire lock: {}", e))
}

impl<R: Record> JsonRepository<R> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Replace in-memory state with the file contents
    pub fn load(&self) -> PaydayResult<()> {
        let file: RecordFile<R> = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for record in file.records {
            data.insert(record.id(), record);
        }

        tracing::debug!(entity = R::ENTITY, count = data.len(), path = %self.path.display(), "loaded records");
        Ok(())
    }

    pub fn save(&self) -> PaydayResult<()> {
        let data = self.data.read().map_err(lock_error)?;

        let mut records: Vec<R> = data.values().cloned().collect();
        records.sort_by_key(|r| r.sort_key());

        write_json_atomic(&self.path, &RecordFile { records })?;
        tracing::debug!(entity = R::ENTITY, count = data.len(), "saved records");
        Ok(())
    }

    pub fn get(&self, id: R::Id) -> PaydayResult<Option<R>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All records owned by `user`, oldest first
    pub fn list_for_user(&self, user: &UserId) -> PaydayResult<Vec<R>> {
        let data = self.data.read().map_err(lock_error)?;
        let mut records: Vec<R> = data
            .values()
            .filter(|r| r.user_id() == user)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.sort_key());
        Ok(records)
    }

    /// Records owned by `user` that satisfy `predicate`, oldest first
    pub fn filter_for_user<F>(&self, user: &UserId, predicate: F) -> PaydayResult<Vec<R>>
    where
        F: Fn(&R) -> bool,
    {
        let data = self.data.read().map_err(lock_error)?;
        let mut records: Vec<R> = data
            .values()
            .filter(|r| r.user_id() == user && predicate(r))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.sort_key());
        Ok(records)
    }

    /// Find a user's record by name or id reference.
    ///
    /// A reference that matches more than one record is rejected instead of
    /// picking one.
    pub fn find_by_reference(&self, user: &UserId, reference: &str) -> PaydayResult<Option<R>> {
        let matches = self.filter_for_user(user, |r| r.matches_reference(reference))?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.into_iter().next()),
            n => Err(PaydayError::Validation(format!(
                "'{}' matches {} {} records; use a longer id",
                reference,
                n,
                R::ENTITY.to_lowercase()
            ))),
        }
    }

    pub fn upsert(&self, record: R) -> PaydayResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(record.id(), record);
        Ok(())
    }

    /// Remove a record, returning whether it existed
    pub fn delete(&self, id: R::Id) -> PaydayResult<bool> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id).is_some())
    }

    pub fn count(&self) -> PaydayResult<usize> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn category(user: &str, name: &str) -> Category {
        Category::new(UserId::from(user), name, TransactionKind::Expense)
    }

    #[test]
    fn test_upsert_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        let repo = CategoryRepository::new(path.clone());

        let food = category("alice", "Food");
        repo.upsert(food.clone()).unwrap();
        repo.upsert(category("bob", "Rent")).unwrap();
        repo.save().unwrap();

        let reloaded = CategoryRepository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 2);
        assert_eq!(reloaded.get(food.id).unwrap(), Some(food));
    }

    #[test]
    fn test_records_are_scoped_per_user() {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo.upsert(category("alice", "Food")).unwrap();
        repo.upsert(category("bob", "Food")).unwrap();

        let alice = repo.list_for_user(&UserId::from("alice")).unwrap();
        assert_eq!(alice.len(), 1);
        assert!(repo
            .find_by_reference(&UserId::from("alice"), "food")
            .unwrap()
            .is_some());
        assert!(repo
            .find_by_reference(&UserId::from("carol"), "food")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_find_by_id_prefix_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        let txn = Transaction::new(
            UserId::default(),
            CategoryId::new(),
            TransactionKind::Income,
            Money::from_cents(100),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        repo.upsert(txn.clone()).unwrap();

        let found = repo
            .find_by_reference(&UserId::default(), &txn.id.to_string())
            .unwrap();
        assert_eq!(found, Some(txn.clone()));

        assert!(repo.delete(txn.id).unwrap());
        assert!(!repo.delete(txn.id).unwrap());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = LimitRepository::new(temp_dir.path().join("limits.json"));
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }
}
