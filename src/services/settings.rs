//! Payday settings service
//!
//! Reads and writes each user's payday anchor. A missing or corrupt stored
//! value reads back as the default anchor (the 1st); invalid new values are
//! rejected before anything is persisted.

use crate::error::PaydayResult;
use crate::models::{PaydayAnchor, UserId};
use crate::services::period::PeriodCalculator;
use crate::storage::Storage;

pub struct PaydaySettingsService<'a> {
    storage: &'a Storage,
}

impl<'a> PaydaySettingsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The user's payday anchor, falling back to the default
    pub fn get_anchor(&self, user: &UserId) -> PaydayResult<PaydayAnchor> {
        let stored = match self.storage.user_settings.get(user)? {
            Some(settings) => settings.payday_date,
            None => None,
        };

        let Some(raw) = stored else {
            return Ok(PaydayAnchor::default());
        };

        match u32::try_from(raw).ok().map(PaydayAnchor::new) {
            Some(Ok(anchor)) => Ok(anchor),
            _ => {
                tracing::warn!(
                    user = %user,
                    stored = raw,
                    "stored payday date is invalid; using the default"
                );
                Ok(PaydayAnchor::default())
            }
        }
    }

    /// Validate and persist a new payday anchor
    pub fn set_anchor(&self, user: &UserId, day: u32) -> PaydayResult<PaydayAnchor> {
        let anchor = PaydayAnchor::new(day)?;
        self.storage.user_settings.set_payday_date(user, anchor.day())?;
        self.storage.user_settings.save()?;

        tracing::info!(user = %user, payday = anchor.day(), "payday date updated");
        Ok(anchor)
    }

    /// Calculator bound to the user's anchor
    pub fn calculator_for(&self, user: &UserId) -> PaydayResult<PeriodCalculator> {
        Ok(PeriodCalculator::new(self.get_anchor(user)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PaydayPaths;
    use tempfile::TempDir;

    fn storage(temp_dir: &TempDir) -> Storage {
        let paths = PaydayPaths::with_base_dir(temp_dir.path().to_path_buf());
        Storage::new(paths).unwrap()
    }

    #[test]
    fn test_missing_anchor_defaults_to_first() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        let service = PaydaySettingsService::new(&storage);

        assert_eq!(service.get_anchor(&UserId::from("nobody")).unwrap().day(), 1);
    }

    #[test]
    fn test_set_and_get_anchor() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        let service = PaydaySettingsService::new(&storage);
        let user = UserId::from("alice");

        service.set_anchor(&user, 25).unwrap();
        assert_eq!(service.get_anchor(&user).unwrap().day(), 25);
        assert_eq!(service.calculator_for(&user).unwrap().anchor().day(), 25);
        assert!(storage.paths().user_settings_file().exists());
    }

    #[test]
    fn test_set_rejects_out_of_range_without_persisting() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        let service = PaydaySettingsService::new(&storage);
        let user = UserId::from("alice");

        service.set_anchor(&user, 10).unwrap();
        assert!(service.set_anchor(&user, 0).unwrap_err().is_invalid_argument());
        assert!(service.set_anchor(&user, 32).unwrap_err().is_invalid_argument());
        assert_eq!(service.get_anchor(&user).unwrap().day(), 10);
    }

    #[test]
    fn test_corrupt_stored_anchor_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PaydayPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(
            paths.user_settings_file(),
            r#"{"users": {
                "alice": {"payday_date": 0, "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"},
                "bob": {"payday_date": -4, "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"},
                "carol": {"created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"}
            }}"#,
        )
        .unwrap();

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let service = PaydaySettingsService::new(&storage);

        for user in ["alice", "bob", "carol"] {
            assert_eq!(service.get_anchor(&UserId::from(user)).unwrap().day(), 1);
        }
    }
}
