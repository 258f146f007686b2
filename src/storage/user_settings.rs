//! Per-user settings repository
//!
//! Stores the payday day-of-month for each user in `user_settings.json`.
//! The stored value is kept raw so a hand-edited or corrupt entry can be
//! detected and replaced by the default at read time.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PaydayError, PaydayResult};
use crate::models::UserId;

use super::file_io::{read_json, write_json_atomic};

/// Settings row for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Raw payday day-of-month as stored; validated by the settings service
    #[serde(default)]
    pub payday_date: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserSettingsFile {
    #[serde(default)]
    users: HashMap<UserId, UserSettings>,
}

pub struct UserSettingsRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, UserSettings>>,
}

fn lock_error(e: impl std::fmt::Display) -> PaydayError {
    PaydayError::Storage(format!("Failed to acquire lock: {}", e))
}

impl UserSettingsRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> PaydayResult<()> {
        let file: UserSettingsFile = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;
        *data = file.users;
        Ok(())
    }

    pub fn save(&self) -> PaydayResult<()> {
        let data = self.data.read().map_err(lock_error)?;
        let file = UserSettingsFile {
            users: data.clone(),
        };
        write_json_atomic(&self.path, &file)
    }

    pub fn get(&self, user: &UserId) -> PaydayResult<Option<UserSettings>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(user).cloned())
    }

    /// Create or update the stored payday for `user`
    pub fn set_payday_date(&self, user: &UserId, day: u32) -> PaydayResult<UserSettings> {
        let mut data = self.data.write().map_err(lock_error)?;
        let now = Utc::now();

        let entry = data.entry(user.clone()).or_insert_with(|| UserSettings {
            payday_date: None,
            created_at: now,
            updated_at: now,
        });
        entry.payday_date = Some(i64::from(day));
        entry.updated_at = now;

        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("user_settings.json");
        let repo = UserSettingsRepository::new(path.clone());
        let user = UserId::from("alice");

        assert!(repo.get(&user).unwrap().is_none());
        let first = repo.set_payday_date(&user, 25).unwrap();
        let second = repo.set_payday_date(&user, 10).unwrap();
        assert_eq!(second.created_at, first.created_at);
        repo.save().unwrap();

        let reloaded = UserSettingsRepository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(&user).unwrap().unwrap().payday_date, Some(10));
    }

    #[test]
    fn test_out_of_range_value_survives_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("user_settings.json");
        std::fs::write(
            &path,
            r#"{"users": {"alice": {"payday_date": 45, "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"}}}"#,
        )
        .unwrap();

        let repo = UserSettingsRepository::new(path);
        repo.load().unwrap();
        assert_eq!(
            repo.get(&UserId::from("alice")).unwrap().unwrap().payday_date,
            Some(45)
        );
    }
}
