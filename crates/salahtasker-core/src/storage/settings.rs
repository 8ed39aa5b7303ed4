//! Saved per-user location defaults.
//!
//! A stored calculation method of zero means "never set"; the merge in the
//! resolver treats it as absent rather than as Shia Ithna-Ashari (id 0).

use rusqlite::{params, OptionalExtension};

use crate::error::StorageError;
use crate::prayer::resolver::{SettingsProvider, UserDefaults};
use crate::storage::Database;

impl Database {
    /// Fetch a user's saved defaults; `None` if they never saved any.
    pub fn user_defaults(&self, owner: &str) -> Result<Option<UserDefaults>, StorageError> {
        let mut stmt = self.conn().prepare(
            "SELECT default_city, default_country, calculation_method
             FROM user_settings WHERE owner = ?1",
        )?;
        let row = stmt
            .query_row(params![owner], |row| {
                Ok(UserDefaults {
                    city: row.get::<_, Option<String>>(0)?,
                    country: row.get::<_, Option<String>>(1)?,
                    method: Some(row.get::<_, i64>(2)? as u16),
                })
            })
            .optional()?;
        Ok(row)
    }

    /// Save (or replace) a user's defaults.
    pub fn set_user_defaults(
        &self,
        owner: &str,
        defaults: &UserDefaults,
    ) -> Result<(), StorageError> {
        self.conn().execute(
            "INSERT OR REPLACE INTO user_settings
                 (owner, default_city, default_country, calculation_method)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                owner,
                defaults.city,
                defaults.country,
                i64::from(defaults.method.unwrap_or(0)),
            ],
        )?;
        Ok(())
    }
}

impl SettingsProvider for Database {
    fn defaults(&self, owner: &str) -> Result<Option<UserDefaults>, StorageError> {
        self.user_defaults(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_user_has_no_defaults() {
        let db = Database::open_memory().unwrap();
        assert!(db.user_defaults("nobody").unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let db = Database::open_memory().unwrap();
        let defaults = UserDefaults {
            city: Some("Cairo".into()),
            country: Some("Egypt".into()),
            method: Some(5),
        };
        db.set_user_defaults("user-1", &defaults).unwrap();
        assert_eq!(db.user_defaults("user-1").unwrap(), Some(defaults));
    }

    #[test]
    fn replacing_defaults_keeps_one_row() {
        let db = Database::open_memory().unwrap();
        db.set_user_defaults(
            "user-1",
            &UserDefaults {
                city: Some("Cairo".into()),
                country: Some("Egypt".into()),
                method: Some(5),
            },
        )
        .unwrap();
        db.set_user_defaults(
            "user-1",
            &UserDefaults {
                city: Some("Dubai".into()),
                country: Some("UAE".into()),
                method: Some(8),
            },
        )
        .unwrap();

        let saved = db.user_defaults("user-1").unwrap().unwrap();
        assert_eq!(saved.city.as_deref(), Some("Dubai"));
        assert_eq!(saved.method, Some(8));
    }

    #[test]
    fn unset_method_is_stored_as_zero() {
        let db = Database::open_memory().unwrap();
        db.set_user_defaults(
            "user-1",
            &UserDefaults {
                city: Some("Cairo".into()),
                country: Some("Egypt".into()),
                method: None,
            },
        )
        .unwrap();
        assert_eq!(db.user_defaults("user-1").unwrap().unwrap().method, Some(0));
    }
}
