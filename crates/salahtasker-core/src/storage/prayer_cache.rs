//! Read-through cache for resolved prayer-time snapshots.
//!
//! The store only answers lookups and accepts writes; fetching on a miss
//! is the resolver's job. There is no expiry: prayer times for a fixed
//! date/location/method never change, so a cached row is valid forever.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use crate::error::StorageError;
use crate::prayer::snapshot::{ClockTime, PrayerTimeSnapshot};
use crate::storage::Database;

/// Identifies one cached snapshot. Lookups and writes both use the full
/// tuple; a snapshot resolved for one method or owner is never served to
/// another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub date: NaiveDate,
    pub method: u16,
    /// Owner scope; `None` for shared/anonymous snapshots.
    pub owner: Option<String>,
}

impl CacheKey {
    /// Column value for the owner scope. Anonymous is the empty string so
    /// SQLite's UNIQUE constraint treats all anonymous rows as one key.
    fn owner_column(&self) -> &str {
        self.owner.as_deref().unwrap_or("")
    }
}

/// Durable key -> snapshot lookup.
pub trait CacheStore {
    fn get(&self, key: &CacheKey) -> Result<Option<PrayerTimeSnapshot>, StorageError>;
    fn put(&self, key: &CacheKey, snapshot: &PrayerTimeSnapshot) -> Result<(), StorageError>;
}

impl<C: CacheStore + ?Sized> CacheStore for &C {
    fn get(&self, key: &CacheKey) -> Result<Option<PrayerTimeSnapshot>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &CacheKey, snapshot: &PrayerTimeSnapshot) -> Result<(), StorageError> {
        (**self).put(key, snapshot)
    }
}

fn parse_stored_time(name: &str, raw: &str) -> Result<ClockTime, StorageError> {
    raw.parse()
        .map_err(|e| StorageError::QueryFailed(format!("corrupt cached {name} time: {e}")))
}

impl CacheStore for Database {
    fn get(&self, key: &CacheKey) -> Result<Option<PrayerTimeSnapshot>, StorageError> {
        let mut stmt = self.conn().prepare(
            "SELECT fajr, sunrise, dhuhr, asr, maghrib, isha
             FROM prayer_cache
             WHERE date = ?1 AND method = ?2 AND owner = ?3",
        )?;

        let row: Option<[String; 6]> = stmt
            .query_row(
                params![
                    key.date.format("%Y-%m-%d").to_string(),
                    key.method,
                    key.owner_column(),
                ],
                |row| {
                    Ok([
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ])
                },
            )
            .optional()?;

        let Some([fajr, sunrise, dhuhr, asr, maghrib, isha]) = row else {
            return Ok(None);
        };

        Ok(Some(PrayerTimeSnapshot {
            date: key.date,
            fajr: parse_stored_time("Fajr", &fajr)?,
            sunrise: parse_stored_time("Sunrise", &sunrise)?,
            dhuhr: parse_stored_time("Dhuhr", &dhuhr)?,
            asr: parse_stored_time("Asr", &asr)?,
            maghrib: parse_stored_time("Maghrib", &maghrib)?,
            isha: parse_stored_time("Isha", &isha)?,
        }))
    }

    fn put(&self, key: &CacheKey, snapshot: &PrayerTimeSnapshot) -> Result<(), StorageError> {
        // Upsert: a concurrent duplicate write for the same key just
        // replaces the row with identical immutable data.
        self.conn().execute(
            "INSERT OR REPLACE INTO prayer_cache
                 (date, method, owner, fajr, sunrise, dhuhr, asr, maghrib, isha)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                key.date.format("%Y-%m-%d").to_string(),
                key.method,
                key.owner_column(),
                snapshot.fajr.to_string(),
                snapshot.sunrise.to_string(),
                snapshot.dhuhr.to_string(),
                snapshot.asr.to_string(),
                snapshot.maghrib.to_string(),
                snapshot.isha.to_string(),
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(date: NaiveDate, dhuhr: &str) -> PrayerTimeSnapshot {
        let t = |s: &str| s.parse::<ClockTime>().unwrap();
        PrayerTimeSnapshot {
            date,
            fajr: t("05:00"),
            sunrise: t("06:30"),
            dhuhr: t(dhuhr),
            asr: t("15:30"),
            maghrib: t("18:00"),
            isha: t("19:30"),
        }
    }

    fn key(method: u16, owner: Option<&str>) -> CacheKey {
        CacheKey {
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            method,
            owner: owner.map(str::to_string),
        }
    }

    #[test]
    fn put_then_get_round_trips() {
        let db = Database::open_memory().unwrap();
        let k = key(5, Some("user-1"));
        let snap = snapshot(k.date, "12:00");

        assert!(db.get(&k).unwrap().is_none());
        db.put(&k, &snap).unwrap();
        assert_eq!(db.get(&k).unwrap(), Some(snap));
    }

    #[test]
    fn entries_are_keyed_by_the_full_tuple() {
        let db = Database::open_memory().unwrap();
        let k_method2 = key(2, Some("user-1"));
        let k_method3 = key(3, Some("user-1"));
        let k_other_user = key(2, Some("user-2"));
        let k_anon = key(2, None);

        db.put(&k_method2, &snapshot(k_method2.date, "12:02")).unwrap();
        db.put(&k_method3, &snapshot(k_method3.date, "12:03")).unwrap();

        assert_eq!(
            db.get(&k_method2).unwrap().unwrap().dhuhr.to_string(),
            "12:02"
        );
        assert_eq!(
            db.get(&k_method3).unwrap().unwrap().dhuhr.to_string(),
            "12:03"
        );
        assert!(db.get(&k_other_user).unwrap().is_none());
        assert!(db.get(&k_anon).unwrap().is_none());
    }

    #[test]
    fn duplicate_write_upserts() {
        let db = Database::open_memory().unwrap();
        let k = key(5, None);

        db.put(&k, &snapshot(k.date, "12:00")).unwrap();
        db.put(&k, &snapshot(k.date, "12:01")).unwrap();

        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM prayer_cache", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(db.get(&k).unwrap().unwrap().dhuhr.to_string(), "12:01");
    }
}
