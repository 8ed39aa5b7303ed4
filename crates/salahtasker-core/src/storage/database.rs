//! SQLite connection and schema.
//!
//! One database file holds three tables:
//! - `prayer_cache` -- resolved prayer-time snapshots keyed by the full
//!   `(date, method, owner)` tuple
//! - `tasks` -- planning items bucketed into salah slots
//! - `user_settings` -- saved default city/country/method per owner

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use super::data_dir;
use crate::error::StorageError;

/// SQLite database for the planner.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/salahtasker/salahtasker.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("salahtasker.db");
        Self::open_at(&path)
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        // Anonymous snapshots store owner as '' rather than NULL so the
        // UNIQUE constraint actually deduplicates them.
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS prayer_cache (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                date     TEXT NOT NULL,
                method   INTEGER NOT NULL,
                owner    TEXT NOT NULL DEFAULT '',
                fajr     TEXT NOT NULL,
                sunrise  TEXT NOT NULL,
                dhuhr    TEXT NOT NULL,
                asr      TEXT NOT NULL,
                maghrib  TEXT NOT NULL,
                isha     TEXT NOT NULL,
                UNIQUE(date, method, owner)
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id           TEXT PRIMARY KEY,
                owner        TEXT NOT NULL,
                title        TEXT NOT NULL,
                description  TEXT,
                slot         INTEGER NOT NULL,
                task_date    TEXT NOT NULL,
                is_completed INTEGER NOT NULL DEFAULT 0,
                created_at   TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_owner_date ON tasks(owner, task_date);

            CREATE TABLE IF NOT EXISTS user_settings (
                owner               TEXT PRIMARY KEY,
                default_city        TEXT,
                default_country     TEXT,
                calculation_method  INTEGER NOT NULL DEFAULT 0
            );",
        )?;
        Ok(())
    }
}
