//! SQLite-based task storage.
//!
//! Plain per-owner CRUD: no caching, no temporal logic. Every lookup is
//! scoped to the owning user; a task id from another account behaves like
//! a missing row.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use crate::error::StorageError;
use crate::storage::Database;
use crate::task::{SalahPeriod, Task};

/// Fields for creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub slot: SalahPeriod,
    pub task_date: NaiveDate,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub slot: Option<SalahPeriod>,
    pub is_completed: Option<bool>,
}

impl TaskUpdate {
    /// Update that changes the slot and nothing else -- the drag-and-drop
    /// reassignment shape.
    pub fn slot_only(slot: SalahPeriod) -> Self {
        Self {
            slot: Some(slot),
            ..Self::default()
        }
    }
}

fn parse_slot(id: i64) -> Result<SalahPeriod, StorageError> {
    u8::try_from(id)
        .ok()
        .and_then(SalahPeriod::from_id)
        .ok_or_else(|| StorageError::QueryFailed(format!("corrupt task slot {id}")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| StorageError::QueryFailed(format!("corrupt task date {raw:?}: {e}")))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::QueryFailed(format!("corrupt task timestamp {raw:?}: {e}")))
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<(String, String, String, Option<String>, i64, String, bool, String)> {
    Ok((
        row.get(0)?, // id
        row.get(1)?, // owner
        row.get(2)?, // title
        row.get(3)?, // description
        row.get(4)?, // slot
        row.get(5)?, // task_date
        row.get(6)?, // is_completed
        row.get(7)?, // created_at
    ))
}

fn build_task(
    raw: (String, String, String, Option<String>, i64, String, bool, String),
) -> Result<Task, StorageError> {
    let (id, owner, title, description, slot, task_date, is_completed, created_at) = raw;
    Ok(Task {
        id: Uuid::parse_str(&id)
            .map_err(|e| StorageError::QueryFailed(format!("corrupt task id {id:?}: {e}")))?,
        owner,
        title,
        description,
        slot: parse_slot(slot)?,
        task_date: parse_date(&task_date)?,
        is_completed,
        created_at: parse_timestamp(&created_at)?,
    })
}

const TASK_COLUMNS: &str =
    "id, owner, title, description, slot, task_date, is_completed, created_at";

impl Database {
    /// Insert a new task for `owner` and return it.
    pub fn create_task(&self, owner: &str, new: NewTask) -> Result<Task, StorageError> {
        let task = Task::new(owner, new.title, new.description, new.slot, new.task_date);
        self.conn().execute(
            "INSERT INTO tasks (id, owner, title, description, slot, task_date, is_completed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                task.id.to_string(),
                task.owner,
                task.title,
                task.description,
                i64::from(task.slot.id()),
                task.task_date.format("%Y-%m-%d").to_string(),
                task.is_completed,
                task.created_at.to_rfc3339(),
            ],
        )?;
        Ok(task)
    }

    /// Fetch one task by id, scoped to its owner.
    pub fn task(&self, id: Uuid, owner: &str) -> Result<Option<Task>, StorageError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND owner = ?2"
        ))?;
        let raw = stmt
            .query_row(params![id.to_string(), owner], task_from_row)
            .optional()?;
        raw.map(build_task).transpose()
    }

    /// All of an owner's tasks for one date, in slot order then creation
    /// order.
    pub fn tasks_by_date(&self, date: NaiveDate, owner: &str) -> Result<Vec<Task>, StorageError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE owner = ?1 AND task_date = ?2
             ORDER BY slot, created_at"
        ))?;
        let rows = stmt.query_map(
            params![owner, date.format("%Y-%m-%d").to_string()],
            task_from_row,
        )?;

        let mut tasks = Vec::new();
        for raw in rows {
            tasks.push(build_task(raw?)?);
        }
        Ok(tasks)
    }

    /// Apply a partial update and return the updated task.
    ///
    /// `None` fields keep their stored values, so a slot-only update
    /// leaves title, description, completion, and date untouched.
    pub fn update_task(
        &self,
        id: Uuid,
        owner: &str,
        update: TaskUpdate,
    ) -> Result<Task, StorageError> {
        let mut task = self.task(id, owner)?.ok_or(StorageError::NotFound)?;

        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(description) = update.description {
            task.description = Some(description);
        }
        if let Some(slot) = update.slot {
            task.slot = slot;
        }
        if let Some(is_completed) = update.is_completed {
            task.is_completed = is_completed;
        }

        self.conn().execute(
            "UPDATE tasks SET title = ?1, description = ?2, slot = ?3, is_completed = ?4
             WHERE id = ?5 AND owner = ?6",
            params![
                task.title,
                task.description,
                i64::from(task.slot.id()),
                task.is_completed,
                id.to_string(),
                owner,
            ],
        )?;
        Ok(task)
    }

    /// Flip a task's completion flag and return the updated task.
    pub fn toggle_task_complete(&self, id: Uuid, owner: &str) -> Result<Task, StorageError> {
        let task = self.task(id, owner)?.ok_or(StorageError::NotFound)?;
        self.update_task(
            id,
            owner,
            TaskUpdate {
                is_completed: Some(!task.is_completed),
                ..TaskUpdate::default()
            },
        )
    }

    /// Delete a task; `NotFound` if no row matched the id/owner pair.
    pub fn delete_task(&self, id: Uuid, owner: &str) -> Result<(), StorageError> {
        let changed = self.conn().execute(
            "DELETE FROM tasks WHERE id = ?1 AND owner = ?2",
            params![id.to_string(), owner],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn new_task(title: &str, slot: SalahPeriod) -> NewTask {
        NewTask {
            title: title.into(),
            description: Some("details".into()),
            slot,
            task_date: date(),
        }
    }

    #[test]
    fn create_and_fetch() {
        let db = Database::open_memory().unwrap();
        let created = db
            .create_task("user-1", new_task("Read", SalahPeriod::FajrToShurooq))
            .unwrap();
        let fetched = db.task(created.id, "user-1").unwrap().unwrap();
        assert_eq!(created, fetched);
    }

    #[test]
    fn tasks_are_owner_scoped() {
        let db = Database::open_memory().unwrap();
        let created = db
            .create_task("user-1", new_task("Read", SalahPeriod::FajrToShurooq))
            .unwrap();
        assert!(db.task(created.id, "user-2").unwrap().is_none());
        assert!(matches!(
            db.delete_task(created.id, "user-2").unwrap_err(),
            StorageError::NotFound
        ));
    }

    #[test]
    fn list_by_date_is_slot_ordered() {
        let db = Database::open_memory().unwrap();
        db.create_task("user-1", new_task("Evening", SalahPeriod::MaghribToIsha))
            .unwrap();
        db.create_task("user-1", new_task("Morning", SalahPeriod::FajrToShurooq))
            .unwrap();
        db.create_task("user-1", new_task("Noon", SalahPeriod::DhuhrToAsr))
            .unwrap();
        // A different date and a different owner stay out of the listing.
        db.create_task(
            "user-1",
            NewTask {
                task_date: date().succ_opt().unwrap(),
                ..new_task("Tomorrow", SalahPeriod::BeforeFajr)
            },
        )
        .unwrap();
        db.create_task("user-2", new_task("Other", SalahPeriod::BeforeFajr))
            .unwrap();

        let titles: Vec<String> = db
            .tasks_by_date(date(), "user-1")
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["Morning", "Noon", "Evening"]);
    }

    #[test]
    fn slot_only_update_touches_nothing_else() {
        let db = Database::open_memory().unwrap();
        let created = db
            .create_task("user-1", new_task("Read", SalahPeriod::FajrToShurooq))
            .unwrap();

        let updated = db
            .update_task(
                created.id,
                "user-1",
                TaskUpdate::slot_only(SalahPeriod::AsrToMaghrib),
            )
            .unwrap();

        assert_eq!(updated.slot, SalahPeriod::AsrToMaghrib);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.is_completed, created.is_completed);
        assert_eq!(updated.task_date, created.task_date);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn toggle_flips_completion() {
        let db = Database::open_memory().unwrap();
        let created = db
            .create_task("user-1", new_task("Read", SalahPeriod::FajrToShurooq))
            .unwrap();
        assert!(!created.is_completed);

        let toggled = db.toggle_task_complete(created.id, "user-1").unwrap();
        assert!(toggled.is_completed);
        let toggled_back = db.toggle_task_complete(created.id, "user-1").unwrap();
        assert!(!toggled_back.is_completed);
    }

    #[test]
    fn update_missing_task_is_not_found() {
        let db = Database::open_memory().unwrap();
        let err = db
            .update_task(
                Uuid::new_v4(),
                "user-1",
                TaskUpdate::slot_only(SalahPeriod::AfterIsha),
            )
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn delete_removes_the_row() {
        let db = Database::open_memory().unwrap();
        let created = db
            .create_task("user-1", new_task("Read", SalahPeriod::FajrToShurooq))
            .unwrap();
        db.delete_task(created.id, "user-1").unwrap();
        assert!(db.task(created.id, "user-1").unwrap().is_none());
    }
}
