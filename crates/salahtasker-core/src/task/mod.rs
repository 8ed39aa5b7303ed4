//! Planning tasks bucketed into salah slots.
//!
//! A task's slot is stored data, not derived from the clock: moving a task
//! between slots is an edit, and the live countdown never reclassifies
//! anything.

pub mod slot_move;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the seven ordered planning slots across a day, bounded by the
/// snapshot's prayer instants. BeforeFajr and AfterIsha are open-ended
/// (midnight to Fajr, Isha to midnight).
///
/// The integer values are persisted and exchanged with the UI tier; they
/// must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SalahPeriod {
    BeforeFajr,
    FajrToShurooq,
    ShurooqToDhuhr,
    DhuhrToAsr,
    AsrToMaghrib,
    MaghribToIsha,
    AfterIsha,
}

impl SalahPeriod {
    /// All slots in day order.
    pub const ALL: [SalahPeriod; 7] = [
        SalahPeriod::BeforeFajr,
        SalahPeriod::FajrToShurooq,
        SalahPeriod::ShurooqToDhuhr,
        SalahPeriod::DhuhrToAsr,
        SalahPeriod::AsrToMaghrib,
        SalahPeriod::MaghribToIsha,
        SalahPeriod::AfterIsha,
    ];

    /// Wire/storage integer for this slot.
    pub fn id(&self) -> u8 {
        match self {
            SalahPeriod::BeforeFajr => 0,
            SalahPeriod::FajrToShurooq => 1,
            SalahPeriod::ShurooqToDhuhr => 2,
            SalahPeriod::DhuhrToAsr => 3,
            SalahPeriod::AsrToMaghrib => 4,
            SalahPeriod::MaghribToIsha => 5,
            SalahPeriod::AfterIsha => 6,
        }
    }

    /// Look up a slot by wire integer.
    pub fn from_id(id: u8) -> Option<Self> {
        SalahPeriod::ALL.get(usize::from(id)).copied()
    }

    /// Display label for slot headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            SalahPeriod::BeforeFajr => "Before Fajr Salah",
            SalahPeriod::FajrToShurooq => "Fajr → Shurooq",
            SalahPeriod::ShurooqToDhuhr => "Shurooq → Dhuhr",
            SalahPeriod::DhuhrToAsr => "Dhuhr → Asr",
            SalahPeriod::AsrToMaghrib => "Asr → Maghrib",
            SalahPeriod::MaghribToIsha => "Maghrib → Isha",
            SalahPeriod::AfterIsha => "After Isha Salah",
        }
    }
}

impl From<SalahPeriod> for u8 {
    fn from(slot: SalahPeriod) -> Self {
        slot.id()
    }
}

impl TryFrom<u8> for SalahPeriod {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        SalahPeriod::from_id(id).ok_or_else(|| format!("unknown salah slot id {id}"))
    }
}

impl std::fmt::Display for SalahPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A planning item, exclusively owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub owner: String,
    pub title: String,
    pub description: Option<String>,
    pub slot: SalahPeriod,
    pub task_date: NaiveDate,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a fresh, uncompleted task.
    pub fn new(
        owner: impl Into<String>,
        title: impl Into<String>,
        description: Option<String>,
        slot: SalahPeriod,
        task_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            title: title.into(),
            description,
            slot,
            task_date,
            is_completed: false,
            created_at: Utc::now(),
        }
    }
}

/// The planning slot a task belongs to. Trivial by contract: the slot is
/// stored on the task, never derived from the live clock.
pub fn classify(task: &Task) -> SalahPeriod {
    task.slot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_ids_round_trip() {
        for slot in SalahPeriod::ALL {
            assert_eq!(SalahPeriod::from_id(slot.id()), Some(slot));
        }
        assert_eq!(SalahPeriod::from_id(7), None);
    }

    #[test]
    fn slot_wire_values_are_stable() {
        assert_eq!(SalahPeriod::BeforeFajr.id(), 0);
        assert_eq!(SalahPeriod::FajrToShurooq.id(), 1);
        assert_eq!(SalahPeriod::AfterIsha.id(), 6);
    }

    #[test]
    fn slots_serialize_as_integers() {
        let json = serde_json::to_string(&SalahPeriod::DhuhrToAsr).unwrap();
        assert_eq!(json, "3");
        let slot: SalahPeriod = serde_json::from_str("5").unwrap();
        assert_eq!(slot, SalahPeriod::MaghribToIsha);
        assert!(serde_json::from_str::<SalahPeriod>("9").is_err());
    }

    #[test]
    fn classify_returns_the_stored_slot() {
        let task = Task::new(
            "user-1",
            "Read Quran",
            None,
            SalahPeriod::FajrToShurooq,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        );
        assert_eq!(classify(&task), SalahPeriod::FajrToShurooq);
        assert!(!task.is_completed);
    }
}
