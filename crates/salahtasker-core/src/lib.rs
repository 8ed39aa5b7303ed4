//! # SalahTasker Core Library
//!
//! Core business logic for SalahTasker, a daily planner organized around
//! the five prayer times. The CLI binary is a thin layer over this
//! library; any future web tier consumes the same types.
//!
//! ## Architecture
//!
//! - **Resolution**: prayer times for a location/date/method are resolved
//!   through a fixed priority order -- saved user defaults fill the
//!   request, a local SQLite cache is consulted, and only on a miss is the
//!   remote AlAdhan computation service called (then written back)
//! - **Periods**: pure calculations deriving the current and next salah
//!   plus a countdown display from a snapshot and a clock reading
//! - **Tasks**: planning items bucketed into the seven salah slots, with
//!   an explicit optimistic state machine for drag-and-drop slot moves
//! - **Storage**: one SQLite database for cache, tasks, and settings
//!
//! ## Key Components
//!
//! - [`PrayerTimeResolver`]: defaults -> cache -> network orchestration
//! - [`AladhanClient`]: the remote timings-by-city client
//! - [`PrayerTimeSnapshot`]: the six resolved times for one date
//! - [`Database`]: cache, task, and settings persistence

pub mod error;
pub mod prayer;
pub mod storage;
pub mod task;

pub use error::{CoreError, Result, StorageError};
pub use prayer::{
    current_salah, format_countdown, next_salah, AladhanClient, CalculationMethod, ClockTime,
    NextSalah, PrayerTimeRequest, PrayerTimeResolver, PrayerTimeSnapshot,
    ResolvedLocationSettings, Salah, SettingsProvider, TimingsSource, UserDefaults,
    DEFAULT_METHOD,
};
pub use storage::{CacheKey, CacheStore, Database, NewTask, TaskUpdate};
pub use task::{classify, slot_move::SlotMove, SalahPeriod, Task};
