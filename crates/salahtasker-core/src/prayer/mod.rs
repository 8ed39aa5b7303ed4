//! Prayer time resolution and the calculations derived from it.

pub mod client;
pub mod method;
pub mod period;
pub mod resolver;
pub mod snapshot;

pub use client::{AladhanClient, ALADHAN_BASE_URL};
pub use method::{CalculationMethod, DEFAULT_METHOD};
pub use period::{current_salah, format_countdown, next_salah, NextSalah, Salah};
pub use resolver::{
    PrayerTimeRequest, PrayerTimeResolver, ResolvedLocationSettings, SettingsProvider,
    TimingsSource, UserDefaults,
};
pub use snapshot::{ClockTime, PrayerTimeSnapshot};
