//! Salah period calculations -- pure functions of a snapshot and a clock
//! reading.
//!
//! All comparisons operate on minutes since midnight of `now`'s calendar
//! day. Sunrise is not a salah; only the five prayer instants participate
//! here.

use chrono::{Duration, NaiveDateTime};

use crate::prayer::snapshot::{ClockTime, PrayerTimeSnapshot};

/// End-of-day bound used for the last period of the scan.
const END_OF_DAY_MINUTES: u16 = 24 * 60;

/// One of the five daily prayers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Salah {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Salah {
    pub fn name(&self) -> &'static str {
        match self {
            Salah::Fajr => "Fajr",
            Salah::Dhuhr => "Dhuhr",
            Salah::Asr => "Asr",
            Salah::Maghrib => "Maghrib",
            Salah::Isha => "Isha",
        }
    }
}

impl std::fmt::Display for Salah {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The next upcoming salah and when it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextSalah {
    pub salah: Salah,
    pub time: ClockTime,
    /// Full timestamp of the instant, possibly on the next calendar day.
    /// Seconds are always zero.
    pub timestamp: NaiveDateTime,
}

fn salah_instants(snapshot: &PrayerTimeSnapshot) -> [(Salah, ClockTime); 5] {
    [
        (Salah::Fajr, snapshot.fajr),
        (Salah::Dhuhr, snapshot.dhuhr),
        (Salah::Asr, snapshot.asr),
        (Salah::Maghrib, snapshot.maghrib),
        (Salah::Isha, snapshot.isha),
    ]
}

fn minutes_of(now: NaiveDateTime) -> u16 {
    use chrono::Timelike;
    (now.time().hour() * 60 + now.time().minute()) as u16
}

/// The salah period `now` falls in: the latest prayer instant not after
/// `now`, with end of day bounding Isha.
///
/// Returns `None` before Fajr; callers distinguish the pre-dawn stretch by
/// absence rather than a named value.
pub fn current_salah(snapshot: &PrayerTimeSnapshot, now: NaiveDateTime) -> Option<Salah> {
    let instants = salah_instants(snapshot);
    let now_minutes = minutes_of(now);

    for (i, (salah, time)) in instants.iter().enumerate() {
        let start = time.minutes_since_midnight();
        let end = instants
            .get(i + 1)
            .map(|(_, t)| t.minutes_since_midnight())
            .unwrap_or(END_OF_DAY_MINUTES);
        if now_minutes >= start && now_minutes < end {
            return Some(*salah);
        }
    }

    None
}

/// The first prayer instant strictly after `now`; tomorrow's Fajr when
/// nothing remains today.
pub fn next_salah(snapshot: &PrayerTimeSnapshot, now: NaiveDateTime) -> NextSalah {
    let instants = salah_instants(snapshot);
    let now_minutes = minutes_of(now);

    for (salah, time) in instants {
        if time.minutes_since_midnight() > now_minutes {
            return NextSalah {
                salah,
                time,
                timestamp: now.date().and_time(time.to_naive_time()),
            };
        }
    }

    // Nothing left today: Fajr, advanced one calendar day.
    let (salah, time) = instants[0];
    let tomorrow = now.date().succ_opt().unwrap_or(now.date());
    NextSalah {
        salah,
        time,
        timestamp: tomorrow.and_time(time.to_naive_time()),
    }
}

/// Format the time remaining until `target` for the live countdown.
///
/// Negative gaps clamp to the zero display. Under an hour the display is
/// minutes+seconds, under a day hours+minutes, beyond that days+hours.
pub fn format_countdown(target: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = target.signed_duration_since(now);
    if diff < Duration::zero() {
        return "0h 0m".to_string();
    }

    let total_seconds = diff.num_seconds();
    let seconds = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let minutes = total_minutes % 60;
    let hours = total_minutes / 60;

    if hours == 0 {
        format!("{minutes}m {seconds}s")
    } else if hours < 24 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{}d {}h", hours / 24, hours % 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn snapshot() -> PrayerTimeSnapshot {
        let t = |s: &str| s.parse::<ClockTime>().unwrap();
        PrayerTimeSnapshot {
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            fajr: t("05:00"),
            sunrise: t("06:30"),
            dhuhr: t("12:00"),
            asr: t("15:30"),
            maghrib: t("18:00"),
            isha: t("19:30"),
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn midday_is_dhuhr() {
        assert_eq!(current_salah(&snapshot(), at(13, 0)), Some(Salah::Dhuhr));
    }

    #[test]
    fn before_fajr_is_none() {
        assert_eq!(current_salah(&snapshot(), at(4, 0)), None);
    }

    #[test]
    fn late_evening_is_isha() {
        assert_eq!(current_salah(&snapshot(), at(20, 0)), Some(Salah::Isha));
        // Isha runs to end of day.
        assert_eq!(current_salah(&snapshot(), at(23, 59)), Some(Salah::Isha));
    }

    #[test]
    fn exact_instant_starts_its_period() {
        assert_eq!(current_salah(&snapshot(), at(5, 0)), Some(Salah::Fajr));
        assert_eq!(current_salah(&snapshot(), at(12, 0)), Some(Salah::Dhuhr));
    }

    #[test]
    fn next_salah_within_the_day() {
        let next = next_salah(&snapshot(), at(13, 0));
        assert_eq!(next.salah, Salah::Asr);
        assert_eq!(next.timestamp, at(15, 30));
    }

    #[test]
    fn next_salah_rolls_over_to_tomorrows_fajr() {
        let next = next_salah(&snapshot(), at(20, 0));
        assert_eq!(next.salah, Salah::Fajr);
        assert_eq!(
            next.timestamp,
            NaiveDate::from_ymd_opt(2026, 1, 6)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(5, 0, 0).unwrap())
        );
    }

    #[test]
    fn exact_instant_is_not_its_own_next() {
        // Strictly after: at 12:00 the next salah is Asr, not Dhuhr.
        let next = next_salah(&snapshot(), at(12, 0));
        assert_eq!(next.salah, Salah::Asr);
    }

    #[test]
    fn countdown_under_an_hour() {
        let now = at(10, 0);
        assert_eq!(format_countdown(now + Duration::seconds(90), now), "1m 30s");
    }

    #[test]
    fn countdown_under_a_day() {
        let now = at(10, 0);
        assert_eq!(
            format_countdown(now + Duration::hours(3) + Duration::minutes(5), now),
            "3h 5m"
        );
    }

    #[test]
    fn countdown_beyond_a_day() {
        let now = at(10, 0);
        assert_eq!(format_countdown(now + Duration::hours(25), now), "1d 1h");
    }

    #[test]
    fn negative_countdown_clamps_to_zero() {
        let now = at(10, 0);
        assert_eq!(format_countdown(now - Duration::minutes(5), now), "0h 0m");
    }
}
