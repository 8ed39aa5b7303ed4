//! Prayer time commands: resolve a day's times, show the live period.

use clap::Subcommand;
use salahtasker_core::{
    current_salah, format_countdown, next_salah, AladhanClient, Database, PrayerTimeRequest,
    PrayerTimeResolver, PrayerTimeSnapshot,
};

use super::parse_date;

#[derive(Subcommand)]
pub enum PrayerAction {
    /// Resolve and print the six prayer times for a date
    Times {
        /// City name (falls back to saved defaults)
        #[arg(long)]
        city: Option<String>,
        /// Country name (falls back to saved defaults)
        #[arg(long)]
        country: Option<String>,
        /// Calculation method id (see `salahtasker-cli methods`)
        #[arg(long)]
        method: Option<u16>,
        /// Date as yyyy-MM-dd (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Owner scope for defaults and cache
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Show the current salah period, the next salah, and the countdown
    Now {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        method: Option<u16>,
        #[arg(long, default_value = "local")]
        user: String,
    },
}

fn resolve(
    city: Option<String>,
    country: Option<String>,
    method: Option<u16>,
    date: Option<&str>,
    user: &str,
) -> Result<PrayerTimeSnapshot, Box<dyn std::error::Error>> {
    let request = PrayerTimeRequest {
        city,
        country,
        method,
        date: parse_date(date)?,
    };

    let db = Database::open()?;
    let resolver = PrayerTimeResolver::new(AladhanClient::new(), &db, &db);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let snapshot = runtime.block_on(resolver.resolve(&request, Some(user)))?;
    Ok(snapshot)
}

pub fn run(action: PrayerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PrayerAction::Times {
            city,
            country,
            method,
            date,
            user,
        } => {
            let snapshot = resolve(city, country, method, date.as_deref(), &user)?;
            println!("Prayer times for {}", snapshot.date);
            for (name, time) in snapshot.times() {
                println!("  {name:<8} {time}");
            }
        }
        PrayerAction::Now {
            city,
            country,
            method,
            user,
        } => {
            let snapshot = resolve(city, country, method, None, &user)?;
            let now = chrono::Local::now().naive_local();

            match current_salah(&snapshot, now) {
                Some(salah) => println!("current period: {salah}"),
                None => println!("current period: before Fajr"),
            }

            let next = next_salah(&snapshot, now);
            println!(
                "next salah:     {} at {} (in {})",
                next.salah,
                next.time,
                format_countdown(next.timestamp, now)
            );
        }
    }
    Ok(())
}
