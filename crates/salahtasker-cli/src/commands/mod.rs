pub mod methods;
pub mod prayer;
pub mod settings;
pub mod task;

use chrono::NaiveDate;

/// Parse a `yyyy-MM-dd` date argument, defaulting to today.
pub fn parse_date(arg: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match arg {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| format!("invalid date {raw:?}; use yyyy-MM-dd").into()),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
