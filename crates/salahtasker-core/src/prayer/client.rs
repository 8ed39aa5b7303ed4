//! AlAdhan API client -- remote prayer-time computation.
//!
//! One endpoint is consumed: `GET /timingsByCity/{dd-MM-yyyy}` with `city`,
//! `country`, and `method` query parameters. Exactly the six named timings
//! are extracted; everything else in the payload (Sunset, Imsak, Midnight,
//! calculation metadata) is discarded.
//!
//! No retry is performed here; retry policy belongs to the caller.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{CoreError, Result};
use crate::prayer::snapshot::{ClockTime, PrayerTimeSnapshot};

/// Production AlAdhan endpoint.
pub const ALADHAN_BASE_URL: &str = "https://api.aladhan.com/v1";

/// Success code in the AlAdhan response envelope.
const ALADHAN_SUCCESS_CODE: i64 = 200;

/// Outbound request timeout. The original system had none, which let a
/// stalled upstream hang the whole resolution.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct AladhanResponse {
    code: i64,
    data: Option<AladhanData>,
}

#[derive(Debug, Deserialize)]
struct AladhanData {
    timings: Option<AladhanTimings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AladhanTimings {
    fajr: String,
    sunrise: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

/// HTTP client for the AlAdhan prayer-time computation service.
pub struct AladhanClient {
    http: reqwest::Client,
    base_url: String,
}

impl AladhanClient {
    /// Client against the production endpoint.
    pub fn new() -> Self {
        Self::with_base_url(ALADHAN_BASE_URL)
    }

    /// Client against an arbitrary base URL (tests point this at a mock
    /// server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch prayer times for a city/country/method/date.
    ///
    /// Transport failures and non-success HTTP statuses are
    /// [`CoreError::UpstreamUnavailable`]; a body that parses but carries
    /// `code != 200` or no timings is [`CoreError::UpstreamMalformed`].
    pub async fn fetch(
        &self,
        city: &str,
        country: &str,
        method: u16,
        date: NaiveDate,
    ) -> Result<PrayerTimeSnapshot> {
        // The API wants the date as dd-MM-yyyy in the path.
        let url = format!(
            "{}/timingsByCity/{}?city={}&country={}&method={}",
            self.base_url,
            date.format("%d-%m-%Y"),
            urlencoding::encode(city),
            urlencoding::encode(country),
            method,
        );
        tracing::debug!(%url, "requesting prayer times");

        let response = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| CoreError::UpstreamUnavailable {
                message: format!("error connecting to AlAdhan API: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::UpstreamUnavailable {
                message: format!("AlAdhan API returned HTTP {status}"),
                source: None,
            });
        }

        let body: AladhanResponse = response.json().await.map_err(|e| {
            CoreError::UpstreamMalformed(format!("error parsing AlAdhan API response: {e}"))
        })?;

        if body.code != ALADHAN_SUCCESS_CODE {
            return Err(CoreError::UpstreamMalformed(format!(
                "AlAdhan API returned code {}",
                body.code
            )));
        }

        let timings = body
            .data
            .and_then(|d| d.timings)
            .ok_or_else(|| CoreError::UpstreamMalformed("response carries no timings".into()))?;

        Ok(PrayerTimeSnapshot {
            date,
            fajr: parse_timing("Fajr", &timings.fajr)?,
            sunrise: parse_timing("Sunrise", &timings.sunrise)?,
            dhuhr: parse_timing("Dhuhr", &timings.dhuhr)?,
            asr: parse_timing("Asr", &timings.asr)?,
            maghrib: parse_timing("Maghrib", &timings.maghrib)?,
            isha: parse_timing("Isha", &timings.isha)?,
        })
    }
}

impl Default for AladhanClient {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_timing(name: &str, raw: &str) -> Result<ClockTime> {
    raw.parse()
        .map_err(|e| CoreError::UpstreamMalformed(format!("bad {name} timing: {e}")))
}
