//! Prayer time resolution -- user defaults, cache, then the network.
//!
//! One resolution runs to completion inside the calling request context:
//! settings merge, validation, cache read, and only on a miss a single
//! upstream fetch followed by a write-back. Concurrent misses for the same
//! key are not coordinated; both fetch and both upsert, which is wasteful
//! but harmless since writes are idempotent upserts of immutable data.

use std::future::Future;

use chrono::NaiveDate;

use crate::error::{CoreError, Result, StorageError};
use crate::prayer::method::DEFAULT_METHOD;
use crate::prayer::snapshot::PrayerTimeSnapshot;
use crate::storage::prayer_cache::{CacheKey, CacheStore};

/// Parameters of one prayer-time request before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct PrayerTimeRequest {
    pub city: Option<String>,
    pub country: Option<String>,
    pub method: Option<u16>,
    pub date: NaiveDate,
}

impl PrayerTimeRequest {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }
}

/// A user's saved location defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDefaults {
    pub city: Option<String>,
    pub country: Option<String>,
    /// Stored wire method id; zero means "never set".
    pub method: Option<u16>,
}

/// Source of saved per-user defaults. Implemented by the settings store;
/// tests substitute fixtures.
pub trait SettingsProvider {
    fn defaults(&self, owner: &str) -> Result<Option<UserDefaults>, StorageError>;
}

impl<S: SettingsProvider + ?Sized> SettingsProvider for &S {
    fn defaults(&self, owner: &str) -> Result<Option<UserDefaults>, StorageError> {
        (**self).defaults(owner)
    }
}

/// Anything that can compute prayer times for a location/date/method.
/// Implemented by [`crate::prayer::AladhanClient`]; tests substitute
/// fetch-counting fakes.
pub trait TimingsSource {
    fn fetch(
        &self,
        city: &str,
        country: &str,
        method: u16,
        date: NaiveDate,
    ) -> impl Future<Output = Result<PrayerTimeSnapshot>> + Send;
}

impl TimingsSource for crate::prayer::client::AladhanClient {
    fn fetch(
        &self,
        city: &str,
        country: &str,
        method: u16,
        date: NaiveDate,
    ) -> impl Future<Output = Result<PrayerTimeSnapshot>> + Send {
        crate::prayer::client::AladhanClient::fetch(self, city, country, method, date)
    }
}

/// The effective location/method for one request, produced by merging
/// explicit parameters with the caller's saved defaults. Computed once per
/// resolution and passed by value; there is no ambient "current settings"
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocationSettings {
    pub city: String,
    pub country: String,
    pub method: u16,
}

impl ResolvedLocationSettings {
    /// Merge request parameters over saved defaults.
    ///
    /// An explicit parameter always wins. A saved method of zero counts as
    /// unset and never overrides anything; with no method from either side
    /// the documented [`DEFAULT_METHOD`] applies. Missing city or country
    /// after the merge is [`CoreError::MissingLocation`].
    pub fn merge(
        request: &PrayerTimeRequest,
        defaults: Option<&UserDefaults>,
    ) -> Result<Self> {
        let non_blank = |s: &String| !s.trim().is_empty();

        let city = request
            .city
            .clone()
            .filter(non_blank)
            .or_else(|| defaults.and_then(|d| d.city.clone().filter(non_blank)));
        let country = request
            .country
            .clone()
            .filter(non_blank)
            .or_else(|| defaults.and_then(|d| d.country.clone().filter(non_blank)));
        let method = request
            .method
            .or_else(|| defaults.and_then(|d| d.method.filter(|m| *m != 0)))
            .unwrap_or(DEFAULT_METHOD);

        match (city, country) {
            (Some(city), Some(country)) => Ok(Self {
                city,
                country,
                method,
            }),
            _ => Err(CoreError::MissingLocation),
        }
    }
}

/// Read-through resolver over a cache store and an upstream timings source.
pub struct PrayerTimeResolver<T, C, S> {
    source: T,
    cache: C,
    settings: S,
}

impl<T, C, S> PrayerTimeResolver<T, C, S>
where
    T: TimingsSource,
    C: CacheStore,
    S: SettingsProvider,
{
    pub fn new(source: T, cache: C, settings: S) -> Self {
        Self {
            source,
            cache,
            settings,
        }
    }

    /// Resolve authoritative prayer times for a request.
    ///
    /// Order: settings merge, validation, cache read, upstream fetch, cache
    /// write-back. A cache hit returns the stored snapshot verbatim with no
    /// network call. A failed cache write is logged and swallowed -- the
    /// freshly fetched snapshot is already in hand and is returned anyway.
    pub async fn resolve(
        &self,
        request: &PrayerTimeRequest,
        owner: Option<&str>,
    ) -> Result<PrayerTimeSnapshot> {
        let defaults = match owner {
            Some(owner) => self.settings.defaults(owner)?,
            None => None,
        };
        let location = ResolvedLocationSettings::merge(request, defaults.as_ref())?;

        let key = CacheKey {
            date: request.date,
            method: location.method,
            owner: owner.map(str::to_string),
        };

        match self.cache.get(&key) {
            Ok(Some(snapshot)) => {
                tracing::debug!(date = %key.date, method = key.method, "prayer time cache hit");
                return Ok(snapshot);
            }
            Ok(None) => {}
            Err(e) => {
                // A broken cache read degrades to a miss rather than
                // failing the resolution.
                tracing::warn!(error = %e, date = %key.date, "prayer time cache read failed");
            }
        }

        let snapshot = self
            .source
            .fetch(&location.city, &location.country, location.method, request.date)
            .await?;
        snapshot.validate()?;

        if let Err(e) = self.cache.put(&key, &snapshot) {
            tracing::warn!(
                error = %e,
                date = %key.date,
                method = key.method,
                "failed to cache resolved prayer times; returning uncached result"
            );
        }

        Ok(snapshot)
    }
}
