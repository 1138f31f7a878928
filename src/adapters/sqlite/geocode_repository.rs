//! SQLite implementation of the GeocodeCache port.
//!
//! SQLite has no native TTL, so expiry is enforced at query time: `get`
//! ignores rows older than the TTL and `put` may overwrite them. Expired rows
//! are physically removed by [`SqliteGeocodeCache::purge_expired`].

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Coordinates, GeocodeEntry, PutOutcome};
use crate::domain::ports::GeocodeCache;

/// Default lifetime of a geocode entry after its last write.
pub const DEFAULT_GEOCODE_TTL_DAYS: i64 = 30;

pub struct SqliteGeocodeCache {
    pool: SqlitePool,
    ttl: Duration,
}

impl SqliteGeocodeCache {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_ttl(pool, Duration::days(DEFAULT_GEOCODE_TTL_DAYS))
    }

    pub const fn with_ttl(pool: SqlitePool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// Rows written at or before this instant are expired.
    fn cutoff(&self) -> String {
        format_timestamp(Utc::now() - self.ttl)
    }

    /// Fetch a live entry with its write timestamp.
    pub async fn get_entry(&self, location: &str) -> DomainResult<Option<GeocodeEntry>> {
        let row: Option<GeocodeRow> = sqlx::query_as(
            "SELECT location, lat, lon, updated_at FROM geocode_cache WHERE location = ? AND updated_at > ?",
        )
        .bind(location)
        .bind(self.cutoff())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Delete expired rows, returning how many were removed.
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM geocode_cache WHERE updated_at <= ?")
            .bind(self.cutoff())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Number of live entries.
    pub async fn count(&self) -> DomainResult<u64> {
        Ok(self.stats().await?.live)
    }

    /// Count live and expired rows.
    pub async fn stats(&self) -> DomainResult<GeocodeCacheStats> {
        let (live, expired): (i64, i64) = sqlx::query_as(
            r#"SELECT
                   COALESCE(SUM(CASE WHEN updated_at > ?1 THEN 1 ELSE 0 END), 0),
                   COALESCE(SUM(CASE WHEN updated_at <= ?1 THEN 1 ELSE 0 END), 0)
               FROM geocode_cache"#,
        )
        .bind(self.cutoff())
        .fetch_one(&self.pool)
        .await?;

        Ok(GeocodeCacheStats {
            live: u64::try_from(live).unwrap_or_default(),
            expired: u64::try_from(expired).unwrap_or_default(),
        })
    }
}

/// Row counts reported by [`SqliteGeocodeCache::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeocodeCacheStats {
    pub live: u64,
    pub expired: u64,
}

#[async_trait]
impl GeocodeCache for SqliteGeocodeCache {
    async fn get(&self, location: &str) -> DomainResult<Option<Coordinates>> {
        Ok(self.get_entry(location).await?.map(|e| e.coordinates))
    }

    async fn put(&self, location: &str, coordinates: Coordinates) -> DomainResult<PutOutcome> {
        // A live row wins; an expired one is replaced as if it had been evicted.
        let result = sqlx::query(
            r#"INSERT INTO geocode_cache (location, lat, lon, updated_at)
               VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT(location) DO UPDATE SET
                   lat = excluded.lat,
                   lon = excluded.lon,
                   updated_at = excluded.updated_at
               WHERE geocode_cache.updated_at <= ?5"#,
        )
        .bind(location)
        .bind(coordinates.lat)
        .bind(coordinates.lon)
        .bind(format_timestamp(Utc::now()))
        .bind(self.cutoff())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(PutOutcome::AlreadyExists)
        } else {
            Ok(PutOutcome::Inserted)
        }
    }
}

/// Second precision keeps stored timestamps lexically ordered.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(sqlx::FromRow)]
struct GeocodeRow {
    location: String,
    lat: f64,
    lon: f64,
    updated_at: String,
}

impl TryFrom<GeocodeRow> for GeocodeEntry {
    type Error = DomainError;

    fn try_from(row: GeocodeRow) -> Result<Self, Self::Error> {
        let updated_at = DateTime::parse_from_rfc3339(&row.updated_at)
            .map_err(|e| DomainError::SerializationError(e.to_string()))?
            .with_timezone(&Utc);

        Ok(Self {
            location: row.location,
            coordinates: Coordinates::new(row.lat, row.lon),
            updated_at,
        })
    }
}
