use async_trait::async_trait;
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::time::Duration;

use super::{
    ClimateData, DateRange, Error, PrecipitationReading, TemperatureReading, TemperatureStats,
};

/// Tables and columns the handlers read. Extra columns are allowed.
const EXPECTED_SCHEMA: &[(&str, &[&str])] = &[
    ("measurement", &["date", "station", "prcp", "tobs"]),
    ("station", &["station"]),
];

/// Read-only handle on the measurement database.
///
/// Every query checks a connection out of the pool and hands it back when the
/// query future completes or is dropped.
#[derive(Debug)]
pub struct ClimateStore {
    pool: SqlitePool,
}

impl ClimateStore {
    /// Opens `path` read-only and validates the schema, failing if either is not possible.
    pub async fn connect(path: &str, max_connections: u32) -> Result<Self, Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        let store = Self::from_pool(pool);
        store.verify_schema().await?;
        info!("SQLite database bound at: {}", path);

        Ok(store)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check that every expected table and column is present in the live database.
    pub async fn verify_schema(&self) -> Result<(), Error> {
        for &(table, columns) in EXPECTED_SCHEMA {
            let found: Vec<String> =
                sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
                    .bind(table)
                    .fetch_all(&self.pool)
                    .await?;

            if found.is_empty() {
                return Err(Error::MissingTable(table));
            }

            if let Some(&column) = columns
                .iter()
                .find(|column| !found.iter().any(|name| name.eq_ignore_ascii_case(column)))
            {
                return Err(Error::MissingColumn { table, column });
            }
            debug!("table {} has columns {:?}", table, found);
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("SQLite pool closed");
    }
}

#[async_trait]
impl ClimateData for ClimateStore {
    async fn precipitation_since(&self, since: &str) -> Result<Vec<PrecipitationReading>, Error> {
        let readings = sqlx::query_as::<_, PrecipitationReading>(
            "SELECT date, CAST(prcp AS REAL) AS prcp
             FROM measurement
             WHERE date >= ?",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        debug!("{} precipitation rows since {}", readings.len(), since);
        Ok(readings)
    }

    async fn station_ids(&self) -> Result<Vec<String>, Error> {
        let stations = sqlx::query_scalar("SELECT station FROM station")
            .fetch_all(&self.pool)
            .await?;
        Ok(stations)
    }

    async fn temperature_observations(
        &self,
        station: &str,
        since: &str,
    ) -> Result<Vec<TemperatureReading>, Error> {
        let readings = sqlx::query_as::<_, TemperatureReading>(
            "SELECT date, CAST(tobs AS REAL) AS tobs
             FROM measurement
             WHERE station = ? AND date >= ?",
        )
        .bind(station)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            "{} temperature rows for {} since {}",
            readings.len(),
            station,
            since
        );
        Ok(readings)
    }

    async fn temperature_stats(&self, range: &DateRange) -> Result<TemperatureStats, Error> {
        // Aggregates over an empty set yield one row of NULLs
        let stats = sqlx::query_as::<_, TemperatureStats>(
            r#"SELECT CAST(MIN(tobs) AS REAL) AS "min",
                      CAST(AVG(tobs) AS REAL) AS "avg",
                      CAST(MAX(tobs) AS REAL) AS "max"
               FROM measurement
               WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)"#,
        )
        .bind(&range.start)
        .bind(range.end.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
