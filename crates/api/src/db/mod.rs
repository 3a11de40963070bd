mod sqlite;

pub use sqlite::ClimateStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Database is missing table `{0}`")]
    MissingTable(&'static str),
    #[error("Table `{table}` is missing column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

/// Read access to the `measurement` and `station` tables.
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Precipitation readings on or after `since`, in store order
    async fn precipitation_since(&self, since: &str) -> Result<Vec<PrecipitationReading>, Error>;
    /// Identifier of every station row, in store order
    async fn station_ids(&self) -> Result<Vec<String>, Error>;
    /// Temperature observations of one station on or after `since`
    async fn temperature_observations(
        &self,
        station: &str,
        since: &str,
    ) -> Result<Vec<TemperatureReading>, Error>;
    async fn temperature_stats(&self, range: &DateRange) -> Result<TemperatureStats, Error>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct PrecipitationReading {
    /// Observation date, `YYYY-MM-DD`
    pub date: String,
    /// Precipitation amount, null when the station did not report one
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TemperatureReading {
    /// Observation date, `YYYY-MM-DD`
    pub date: String,
    /// Temperature observation, null when the station did not report one
    pub tobs: Option<f64>,
}

/// Dates are compared as text in the store's native `YYYY-MM-DD` format.
/// Neither bound is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    /// Inclusive upper bound, open-ended when `None`
    pub end: Option<String>,
}

impl DateRange {
    pub fn starting(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }
}

/// Each aggregate is `None` when no measurement falls in the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, sqlx::FromRow)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

/// `[[[min]], [[avg]], [[max]]]`, one single-row single-column result per aggregate.
pub type NestedStats = [[[Option<f64>; 1]; 1]; 3];

impl TemperatureStats {
    pub fn nested(&self) -> NestedStats {
        [[[self.min]], [[self.avg]], [[self.max]]]
    }
}
