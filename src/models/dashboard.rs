use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

pub const ALL_TYPES: &str = "All";

/// Coffee-type selection: the `"All"` sentinel, or one exact type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoffeeTypeFilter {
    All,
    Only(String),
}

impl CoffeeTypeFilter {
    pub fn matches(&self, coffee_type: &str) -> bool {
        match self {
            CoffeeTypeFilter::All => true,
            CoffeeTypeFilter::Only(t) => t == coffee_type,
        }
    }
}

impl FromStr for CoffeeTypeFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_TYPES {
            Ok(CoffeeTypeFilter::All)
        } else {
            Ok(CoffeeTypeFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for CoffeeTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoffeeTypeFilter::All => f.write_str(ALL_TYPES),
            CoffeeTypeFilter::Only(t) => f.write_str(t),
        }
    }
}

/// Query parameters shared by the dashboard page and the JSON API.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct DashboardQuery {
    pub coffee_type: Option<String>,
    /// Lower bound for order timestamps, `YYYY-MM-DD`.
    pub start_date: Option<String>,
}

impl DashboardQuery {
    pub fn coffee_filter(&self) -> CoffeeTypeFilter {
        match &self.coffee_type {
            Some(s) => s.parse().unwrap_or(CoffeeTypeFilter::All),
            None => CoffeeTypeFilter::All,
        }
    }

    /// Resolves the selected start to a UTC datetime: midnight of the
    /// chosen day, or `now - 24h` when nothing was chosen.
    pub fn start_datetime(&self, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
        match &self.start_date {
            Some(raw) => {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                    AppError::ValidationError(format!(
                        "start_date must be YYYY-MM-DD, got {raw:?}"
                    ))
                })?;
                let midnight = date
                    .and_hms_opt(0, 0, 0)
                    .ok_or_else(|| AppError::ValidationError(format!("invalid date {raw:?}")))?;
                Ok(midnight.and_utc())
            }
            None => Ok(now - Duration::hours(24)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TypeAverage {
    pub coffee_type: String,
    pub average_price: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TypeCount {
    pub coffee_type: String,
    pub order_count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusSlice {
    pub status: String,
    pub order_count: u64,
    pub percentage: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HeatmapCell {
    pub hour: u32,
    pub coffee_type: String,
    pub order_count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChartSummary {
    pub window_start: DateTime<Utc>,
    pub order_count: usize,
    pub average_price_by_type: Vec<TypeAverage>,
    pub order_count_by_type: Vec<TypeCount>,
    pub status_distribution: Vec<StatusSlice>,
    pub heatmap: Vec<HeatmapCell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_coffee_filter_round_trip() {
        let all: CoffeeTypeFilter = "All".parse().unwrap();
        assert_eq!(all, CoffeeTypeFilter::All);
        assert_eq!(all.to_string(), "All");

        let latte: CoffeeTypeFilter = "Latte".parse().unwrap();
        assert_eq!(latte, CoffeeTypeFilter::Only("Latte".to_string()));
        assert_eq!(latte.to_string(), "Latte");
    }

    #[test]
    fn test_filter_matches() {
        let latte = CoffeeTypeFilter::Only("Latte".to_string());
        assert!(latte.matches("Latte"));
        assert!(!latte.matches("Espresso"));
        assert!(CoffeeTypeFilter::All.matches("Espresso"));
    }

    #[test]
    fn test_start_datetime_explicit() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let query = DashboardQuery {
            coffee_type: None,
            start_date: Some("2024-05-01".to_string()),
        };
        let start = query.start_datetime(now).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_start_datetime_default_is_yesterday() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let query = DashboardQuery::default();
        let start = query.start_datetime(now).unwrap();
        assert_eq!(start, now - Duration::hours(24));
    }

    #[test]
    fn test_start_datetime_rejects_garbage() {
        let now = Utc::now();
        let query = DashboardQuery {
            coffee_type: None,
            start_date: Some("not-a-date".to_string()),
        };
        assert!(query.start_datetime(now).is_err());
    }
}
