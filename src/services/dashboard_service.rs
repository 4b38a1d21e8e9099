use chrono::{DateTime, Utc};

use crate::config::DashboardSettings;
use crate::error::AppResult;
use crate::external::PinotClient;
use crate::models::{CoffeeTypeFilter, Order};
use crate::services::filter::{filter_orders, last_24_hours};

/// Fetches the order table and produces the chart window for one
/// page load. No state is kept between requests.
#[derive(Clone)]
pub struct DashboardService {
    pinot: PinotClient,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(pinot: PinotClient, settings: DashboardSettings) -> Self {
        Self { pinot, settings }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Full pipeline: fetch, type/date filter, then the 24-hour cut
    /// that every chart and the recent-orders table consume.
    pub async fn load_window(
        &self,
        filter: &CoffeeTypeFilter,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<Order>> {
        let orders = self.pinot.fetch_orders().await?;
        let filtered = filter_orders(orders, filter, start);
        Ok(last_24_hours(filtered, now))
    }
}
