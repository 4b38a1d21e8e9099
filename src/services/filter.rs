use chrono::{DateTime, Duration, Utc};

use crate::models::{CoffeeTypeFilter, Order};

/// Narrows the fetched table by coffee type and start datetime.
pub fn filter_orders(
    orders: Vec<Order>,
    filter: &CoffeeTypeFilter,
    start: DateTime<Utc>,
) -> Vec<Order> {
    orders
        .into_iter()
        .filter(|o| filter.matches(&o.coffee_type) && o.order_timestamp >= start)
        .collect()
}

/// The view all charts and the recent-orders table consume: rows from
/// the already-filtered table within 24 hours of `now`.
pub fn last_24_hours(orders: Vec<Order>, now: DateTime<Utc>) -> Vec<Order> {
    let cutoff = now - Duration::hours(24);
    orders
        .into_iter()
        .filter(|o| o.order_timestamp >= cutoff)
        .collect()
}
