use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the COFFEECITY result set, kept in memory for the
/// lifetime of a single page load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: i64,
    pub user_id: i64,
    pub order_timestamp: DateTime<Utc>,
    pub coffee_type: String,
    pub quantity: u32,
    pub total_price: f64,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderRow {
    pub order_id: i64,
    pub user_id: i64,
    pub coffee_type: String,
    pub quantity: u32,
    pub total_price: f64,
    pub status: String,
}

impl From<&Order> for OrderRow {
    fn from(o: &Order) -> Self {
        Self {
            order_id: o.order_id,
            user_id: o.user_id,
            coffee_type: o.coffee_type.clone(),
            quantity: o.quantity,
            total_price: o.total_price,
            status: o.status.clone(),
        }
    }
}
