use super::{render_bars, Palette};
use crate::error::AppResult;
use crate::models::Order;
use crate::services::analytics::order_count_by_type;

pub fn order_count_chart(orders: &[Order], palette: &Palette) -> AppResult<Option<String>> {
    let counts = order_count_by_type(orders);
    if counts.is_empty() {
        return Ok(None);
    }
    let bars: Vec<(String, f64)> = counts.into_iter().map(|(t, n)| (t, n as f64)).collect();
    render_bars(
        "Order Count by Coffee Type",
        "Coffee Type",
        "Number of Orders",
        &bars,
        palette,
    )
    .map(Some)
}
