use super::{render_bars, Palette};
use crate::error::AppResult;
use crate::models::Order;
use crate::services::analytics::average_price_by_type;

pub fn average_price_chart(orders: &[Order], palette: &Palette) -> AppResult<Option<String>> {
    let averages = average_price_by_type(orders);
    if averages.is_empty() {
        return Ok(None);
    }
    render_bars(
        "Average Total Price by Coffee Type",
        "Coffee Type",
        "Average Total Price",
        &averages,
        palette,
    )
    .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tests::{sample_orders, test_palette};

    #[test]
    fn test_empty_input_renders_nothing() {
        let palette = test_palette();
        assert!(average_price_chart(&[], &palette).unwrap().is_none());
    }

    #[test]
    fn test_renders_svg_for_orders() {
        let palette = test_palette();
        let svg = average_price_chart(&sample_orders(), &palette)
            .unwrap()
            .unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Average Total Price by Coffee Type"));
    }
}
