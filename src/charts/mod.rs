//! The five chart builders. Each takes the 24-hour order window,
//! returns `Ok(None)` on empty input, and otherwise renders an SVG
//! document into a `String`.

pub mod count;
pub mod heatmap;
pub mod palette;
pub mod price;
pub mod quantity;
pub mod status;

pub use count::order_count_chart;
pub use heatmap::heatmap_chart;
pub use palette::Palette;
pub use price::average_price_chart;
pub use quantity::quantity_chart;
pub use status::status_chart;

use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;

use crate::error::{AppError, AppResult};

// The source dashboard's warm look: #FFFBF0 canvas, #5C4033 text.
pub(crate) const BACKGROUND: RGBColor = RGBColor(255, 251, 240);
pub(crate) const TEXT_COLOR: RGBColor = RGBColor(92, 64, 51);
pub(crate) const CHART_SIZE: (u32, u32) = (640, 480);

pub(crate) fn chart_error(e: impl std::fmt::Display) -> AppError {
    AppError::ChartError(e.to_string())
}

/// Shared vertical bar renderer for the per-type price and count
/// charts: one bar per category, palette color per index.
pub(crate) fn render_bars(
    title: &str,
    x_desc: &str,
    y_desc: &str,
    bars: &[(String, f64)],
    palette: &Palette,
) -> AppResult<String> {
    let n = bars.len() as i32;
    let y_top = bars.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
    let y_top = if y_top > 0.0 { y_top * 1.15 } else { 1.0 };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&BACKGROUND).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 22).into_font().color(&TEXT_COLOR))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(56)
            .build_cartesian_2d((0..n).into_segmented(), 0f64..y_top)
            .map_err(chart_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .axis_desc_style(("sans-serif", 15).into_font().color(&TEXT_COLOR))
            .label_style(("sans-serif", 12).into_font().color(&TEXT_COLOR))
            .axis_style(&TEXT_COLOR)
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) => bars
                    .get(*i as usize)
                    .map(|(label, _)| label.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i as i32), 0.0),
                        (SegmentValue::Exact(i as i32 + 1), *value),
                    ],
                    palette.color(i).filled(),
                )
            }))
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }
    Ok(svg)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::Palette;
    use crate::models::Order;
    use chrono::{TimeZone, Utc};

    pub(crate) fn test_palette() -> Palette {
        Palette::from_hex(&[
            "#8C7853".to_string(),
            "#B77A62".to_string(),
            "#C49C6C".to_string(),
        ])
    }

    pub(crate) fn sample_orders() -> Vec<Order> {
        vec![
            Order {
                order_id: 1,
                user_id: 10,
                order_timestamp: Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap(),
                coffee_type: "Latte".to_string(),
                quantity: 2,
                total_price: 8.5,
                status: "Completed".to_string(),
            },
            Order {
                order_id: 2,
                user_id: 11,
                order_timestamp: Utc.with_ymd_and_hms(2024, 5, 10, 10, 0, 0).unwrap(),
                coffee_type: "Espresso".to_string(),
                quantity: 1,
                total_price: 3.0,
                status: "Pending".to_string(),
            },
            Order {
                order_id: 3,
                user_id: 12,
                order_timestamp: Utc.with_ymd_and_hms(2024, 5, 10, 14, 45, 0).unwrap(),
                coffee_type: "Latte".to_string(),
                quantity: 3,
                total_price: 12.0,
                status: "Completed".to_string(),
            },
        ]
    }
}
