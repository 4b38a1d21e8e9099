use plotters::prelude::*;

use super::{chart_error, Palette, BACKGROUND, CHART_SIZE, TEXT_COLOR};
use crate::error::AppResult;
use crate::models::Order;
use crate::services::analytics::quantity_histogram;

/// Histogram of order quantity with the smoothed density estimate
/// overlaid as a line.
pub fn quantity_chart(orders: &[Order], palette: &Palette) -> AppResult<Option<String>> {
    let histogram = quantity_histogram(orders);
    if histogram.bins.is_empty() {
        return Ok(None);
    }

    let x_min = f64::from(histogram.bins[0].0) - 1.0;
    let x_max = f64::from(histogram.bins[histogram.bins.len() - 1].0) + 1.0;
    let count_top = histogram.bins.iter().map(|(_, n)| *n).max().unwrap_or(0) as f64;
    let density_top = histogram
        .density
        .iter()
        .map(|(_, d)| *d)
        .fold(0.0f64, f64::max);
    let y_top = count_top.max(density_top) * 1.15;
    let y_top = if y_top > 0.0 { y_top } else { 1.0 };

    let bar_color = palette.color(0);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&BACKGROUND).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Distribution of Order Quantity",
                ("sans-serif", 22).into_font().color(&TEXT_COLOR),
            )
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(56)
            .build_cartesian_2d(x_min..x_max, 0f64..y_top)
            .map_err(chart_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Quantity")
            .y_desc("Frequency")
            .axis_desc_style(("sans-serif", 15).into_font().color(&TEXT_COLOR))
            .label_style(("sans-serif", 12).into_font().color(&TEXT_COLOR))
            .axis_style(&TEXT_COLOR)
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(histogram.bins.iter().map(|(quantity, count)| {
                let q = f64::from(*quantity);
                Rectangle::new(
                    [(q - 0.4, 0.0), (q + 0.4, *count as f64)],
                    bar_color.filled(),
                )
            }))
            .map_err(chart_error)?;

        chart
            .draw_series(LineSeries::new(
                histogram.density.iter().copied(),
                TEXT_COLOR.stroke_width(2),
            ))
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }
    Ok(Some(svg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tests::{sample_orders, test_palette};

    #[test]
    fn test_empty_input_renders_nothing() {
        let palette = test_palette();
        assert!(quantity_chart(&[], &palette).unwrap().is_none());
    }

    #[test]
    fn test_renders_svg_for_orders() {
        let palette = test_palette();
        let svg = quantity_chart(&sample_orders(), &palette).unwrap().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Distribution of Order Quantity"));
    }
}
