use plotters::element::Pie;
use plotters::prelude::*;

use super::{chart_error, Palette, BACKGROUND, CHART_SIZE, TEXT_COLOR};
use crate::error::AppResult;
use crate::models::Order;
use crate::services::analytics::status_distribution;

/// Pie of order statuses: percentage labels to one decimal, 90° start
/// angle, status palette cycling past its length.
pub fn status_chart(orders: &[Order], palette: &Palette) -> AppResult<Option<String>> {
    let statuses = status_distribution(orders);
    if statuses.is_empty() {
        return Ok(None);
    }

    let labels: Vec<String> = statuses.iter().map(|(s, _)| s.clone()).collect();
    let sizes: Vec<f64> = statuses.iter().map(|(_, n)| *n as f64).collect();
    let colors: Vec<RGBColor> = (0..statuses.len()).map(|i| palette.color(i)).collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&BACKGROUND).map_err(chart_error)?;
        let root = root
            .titled(
                "Order Status Distribution",
                ("sans-serif", 22).into_font().color(&TEXT_COLOR),
            )
            .map_err(chart_error)?;

        let (width, height) = root.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(90.0);
        pie.label_style(("sans-serif", 14).into_font().color(&TEXT_COLOR));
        pie.percentages(("sans-serif", 13).into_font().color(&BACKGROUND));
        root.draw(&pie).map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }
    Ok(Some(svg))
}
