use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{chart_error, BACKGROUND, TEXT_COLOR};
use crate::error::AppResult;
use crate::models::Order;
use crate::services::analytics::hour_type_pivot;

const HEATMAP_SIZE: (u32, u32) = (720, 560);

// Yellow-to-blue ramp endpoints, matching the source's YlGnBu map.
const RAMP_LOW: (u8, u8, u8) = (255, 255, 217);
const RAMP_HIGH: (u8, u8, u8) = (37, 52, 148);

fn ramp_color(count: u64, max: u64) -> RGBColor {
    let t = if max == 0 {
        0.0
    } else {
        count as f64 / max as f64
    };
    let lerp = |low: u8, high: u8| (f64::from(low) + (f64::from(high) - f64::from(low)) * t) as u8;
    RGBColor(
        lerp(RAMP_LOW.0, RAMP_HIGH.0),
        lerp(RAMP_LOW.1, RAMP_HIGH.1),
        lerp(RAMP_LOW.2, RAMP_HIGH.2),
    )
}

/// Annotated hour × coffee-type heatmap with integer count labels.
pub fn heatmap_chart(orders: &[Order]) -> AppResult<Option<String>> {
    let grid = hour_type_pivot(orders);
    if grid.is_empty() {
        return Ok(None);
    }

    let cols = grid.types.len() as i32;
    let rows = grid.hours.len() as i32;
    let max = grid.max_count();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, HEATMAP_SIZE).into_drawing_area();
        root.fill(&BACKGROUND).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Order Count Heatmap by Hour and Coffee Type",
                ("sans-serif", 22).into_font().color(&TEXT_COLOR),
            )
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(48)
            .build_cartesian_2d((0..cols).into_segmented(), (0..rows).into_segmented())
            .map_err(chart_error)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Coffee Type")
            .y_desc("Hour of Day")
            .axis_desc_style(("sans-serif", 15).into_font().color(&TEXT_COLOR))
            .label_style(("sans-serif", 12).into_font().color(&TEXT_COLOR))
            .axis_style(&TEXT_COLOR)
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) => grid
                    .types
                    .get(*i as usize)
                    .cloned()
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|y| match y {
                SegmentValue::CenterOf(i) => grid
                    .hours
                    .get(*i as usize)
                    .map(|h| h.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(grid.counts.iter().enumerate().flat_map(|(r, row)| {
                row.iter().enumerate().map(move |(c, count)| {
                    Rectangle::new(
                        [
                            (SegmentValue::Exact(c as i32), SegmentValue::Exact(r as i32)),
                            (
                                SegmentValue::Exact(c as i32 + 1),
                                SegmentValue::Exact(r as i32 + 1),
                            ),
                        ],
                        ramp_color(*count, max).filled(),
                    )
                })
            }))
            .map_err(chart_error)?;

        chart
            .draw_series(grid.counts.iter().enumerate().flat_map(|(r, row)| {
                row.iter().enumerate().map(move |(c, count)| {
                    let dark_cell = max > 0 && *count as f64 / max as f64 > 0.6;
                    let label_color = if dark_cell { &WHITE } else { &TEXT_COLOR };
                    let style = ("sans-serif", 13)
                        .into_font()
                        .color(label_color)
                        .pos(Pos::new(HPos::Center, VPos::Center));
                    Text::new(
                        count.to_string(),
                        (
                            SegmentValue::CenterOf(c as i32),
                            SegmentValue::CenterOf(r as i32),
                        ),
                        style,
                    )
                })
            }))
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }
    Ok(Some(svg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tests::sample_orders;

    #[test]
    fn test_empty_input_renders_nothing() {
        assert!(heatmap_chart(&[]).unwrap().is_none());
    }

    #[test]
    fn test_renders_svg_for_orders() {
        let svg = heatmap_chart(&sample_orders()).unwrap().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Order Count Heatmap by Hour and Coffee Type"));
    }

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(ramp_color(0, 10), RGBColor(255, 255, 217));
        assert_eq!(ramp_color(10, 10), RGBColor(37, 52, 148));
        // All-zero grid stays at the low end instead of dividing by zero.
        assert_eq!(ramp_color(0, 0), RGBColor(255, 255, 217));
    }
}
