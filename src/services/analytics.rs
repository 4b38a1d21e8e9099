//! Pure aggregations over the 24-hour order window. Grouping uses
//! BTreeMap so chart series come out in a deterministic order.

use chrono::Timelike;
use std::collections::BTreeMap;

use crate::models::Order;

pub fn average_price_by_type(orders: &[Order]) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for o in orders {
        let entry = sums.entry(o.coffee_type.as_str()).or_insert((0.0, 0));
        entry.0 += o.total_price;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(t, (sum, n))| (t.to_string(), sum / n as f64))
        .collect()
}

pub fn order_count_by_type(orders: &[Order]) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for o in orders {
        *counts.entry(o.coffee_type.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(t, n)| (t.to_string(), n))
        .collect()
}

pub fn status_distribution(orders: &[Order]) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for o in orders {
        *counts.entry(o.status.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(s, n)| (s.to_string(), n))
        .collect()
}

/// Integer-bin histogram of order quantity with a Gaussian KDE curve
/// scaled to count units for overlaying on the bars.
#[derive(Debug, Clone)]
pub struct QuantityHistogram {
    /// (quantity, occurrences), ascending by quantity.
    pub bins: Vec<(u32, u64)>,
    /// Smoothed density sampled across the quantity range, in count units.
    pub density: Vec<(f64, f64)>,
}

pub fn quantity_histogram(orders: &[Order]) -> QuantityHistogram {
    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
    for o in orders {
        *counts.entry(o.quantity).or_insert(0) += 1;
    }
    let bins: Vec<(u32, u64)> = counts.into_iter().collect();

    let values: Vec<f64> = orders.iter().map(|o| f64::from(o.quantity)).collect();
    let density = kde_curve(&values);

    QuantityHistogram { bins, density }
}

/// Gaussian KDE with Silverman's bandwidth, scaled by n (bin width is
/// 1) so the curve lives on the same axis as the histogram counts.
fn kde_curve(values: &[f64]) -> Vec<(f64, f64)> {
    if values.is_empty() {
        return Vec::new();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    let bandwidth = if std_dev > 0.0 {
        1.06 * std_dev * n.powf(-0.2)
    } else {
        0.5
    };

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min) - 1.0;
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max) + 1.0;
    let steps = 120;
    let step = (max - min) / steps as f64;

    (0..=steps)
        .map(|i| {
            let x = min + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
            (x, density * n)
        })
        .collect()
}

/// Hour-of-day × coffee-type order counts, pivoted into a dense grid.
/// Rows are the hours present in the data (ascending), columns the
/// types present (sorted); unobserved combinations hold 0.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    pub hours: Vec<u32>,
    pub types: Vec<String>,
    /// counts[hour_index][type_index]
    pub counts: Vec<Vec<u64>>,
}

impl HeatmapGrid {
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty() || self.types.is_empty()
    }

    pub fn max_count(&self) -> u64 {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

pub fn hour_type_pivot(orders: &[Order]) -> HeatmapGrid {
    let mut grouped: BTreeMap<(u32, &str), u64> = BTreeMap::new();
    for o in orders {
        let hour = o.order_timestamp.hour();
        *grouped.entry((hour, o.coffee_type.as_str())).or_insert(0) += 1;
    }

    let mut hours: Vec<u32> = grouped.keys().map(|(h, _)| *h).collect();
    hours.sort_unstable();
    hours.dedup();
    let mut types: Vec<String> = grouped.keys().map(|(_, t)| t.to_string()).collect();
    types.sort();
    types.dedup();

    let counts = hours
        .iter()
        .map(|h| {
            types
                .iter()
                .map(|t| grouped.get(&(*h, t.as_str())).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    HeatmapGrid {
        hours,
        types,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn order(coffee_type: &str, quantity: u32, price: f64, status: &str, hour: u32) -> Order {
        Order {
            order_id: 1,
            user_id: 1,
            order_timestamp: at(hour),
            coffee_type: coffee_type.to_string(),
            quantity,
            total_price: price,
            status: status.to_string(),
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, hour, 15, 0).unwrap()
    }

    #[test]
    fn test_average_price_by_type() {
        let orders = vec![
            order("Latte", 2, 8.0, "Completed", 9),
            order("Latte", 1, 9.0, "Completed", 10),
            order("Espresso", 1, 3.0, "Pending", 9),
        ];
        let averages = average_price_by_type(&orders);
        assert_eq!(
            averages,
            vec![("Espresso".to_string(), 3.0), ("Latte".to_string(), 8.5)]
        );
    }

    #[test]
    fn test_absent_type_produces_no_entry() {
        let orders = vec![order("Latte", 1, 8.0, "Completed", 9)];
        let counts = order_count_by_type(&orders);
        assert_eq!(counts, vec![("Latte".to_string(), 1)]);
        assert!(!counts.iter().any(|(t, _)| t == "Americano"));
    }

    #[test]
    fn test_status_distribution_scenario() {
        // 2 orders in the window: 50% Completed, 50% Pending.
        let orders = vec![
            order("Latte", 2, 8.5, "Completed", 11),
            order("Espresso", 1, 3.0, "Pending", 10),
        ];
        let statuses = status_distribution(&orders);
        assert_eq!(
            statuses,
            vec![
                ("Completed".to_string(), 1),
                ("Pending".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_quantity_histogram_bins() {
        let orders = vec![
            order("Latte", 2, 8.0, "Completed", 9),
            order("Latte", 2, 8.0, "Completed", 10),
            order("Espresso", 1, 3.0, "Pending", 9),
        ];
        let histogram = quantity_histogram(&orders);
        assert_eq!(histogram.bins, vec![(1, 1), (2, 2)]);
        assert!(!histogram.density.is_empty());
        // Density stays finite and non-negative across the curve.
        assert!(histogram.density.iter().all(|(_, d)| d.is_finite() && *d >= 0.0));
    }

    #[test]
    fn test_quantity_histogram_handles_constant_input() {
        let orders = vec![
            order("Latte", 2, 8.0, "Completed", 9),
            order("Latte", 2, 8.0, "Completed", 10),
        ];
        let histogram = quantity_histogram(&orders);
        assert!(histogram.density.iter().all(|(_, d)| d.is_finite()));
    }

    #[test]
    fn test_hour_type_pivot_totals() {
        let orders = vec![
            order("Latte", 1, 8.0, "Completed", 9),
            order("Latte", 1, 8.0, "Completed", 9),
            order("Espresso", 1, 3.0, "Pending", 9),
            order("Latte", 1, 8.0, "Completed", 14),
        ];
        let grid = hour_type_pivot(&orders);
        assert_eq!(grid.hours, vec![9, 14]);
        assert_eq!(grid.types, vec!["Espresso".to_string(), "Latte".to_string()]);
        assert_eq!(grid.counts, vec![vec![1, 2], vec![0, 1]]);

        // Grid total equals the raw row count.
        let total: u64 = grid.counts.iter().flatten().sum();
        assert_eq!(total, orders.len() as u64);
        assert_eq!(grid.max_count(), 2);
    }

    #[test]
    fn test_empty_input_aggregations() {
        let orders: Vec<Order> = Vec::new();
        assert!(average_price_by_type(&orders).is_empty());
        assert!(order_count_by_type(&orders).is_empty());
        assert!(status_distribution(&orders).is_empty());
        assert!(quantity_histogram(&orders).bins.is_empty());
        assert!(hour_type_pivot(&orders).is_empty());
    }
}
