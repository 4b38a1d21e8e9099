use actix_web::{web, HttpResponse, ResponseError, Result};
use chrono::Utc;
use serde_json::json;

use crate::models::*;
use crate::services::{self, DashboardService};

#[utoipa::path(
    get,
    path = "/orders/recent",
    tag = "orders",
    params(
        ("coffee_type" = Option<String>, Query, description = "Coffee type or \"All\""),
        ("start_date" = Option<String>, Query, description = "Lower bound, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Orders in the 24-hour window", body = [OrderRow]),
        (status = 400, description = "Invalid start_date"),
        (status = 502, description = "Analytical store unreachable")
    )
)]
pub async fn recent_orders(
    service: web::Data<DashboardService>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse> {
    let now = Utc::now();
    let filter = query.coffee_filter();
    let start = match query.start_datetime(now) {
        Ok(start) => start,
        Err(e) => return Ok(e.error_response()),
    };

    match service.load_window(&filter, start, now).await {
        Ok(window) => {
            let rows: Vec<OrderRow> = window.iter().map(OrderRow::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(rows)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/charts/summary",
    tag = "charts",
    params(
        ("coffee_type" = Option<String>, Query, description = "Coffee type or \"All\""),
        ("start_date" = Option<String>, Query, description = "Lower bound, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Aggregates behind the five charts", body = ChartSummary),
        (status = 400, description = "Invalid start_date"),
        (status = 502, description = "Analytical store unreachable")
    )
)]
pub async fn chart_summary(
    service: web::Data<DashboardService>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse> {
    let now = Utc::now();
    let filter = query.coffee_filter();
    let start = match query.start_datetime(now) {
        Ok(start) => start,
        Err(e) => return Ok(e.error_response()),
    };

    match service.load_window(&filter, start, now).await {
        Ok(window) => {
            let summary = summarize(&window, now - chrono::Duration::hours(24));
            Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

fn summarize(window: &[Order], window_start: chrono::DateTime<Utc>) -> ChartSummary {
    let total = window.len() as f64;
    let status_distribution = services::status_distribution(window)
        .into_iter()
        .map(|(status, n)| StatusSlice {
            status,
            order_count: n,
            percentage: if total > 0.0 {
                n as f64 / total * 100.0
            } else {
                0.0
            },
        })
        .collect();

    let grid = services::hour_type_pivot(window);
    let mut heatmap = Vec::new();
    for (r, hour) in grid.hours.iter().enumerate() {
        for (c, coffee_type) in grid.types.iter().enumerate() {
            heatmap.push(HeatmapCell {
                hour: *hour,
                coffee_type: coffee_type.clone(),
                order_count: grid.counts[r][c],
            });
        }
    }

    ChartSummary {
        window_start,
        order_count: window.len(),
        average_price_by_type: services::average_price_by_type(window)
            .into_iter()
            .map(|(coffee_type, average_price)| TypeAverage {
                coffee_type,
                average_price,
            })
            .collect(),
        order_count_by_type: services::order_count_by_type(window)
            .into_iter()
            .map(|(coffee_type, order_count)| TypeCount {
                coffee_type,
                order_count,
            })
            .collect(),
        status_distribution,
        heatmap,
    }
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/orders").route("/recent", web::get().to(recent_orders)))
        .service(web::scope("/charts").route("/summary", web::get().to(chart_summary)));
}
