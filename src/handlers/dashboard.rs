use actix_web::{web, HttpResponse};
use chrono::{Duration, Utc};

use crate::charts;
use crate::error::AppResult;
use crate::models::{DashboardQuery, Order};
use crate::services::DashboardService;
use crate::views::{self, ChartSet};

/// `GET /` — the whole pipeline runs once per page load: fetch,
/// filter, 24-hour cut, five charts, one HTML document.
pub async fn index(
    service: web::Data<DashboardService>,
    query: web::Query<DashboardQuery>,
) -> HttpResponse {
    let now = Utc::now();
    let settings = service.settings();

    let filter = query.coffee_filter();
    let start = match query.start_datetime(now) {
        Ok(start) => start,
        Err(e) => {
            // The page falls back to the default range; the API rejects instead.
            log::warn!("Ignoring invalid start_date: {e}");
            now - Duration::hours(24)
        }
    };

    let window = match service.load_window(&filter, start, now).await {
        Ok(window) => window,
        Err(e) => {
            log::error!("Dashboard fetch failed: {e}");
            return html(views::render_failure(settings));
        }
    };

    let charts = match build_charts(&window, settings) {
        Ok(charts) => charts,
        Err(e) => {
            log::error!("Chart rendering failed: {e}");
            return html(views::render_failure(settings));
        }
    };

    let selected_date = query
        .start_date
        .clone()
        .unwrap_or_else(|| start.date_naive().format("%Y-%m-%d").to_string());
    html(views::render_dashboard(
        settings,
        &filter,
        &selected_date,
        now.date_naive(),
        &window,
        &charts,
    ))
}

fn build_charts(
    window: &[Order],
    settings: &crate::config::DashboardSettings,
) -> AppResult<ChartSet> {
    let palette = charts::Palette::from_hex(&settings.palette);
    let status_palette = charts::Palette::from_hex(&settings.status_palette);
    Ok(ChartSet {
        price: charts::average_price_chart(window, &palette)?,
        quantity: charts::quantity_chart(window, &palette)?,
        status: charts::status_chart(window, &status_palette)?,
        count: charts::order_count_chart(window, &palette)?,
        heatmap: charts::heatmap_chart(window)?,
    })
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub fn dashboard_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}
