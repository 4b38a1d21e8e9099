use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::api::recent_orders,
        handlers::api::chart_summary,
    ),
    components(
        schemas(
            OrderRow,
            DashboardQuery,
            TypeAverage,
            TypeCount,
            StatusSlice,
            HeatmapCell,
            ChartSummary,
            ApiError,
        )
    ),
    tags(
        (name = "orders", description = "Recent orders API"),
        (name = "charts", description = "Chart aggregates API"),
    ),
    info(
        title = "CoffeeCity Dashboard API",
        version = "1.0.0",
        description = "JSON endpoints behind the coffee-shop analytics dashboard"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
