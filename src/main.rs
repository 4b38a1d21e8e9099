use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use coffeecity_dashboard::{
    config::Config,
    external::PinotClient,
    handlers::{self, api},
    middlewares::create_cors,
    services::DashboardService,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pinot_client =
        PinotClient::new(&config.pinot).expect("Failed to create Pinot broker client");
    let dashboard_service = DashboardService::new(pinot_client, config.dashboard.clone());

    log::info!(
        "Starting HTTP server at {}:{} (Pinot broker: {}://{}:{})",
        config.server.host,
        config.server.port,
        config.pinot.scheme,
        config.pinot.host,
        config.pinot.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(dashboard_service.clone()))
            .configure(swagger_config)
            .configure(handlers::dashboard_config)
            .route("/health", web::get().to(api::health))
            .service(web::scope("/api/v1").configure(handlers::api_config))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
