use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(config).map_err(std::io::Error::other)?;

    let analysis_service = web::Data::from(state.analysis_service);
    let recommendation_engine = web::Data::from(state.recommendation_engine);
    let upload = web::Data::new(state.upload);

    tracing::info!("Starting Eco Analysis server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(analysis_service.clone())
            .app_data(recommendation_engine.clone())
            .app_data(upload.clone())
            .configure(api::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
