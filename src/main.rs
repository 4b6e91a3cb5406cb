use actix_cors::Cors;
use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;

mod api;
mod clock;
mod config;
mod db;
mod docs;
mod error;
mod face;
mod model;
mod routes;
mod scheduler;
mod service;
mod store;

use config::Config;
use db::{init_db, run_migrations, verify_schema};

use crate::clock::SystemClock;
use crate::docs::ApiDoc;
use crate::face::encoder::RemoteFaceEncoder;
use crate::routes::RateLimits;
use crate::scheduler::Scheduler;
use crate::service::AttendanceService;
use crate::store::MySqlStore;
use tracing::{error, info};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "FaceTrack Backend Running Successfully"
}

fn io_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env().map_err(io_error)?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "facetrack.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url, config.db_max_connections)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to connect to database");
            io_error(e)
        })?;

    if config.run_migrations {
        run_migrations(&pool).await.map_err(|e| {
            error!(error = %e, "Failed to apply migrations");
            io_error(e)
        })?;
    }

    verify_schema(&pool).await.map_err(|e| {
        error!(error = %e, "Database schema check failed");
        io_error(e)
    })?;

    let encoder = RemoteFaceEncoder::new(
        &config.face_service_url,
        Duration::from_secs(config.face_service_timeout_secs),
    )
    .map_err(io_error)?;

    let clock = Arc::new(SystemClock);
    let service = AttendanceService::new(
        Arc::new(MySqlStore::new(pool)),
        Arc::new(encoder),
        clock.clone(),
        config.match_threshold,
    );

    // No daily jobs yet; the absentee sweep is not enabled.
    let _scheduler = Scheduler::new(Vec::new(), clock).start();

    info!(
        addr = %config.server_addr,
        threshold = config.match_threshold,
        "Listening"
    );

    let server_addr = config.server_addr.clone();
    let limits = RateLimits::new(config.rate_limit_per_min);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(service.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, &config, &limits))
    })
    .bind(server_addr)?
    .run()
    .await
}
