mod cli;
mod core;
mod features;
mod modules;
mod shared;

use crate::cli::{Cli, Command};
use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::locations::{import, routes as locations_routes, LocationService};
use crate::features::shipments::{routes as shipments_routes, ShipmentService};
use crate::features::vehicles::{routes as vehicles_routes, VehicleService};
use crate::modules::proximity::{DistanceEvaluator, ProximityMatcher};
use axum::{middleware::from_fn, Router};
use clap::Parser;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli, worker_threads))
}

async fn async_main(cli: Cli, worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, pool, worker_threads).await,
        Command::Seed { csv, vehicles } => seed(pool, &csv, vehicles).await,
    }
}

/// Import the location CSV, then create `vehicles` random vehicles
async fn seed(pool: PgPool, csv_path: &Path, vehicles: usize) -> anyhow::Result<()> {
    let file = std::fs::File::open(csv_path)
        .map_err(|e| anyhow::anyhow!("Cannot open {}: {}", csv_path.display(), e))?;
    let parsed = import::read_locations(std::io::BufReader::new(file));
    tracing::info!(
        "Read {} locations from {} ({} rows skipped)",
        parsed.locations.len(),
        csv_path.display(),
        parsed.skipped
    );

    let location_service = Arc::new(LocationService::new(pool.clone()));
    let inserted = location_service.import(&parsed.locations).await?;
    tracing::info!(
        "Locations inserted: {}, already present: {}",
        inserted,
        parsed.locations.len() as u64 - inserted
    );

    if vehicles > 0 {
        let vehicle_service = VehicleService::new(pool, location_service);
        let created = vehicle_service.seed_fleet(vehicles).await?;
        tracing::info!("Vehicles created: {}", created);
    }

    Ok(())
}

async fn serve(config: Config, pool: PgPool, worker_threads: usize) -> anyhow::Result<()> {
    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    // Proximity matcher shared by the shipment service
    let evaluator = DistanceEvaluator::new(
        config.matching.proximity_threshold,
        config.matching.distance_unit,
    )?;
    let matcher = Arc::new(ProximityMatcher::new(evaluator));
    tracing::info!(
        "Proximity matching within {} {}",
        matcher.evaluator().threshold(),
        matcher.evaluator().unit()
    );

    let location_service = Arc::new(LocationService::new(pool.clone()));
    tracing::info!("Location service initialized");

    let vehicle_service = Arc::new(VehicleService::new(
        pool.clone(),
        Arc::clone(&location_service),
    ));
    tracing::info!("Vehicle service initialized");

    let shipment_service = Arc::new(ShipmentService::new(
        pool.clone(),
        Arc::clone(&location_service),
        Arc::clone(&vehicle_service),
        matcher,
    ));
    tracing::info!("Shipment service initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(locations_routes::routes(location_service))
        .merge(vehicles_routes::routes(vehicle_service))
        .merge(shipments_routes::routes(shipment_service))
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let listener = bind_listener(&addr)?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// TCP listener tuned through socket2
fn bind_listener(addr: &str) -> anyhow::Result<tokio::net::TcpListener> {
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    Ok(tokio::net::TcpListener::from_std(socket.into())?)
}
