//! mentor-scheduler entry point.
//!
//! Startup order:
//! 1. Load and validate configuration.
//! 2. Initialise tracing (JSON in production, pretty otherwise).
//! 3. Connect to PostgreSQL and migrate, or fall back to in-memory stores
//!    with the mentor directory seeded from a file.
//! 4. Build the router and serve with graceful shutdown.

use std::future::Future;
use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mentor_scheduler::adapters::http::{api_router, AppPorts};
use mentor_scheduler::adapters::{
    InMemoryAvailabilityStore, InMemoryMentorDirectory, InMemorySessionStore,
    PostgresAvailabilityStore, PostgresMentorLookup, PostgresSessionStore,
};
use mentor_scheduler::config::{AppConfig, DatabaseConfig, MentorsConfig, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let config = AppConfig::load()?;
    config.validate()?;

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    init_tracing(&config.server);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "mentor-scheduler starting"
    );

    // ── 3. Stores ──────────────────────────────────────────────────────────────
    let ports = match &config.database {
        Some(database) => postgres_ports(database).await?,
        None => in_memory_ports(&config.mentors).await?,
    };

    // ── 4. HTTP server with graceful shutdown ──────────────────────────────────
    let settings = config.scheduling.settings()?;
    let app = with_transport_layers(api_router(&ports, &settings), &config.server);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("mentor-scheduler stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured directive.
fn init_tracing(server: &ServerConfig) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match server.log_level.parse::<EnvFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!(
                    "WARN: log level '{}' is not a valid tracing filter ({}); falling back to 'info'",
                    server.log_level, e
                );
                EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    if server.is_production() {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }
}

async fn postgres_ports(database: &DatabaseConfig) -> anyhow::Result<AppPorts> {
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .connect(&database.url)
        .await?;
    info!(max_connections = database.max_connections, "database pool ready");

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database migrations applied");
    }

    Ok(AppPorts {
        mentors: Arc::new(PostgresMentorLookup::new(pool.clone())),
        availability: Arc::new(PostgresAvailabilityStore::new(pool.clone())),
        sessions: Arc::new(PostgresSessionStore::new(pool)),
    })
}

async fn in_memory_ports(mentors: &MentorsConfig) -> anyhow::Result<AppPorts> {
    let seed = mentors.load_seed()?;
    let directory = InMemoryMentorDirectory::new();
    for mentor in seed.iter().cloned() {
        directory.upsert(mentor).await;
    }
    warn!(
        mentors = seed.len(),
        "no database configured; using in-memory stores, data is lost on restart"
    );

    Ok(AppPorts {
        mentors: Arc::new(directory),
        availability: Arc::new(InMemoryAvailabilityStore::new()),
        sessions: Arc::new(InMemorySessionStore::new()),
    })
}

fn with_transport_layers(router: Router, server: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = if origins.is_empty() && !server.is_production() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    router
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = signal_or_never("CTRL+C", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = signal_or_never("SIGTERM", async {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())?.recv().await;
        Ok::<(), std::io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}

/// Waits for `signal`. A handler that failed to install never fires.
async fn signal_or_never<E: std::fmt::Display>(
    name: &str,
    signal: impl Future<Output = Result<(), E>>,
) {
    if let Err(e) = signal.await {
        warn!(signal = name, error = %e, "failed to install signal handler");
        std::future::pending::<()>().await;
    }
}
