use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;

use database::Database;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting todo API in {:?} mode", config.environment);

    let db = Database::connect(&config.database)
        .await
        .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));
    db.migrate()
        .await
        .unwrap_or_else(|e| panic!("failed to run schema migration: {}", e));

    let app = app(db);

    // Allow tests or deployments to override port via env
    let port = std::env::var("TODO_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8080);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("todo API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(db: Database) -> Router {
    let request_timeout = Duration::from_secs(config::config().api.request_timeout_secs);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_routes())
        // Bearer-token protected to-do routes
        .merge(todo_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(db)
}

fn auth_routes() -> Router<Database> {
    use handlers::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn todo_routes() -> Router<Database> {
    use handlers::todo;

    Router::new()
        .route("/todo", post(todo::create_todo).get(todo::list_todos))
        .route(
            "/todo/:todoID",
            get(todo::get_todo)
                .put(todo::update_todo)
                .delete(todo::delete_todo),
        )
        .route_layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Todo API (Rust)",
        "version": version,
        "endpoints": {
            "register": "POST /auth/register (public)",
            "login": "POST /auth/login (public)",
            "todos": "/todo[/:todoID] (bearer token required)",
        }
    }))
}

async fn health(
    axum::extract::State(db): axum::extract::State<Database>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match db.health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
