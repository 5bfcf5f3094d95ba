use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use theatre_system::{
    AppState,
    config::Config,
    database::Database,
    controllers,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Theatre API");

    // Connect to the database
    let db = Database::new(&config.database.url, config.database.pool_size)
        .await
        .expect("Failed to connect to database");
    info!("Database connected");

    // Run migrations
    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    // Create the shared application state
    let app_state = Arc::new(AppState { db: db.clone(), config: config.clone() });

    // --- Start the web server ---

    // Create the main router
    let app = Router::new()
        .route("/", get(|| async { "Theatre API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        // Mount the routes from the controllers module
        .nest("/api", controllers::routes())
        // Pass the application state to the router
        .with_state(app_state.clone())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.app.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
