mod config;
mod db;
mod entities;
mod error;
mod models;
mod repo;
mod routes;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    repo::{DirectorRepo, GenreRepo, MovieRepo},
};

#[derive(Clone)]
pub struct AppState {
    pub movies: MovieRepo,
    pub directors: DirectorRepo,
    pub genres: GenreRepo,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            movies: MovieRepo::new(db.clone()),
            directors: DirectorRepo::new(db.clone()),
            genres: GenreRepo::new(db),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movie_catalog=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_init(&config.database_url, config.database_max_connections).await?;
    tracing::info!(database_url = %config.database_url, "database ready");

    let state = Arc::new(AppState::new(db));

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
