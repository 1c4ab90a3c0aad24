pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod forms;
pub mod models;
pub mod ranking;
pub mod routes;
pub mod store;
pub mod templates;
pub mod tmdb;

use std::sync::Arc;

use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::MovieStore, tmdb::TmdbClient};

/// Handles shared by every request handler.
pub struct AppState {
    pub store: MovieStore,
    pub tmdb: Arc<TmdbClient>,
}

impl AppState {
    pub fn new(config: &Config, db: DatabaseConnection) -> anyhow::Result<Self> {
        let http = wreq::Client::builder().user_agent("topmovies/0.1").build()?;

        let tmdb = TmdbClient::new(
            http,
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
            config.tmdb_image_url.clone(),
        );

        Ok(Self { store: MovieStore::new(db), tmdb: Arc::new(tmdb) })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/edit", get(routes::edit_form).post(routes::edit_submit))
        .route("/delete", get(routes::delete))
        .route("/add", get(routes::add_form).post(routes::add_submit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
