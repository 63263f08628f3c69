//! Web front end for the claw vault: serves the encrypt/decrypt forms and
//! relays submissions to the vault backend.

use axum::{
    routing::{get, post},
    Router,
};
use claw_frontend::VaultClient;

pub mod config;
pub mod middleware;
pub mod routes;
pub mod views;

#[derive(Clone)]
pub struct AppState {
    pub client: VaultClient,
}

impl AppState {
    pub fn new(config: &config::Config) -> Self {
        Self {
            client: VaultClient::new(config.backend_url.as_str()),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/encrypt", post(routes::encrypt))
        .route("/decrypt", post(routes::decrypt))
        .route("/vault/:id", get(routes::vault))
        .route("/privacy", get(routes::privacy))
        .route("/health", get(routes::health))
        .fallback(routes::not_found)
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_id))
}
