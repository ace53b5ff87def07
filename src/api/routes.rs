//! もぐらたたきAPIルート

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::config::ServerConfig;

use super::handlers;
use super::middleware::{cors, logging};
use super::service::GameService;

pub fn create_router(service: Arc<GameService>, server: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/api/games", post(handlers::create_game))
        .route("/api/games/difficulties", get(handlers::get_difficulties))
        .route("/api/games/sessions", get(handlers::get_sessions))
        .route("/api/games/:game_id", get(handlers::get_game_state))
        .route("/api/games/:game_id", delete(handlers::delete_game))
        .route("/api/games/:game_id/start", post(handlers::start_game))
        .route("/api/games/:game_id/stop", post(handlers::stop_game))
        .route("/api/games/:game_id/click", post(handlers::click_cell))
        .route("/health", get(health_check))
        .with_state(service);

    if server.enable_cors {
        router = router.layer(middleware::from_fn(cors));
    }
    if server.enable_logging {
        router = router.layer(middleware::from_fn(logging));
    }

    router
}

async fn health_check() -> &'static str {
    "Whack-a-Mole API Server is running"
}
