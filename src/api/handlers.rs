//! もぐらたたきAPIハンドラー

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::dto::{
    ClickRequest, ClickResponse, CreateGameRequest, DifficultiesResponse, ErrorResponse,
    GameResponse, SessionListResponse, StartGameRequest,
};
use super::service::GameService;

pub async fn create_game(
    State(service): State<Arc<GameService>>,
    Json(request): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameResponse>), (StatusCode, Json<ErrorResponse>)> {
    match service.create_game(request.difficulty, request.width, request.height) {
        Ok(response) => Ok((StatusCode::CREATED, Json(response))),
        Err(err) => Err(err.into()),
    }
}

pub async fn get_game_state(
    State(service): State<Arc<GameService>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, (StatusCode, Json<ErrorResponse>)> {
    match service.get_game_state(game_id) {
        Ok(response) => Ok(Json(response)),
        Err(err) => Err(err.into()),
    }
}

pub async fn get_difficulties() -> Json<DifficultiesResponse> {
    Json(DifficultiesResponse::new())
}

pub async fn start_game(
    State(service): State<Arc<GameService>>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<StartGameRequest>,
) -> Result<Json<GameResponse>, (StatusCode, Json<ErrorResponse>)> {
    match service.start_game(game_id, request.difficulty, request.tick_interval_ms) {
        Ok(response) => Ok(Json(response)),
        Err(err) => Err(err.into()),
    }
}

pub async fn stop_game(
    State(service): State<Arc<GameService>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, (StatusCode, Json<ErrorResponse>)> {
    match service.stop_game(game_id) {
        Ok(response) => Ok(Json(response)),
        Err(err) => Err(err.into()),
    }
}

pub async fn click_cell(
    State(service): State<Arc<GameService>>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<ClickRequest>,
) -> Result<Json<ClickResponse>, (StatusCode, Json<ErrorResponse>)> {
    match service.click(game_id, request.x, request.y) {
        Ok(response) => Ok(Json(response)),
        Err(err) => Err(err.into()),
    }
}

pub async fn delete_game(
    State(service): State<Arc<GameService>>,
    Path(game_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match service.delete_session(game_id) {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(err) => Err(err.into()),
    }
}

pub async fn get_sessions(
    State(service): State<Arc<GameService>>,
) -> Json<SessionListResponse> {
    Json(service.list_sessions())
}
