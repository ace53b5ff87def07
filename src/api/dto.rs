//! もぐらたたきAPI データ転送オブジェクト (DTO)

use axum::{http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GameError;
use crate::game::{CellStatus, Difficulty, Game, GameStatus, Winner};
use crate::session::GameSession;

/// 盤面セルのJSON表現コード
/// 0=未点灯, 1=点灯中, 2=プレイヤー獲得, 3=AI獲得
pub fn cell_code(status: CellStatus) -> u8 {
    match status {
        CellStatus::Idle => 0,
        CellStatus::Active => 1,
        CellStatus::ClaimedByPlayer => 2,
        CellStatus::ClaimedByAi => 3,
    }
}

/// ゲーム進行状態のJSON表現
pub fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle => "idle",
        GameStatus::Running => "running",
        GameStatus::Finished {
            winner: Some(Winner::Player),
        } => "finished_player_wins",
        GameStatus::Finished {
            winner: Some(Winner::Ai),
        } => "finished_ai_wins",
        GameStatus::Finished { winner: None } => "finished_draw",
    }
}

pub fn validate_board_size(
    width: usize,
    height: usize,
    max_width: usize,
    max_height: usize,
) -> Result<(), GameError> {
    if width == 0 || height == 0 || width > max_width || height > max_height {
        return Err(GameError::InvalidBoardSize { width, height });
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub difficulty: Option<Difficulty>,
    pub width: Option<usize>,
    pub height: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    pub difficulty: Option<Difficulty>,
    pub tick_interval_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub game_id: Uuid,
    pub width: usize,
    pub height: usize,
    pub board: Vec<Vec<u8>>,
    pub status: &'static str,
    pub player_score: u32,
    pub ai_score: u32,
    pub winning_score: u32,
    pub tick_interval_ms: u64,
    pub active_cell: Option<[usize; 2]>,
    pub available_count: usize,
    pub difficulty: Difficulty,
}

impl GameResponse {
    pub fn from_session(session: &GameSession) -> Self {
        Self::from_game(&session.game, session.difficulty)
    }

    pub fn from_game(game: &Game, difficulty: Difficulty) -> Self {
        let width = game.board.width();
        let height = game.board.height();

        let mut board = vec![vec![0u8; width]; height];
        for cell in game.board.cells() {
            board[cell.y][cell.x] = cell_code(cell.status);
        }

        Self {
            game_id: game.id,
            width,
            height,
            board,
            status: status_label(game.status),
            player_score: game.player_score,
            ai_score: game.ai_score,
            winning_score: game.winning_score(),
            tick_interval_ms: game.tick_interval_ms,
            active_cell: game.active_cell.map(|p| [p.x, p.y]),
            available_count: game.board.available_count(),
            difficulty,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub success: bool,
    pub claimed: bool,
    pub game_state: GameResponse,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummary>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub game_id: Uuid,
    pub difficulty: Difficulty,
    pub status: &'static str,
    pub player_score: u32,
    pub ai_score: u32,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl SessionSummary {
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            game_id: session.id,
            difficulty: session.difficulty,
            status: status_label(session.game.status),
            player_score: session.game.player_score,
            ai_score: session.game.ai_score,
            created_at: session.created_at,
            last_activity: session.last_activity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DifficultyInfo {
    pub id: Difficulty,
    pub name: &'static str,
    pub description: &'static str,
    pub tick_interval_ms: u64,
}

impl From<Difficulty> for DifficultyInfo {
    fn from(difficulty: Difficulty) -> Self {
        Self {
            id: difficulty,
            name: difficulty.name(),
            description: difficulty.description(),
            tick_interval_ms: difficulty.tick_interval_ms(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DifficultiesResponse {
    pub difficulties: Vec<DifficultyInfo>,
}

impl DifficultiesResponse {
    pub fn new() -> Self {
        Self {
            difficulties: Difficulty::all()
                .into_iter()
                .map(DifficultyInfo::from)
                .collect(),
        }
    }
}

impl Default for DifficultiesResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

impl GameError {
    pub fn error_code(&self) -> &'static str {
        match self {
            GameError::GameNotFound { .. } => "GAME_NOT_FOUND",
            GameError::GameNotRunning => "GAME_NOT_RUNNING",
            GameError::GameFinished => "GAME_FINISHED",
            GameError::InvalidCell { .. } => "INVALID_CELL",
            GameError::InvalidBoardSize { .. } => "INVALID_BOARD_SIZE",
            GameError::InvalidTickInterval { .. } => "INVALID_TICK_INTERVAL",
            GameError::SessionLimitExceeded { .. } => "SESSION_LIMIT_EXCEEDED",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GameError::GameNotFound { .. } => StatusCode::NOT_FOUND,
            GameError::GameNotRunning => StatusCode::BAD_REQUEST,
            GameError::GameFinished => StatusCode::CONFLICT,
            GameError::InvalidCell { .. } => StatusCode::BAD_REQUEST,
            GameError::InvalidBoardSize { .. } => StatusCode::BAD_REQUEST,
            GameError::InvalidTickInterval { .. } => StatusCode::BAD_REQUEST,
            GameError::SessionLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl From<GameError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: GameError) -> Self {
        let status_code = err.status_code();
        let error_response = ErrorResponse::new(err.error_code(), err.to_string());

        (status_code, Json(error_response))
    }
}
