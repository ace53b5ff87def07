//! アプリケーション全体のエラー定義モジュール
//! ゲームロジック、セッション管理などのエラーを統一管理。

use thiserror::Error;
use uuid::Uuid;

/// ゲームロジックとセッション管理に関連するエラー
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: Uuid },

    #[error("Game is not running")]
    GameNotRunning,

    #[error("Game already finished")]
    GameFinished,

    #[error("Invalid cell position: ({x}, {y})")]
    InvalidCell { x: usize, y: usize },

    #[error("Invalid board size: {width}x{height}")]
    InvalidBoardSize { width: usize, height: usize },

    #[error("Invalid tick interval: {interval_ms}ms (minimum: {min_ms}ms)")]
    InvalidTickInterval { interval_ms: u64, min_ms: u64 },

    #[error("Session limit exceeded (max: {max})")]
    SessionLimitExceeded { max: usize },
}

/// ゲームエラーをベースとした結果型
pub type Result<T> = std::result::Result<T, GameError>;
