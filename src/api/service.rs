//! もぐらたたきゲームサービス
//! セッション操作とタイマータスクの起動・停止を束ねる層。
//! タイマーハンドルをゲームIDごとに1つだけ保持し、二重起動を防ぐ。

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use uuid::Uuid;

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::game::{ClickOutcome, Difficulty, GameStatus, Position, TickOutcome};
use crate::picker::{CellPicker, RandomPicker};
use crate::render::{GameObserver, NullObserver};
use crate::session::GameSessionManager;

use super::dto::{
    validate_board_size, ClickResponse, GameResponse, SessionSummary, SessionListResponse,
};

/// 登録済みタイマー1本分のエントリ
/// 世代番号でタスク自身による削除を自分の登録だけに限定する
struct TickerEntry {
    generation: u64,
    handle: JoinHandle<()>,
}

pub struct GameService {
    session_manager: Arc<GameSessionManager>,
    picker: Arc<dyn CellPicker>,
    observer: Arc<dyn GameObserver>,
    /// ゲームIDごとの稼働中タイマーハンドル
    /// 起動時は必ず既存ハンドルをabortしてから登録する
    tickers: DashMap<Uuid, TickerEntry>,
    ticker_generation: AtomicU64,
    config: GameConfig,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService")
            .field("session_manager", &self.session_manager)
            .field("picker", &self.picker.name())
            .field("active_tickers", &self.tickers.len())
            .finish()
    }
}

impl GameService {
    pub fn new(session_manager: Arc<GameSessionManager>, config: GameConfig) -> Self {
        Self {
            session_manager,
            picker: Arc::new(RandomPicker::new()),
            observer: Arc::new(NullObserver),
            tickers: DashMap::new(),
            ticker_generation: AtomicU64::new(0),
            config,
        }
    }

    /// 抽選器とオブザーバを差し替えてサービスを作成する
    /// テストでは決定的な抽選器を注入する
    pub fn new_with_picker(
        session_manager: Arc<GameSessionManager>,
        config: GameConfig,
        picker: Arc<dyn CellPicker>,
        observer: Arc<dyn GameObserver>,
    ) -> Self {
        Self {
            session_manager,
            picker,
            observer,
            tickers: DashMap::new(),
            ticker_generation: AtomicU64::new(0),
            config,
        }
    }

    /// 新しいゲームを作成する
    /// 盤面サイズ未指定時は設定のデフォルト値を使用する
    pub fn create_game(
        &self,
        difficulty: Option<Difficulty>,
        width: Option<usize>,
        height: Option<usize>,
    ) -> Result<GameResponse> {
        let difficulty = difficulty.unwrap_or(self.config.default_difficulty);
        let width = width.unwrap_or(self.config.default_board_width);
        let height = height.unwrap_or(self.config.default_board_height);

        validate_board_size(
            width,
            height,
            self.config.max_board_width,
            self.config.max_board_height,
        )?;

        let session_id = self
            .session_manager
            .create_session(difficulty, width, height)?;
        let session = self.session_manager.get_session(&session_id)?;

        Ok(GameResponse::from_session(&session))
    }

    pub fn get_game_state(&self, session_id: Uuid) -> Result<GameResponse> {
        let session = self.session_manager.get_session(&session_id)?;
        Ok(GameResponse::from_session(&session))
    }

    /// ゲームを開始し、タイマータスクを起動する
    ///
    /// 間隔は明示指定 > 難易度指定 > セッションの現在難易度の順で決まる。
    /// 実行中・終了後の再開始も受け付け、古いタイマーは必ず破棄する
    pub fn start_game(
        self: &Arc<Self>,
        session_id: Uuid,
        difficulty: Option<Difficulty>,
        tick_interval_ms: Option<u64>,
    ) -> Result<GameResponse> {
        let session = self.session_manager.get_session(&session_id)?;

        let difficulty = difficulty.unwrap_or(session.difficulty);
        let interval_ms = tick_interval_ms.unwrap_or_else(|| difficulty.tick_interval_ms());

        if interval_ms < self.config.min_tick_interval_ms {
            return Err(GameError::InvalidTickInterval {
                interval_ms,
                min_ms: self.config.min_tick_interval_ms,
            });
        }

        // 古いタイマーを止めてからゲームを開始する
        self.abort_ticker(&session_id);

        let session = self.session_manager.with_session_mut(&session_id, |session| {
            session.difficulty = difficulty;
            session.game.start(interval_ms);
            session.clone()
        })?;

        self.spawn_ticker(session_id, interval_ms);

        Ok(GameResponse::from_session(&session))
    }

    /// タイマータスクを起動してハンドルを登録する
    fn spawn_ticker(self: &Arc<Self>, session_id: Uuid, interval_ms: u64) {
        let generation = self.ticker_generation.fetch_add(1, Ordering::Relaxed);
        let service = Arc::clone(self);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
            // 最初の即時発火を捨て、1間隔後から点灯を始める
            ticker.tick().await;

            loop {
                ticker.tick().await;

                match service.run_tick(session_id) {
                    Ok(TickOutcome::Activated { .. }) | Ok(TickOutcome::AiClaimed { .. }) => {}
                    Ok(TickOutcome::Finished { .. }) | Ok(TickOutcome::Ignored) | Err(_) => {
                        // abort()は次のawaitまで効かないため、終了間際のタスクが
                        // 差し替え後の新しい登録を道連れにしないよう世代で照合する
                        service
                            .tickers
                            .remove_if(&session_id, |_, entry| entry.generation == generation);
                        break;
                    }
                }
            }
        });

        let entry = TickerEntry { generation, handle };
        if let Some(old) = self.tickers.insert(session_id, entry) {
            old.handle.abort();
        }
    }

    /// タイマー発火1回分をセッションロック下で処理する
    fn run_tick(&self, session_id: Uuid) -> Result<TickOutcome> {
        let picker = Arc::clone(&self.picker);
        let observer = Arc::clone(&self.observer);

        self.session_manager.with_session_mut(&session_id, |session| {
            session.game.tick(picker.as_ref(), observer.as_ref())
        })
    }

    /// ゲームを停止し、タイマータスクを破棄する
    pub fn stop_game(&self, session_id: Uuid) -> Result<GameResponse> {
        self.abort_ticker(&session_id);

        let session = self.session_manager.with_session_mut(&session_id, |session| {
            session.game.stop();
            session.clone()
        })?;

        Ok(GameResponse::from_session(&session))
    }

    /// プレイヤーのクリックを処理する
    ///
    /// 盤面外はエラー、点灯セル以外は成功扱いの空振りとして返す。
    /// この獲得でゲームが終了した場合はタイマーも破棄する
    pub fn click(&self, session_id: Uuid, x: usize, y: usize) -> Result<ClickResponse> {
        let observer = Arc::clone(&self.observer);

        let (outcome, session) = self
            .session_manager
            .with_session_mut(&session_id, |session| {
                if !session.game.board.contains(Position::new(x, y)) {
                    return Err(GameError::InvalidCell { x, y });
                }

                match session.game.status {
                    GameStatus::Finished { .. } => return Err(GameError::GameFinished),
                    GameStatus::Idle => return Err(GameError::GameNotRunning),
                    GameStatus::Running => {}
                }

                let outcome = session
                    .game
                    .handle_player_click(Position::new(x, y), observer.as_ref());
                Ok((outcome, session.clone()))
            })??;

        if matches!(outcome, ClickOutcome::Finished { .. }) {
            self.abort_ticker(&session_id);
        }

        let (claimed, message) = match outcome {
            ClickOutcome::Ignored => (false, Some("Missed".to_string())),
            ClickOutcome::Claimed { .. } => (true, None),
            ClickOutcome::Finished { .. } => (true, Some("Game finished".to_string())),
        };

        Ok(ClickResponse {
            success: true,
            claimed,
            game_state: GameResponse::from_session(&session),
            message,
        })
    }

    pub fn delete_session(&self, session_id: Uuid) -> Result<()> {
        self.abort_ticker(&session_id);
        self.session_manager.remove_session(&session_id)?;
        Ok(())
    }

    pub fn list_sessions(&self) -> SessionListResponse {
        let sessions: Vec<SessionSummary> = self
            .session_manager
            .list_sessions()
            .iter()
            .map(SessionSummary::from_session)
            .collect();
        let total_count = sessions.len();

        SessionListResponse {
            sessions,
            total_count,
        }
    }

    /// タイムアウトしたセッションとそのタイマーを破棄する
    pub fn cleanup_inactive_sessions(&self) -> usize {
        let removed = self.session_manager.cleanup_inactive_sessions();
        for session_id in &removed {
            self.abort_ticker(session_id);
        }
        removed.len()
    }

    pub fn get_service_stats(&self) -> ServiceStats {
        let session_stats = self.session_manager.get_stats();

        ServiceStats {
            total_sessions: session_stats.total_sessions,
            max_sessions: session_stats.max_sessions,
            running_count: session_stats.running_count,
            active_tickers: self.tickers.len(),
            difficulty_distribution: session_stats.difficulty_counts,
        }
    }

    fn abort_ticker(&self, session_id: &Uuid) {
        if let Some((_, entry)) = self.tickers.remove(session_id) {
            entry.handle.abort();
        }
    }
}

#[derive(Debug)]
pub struct ServiceStats {
    pub total_sessions: usize,
    pub max_sessions: usize,
    pub running_count: usize,
    pub active_tickers: usize,
    pub difficulty_distribution: std::collections::HashMap<Difficulty, usize>,
}
