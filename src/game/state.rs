//! ゲーム状態管理モジュール
//! もぐらたたきゲームの全体的な状態（盤面、スコア、進行状態）と
//! タイマー発火・プレイヤークリックの競合解決を管理する。

use super::board::Board;
use super::rules::GameRules;
use super::types::{CellStatus, Position, Winner};
use crate::picker::CellPicker;
use crate::render::GameObserver;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ゲームの進行状態を表すenum
/// 明示的な状態機械でタイマーの二重起動を構造的に防ぐ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// タイマー停止中（開始前または手動停止後）
    Idle,
    /// タイマー稼働中
    Running,
    /// ゲーム終了（winner: Noneは引き分け）
    Finished { winner: Option<Winner> },
}

/// タイマー発火1回分の処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// 停止中または終了後の発火で何も起きなかった
    Ignored,
    /// 新しいセルが点灯した（前回の点灯セルはプレイヤーが獲得済み）
    Activated { position: Position },
    /// AIが前回のセルを獲得し、新しいセルが点灯した
    AiClaimed { claimed: Position, activated: Position },
    /// この発火でゲームが終了した
    Finished { winner: Option<Winner> },
}

/// プレイヤークリック1回分の処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// 点灯セル以外へのクリックで何も起きなかった
    Ignored,
    /// プレイヤーがセルを獲得した
    Claimed { position: Position },
    /// この獲得でゲームが終了した
    Finished { winner: Winner },
}

/// もぐらたたきゲームの全体状態を保持する構造体
/// 盤面を所有し、スコアと点灯セルへの参照を一元管理する。
/// BoardとCellはスコアに触れず、全ての調整はこの型のメソッドを通る
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub board: Board,
    pub player_score: u32,
    pub ai_score: u32,
    pub status: GameStatus,
    pub active_cell: Option<Position>,
    pub tick_interval_ms: u64,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Game {
    /// 新しいゲームを作成する
    /// 初期状態: Idle、スコア0、点灯セルなし
    pub fn new(width: usize, height: usize, tick_interval_ms: u64) -> Self {
        Self::new_with_id(Uuid::new_v4(), width, height, tick_interval_ms)
    }

    /// 指定IDで新しいゲームを作成する
    /// テストや特定のIDが必要な場合に使用
    pub fn new_with_id(id: Uuid, width: usize, height: usize, tick_interval_ms: u64) -> Self {
        Self {
            id,
            board: Board::new(width, height),
            player_score: 0,
            ai_score: 0,
            status: GameStatus::Idle,
            active_cell: None,
            tick_interval_ms,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    /// 勝利に必要なスコアを返す
    pub fn winning_score(&self) -> u32 {
        GameRules::winning_score(self.board.total_cells())
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, GameStatus::Running)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    /// 決定済みの勝者を返す（終了前はNone）
    pub fn winner(&self) -> Option<Winner> {
        match self.status {
            GameStatus::Finished { winner } => winner,
            _ => None,
        }
    }

    /// ゲームを開始する
    /// 盤面・スコア・点灯セル・勝者を全てリセットしてRunningへ遷移する。
    /// 実行中の再開始も同じ経路を通り、タイマーの差し替えは呼び出し側が行う
    pub fn start(&mut self, tick_interval_ms: u64) {
        self.board.reset_all();
        self.player_score = 0;
        self.ai_score = 0;
        self.active_cell = None;
        self.tick_interval_ms = tick_interval_ms;
        self.status = GameStatus::Running;
        self.last_updated = Utc::now();
    }

    /// ゲームを停止する
    /// 停止済み・終了済みの場合は何もしない
    pub fn stop(&mut self) {
        if self.is_running() {
            self.status = GameStatus::Idle;
            self.last_updated = Utc::now();
        }
    }

    /// タイマー発火1回分を処理する
    ///
    /// 前回の点灯セルが残っていればAIが獲得してスコアを加算し、勝敗を評価する。
    /// 続行する場合は利用可能セルから1つ抽選して点灯する。
    /// 利用可能セルが尽きた場合は明示的に引き分けで終了する
    pub fn tick(&mut self, picker: &dyn CellPicker, observer: &dyn GameObserver) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }

        let mut claimed = None;
        if let Some(position) = self.active_cell.take() {
            // プレイヤーが前回の発火から獲得していないのでAIが獲得する
            if let Some(cell) = self.board.cell_at_mut(position) {
                cell.claim_by_ai();
            }
            self.ai_score += 1;
            claimed = Some(position);

            observer.cell_changed(position, CellStatus::ClaimedByAi);
            observer.score_changed(self.player_score, self.ai_score);

            if let Some(winner) = self.evaluate_winner(observer) {
                // 勝敗決定時は新しいセルを点灯させずに打ち切る
                return TickOutcome::Finished {
                    winner: Some(winner),
                };
            }
        }

        let available = self.board.available_positions();
        if available.is_empty() {
            // 利用可能セルが尽きた: 明示的なステイルメイト終了
            self.finish(None, observer);
            return TickOutcome::Finished { winner: None };
        }

        let index = picker.pick(available.len());
        let position = available[index % available.len()];
        if let Some(cell) = self.board.cell_at_mut(position) {
            cell.available = false;
            cell.activate();
        }
        self.active_cell = Some(position);
        self.last_updated = Utc::now();

        observer.cell_changed(position, CellStatus::Active);

        match claimed {
            Some(claimed) => TickOutcome::AiClaimed {
                claimed,
                activated: position,
            },
            None => TickOutcome::Activated { position },
        }
    }

    /// プレイヤークリック1回分を処理する
    ///
    /// 点灯中のセルと完全一致した場合のみプレイヤーが獲得する。
    /// それ以外のクリック（点灯セルなしを含む）はエラーにせず無視する
    pub fn handle_player_click(
        &mut self,
        position: Position,
        observer: &dyn GameObserver,
    ) -> ClickOutcome {
        if !self.is_running() {
            return ClickOutcome::Ignored;
        }

        match self.active_cell {
            Some(active) if active == position => {
                if let Some(cell) = self.board.cell_at_mut(position) {
                    cell.claim_by_player();
                }
                self.player_score += 1;
                self.active_cell = None;
                self.last_updated = Utc::now();

                observer.cell_changed(position, CellStatus::ClaimedByPlayer);
                observer.score_changed(self.player_score, self.ai_score);

                match self.evaluate_winner(observer) {
                    Some(winner) => ClickOutcome::Finished { winner },
                    None => ClickOutcome::Claimed { position },
                }
            }
            _ => ClickOutcome::Ignored,
        }
    }

    /// 勝敗を評価し、決定していれば終了状態へ遷移する
    /// 戻り値で呼び出し側に打ち切りを通知する
    fn evaluate_winner(&mut self, observer: &dyn GameObserver) -> Option<Winner> {
        let winner =
            GameRules::decide_winner(self.player_score, self.ai_score, self.winning_score())?;
        self.finish(Some(winner), observer);
        Some(winner)
    }

    fn finish(&mut self, winner: Option<Winner>, observer: &dyn GameObserver) {
        self.status = GameStatus::Finished { winner };
        self.active_cell = None;
        self.last_updated = Utc::now();
        observer.winner_decided(winner);
    }
}
