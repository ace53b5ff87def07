//! レンダラー境界の抽象化モジュール
//! コアはこのシンク経由でスコア更新・勝敗決定・セル状態変化を通知し、
//! 描画の実装（DOM、コンソール、APIレスポンスなど）には依存しない。

use crate::game::{CellStatus, Position, Winner};
use std::sync::Mutex;

/// ゲームからの通知を受け取る統一インターフェース
/// スコア変化と勝敗決定の時点でコアから同期的に呼び出される
pub trait GameObserver: Send + Sync {
    /// スコアが変化した（獲得の直後に毎回呼ばれる）
    fn score_changed(&self, player_score: u32, ai_score: u32);

    /// 勝敗が決定した。Noneは引き分け（ステイルメイト）を表す
    fn winner_decided(&self, winner: Option<Winner>);

    /// セルの視覚状態が変化した
    fn cell_changed(&self, position: Position, status: CellStatus);
}

/// 何も行わないオブザーバー
/// ヘッドレスでコアを動かす場合のデフォルト実装
#[derive(Debug, Clone, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {
    fn score_changed(&self, _player_score: u32, _ai_score: u32) {}

    fn winner_decided(&self, _winner: Option<Winner>) {}

    fn cell_changed(&self, _position: Position, _status: CellStatus) {}
}

/// 標準出力へ通知を書き出すオブザーバー
/// サーバー稼働時の動作確認用
#[derive(Debug, Clone, Default)]
pub struct LogObserver;

impl GameObserver for LogObserver {
    fn score_changed(&self, player_score: u32, ai_score: u32) {
        println!("スコア更新: プレイヤー {} - AI {}", player_score, ai_score);
    }

    fn winner_decided(&self, winner: Option<Winner>) {
        match winner {
            Some(winner) => println!("勝者決定: {}", winner.name()),
            None => println!("引き分け（利用可能セルなし）"),
        }
    }

    fn cell_changed(&self, position: Position, status: CellStatus) {
        println!("セル変化: ({}, {}) -> {:?}", position.x, position.y, status);
    }
}

/// ゲームからの通知イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged { player_score: u32, ai_score: u32 },
    WinnerDecided { winner: Option<Winner> },
    CellChanged { position: Position, status: CellStatus },
}

/// 通知を記録するテスト用オブザーバー
/// 受信したイベントを順番に保持し、検証に使用する
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<GameEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// 記録された全イベントのコピーを返す
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    /// 記録をクリアして返す
    pub fn take_events(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    /// 最後に通知された勝敗を返す
    pub fn last_winner(&self) -> Option<Option<Winner>> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|event| match event {
                GameEvent::WinnerDecided { winner } => Some(*winner),
                _ => None,
            })
    }

    /// 最後に通知されたスコアを返す
    pub fn last_score(&self) -> Option<(u32, u32)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|event| match event {
                GameEvent::ScoreChanged {
                    player_score,
                    ai_score,
                } => Some((*player_score, *ai_score)),
                _ => None,
            })
    }
}

impl GameObserver for RecordingObserver {
    fn score_changed(&self, player_score: u32, ai_score: u32) {
        self.events.lock().unwrap().push(GameEvent::ScoreChanged {
            player_score,
            ai_score,
        });
    }

    fn winner_decided(&self, winner: Option<Winner>) {
        self.events
            .lock()
            .unwrap()
            .push(GameEvent::WinnerDecided { winner });
    }

    fn cell_changed(&self, position: Position, status: CellStatus) {
        self.events
            .lock()
            .unwrap()
            .push(GameEvent::CellChanged { position, status });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_observer_is_silent() {
        let observer = NullObserver;

        // 何も起きないことだけ確認
        observer.score_changed(1, 2);
        observer.winner_decided(Some(Winner::Player));
        observer.cell_changed(Position::new(0, 0), CellStatus::Active);
    }

    #[test]
    fn test_recording_observer_records_in_order() {
        let observer = RecordingObserver::new();

        observer.cell_changed(Position::new(1, 1), CellStatus::Active);
        observer.score_changed(0, 1);
        observer.winner_decided(Some(Winner::Ai));

        let events = observer.events();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            GameEvent::CellChanged {
                position: Position::new(1, 1),
                status: CellStatus::Active,
            }
        );
        assert_eq!(
            events[1],
            GameEvent::ScoreChanged {
                player_score: 0,
                ai_score: 1,
            }
        );
        assert_eq!(events[2], GameEvent::WinnerDecided { winner: Some(Winner::Ai) });
    }

    #[test]
    fn test_recording_observer_last_helpers() {
        let observer = RecordingObserver::new();
        assert_eq!(observer.last_winner(), None);
        assert_eq!(observer.last_score(), None);

        observer.score_changed(1, 0);
        observer.score_changed(1, 1);
        observer.winner_decided(None);

        assert_eq!(observer.last_score(), Some((1, 1)));
        assert_eq!(observer.last_winner(), Some(None));
    }

    #[test]
    fn test_recording_observer_take_events() {
        let observer = RecordingObserver::new();
        observer.score_changed(2, 3);

        let events = observer.take_events();
        assert_eq!(events.len(), 1);
        assert!(observer.events().is_empty());
    }
}
