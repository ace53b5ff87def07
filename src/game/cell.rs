//! セルのライフサイクル管理モジュール
//! 1マス分の利用可能フラグと視覚状態の遷移を担当する。

use super::types::{CellStatus, Position};
use serde::{Deserialize, Serialize};

/// 盤面の1マスを表す構造体
/// 座標による同一性を持ち、ゲームリセット時以外は破棄されない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub available: bool,
    pub status: CellStatus,
}

impl Cell {
    /// 利用可能・消灯状態の新しいセルを作成する
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            available: true,
            status: CellStatus::Idle,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// セルを点灯させる（Idle → Active）
    /// 消灯状態以外からの遷移は無視される
    pub fn activate(&mut self) -> bool {
        if self.status == CellStatus::Idle {
            self.status = CellStatus::Active;
            true
        } else {
            false
        }
    }

    /// プレイヤーの獲得としてマークする（Active → ClaimedByPlayer）
    /// スコア加算は呼び出し側（Game）が獲得と同時に行う
    pub fn claim_by_player(&mut self) -> bool {
        if self.status == CellStatus::Active {
            self.status = CellStatus::ClaimedByPlayer;
            true
        } else {
            false
        }
    }

    /// AIの獲得としてマークする（Active → ClaimedByAi）
    pub fn claim_by_ai(&mut self) -> bool {
        if self.status == CellStatus::Active {
            self.status = CellStatus::ClaimedByAi;
            true
        } else {
            false
        }
    }

    /// 獲得済みかチェックする
    pub fn is_claimed(&self) -> bool {
        matches!(
            self.status,
            CellStatus::ClaimedByPlayer | CellStatus::ClaimedByAi
        )
    }

    /// ゲーム開始時の初期状態に戻す
    pub fn reset(&mut self) {
        self.available = true;
        self.status = CellStatus::Idle;
    }
}
