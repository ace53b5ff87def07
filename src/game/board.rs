//! 盤面状態を管理するモジュール
//! 幅×高さのセルグリッドと利用可能セルの問い合わせを担当する。

use super::cell::Cell;
use super::types::{CellStatus, Position};
use serde::{Deserialize, Serialize};

/// もぐらたたきの盤面を表現する構造体
/// セルは行優先（row-major）順で保持され、cells.len() == width * height が常に成立する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// 指定サイズの盤面を作成する
    /// 全セルは利用可能・消灯状態で初期化される
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y));
            }
        }

        Board { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// 盤面の総セル数を返す
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    /// 指定座標が盤面内かチェックする
    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// 指定座標のセルを取得する
    /// 範囲外の場合はNoneを返す
    pub fn cell_at(&self, position: Position) -> Option<&Cell> {
        if self.contains(position) {
            Some(&self.cells[position.y * self.width + position.x])
        } else {
            None
        }
    }

    pub fn cell_at_mut(&mut self, position: Position) -> Option<&mut Cell> {
        if self.contains(position) {
            Some(&mut self.cells[position.y * self.width + position.x])
        } else {
            None
        }
    }

    /// 全セルを行優先順で参照する
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// 利用可能なセルの座標を行優先順で返す
    /// 次の点灯セルの抽選対象として使用される
    pub fn available_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|cell| cell.available)
            .map(|cell| cell.position())
            .collect()
    }

    pub fn available_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.available).count()
    }

    /// 現在点灯中のセルの座標を返す
    /// 不変条件: 点灯中のセルは常に0個または1個
    pub fn active_position(&self) -> Option<Position> {
        self.cells
            .iter()
            .find(|cell| cell.status == CellStatus::Active)
            .map(|cell| cell.position())
    }

    /// プレイヤーとAIの獲得セル数を数える
    /// 戻り値: (プレイヤー獲得数, AI獲得数)
    pub fn count_claimed(&self) -> (usize, usize) {
        let mut player_count = 0;
        let mut ai_count = 0;

        for cell in &self.cells {
            match cell.status {
                CellStatus::ClaimedByPlayer => player_count += 1,
                CellStatus::ClaimedByAi => ai_count += 1,
                _ => {}
            }
        }

        (player_count, ai_count)
    }

    /// 全セルをゲーム開始時の状態に戻す
    pub fn reset_all(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    /// デバッグ用の盤面表示文字列を生成する
    /// .で消灯、*で点灯、Pでプレイヤー獲得、Aで AI獲得を表現
    pub fn display(&self) -> String {
        let mut result = String::new();

        for y in 0..self.height {
            for x in 0..self.width {
                let cell = &self.cells[y * self.width + x];
                let symbol = match cell.status {
                    CellStatus::Idle => ".",
                    CellStatus::Active => "*",
                    CellStatus::ClaimedByPlayer => "P",
                    CellStatus::ClaimedByAi => "A",
                };
                result.push_str(symbol);
                result.push(' ');
            }
            result.push('\n');
        }

        result
    }
}
