//! ゲームの基本型定義モジュール
//! もぐらたたきゲームで使用される基本的な型とenumを定義する。

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 盤面上の座標を表す構造体
/// x は列、y は行を表し、有効範囲は盤面サイズに依存する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

/// セルの視覚状態を表すenum
/// 消灯、点灯、獲得済み（プレイヤー/AI）の4状態を持つ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellStatus {
    /// 消灯中（未使用）
    Idle,
    /// 点灯中（クリック待ち）
    Active,
    /// プレイヤーが獲得
    ClaimedByPlayer,
    /// AIが獲得
    ClaimedByAi,
}

/// ゲームの勝者を表すenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Ai,
}

impl Winner {
    pub fn name(&self) -> &'static str {
        match self {
            Winner::Player => "player",
            Winner::Ai => "ai",
        }
    }
}

/// 難易度プリセットを表すenum
/// 各難易度はタイマーの発火間隔（ミリ秒）に対応する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    /// この難易度のタイマー発火間隔（ミリ秒）を返す
    pub fn tick_interval_ms(&self) -> u64 {
        match self {
            Difficulty::Easy => 1500,
            Difficulty::Medium => 1000,
            Difficulty::Hard => 750,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "初級 - 1500ミリ秒間隔",
            Difficulty::Medium => "中級 - 1000ミリ秒間隔",
            Difficulty::Hard => "上級 - 750ミリ秒間隔",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: {}. Valid options: easy, medium, hard", s)),
        }
    }
}
