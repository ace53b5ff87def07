//! 勝敗判定のルール実装モジュール
//! 勝利スコアの計算と勝者の決定を担当する。

use super::types::Winner;

/// もぐらたたきの勝敗ルールを実装する構造体
/// スタティックメソッドのみを提供する
pub struct GameRules;

impl GameRules {
    /// 勝利に必要なスコアを計算する
    /// 総セル数の過半数 ceil(total / 2) を先取した側が勝つ
    pub fn winning_score(total_cells: usize) -> u32 {
        ((total_cells + 1) / 2) as u32
    }

    /// 現在のスコアから勝者を決定する
    /// スコアは1点ずつしか増えないため到達判定は閾値比較（>=）で行う。
    /// 両者同時到達は単一加算の下では起こり得ないが、評価順はAIが先

    pub fn decide_winner(player_score: u32, ai_score: u32, winning_score: u32) -> Option<Winner> {
        if ai_score >= winning_score {
            Some(Winner::Ai)
        } else if player_score >= winning_score {
            Some(Winner::Player)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winning_score_even_grid() {
        // 10x10 = 100セル -> 50点先取
        assert_eq!(GameRules::winning_score(100), 50);
    }

    #[test]
    fn test_winning_score_odd_grid() {
        // 3x3 = 9セル -> ceil(9/2) = 5点先取
        assert_eq!(GameRules::winning_score(9), 5);
        assert_eq!(GameRules::winning_score(1), 1);
        assert_eq!(GameRules::winning_score(7), 4);
    }

    #[test]
    fn test_decide_winner_none() {
        assert_eq!(GameRules::decide_winner(0, 0, 50), None);
        assert_eq!(GameRules::decide_winner(49, 49, 50), None);
    }

    #[test]
    fn test_decide_winner_player() {
        assert_eq!(GameRules::decide_winner(50, 0, 50), Some(Winner::Player));
        assert_eq!(GameRules::decide_winner(51, 49, 50), Some(Winner::Player));
    }

    #[test]
    fn test_decide_winner_ai() {
        assert_eq!(GameRules::decide_winner(0, 50, 50), Some(Winner::Ai));
    }

    #[test]
    fn test_decide_winner_ai_checked_first() {
        // 単一加算の下では到達不能な同時到達時はAIを優先する
        assert_eq!(GameRules::decide_winner(50, 50, 50), Some(Winner::Ai));
    }
}
