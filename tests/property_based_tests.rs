//! プロパティベーステストモジュール
//! ランダムな入力でゲームの不変条件や特性を検証し、
//! エッジケースや異常系でのシステムの健全性を確認する。

use proptest::prelude::*;

use Whackamole::{
    game::{CellStatus, Difficulty, Game, GameRules, GameStatus, Position},
    picker::{CellPicker, RandomPicker},
    render::NullObserver,
};

/// 有効な盤面サイズを生成する戦略
fn board_size_strategy() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=12, 1usize..=12)
}

/// 有効な難易度を生成する戦略
fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

/// tickごとにプレイヤーがクリックするかどうかの列を生成する戦略
fn click_pattern_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..300)
}

/// 点灯セルの数を数える
fn active_count(game: &Game) -> usize {
    game.board
        .cells()
        .iter()
        .filter(|cell| cell.status == CellStatus::Active)
        .count()
}

proptest! {
    /// プロパティ: 勝利スコアは総セル数の過半数（切り上げ）
    #[test]
    fn test_winning_score_formula((width, height) in board_size_strategy()) {
        let game = Game::new(width, height, 1000);
        let total = width * height;

        prop_assert_eq!(game.winning_score(), ((total + 1) / 2) as u32);
        prop_assert_eq!(GameRules::winning_score(total), ((total + 1) / 2) as u32);
        // 両者が勝利スコア未満のまま全セルを分け合うことはできない
        prop_assert!(game.winning_score() as usize * 2 >= total);
    }

    /// プロパティ: どの進行でも点灯セルは常に高々1つ
    ///
    /// tickとクリックをどう混ぜても、点灯中のセルが2つ以上になることはない
    #[test]
    fn test_at_most_one_active_cell(
        (width, height) in board_size_strategy(),
        clicks in click_pattern_strategy(),
        seed in any::<u64>()
    ) {
        let picker = RandomPicker::with_seed(seed);
        let observer = NullObserver;
        let mut game = Game::new(width, height, 1000);
        game.start(1000);

        for should_click in clicks {
            game.tick(&picker, &observer);
            prop_assert!(active_count(&game) <= 1);
            prop_assert_eq!(game.board.active_position(), game.active_cell);

            if should_click {
                if let Some(active) = game.active_cell {
                    game.handle_player_click(active, &observer);
                    prop_assert_eq!(active_count(&game), 0);
                }
            }

            if game.is_finished() {
                break;
            }
        }
    }

    /// プロパティ: スコアは獲得済みセル数と常に一致する
    #[test]
    fn test_scores_track_claimed_cells(
        (width, height) in board_size_strategy(),
        clicks in click_pattern_strategy(),
        seed in any::<u64>()
    ) {
        let picker = RandomPicker::with_seed(seed);
        let observer = NullObserver;
        let mut game = Game::new(width, height, 1000);
        game.start(1000);

        for should_click in clicks {
            game.tick(&picker, &observer);
            if should_click {
                if let Some(active) = game.active_cell {
                    game.handle_player_click(active, &observer);
                }
            }

            let (player_claimed, ai_claimed) = game.board.count_claimed();
            prop_assert_eq!(player_claimed as u32, game.player_score);
            prop_assert_eq!(ai_claimed as u32, game.ai_score);
            prop_assert!(game.player_score <= game.winning_score());
            prop_assert!(game.ai_score <= game.winning_score());

            if game.is_finished() {
                break;
            }
        }
    }

    /// プロパティ: 終了状態では必ずどちらかが勝利スコアに達している
    ///
    /// プレイヤーが一切クリックしない場合、AIは有限回の発火で必ず勝つ
    #[test]
    fn test_unattended_game_terminates_with_ai_win(
        (width, height) in board_size_strategy(),
        seed in any::<u64>()
    ) {
        let picker = RandomPicker::with_seed(seed);
        let observer = NullObserver;
        let mut game = Game::new(width, height, 1000);
        game.start(1000);

        let total = width * height;
        let mut ticks = 0;
        while !game.is_finished() {
            game.tick(&picker, &observer);
            ticks += 1;
            prop_assert!(ticks <= total + 2, "game did not terminate");
        }

        match game.status {
            GameStatus::Finished { winner } => {
                prop_assert_eq!(winner, Some(Whackamole::game::Winner::Ai));
                prop_assert_eq!(game.ai_score, game.winning_score());
                prop_assert_eq!(game.player_score, 0);
            }
            _ => prop_assert!(false, "game not finished"),
        }
    }

    /// プロパティ: 点灯セル以外へのクリックは状態を変えない
    #[test]
    fn test_mismatched_click_is_noop(
        (width, height) in board_size_strategy(),
        click_x in 0usize..12,
        click_y in 0usize..12,
        seed in any::<u64>()
    ) {
        let picker = RandomPicker::with_seed(seed);
        let observer = NullObserver;
        let mut game = Game::new(width, height, 1000);
        game.start(1000);
        game.tick(&picker, &observer);

        let active = game.active_cell;
        let click = Position::new(click_x, click_y);
        prop_assume!(Some(click) != active);

        let score_before = (game.player_score, game.ai_score);
        game.handle_player_click(click, &observer);

        prop_assert_eq!((game.player_score, game.ai_score), score_before);
        prop_assert_eq!(game.active_cell, active);
    }

    /// プロパティ: 獲得済みセルが後から別の状態に変わることはない
    #[test]
    fn test_claimed_cells_are_final(
        (width, height) in board_size_strategy(),
        clicks in click_pattern_strategy(),
        seed in any::<u64>()
    ) {
        let picker = RandomPicker::with_seed(seed);
        let observer = NullObserver;
        let mut game = Game::new(width, height, 1000);
        game.start(1000);

        let mut claimed: std::collections::HashMap<Position, CellStatus> =
            std::collections::HashMap::new();

        for should_click in clicks {
            game.tick(&picker, &observer);
            if should_click {
                if let Some(active) = game.active_cell {
                    game.handle_player_click(active, &observer);
                }
            }

            for cell in game.board.cells() {
                let position = cell.position();
                match claimed.get(&position) {
                    Some(earlier) => prop_assert_eq!(*earlier, cell.status),
                    None => {
                        if matches!(
                            cell.status,
                            CellStatus::ClaimedByPlayer | CellStatus::ClaimedByAi
                        ) {
                            claimed.insert(position, cell.status);
                        }
                    }
                }
            }

            if game.is_finished() {
                break;
            }
        }
    }

    /// プロパティ: 再開始は進行状況を完全にリセットする
    #[test]
    fn test_start_resets_any_progress(
        (width, height) in board_size_strategy(),
        pre_ticks in 0usize..50,
        difficulty in difficulty_strategy(),
        seed in any::<u64>()
    ) {
        let picker = RandomPicker::with_seed(seed);
        let observer = NullObserver;
        let mut game = Game::new(width, height, 1000);
        game.start(1000);

        for _ in 0..pre_ticks {
            if game.is_finished() {
                break;
            }
            game.tick(&picker, &observer);
        }

        game.start(difficulty.tick_interval_ms());

        prop_assert_eq!(game.player_score, 0);
        prop_assert_eq!(game.ai_score, 0);
        prop_assert_eq!(game.active_cell, None);
        prop_assert_eq!(game.status, GameStatus::Running);
        prop_assert_eq!(game.board.available_count(), width * height);
        prop_assert_eq!(game.tick_interval_ms, difficulty.tick_interval_ms());
        prop_assert_eq!(game.board.count_claimed(), (0, 0));
    }

    /// プロパティ: 抽選インデックスは常に範囲内に収まる
    #[test]
    fn test_random_picker_in_bounds(
        available in 1usize..200,
        seed in any::<u64>(),
        draws in 1usize..50
    ) {
        let picker = RandomPicker::with_seed(seed);
        for _ in 0..draws {
            prop_assert!(picker.pick(available) < available);
        }
    }
}
