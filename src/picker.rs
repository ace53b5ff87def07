//! セル抽選戦略の実装モジュール
//! 次に点灯するセルの選択方法を統一されたインターフェースで提供する。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// セル抽選の共通インターフェース
/// 利用可能セル列の添字を1つ選択する。共有のため&selfで呼び出せる
pub trait CellPicker: Send + Sync {
    /// 0..available の範囲から添字を1つ選ぶ
    /// 前提条件: available > 0
    fn pick(&self, available: usize) -> usize;

    /// 戦略名を返す
    fn name(&self) -> &'static str;
}

/// 一様乱数でセルを選択する標準の抽選器
/// シード指定で再現可能な系列も生成できる
pub struct RandomPicker {
    rng: Mutex<StdRng>,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// 指定シードで再現可能な抽選器を作成する
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl CellPicker for RandomPicker {
    fn pick(&self, available: usize) -> usize {
        if available == 0 {
            return 0;
        }

        let mut rng = self.rng.lock().unwrap();
        rng.gen_range(0..available)
    }

    fn name(&self) -> &'static str {
        "RandomPicker"
    }
}

/// 呼び出し回数ベースの決定的な抽選器
/// テストで再現可能な系列が必要な場合に使用する
pub struct SequentialPicker {
    counter: AtomicUsize,
}

impl SequentialPicker {
    pub fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
        }
    }
}

impl Default for SequentialPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl CellPicker for SequentialPicker {
    /// 呼び出し回数から擬似ランダムな添字を生成する
    fn pick(&self, available: usize) -> usize {
        if available == 0 {
            return 0;
        }

        let count = self.counter.fetch_add(1, Ordering::Relaxed);
        (count * 7 + 3) % available
    }

    fn name(&self) -> &'static str {
        "SequentialPicker"
    }
}

/// 常に同じ添字を返す抽選器（テスト用）
pub struct FixedPicker {
    index: usize,
}

impl FixedPicker {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl CellPicker for FixedPicker {
    fn pick(&self, available: usize) -> usize {
        if available == 0 {
            return 0;
        }

        self.index % available
    }

    fn name(&self) -> &'static str {
        "FixedPicker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_picker_in_range() {
        let picker = RandomPicker::new();

        for available in 1..=20 {
            for _ in 0..50 {
                let index = picker.pick(available);
                assert!(index < available);
            }
        }
    }

    #[test]
    fn test_random_picker_seeded_reproducible() {
        let picker1 = RandomPicker::with_seed(42);
        let picker2 = RandomPicker::with_seed(42);

        let sequence1: Vec<usize> = (0..10).map(|_| picker1.pick(100)).collect();
        let sequence2: Vec<usize> = (0..10).map(|_| picker2.pick(100)).collect();

        assert_eq!(sequence1, sequence2);
    }

    #[test]
    fn test_sequential_picker_deterministic() {
        let picker1 = SequentialPicker::new();
        let picker2 = SequentialPicker::new();

        let sequence1: Vec<usize> = (0..10).map(|_| picker1.pick(9)).collect();
        let sequence2: Vec<usize> = (0..10).map(|_| picker2.pick(9)).collect();

        assert_eq!(sequence1, sequence2);
        assert!(sequence1.iter().all(|&index| index < 9));
    }

    #[test]
    fn test_fixed_picker() {
        let picker = FixedPicker::new(2);

        assert_eq!(picker.pick(10), 2);
        assert_eq!(picker.pick(3), 2);
        // 添字は範囲内に丸められる
        assert_eq!(picker.pick(2), 0);
    }

    #[test]
    fn test_picker_trait_object() {
        let pickers: Vec<Box<dyn CellPicker>> = vec![
            Box::new(RandomPicker::with_seed(1)),
            Box::new(SequentialPicker::new()),
            Box::new(FixedPicker::new(0)),
        ];

        for picker in &pickers {
            assert!(picker.pick(5) < 5);
            assert!(!picker.name().is_empty());
        }
    }
}
