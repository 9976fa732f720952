//! Seeded train/test split over row indices.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const DEFAULT_TEST_FRACTION: f64 = 0.2;
pub const DEFAULT_SPLIT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl TrainTestSplit {
    /// Shuffle `0..n_rows` with `seed`; the first `ceil(n_rows * test_fraction)`
    /// indices form the test set.
    pub fn shuffled(n_rows: usize, test_fraction: f64, seed: u64) -> Self {
        let mut indices: Vec<usize> = (0..n_rows).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let n_test = ((n_rows as f64) * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
        let train = indices.split_off(n_test.min(n_rows));
        Self {
            train,
            test: indices,
        }
    }

    /// Pick the rows of `items` named by `indices`.
    pub fn select<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
        indices.iter().map(|&i| items[i].clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_eighty_twenty() {
        let split = TrainTestSplit::shuffled(101, DEFAULT_TEST_FRACTION, DEFAULT_SPLIT_SEED);
        assert_eq!(split.test.len(), 21);
        assert_eq!(split.train.len(), 80);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..101).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_split() {
        let a = TrainTestSplit::shuffled(50, 0.2, 42);
        let b = TrainTestSplit::shuffled(50, 0.2, 42);
        let c = TrainTestSplit::shuffled(50, 0.2, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn selects_rows_in_index_order() {
        let items = vec!["a", "b", "c", "d"];
        assert_eq!(TrainTestSplit::select(&items, &[3, 0]), vec!["d", "a"]);
    }
}
