//! Weighted reel draw
//!
//! Each reel copies the full symbol pool and draws `ROWS` symbols from it
//! without replacement. Reels never share a pool, so a symbol used up on
//! one reel is still fully available on the next.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::symbols::{SYMBOLS, Symbol};
use crate::consts::{REELS, ROWS};

/// Multiset of symbols, each repeated by its weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPool {
    symbols: Vec<Symbol>,
}

impl Default for SymbolPool {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolPool {
    /// Build the pool from the fixed symbol table
    pub fn new() -> Self {
        let symbols = SYMBOLS
            .iter()
            .flat_map(|&s| std::iter::repeat_n(s, s.weight()))
            .collect();
        Self { symbols }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Copies of `symbol` in the pool
    pub fn count(&self, symbol: Symbol) -> usize {
        self.symbols.iter().filter(|&&s| s == symbol).count()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

/// Symbols showing after a spin, indexed `[reel][row]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReelGrid {
    reels: [[Symbol; ROWS]; REELS],
}

impl ReelGrid {
    /// Build a grid from rows as they read left to right on screen
    pub fn from_rows(rows: [[Symbol; REELS]; ROWS]) -> Self {
        let mut reels = [[Symbol::A; ROWS]; REELS];
        for (row, symbols) in rows.iter().enumerate() {
            for (reel, &symbol) in symbols.iter().enumerate() {
                reels[reel][row] = symbol;
            }
        }
        Self { reels }
    }

    pub fn get(&self, reel: usize, row: usize) -> Symbol {
        self.reels[reel][row]
    }

    /// One reel, top to bottom
    pub fn reel(&self, reel: usize) -> &[Symbol; ROWS] {
        &self.reels[reel]
    }

    pub fn reels(&self) -> &[[Symbol; ROWS]; REELS] {
        &self.reels
    }

    /// One payline row, left to right
    pub fn row(&self, row: usize) -> [Symbol; REELS] {
        std::array::from_fn(|reel| self.reels[reel][row])
    }
}

/// Draw one reel's visible symbols from a private copy of `pool`
pub fn draw_reel<R: Rng + ?Sized>(pool: &SymbolPool, rng: &mut R) -> [Symbol; ROWS] {
    debug_assert!(pool.len() >= ROWS, "pool smaller than a reel");

    let mut available = pool.symbols.clone();
    std::array::from_fn(|_| {
        let idx = rng.random_range(0..available.len());
        available.remove(idx)
    })
}

/// Draw a full grid, every reel from its own fresh pool
pub fn draw_grid<R: Rng + ?Sized>(pool: &SymbolPool, rng: &mut R) -> ReelGrid {
    ReelGrid {
        reels: std::array::from_fn(|_| draw_reel(pool, &mut *rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pool_size_matches_weights() {
        let pool = SymbolPool::new();
        assert_eq!(pool.len(), 20);
        for s in SYMBOLS {
            assert_eq!(pool.count(s), s.weight());
        }
    }

    #[test]
    fn test_grid_rows_and_reels_agree() {
        use Symbol::*;
        let grid = ReelGrid::from_rows([[A, A, A], [B, C, D], [D, C, B]]);
        assert_eq!(grid.row(0), [A, A, A]);
        assert_eq!(grid.row(1), [B, C, D]);
        assert_eq!(grid.reel(0), &[A, B, D]);
        assert_eq!(grid.reel(2), &[A, D, B]);
        assert_eq!(grid.get(1, 2), C);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let pool = SymbolPool::new();
        let mut rng1 = Pcg32::seed_from_u64(42);
        let mut rng2 = Pcg32::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(draw_grid(&pool, &mut rng1), draw_grid(&pool, &mut rng2));
        }
    }

    #[test]
    fn test_reels_do_not_share_a_pool() {
        // A has weight 2, so one reel can show at most two As, but across
        // reels more than two As must eventually appear in a single grid.
        let pool = SymbolPool::new();
        let mut rng = Pcg32::seed_from_u64(7);
        let found = (0..5000).any(|_| {
            let grid = draw_grid(&pool, &mut rng);
            grid.reels()
                .iter()
                .flatten()
                .filter(|&&s| s == Symbol::A)
                .count()
                > Symbol::A.weight()
        });
        assert!(found);
    }

    proptest! {
        #[test]
        fn prop_reel_never_exceeds_weight(seed in any::<u64>()) {
            let pool = SymbolPool::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let grid = draw_grid(&pool, &mut rng);
            for reel in grid.reels() {
                for s in SYMBOLS {
                    let n = reel.iter().filter(|&&x| x == s).count();
                    prop_assert!(n <= s.weight());
                }
            }
        }

        #[test]
        fn prop_draw_reel_is_subset_of_pool(seed in any::<u64>()) {
            let pool = SymbolPool::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let reel = draw_reel(&pool, &mut rng);
            let mut remaining = pool.symbols().to_vec();
            for s in reel {
                let idx = remaining.iter().position(|&x| x == s);
                prop_assert!(idx.is_some());
                remaining.remove(idx.unwrap());
            }
            prop_assert_eq!(remaining.len(), pool.len() - ROWS);
        }
    }
}
