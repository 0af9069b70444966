//! Payline evaluation

use serde::{Deserialize, Serialize};

use super::reels::ReelGrid;
use crate::consts::ROWS;

/// Winning lines and total payout for one grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Payline indices that hit, ascending
    pub winning_lines: Vec<u8>,
    pub total_payout: u64,
}

/// Score the first `lines` rows of `grid` at `bet_per_line` credits each.
///
/// A line pays only when all reels show the same symbol on that row; there
/// are no partial, diagonal or scatter wins. Lines beyond the active count
/// are never looked at. Payouts saturate at `u64::MAX`.
pub fn evaluate(grid: &ReelGrid, lines: u8, bet_per_line: u64) -> Evaluation {
    let active = (lines as usize).min(ROWS);
    let mut eval = Evaluation::default();

    for line in 0..active {
        let row = grid.row(line);
        let first = row[0];
        if row.iter().all(|&s| s == first) {
            let line_pay = first.multiplier().saturating_mul(bet_per_line);
            eval.total_payout = eval.total_payout.saturating_add(line_pay);
            eval.winning_lines.push(line as u8);
        }
    }

    eval
}
