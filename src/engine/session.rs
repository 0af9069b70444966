//! Session state and the operations the presentation layer calls
//!
//! A spin runs in two steps so the front end can show reels spinning in
//! between: `begin_spin` debits the bet and draws the result, `finish_spin`
//! credits the payout. The draw never depends on anything that happens in
//! between.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::error::SlotError;
use super::payout::evaluate;
use super::reels::{ReelGrid, SymbolPool, draw_grid};
use super::symbols::{SYMBOLS, Symbol};
use crate::consts::*;

/// Bet locked in when a spin is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wager {
    pub bet_per_line: u64,
    pub lines: u8,
}

impl Wager {
    pub fn total(&self) -> u64 {
        self.bet_per_line.saturating_mul(self.lines as u64)
    }
}

/// Result of one spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// 1-based spin counter value for this spin
    pub spin_number: u64,
    pub grid: ReelGrid,
    /// Payline indices that hit, ascending
    pub winning_lines: Vec<u8>,
    pub total_payout: u64,
    pub wager: Wager,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.total_payout > 0
    }

    pub fn total_bet(&self) -> u64 {
        self.wager.total()
    }

    /// Payout minus stake
    pub fn net(&self) -> i64 {
        self.total_payout as i64 - self.total_bet() as i64
    }
}

/// Pay and weight of one symbol, for info panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub symbol: Symbol,
    pub value: u64,
    pub weight: usize,
}

/// Read-only view of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u64,
    pub balance: u64,
    pub total_spins: u64,
    pub last_win: u64,
    pub bet_per_line: u64,
    pub lines: u8,
    pub total_bet: u64,
    pub spinning: bool,
    pub total_wagered: u64,
    pub total_won: u64,
    pub symbols: Vec<SymbolInfo>,
    pub max_lines: u8,
    pub min_bet: u64,
    pub max_bet: u64,
    pub max_deposit: i64,
}

/// One player's session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG started from
    pub seed: u64,
    rng: Pcg32,
    pool: SymbolPool,
    /// Credits available to wager
    pub balance: u64,
    /// Kept within `MIN_BET..=MAX_BET`
    bet_per_line: u64,
    /// Active paylines (rows), 1..=3
    lines: u8,
    /// Spins committed this session
    pub total_spins: u64,
    /// Payout of the most recently resolved spin
    pub last_win: u64,
    pub total_wagered: u64,
    pub total_won: u64,
    /// Drawn but not yet credited
    pending: Option<SpinOutcome>,
}

impl GameState {
    /// Create a new session with default balance and bet
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            pool: SymbolPool::new(),
            balance: STARTING_BALANCE,
            bet_per_line: DEFAULT_BET_PER_LINE,
            lines: DEFAULT_LINES,
            total_spins: 0,
            last_win: 0,
            total_wagered: 0,
            total_won: 0,
            pending: None,
        }
    }

    /// Back to defaults; the RNG restarts from the same seed
    pub fn reset(&mut self) {
        log::info!("Session reset (seed {})", self.seed);
        *self = Self::new(self.seed);
    }

    pub fn wager(&self) -> Wager {
        Wager {
            bet_per_line: self.bet_per_line,
            lines: self.lines,
        }
    }

    pub fn total_bet(&self) -> u64 {
        self.wager().total()
    }

    pub fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a spin request would be accepted right now
    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && self.balance >= self.total_bet()
    }

    pub fn bet_per_line(&self) -> u64 {
        self.bet_per_line
    }

    pub fn lines(&self) -> u8 {
        self.lines
    }

    /// Set the per-line bet directly; must be in `MIN_BET..=MAX_BET`
    pub fn set_bet(&mut self, bet_per_line: u64) -> Result<(), SlotError> {
        if !(MIN_BET..=MAX_BET).contains(&bet_per_line) {
            return Err(SlotError::BetOutOfRange {
                attempted: i64::try_from(bet_per_line).unwrap_or(i64::MAX),
                min: MIN_BET,
                max: MAX_BET,
            });
        }
        self.bet_per_line = bet_per_line;
        Ok(())
    }

    /// Step the per-line bet up (`direction > 0`) or down by `BET_STEP`
    pub fn adjust_bet(&mut self, direction: i32) -> Result<u64, SlotError> {
        let attempted = self.bet_per_line as i64 + direction.signum() as i64 * BET_STEP as i64;
        if attempted < MIN_BET as i64 || attempted > MAX_BET as i64 {
            log::debug!("Bet adjustment to {} ignored", attempted);
            return Err(SlotError::BetOutOfRange {
                attempted,
                min: MIN_BET,
                max: MAX_BET,
            });
        }
        self.bet_per_line = attempted as u64;
        Ok(self.bet_per_line)
    }

    pub fn set_lines(&mut self, lines: u8) -> Result<(), SlotError> {
        if !(MIN_LINES..=MAX_LINES).contains(&lines) {
            return Err(SlotError::InvalidLineCount(lines));
        }
        self.lines = lines;
        Ok(())
    }

    pub fn set_max_bet(&mut self) {
        self.bet_per_line = MAX_BET;
        self.lines = MAX_LINES;
    }

    /// Add credits; amounts must be in `1..=MAX_DEPOSIT`
    pub fn deposit(&mut self, amount: i64) -> Result<u64, SlotError> {
        if amount <= 0 {
            return Err(SlotError::InvalidAmount);
        }
        if amount > MAX_DEPOSIT {
            return Err(SlotError::DepositTooLarge {
                amount,
                max: MAX_DEPOSIT,
            });
        }
        self.balance = self.balance.saturating_add(amount as u64);
        log::info!("Deposited {} (balance {})", amount, self.balance);
        Ok(self.balance)
    }

    /// Commit a spin: debit the bet and draw the result.
    ///
    /// The outcome stays hidden until `finish_spin`. Later bet or line
    /// changes do not affect it.
    pub fn begin_spin(&mut self) -> Result<Wager, SlotError> {
        if self.is_spinning() {
            return Err(SlotError::SpinInProgress);
        }
        let wager = self.wager();
        let total = wager.total();
        if self.balance < total {
            log::debug!("Spin rejected: bet {} > balance {}", total, self.balance);
            return Err(SlotError::InsufficientFunds {
                required: total,
                available: self.balance,
            });
        }

        self.balance -= total;
        self.total_spins += 1;
        self.total_wagered += total;

        let grid = draw_grid(&self.pool, &mut self.rng);
        let eval = evaluate(&grid, wager.lines, wager.bet_per_line);
        self.pending = Some(SpinOutcome {
            spin_number: self.total_spins,
            grid,
            winning_lines: eval.winning_lines,
            total_payout: eval.total_payout,
            wager,
        });

        log::debug!("Spin #{} committed, bet {}", self.total_spins, total);
        Ok(wager)
    }

    /// Credit the committed spin and return to idle
    pub fn finish_spin(&mut self) -> Result<SpinOutcome, SlotError> {
        let outcome = self.pending.take().ok_or(SlotError::NoPendingSpin)?;

        self.last_win = outcome.total_payout;
        self.total_won += outcome.total_payout;
        self.balance = self.balance.saturating_add(outcome.total_payout);

        if outcome.is_win() {
            log::info!(
                "Spin #{} won {} on lines {:?}",
                outcome.spin_number,
                outcome.total_payout,
                outcome.winning_lines
            );
        } else {
            log::debug!("Spin #{} lost", outcome.spin_number);
        }
        Ok(outcome)
    }

    /// Commit and resolve in one call
    pub fn spin(&mut self) -> Result<SpinOutcome, SlotError> {
        self.begin_spin()?;
        self.finish_spin()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            balance: self.balance,
            total_spins: self.total_spins,
            last_win: self.last_win,
            bet_per_line: self.bet_per_line,
            lines: self.lines,
            total_bet: self.total_bet(),
            spinning: self.is_spinning(),
            total_wagered: self.total_wagered,
            total_won: self.total_won,
            symbols: SYMBOLS
                .iter()
                .map(|&symbol| SymbolInfo {
                    symbol,
                    value: symbol.multiplier(),
                    weight: symbol.weight(),
                })
                .collect(),
            max_lines: MAX_LINES,
            min_bet: MIN_BET,
            max_bet: MAX_BET,
            max_deposit: MAX_DEPOSIT,
        }
    }
}

/// Parse a typed deposit amount
pub fn parse_deposit(input: &str) -> Result<i64, SlotError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| SlotError::InvalidAmount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = GameState::new(1);
        assert_eq!(state.balance, 1000);
        assert_eq!(state.bet_per_line(), 10);
        assert_eq!(state.lines(), 2);
        assert_eq!(state.total_bet(), 20);
        assert!(!state.is_spinning());
        assert!(state.can_spin());
    }

    #[test]
    fn test_insufficient_funds_leaves_state_alone() {
        let mut state = GameState::new(1);
        state.balance = 5;
        state.set_lines(1).unwrap();
        assert_eq!(state.total_bet(), 10);
        assert!(!state.can_spin());

        let err = state.begin_spin().unwrap_err();
        assert_eq!(
            err,
            SlotError::InsufficientFunds {
                required: 10,
                available: 5
            }
        );
        assert_eq!(state.balance, 5);
        assert_eq!(state.total_spins, 0);
        assert!(!state.is_spinning());
    }

    #[test]
    fn test_spin_while_spinning_is_rejected() {
        let mut state = GameState::new(3);
        state.begin_spin().unwrap();
        let balance = state.balance;

        assert_eq!(state.begin_spin(), Err(SlotError::SpinInProgress));
        assert_eq!(state.balance, balance);
        assert_eq!(state.total_spins, 1);

        // The rejected request did not redraw the committed result
        let mut fresh = GameState::new(3);
        assert_eq!(state.finish_spin(), fresh.spin());
    }

    #[test]
    fn test_finish_without_begin() {
        let mut state = GameState::new(3);
        assert_eq!(state.finish_spin(), Err(SlotError::NoPendingSpin));
    }

    #[test]
    fn test_spin_accounting() {
        let mut state = GameState::new(11);
        // Line hit rate is low; keep enough credits for every spin
        state.balance = 1_000_000;
        for _ in 0..200 {
            let before = state.balance;
            let outcome = state.spin().unwrap();
            assert_eq!(state.balance, before - outcome.total_bet() + outcome.total_payout);
            assert_eq!(state.last_win, outcome.total_payout);
            assert_eq!(state.balance as i64 - before as i64, outcome.net());
        }
        assert_eq!(state.total_spins, 200);
        assert_eq!(state.total_wagered, 200 * 20);
        assert_eq!(
            state.balance as i64,
            1_000_000 - state.total_wagered as i64 + state.total_won as i64
        );
    }

    #[test]
    fn test_bet_change_mid_spin_does_not_change_payout() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);

        a.begin_spin().unwrap();
        a.set_max_bet();
        let out_a = a.finish_spin().unwrap();

        let out_b = b.spin().unwrap();
        assert_eq!(out_a, out_b);
        assert_eq!(out_a.wager.bet_per_line, 10);
    }

    #[test]
    fn test_adjust_bet_bounds() {
        let mut state = GameState::new(1);
        assert_eq!(state.adjust_bet(1), Ok(15));
        assert_eq!(state.adjust_bet(-1), Ok(10));
        assert_eq!(state.adjust_bet(-1), Ok(5));
        assert!(matches!(
            state.adjust_bet(-1),
            Err(SlotError::BetOutOfRange { attempted: 0, .. })
        ));
        assert_eq!(state.bet_per_line(), 5);

        state.set_bet(100).unwrap();
        assert!(state.adjust_bet(1).is_err());
        assert_eq!(state.bet_per_line(), 100);
    }

    #[test]
    fn test_set_lines() {
        let mut state = GameState::new(1);
        assert!(state.set_lines(3).is_ok());
        assert_eq!(state.lines(), 3);
        assert_eq!(state.set_lines(0), Err(SlotError::InvalidLineCount(0)));
        assert_eq!(state.set_lines(4), Err(SlotError::InvalidLineCount(4)));
        assert_eq!(state.lines(), 3);
    }

    #[test]
    fn test_set_bet_bounds() {
        let mut state = GameState::new(1);
        assert_eq!(state.set_bet(1), Ok(()));
        assert_eq!(state.set_bet(100), Ok(()));
        assert!(matches!(
            state.set_bet(0),
            Err(SlotError::BetOutOfRange { attempted: 0, .. })
        ));
        assert!(matches!(
            state.set_bet(u64::MAX),
            Err(SlotError::BetOutOfRange { attempted: i64::MAX, .. })
        ));
        assert!(state.set_bet(101).is_err());
        assert_eq!(state.bet_per_line(), 100);
    }

    #[test]
    fn test_max_bet() {
        let mut state = GameState::new(1);
        state.set_max_bet();
        assert_eq!(state.total_bet(), 300);
    }

    #[test]
    fn test_deposit_rules() {
        let mut state = GameState::new(1);
        assert_eq!(state.deposit(0), Err(SlotError::InvalidAmount));
        assert_eq!(state.deposit(-5), Err(SlotError::InvalidAmount));
        assert_eq!(
            state.deposit(10_001),
            Err(SlotError::DepositTooLarge {
                amount: 10_001,
                max: 10_000
            })
        );
        assert_eq!(state.balance, 1000);
        assert_eq!(state.deposit(500), Ok(1500));
        assert_eq!(state.deposit(10_000), Ok(11_500));
    }

    #[test]
    fn test_parse_deposit() {
        assert_eq!(parse_deposit(" 250 "), Ok(250));
        assert_eq!(parse_deposit("-5"), Ok(-5));
        assert_eq!(parse_deposit("abc"), Err(SlotError::InvalidAmount));
        assert_eq!(parse_deposit(""), Err(SlotError::InvalidAmount));
    }

    #[test]
    fn test_reset() {
        let mut state = GameState::new(5);
        let first = state.spin().unwrap();
        state.deposit(100).unwrap();
        state.set_max_bet();
        state.reset();

        assert_eq!(state.balance, 1000);
        assert_eq!(state.total_spins, 0);
        assert_eq!(state.lines(), 2);
        assert_eq!(state.spin().unwrap(), first);
    }

    #[test]
    fn test_snapshot() {
        let mut state = GameState::new(8);
        state.spin().unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.balance, state.balance);
        assert_eq!(snap.total_spins, 1);
        assert_eq!(snap.symbols.len(), 4);
        assert_eq!(snap.symbols[0].value, 5);
        assert_eq!(snap.symbols[3].weight, 8);
        assert_eq!(snap.max_lines, 3);

        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
