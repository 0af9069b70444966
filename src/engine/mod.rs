//! Slot engine
//!
//! Reel draws and payline scoring are pure functions of their inputs:
//! - Randomness comes in as a parameter (seeded `Pcg32` in sessions)
//! - No timers, audio or DOM access
//! - Session state is an explicit value mutated only through its methods

pub mod error;
pub mod payout;
pub mod reels;
pub mod session;
pub mod symbols;

pub use error::SlotError;
pub use payout::{Evaluation, evaluate};
pub use reels::{ReelGrid, SymbolPool, draw_grid, draw_reel};
pub use session::{GameState, Snapshot, SpinOutcome, SymbolInfo, Wager, parse_deposit};
pub use symbols::{SYMBOLS, Symbol};
