//! Pastel Slots - A three-reel arcade slot machine
//!
//! Core modules:
//! - `engine`: Weighted reel draw, payline evaluation, session state
//! - `ui`: Presentation-neutral intents and message text
//! - `settings`: Player preferences
//! - `audio`: Procedural beeps (web only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod engine;
pub mod settings;
pub mod ui;

pub use engine::{GameState, SlotError, SpinOutcome, Symbol};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of reels (columns)
    pub const REELS: usize = 3;
    /// Visible rows per reel, one payline per row
    pub const ROWS: usize = 3;

    /// Session defaults
    pub const STARTING_BALANCE: u64 = 1000;
    pub const DEFAULT_BET_PER_LINE: u64 = 10;
    pub const DEFAULT_LINES: u8 = 2;

    /// Bet bounds (per line)
    pub const MIN_BET: u64 = 1;
    pub const MAX_BET: u64 = 100;
    /// Credits added/removed by one press of +/-
    pub const BET_STEP: u64 = 5;

    /// Paylines that can be wagered (one per row)
    pub const MIN_LINES: u8 = 1;
    pub const MAX_LINES: u8 = ROWS as u8;

    /// Largest single deposit accepted
    pub const MAX_DEPOSIT: i64 = 10_000;

    /// Presentation delay between committing a spin and revealing it
    pub const SPIN_DURATION_MS: u32 = 2000;
    /// How long transient messages stay on screen
    pub const MESSAGE_DURATION_MS: u32 = 2000;
    pub const WIN_MESSAGE_DURATION_MS: u32 = 3000;
}
