//! Rejection signals for session operations
//!
//! None of these are fatal; the session is unchanged when one is returned.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("insufficient credits: need {required}, have {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("a spin is already in progress")]
    SpinInProgress,

    #[error("no spin is waiting to be resolved")]
    NoPendingSpin,

    #[error("bet {attempted} is outside {min}..={max}")]
    BetOutOfRange { attempted: i64, min: u64, max: u64 },

    #[error("line count {0} is not playable")]
    InvalidLineCount(u8),

    #[error("invalid deposit amount")]
    InvalidAmount,

    #[error("deposit {amount} exceeds the {max} limit")]
    DepositTooLarge { amount: i64, max: i64 },
}
