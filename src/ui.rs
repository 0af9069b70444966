//! Player intents and status-line text
//!
//! Shared by the web front end and the native CLI. Nothing here touches the
//! DOM, so the mapping from input to session calls is testable natively.

use crate::consts::{MESSAGE_DURATION_MS, WIN_MESSAGE_DURATION_MS};
use crate::engine::{GameState, SlotError, SpinOutcome, parse_deposit};
use crate::settings::Settings;

/// Idle text for the status line
pub const READY_MESSAGE: &str = "READY TO PLAY!";

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Spin,
    IncreaseBet,
    DecreaseBet,
    SetLines(u8),
    MaxBet,
    ShowDeposit,
    HideDeposit,
    Deposit(i64),
    Reset,
    ToggleSound,
    CycleSpeed,
}

impl Intent {
    /// Changes player preferences rather than the session
    pub fn is_setting(self) -> bool {
        matches!(self, Intent::ToggleSound | Intent::CycleSpeed)
    }
}

/// Map a `KeyboardEvent.code` to an intent
pub fn intent_for_key(code: &str) -> Option<Intent> {
    match code {
        "Space" => Some(Intent::Spin),
        "KeyD" => Some(Intent::ShowDeposit),
        "KeyM" => Some(Intent::MaxBet),
        "KeyS" => Some(Intent::ToggleSound),
        "KeyF" => Some(Intent::CycleSpeed),
        _ => None,
    }
}

/// Transient status-line message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub duration_ms: u32,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration_ms: MESSAGE_DURATION_MS,
        }
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Human line numbers ("1, 3") for 0-based payline indices
pub fn line_list(lines: &[u8]) -> String {
    lines
        .iter()
        .map(|l| (l + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn outcome_message(outcome: &SpinOutcome) -> Message {
    if outcome.is_win() {
        Message::new(format!(
            "WIN! ${} ON LINE(S): {}",
            outcome.total_payout,
            line_list(&outcome.winning_lines)
        ))
        .with_duration(WIN_MESSAGE_DURATION_MS)
    } else {
        Message::new("NO WIN - TRY AGAIN!")
    }
}

/// Message for a rejected request, or `None` when it is silently ignored
pub fn error_message(err: &SlotError) -> Option<Message> {
    match err {
        SlotError::InsufficientFunds { .. } => Some(Message::new("INSUFFICIENT CREDITS!")),
        SlotError::InvalidAmount | SlotError::DepositTooLarge { .. } => {
            Some(Message::new("INVALID AMOUNT!"))
        }
        SlotError::SpinInProgress
        | SlotError::NoPendingSpin
        | SlotError::BetOutOfRange { .. }
        | SlotError::InvalidLineCount(_) => None,
    }
}

/// Turn the text typed into the deposit box into a deposit intent
pub fn typed_deposit(text: &str) -> Result<Intent, Message> {
    parse_deposit(text).map(Intent::Deposit).map_err(|err| {
        error_message(&err).unwrap_or_else(|| Message::new("INVALID AMOUNT!"))
    })
}

/// Apply a preference intent. The caller persists `settings` afterwards.
pub fn apply_setting(settings: &mut Settings, intent: Intent) -> Option<Message> {
    match intent {
        Intent::ToggleSound => {
            settings.sound = !settings.sound;
            let state = if settings.sound { "ON" } else { "OFF" };
            Some(Message::new(format!("SOUND {}", state)))
        }
        Intent::CycleSpeed => {
            settings.spin_speed = settings.spin_speed.next();
            Some(Message::new(format!(
                "SPEED: {}",
                settings.spin_speed.as_str().to_uppercase()
            )))
        }
        _ => None,
    }
}

/// Apply `intent` to the session and return the status text to show.
///
/// `Spin` only commits; the caller resolves it with
/// [`GameState::finish_spin`] once its reels have stopped. Modal intents
/// and preference intents leave the session untouched.
pub fn apply_intent(state: &mut GameState, intent: Intent) -> Option<Message> {
    let result = match intent {
        Intent::Spin => state
            .begin_spin()
            .map(|_| Some(Message::new("SPINNING..."))),
        Intent::IncreaseBet => state.adjust_bet(1).map(|_| None),
        Intent::DecreaseBet => state.adjust_bet(-1).map(|_| None),
        Intent::SetLines(n) => state.set_lines(n).map(|_| None),
        Intent::MaxBet => {
            state.set_max_bet();
            Ok(Some(Message::new("MAX BET SET!")))
        }
        Intent::Deposit(amount) => state
            .deposit(amount)
            .map(|_| Some(Message::new(format!("DEPOSITED ${}!", amount)))),
        Intent::Reset => {
            state.reset();
            Ok(Some(Message::new("GAME RESET!")))
        }
        Intent::ShowDeposit
        | Intent::HideDeposit
        | Intent::ToggleSound
        | Intent::CycleSpeed => Ok(None),
    };

    match result {
        Ok(message) => message,
        Err(err) => {
            log::debug!("{:?} rejected: {}", intent, err);
            error_message(&err)
        }
    }
}
