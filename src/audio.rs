//! Audio system using Web Audio API
//!
//! Short procedural beeps, no sound files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::engine::SpinOutcome;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Lever pulled / spin committed
    Spin,
    /// Reels stopped on a win
    Win,
    /// Reels stopped, nothing paid
    Lose,
    /// Bet, lines or deposit changed
    Bet,
}

impl SoundEffect {
    /// Effect to play when an outcome is revealed
    pub fn for_outcome(outcome: &SpinOutcome) -> Self {
        if outcome.is_win() {
            SoundEffect::Win
        } else {
            SoundEffect::Lose
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.8,
        }
    }

    /// Set volume (0.0 - 1.0); zero silences every effect
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let (freq, level, osc_type) = match effect {
            SoundEffect::Spin => (200.0, 0.1, OscillatorType::Square),
            SoundEffect::Win => (800.0, 0.2, OscillatorType::Sine),
            SoundEffect::Lose => (100.0, 0.1, OscillatorType::Sawtooth),
            SoundEffect::Bet => (400.0, 0.1, OscillatorType::Triangle),
        };
        self.beep(ctx, freq, level * vol, osc_type, 0.1);

        // Winning gets a second, higher note
        if effect == SoundEffect::Win {
            if let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Sine) {
                let t = ctx.current_time() + 0.1;
                gain.gain().set_value_at_time(0.2 * vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn beep(&self, ctx: &AudioContext, freq: f32, level: f32, osc_type: OscillatorType, len: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + len)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + len).ok();
    }
}
