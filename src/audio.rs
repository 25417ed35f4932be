//! Audio feedback using Web Audio API
//!
//! Procedurally generated tones - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::feedback::{FeedbackCue, FeedbackSink};
use crate::settings::Settings;

const C5: f32 = 523.25;
const D5: f32 = 587.33;
const E5: f32 = 659.25;
const F5: f32 = 698.46;
const G5: f32 = 783.99;
const A5: f32 = 880.0;
const B5: f32 = 987.77;
const C6: f32 = 1046.5;

/// Peak gain of a single tone at full volume
const TONE_GAIN: f32 = 0.1;

/// Audio manager for round feedback
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
        // Context creation fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.8 }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut manager = Self::new();
        manager.apply_settings(settings);
        manager
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play the sound for a cue
    pub fn play(&self, cue: FeedbackCue) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            FeedbackCue::Success => self.play_arpeggio(ctx, vol, &[C5, E5, G5], 0.1, &[0.2, 0.2, 0.3]),
            FeedbackCue::Perfect => {
                self.play_arpeggio(ctx, vol, &[C5, E5, G5, C6], 0.075, &[0.15, 0.15, 0.15, 0.4])
            }
            FeedbackCue::NewRecord => self.play_arpeggio(
                ctx,
                vol,
                &[C5, D5, E5, F5, G5, A5, B5, C6],
                0.1,
                &[0.2; 8],
            ),
            FeedbackCue::Celebration => self.play_celebration(ctx, vol),
            FeedbackCue::Timeout => self.play_timeout(ctx, vol),
        }
    }

    // === Sound generators ===

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

    /// Sine notes, each starting `spacing` seconds after the previous one
    fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, notes: &[f32], spacing: f64, durations: &[f64]) {
        for (i, (freq, duration)) in notes.iter().zip(durations).enumerate() {
            let delay = i as f64 * spacing;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * TONE_GAIN, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + duration)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + duration).ok();
            }
        }
    }

    /// Leaderboard - rising C major chord with soft attack
    fn play_celebration(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [C5, E5, G5, C6].iter().enumerate() {
            let delay = i as f64 * 0.15;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * TONE_GAIN, t + 0.05)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }

    /// Timeout - harsh descending buzz from two detuned oscillators
    fn play_timeout(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (osc_type, from, to) in [
            (OscillatorType::Sawtooth, 400.0, 150.0),
            (OscillatorType::Square, 300.0, 100.0),
        ] {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                continue;
            };
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + 0.5)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }
    }
}

impl FeedbackSink for AudioManager {
    fn cue(&mut self, cue: FeedbackCue) {
        self.play(cue);
    }
}
