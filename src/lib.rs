//! Perfect Circle - draw a circle freehand, get a perfection score
//!
//! Core modules:
//! - `analysis`: Pure scoring pipeline (center search, radius profile, sub-scores)
//! - `gesture`: Drawing round state machine and canvas coordinate mapping
//! - `rating`: Score banding and display formatting
//! - `feedback`: Injected feedback sink (sound, effects) for finished rounds
//! - `confetti`: Seeded confetti particles
//! - `highscores`: Leaderboard, personal best and record holder
//! - `settings`: User preferences persisted in LocalStorage

pub mod analysis;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod confetti;
pub mod feedback;
pub mod gesture;
pub mod highscores;
pub mod platform;
pub mod rating;
pub mod settings;
pub mod share;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use analysis::{CircleAnalysis, Point, analyze};
pub use highscores::{Leaderboard, PersonalBest};
pub use settings::Settings;

/// Scoring constants
pub mod consts {
    /// Gestures with fewer samples score 0
    pub const MIN_POINTS: usize = 10;
    /// Below this many samples roundness is fixed at `NEUTRAL_ROUNDNESS`
    pub const MIN_ROUNDNESS_POINTS: usize = 8;
    pub const NEUTRAL_ROUNDNESS: f64 = 50.0;

    /// Center search window around the centroid (pixels)
    pub const CENTER_SEARCH_RANGE: f64 = 20.0;
    pub const CENTER_SEARCH_STEP: f64 = 5.0;
    /// Most offsets tried on each side of the centroid per axis
    pub const MAX_SEARCH_HALF_STEPS: usize = 100;

    /// Sub-score weights (sum to 1.0)
    pub const CONSISTENCY_WEIGHT: f64 = 0.4;
    pub const CLOSURE_WEIGHT: f64 = 0.3;
    pub const ROUNDNESS_WEIGHT: f64 = 0.3;

    /// Penalty multipliers applied to radius-normalized errors
    pub const CONSISTENCY_PENALTY: f64 = 100.0;
    pub const CLOSURE_PENALTY: f64 = 50.0;
    pub const ROUNDNESS_PENALTY: f64 = 200.0;

    pub const MAX_SCORE: f64 = 100.0;
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f64::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Round to one decimal place for display
#[inline]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
