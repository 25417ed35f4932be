//! Presentation banding for a finished score
//!
//! These thresholds are display policy only; the analysis never sees them.

use serde::{Deserialize, Serialize};

use crate::round_to_tenth;

/// Frames in the count-up animation
pub const COUNT_UP_STEPS: usize = 60;
/// Duration of the count-up animation
pub const COUNT_UP_DURATION_MS: f64 = 1500.0;

/// Message band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Incredible,
    Amazing,
    Excellent,
    Great,
    Good,
    KeepTrying,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 98.0 => ScoreBand::Incredible,
            s if s >= 95.0 => ScoreBand::Amazing,
            s if s >= 90.0 => ScoreBand::Excellent,
            s if s >= 80.0 => ScoreBand::Great,
            s if s >= 70.0 => ScoreBand::Good,
            _ => ScoreBand::KeepTrying,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Incredible => "🤯 INCREDIBLE!",
            ScoreBand::Amazing => "🔥 AMAZING!",
            ScoreBand::Excellent => "⭐ EXCELLENT!",
            ScoreBand::Great => "👍 GREAT!",
            ScoreBand::Good => "👌 GOOD!",
            ScoreBand::KeepTrying => "💪 KEEP TRYING!",
        }
    }
}

/// Color tier used for the score gradient and glow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    Emerald,
    Blue,
    Yellow,
    Orange,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 95.0 {
            ScoreTier::Emerald
        } else if score >= 85.0 {
            ScoreTier::Blue
        } else if score >= 70.0 {
            ScoreTier::Yellow
        } else {
            ScoreTier::Orange
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Emerald => "emerald",
            ScoreTier::Blue => "blue",
            ScoreTier::Yellow => "yellow",
            ScoreTier::Orange => "orange",
        }
    }

    /// CSS color for the tier
    pub fn color(&self) -> &'static str {
        match self {
            ScoreTier::Emerald => "#34d399",
            ScoreTier::Blue => "#60a5fa",
            ScoreTier::Yellow => "#facc15",
            ScoreTier::Orange => "#fb923c",
        }
    }
}

/// "97.3%"
pub fn format_score(score: f64) -> String {
    format!("{:.1}%", round_to_tenth(score))
}

/// Values shown while the score counts up from 0
///
/// Intermediate frames are floored to one decimal so the display never
/// overshoots; the last frame is the exact score.
pub fn count_up_frames(score: f64) -> Vec<f64> {
    if !(score.is_finite() && score > 0.0) {
        return vec![0.0];
    }
    let increment = score / COUNT_UP_STEPS as f64;
    let mut frames: Vec<f64> = (1..COUNT_UP_STEPS)
        .map(|i| ((increment * i as f64) * 10.0).floor() / 10.0)
        .collect();
    frames.push(score);
    frames
}

/// Delay between count-up frames
pub fn count_up_interval_ms() -> f64 {
    COUNT_UP_DURATION_MS / COUNT_UP_STEPS as f64
}
