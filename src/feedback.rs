//! Round feedback (sounds, celebration effects)
//!
//! The scoring code never plays anything itself. The caller decides which
//! cues a finished round earns and hands them to whatever sink is plugged in:
//! Web Audio in the browser, a recorder in tests, nothing on the CLI.

use serde::{Deserialize, Serialize};

/// Scores at or above this get the "perfect" jingle
pub const PERFECT_THRESHOLD: f64 = 95.0;

/// Feedback events a round can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackCue {
    /// Circle scored below the perfect threshold
    Success,
    /// Circle scored at or above the perfect threshold
    Perfect,
    /// Beat the personal best
    NewRecord,
    /// Made the leaderboard (sound plus confetti)
    Celebration,
    /// Ran out of time while drawing
    Timeout,
}

/// Receives feedback cues
pub trait FeedbackSink {
    fn cue(&mut self, cue: FeedbackCue);

    fn cue_all(&mut self, cues: &[FeedbackCue]) {
        for cue in cues {
            self.cue(*cue);
        }
    }
}

/// Drops every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FeedbackSink for NullSink {
    fn cue(&mut self, _cue: FeedbackCue) {}
}

/// Keeps every cue in order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub cues: Vec<FeedbackCue>,
}

impl FeedbackSink for RecordingSink {
    fn cue(&mut self, cue: FeedbackCue) {
        log::debug!("feedback: {:?}", cue);
        self.cues.push(cue);
    }
}

/// Cues earned by a scored round
pub fn cues_for(score: f64, made_leaderboard: bool, new_personal_best: bool) -> Vec<FeedbackCue> {
    let mut cues = Vec::with_capacity(3);
    if score >= PERFECT_THRESHOLD {
        cues.push(FeedbackCue::Perfect);
    } else {
        cues.push(FeedbackCue::Success);
    }
    if made_leaderboard {
        cues.push(FeedbackCue::Celebration);
    }
    if new_personal_best {
        cues.push(FeedbackCue::NewRecord);
    }
    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_for_plain_round() {
        assert_eq!(cues_for(72.0, false, false), vec![FeedbackCue::Success]);
    }

    #[test]
    fn test_cues_for_perfect_record() {
        assert_eq!(
            cues_for(96.5, true, true),
            vec![
                FeedbackCue::Perfect,
                FeedbackCue::Celebration,
                FeedbackCue::NewRecord
            ]
        );
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::default();
        sink.cue_all(&cues_for(95.0, false, true));
        sink.cue(FeedbackCue::Timeout);
        assert_eq!(
            sink.cues,
            vec![FeedbackCue::Perfect, FeedbackCue::NewRecord, FeedbackCue::Timeout]
        );
    }

    #[test]
    fn test_null_sink() {
        let mut sink = NullSink;
        sink.cue_all(&[FeedbackCue::Success, FeedbackCue::Timeout]);
    }
}
