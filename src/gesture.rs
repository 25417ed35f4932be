//! Drawing round state machine
//!
//! One round is a single pointer-down → pointer-up gesture with a time
//! limit. Timestamps are passed in (milliseconds) so the recorder never reads
//! a clock and stays testable.

use serde::{Deserialize, Serialize};

use crate::analysis::{CircleAnalysis, Point, SearchWindow, analyze_with};

/// Default drawing time limit
pub const DEFAULT_TIME_LIMIT_MS: f64 = 5000.0;
/// A loop needs at least this many samples to count as closed
pub const MIN_CLOSED_POINTS: usize = 20;
/// Maximum start/end gap (pixels) for a closed loop
pub const CLOSE_TOLERANCE: f64 = 30.0;

/// Phase of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundPhase {
    /// Waiting for the pointer to go down
    #[default]
    Waiting,
    /// Pointer is down, samples are being collected
    Drawing,
    /// Gesture was scored
    Complete,
    /// Time ran out before the pointer was released
    TimedOut,
}

/// What happened when the pointer was released
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Closed loop, scored
    Scored(CircleAnalysis),
    /// Path did not close; the round resets
    NotClosed { points: usize, gap: f64 },
    /// Release without an active drawing (e.g. after a timeout)
    Ignored,
}

/// Collects the samples of one round
#[derive(Debug, Clone)]
pub struct GestureRecorder {
    phase: RoundPhase,
    points: Vec<Point>,
    started_at: f64,
    time_limit_ms: f64,
    window: SearchWindow,
}

impl Default for GestureRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_LIMIT_MS, SearchWindow::default())
    }
}

impl GestureRecorder {
    pub fn new(time_limit_ms: f64, window: SearchWindow) -> Self {
        Self {
            phase: RoundPhase::Waiting,
            points: Vec::new(),
            started_at: 0.0,
            time_limit_ms,
            window,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Pointer down. Only starts a round while waiting.
    pub fn begin(&mut self, point: Point, now_ms: f64) -> bool {
        if self.phase != RoundPhase::Waiting || !point.is_finite() {
            return false;
        }
        self.points.clear();
        self.points.push(point);
        self.started_at = now_ms;
        self.phase = RoundPhase::Drawing;
        true
    }

    /// Pointer move. Returns the previous sample so the caller can draw the
    /// new segment.
    pub fn extend(&mut self, point: Point, now_ms: f64) -> Option<Point> {
        if self.check_timeout(now_ms) || self.phase != RoundPhase::Drawing || !point.is_finite()
        {
            return None;
        }
        let previous = self.points.last().copied();
        self.points.push(point);
        previous
    }

    /// Move to `TimedOut` once the limit has elapsed. Returns true on the
    /// transition only.
    pub fn check_timeout(&mut self, now_ms: f64) -> bool {
        if self.phase == RoundPhase::Drawing && now_ms - self.started_at >= self.time_limit_ms {
            log::info!("Round timed out after {} samples", self.points.len());
            self.phase = RoundPhase::TimedOut;
            return true;
        }
        false
    }

    /// Whole seconds left for the countdown display
    pub fn seconds_left(&self, now_ms: f64) -> u32 {
        match self.phase {
            RoundPhase::Waiting => (self.time_limit_ms / 1000.0).ceil().max(0.0) as u32,
            RoundPhase::Drawing => {
                let remaining = self.time_limit_ms - (now_ms - self.started_at);
                (remaining / 1000.0).ceil().max(0.0) as u32
            }
            RoundPhase::Complete | RoundPhase::TimedOut => 0,
        }
    }

    /// Pointer up. Scores the gesture when it forms a closed loop.
    pub fn finish(&mut self, now_ms: f64) -> GestureOutcome {
        if self.check_timeout(now_ms) || self.phase != RoundPhase::Drawing {
            return GestureOutcome::Ignored;
        }

        if !is_closed_loop(&self.points) {
            let gap = endpoint_gap(&self.points);
            let points = self.points.len();
            log::info!("Path not closed ({points} samples, gap {gap:.1}px)");
            self.reset();
            return GestureOutcome::NotClosed { points, gap };
        }

        let analysis = analyze_with(&self.points, &self.window);
        self.phase = RoundPhase::Complete;
        log::info!(
            "Circle scored {:.1}% from {} samples",
            analysis.display_score(),
            self.points.len()
        );
        GestureOutcome::Scored(analysis)
    }

    /// Back to `Waiting` with an empty buffer
    pub fn reset(&mut self) {
        self.phase = RoundPhase::Waiting;
        self.points.clear();
        self.started_at = 0.0;
    }
}

/// Distance between the first and last sample (0 for fewer than 2)
pub fn endpoint_gap(points: &[Point]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 => first.distance(*last),
        _ => 0.0,
    }
}

/// Enough samples and the path ends near where it started
pub fn is_closed_loop(points: &[Point]) -> bool {
    points.len() >= MIN_CLOSED_POINTS && endpoint_gap(points) < CLOSE_TOLERANCE
}

/// Maps client (CSS) coordinates onto the canvas backing store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    pub left: f64,
    pub top: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl CanvasMapping {
    /// From the element's bounding rect and its backing-store size
    pub fn new(left: f64, top: f64, rect_width: f64, rect_height: f64, width: f64, height: f64) -> Self {
        let scale = |backing: f64, css: f64| if css > 0.0 { backing / css } else { 1.0 };
        Self {
            left,
            top,
            scale_x: scale(width, rect_width),
            scale_y: scale(height, rect_height),
        }
    }

    pub fn to_canvas(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(
            (client_x - self.left) * self.scale_x,
            (client_y - self.top) * self.scale_y,
        )
    }
}
