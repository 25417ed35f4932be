//! Center estimation by local grid search
//!
//! Start from the centroid, then try every offset on a square grid around it
//! and keep the candidate whose radial distances have the lowest variance.
//! Freehand circles are tens to hundreds of pixels across, so a ±20 px window
//! with 5 px steps (81 candidates) lands close enough to the true center.

use super::point::Point;
use crate::consts::{CENTER_SEARCH_RANGE, CENTER_SEARCH_STEP, MAX_SEARCH_HALF_STEPS};

/// Square search window around the centroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchWindow {
    /// Maximum offset along each axis (pixels)
    pub range: f64,
    /// Distance between neighbouring candidates (pixels)
    pub step: f64,
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self {
            range: CENTER_SEARCH_RANGE,
            step: CENTER_SEARCH_STEP,
        }
    }
}

impl SearchWindow {
    pub fn new(range: f64, step: f64) -> Self {
        Self { range, step }
    }

    /// Steps from the centroid to the edge of the window, before capping
    fn half_steps(&self) -> Option<f64> {
        if !(self.step.is_finite() && self.step > 0.0)
            || !(self.range.is_finite() && self.range >= 0.0)
        {
            return None;
        }
        Some((self.range / self.step + 1e-9).floor())
    }

    /// True when the window steps through at most `MAX_SEARCH_HALF_STEPS`
    /// offsets on each side of the centroid
    pub fn is_bounded(&self) -> bool {
        self.half_steps()
            .is_some_and(|half| half <= MAX_SEARCH_HALF_STEPS as f64)
    }

    /// Axis offsets `-range, -range + step, ..` up to `range`, ascending
    ///
    /// A window that cannot be stepped through collapses to the single
    /// offset 0 (plain centroid). Oversized windows keep only the
    /// `MAX_SEARCH_HALF_STEPS` offsets nearest the centroid on each side.
    pub fn offsets(&self) -> Vec<f64> {
        let Some(half) = self.half_steps() else {
            return vec![0.0];
        };
        // Integer stepping keeps the grid exact (no accumulated float drift)
        let half = half.min(MAX_SEARCH_HALF_STEPS as f64) as i64;
        (-half..=half).map(|i| i as f64 * self.step).collect()
    }

    /// Number of candidate centers the search evaluates
    pub fn candidate_count(&self) -> usize {
        let n = self.offsets().len();
        n * n
    }
}

/// Arithmetic mean position. Empty input yields the origin.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ORIGIN;
    }
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(glam::DVec2::ZERO, |acc, p| acc + p.to_vec());
    (sum / n).into()
}

/// Population variance of the sample distances to `center`
pub fn radial_variance(points: &[Point], center: Point) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let c = center.to_vec();
    let n = points.len() as f64;
    let avg = points.iter().fold(0.0, |acc, p| acc + p.to_vec().distance(c)) / n;
    points.iter().fold(0.0, |acc, p| {
        let dev = p.to_vec().distance(c) - avg;
        acc + dev * dev
    }) / n
}

/// Estimate the circle center with the default search window
pub fn estimate_center(points: &[Point]) -> Point {
    estimate_center_with(points, &SearchWindow::default())
}

/// Estimate the circle center searching `window` around the centroid
///
/// The centroid is the incumbent; a grid candidate replaces the current best
/// only with a strictly lower variance, so ties resolve to the centroid first
/// and then to the earliest candidate (dx ascending, then dy ascending).
pub fn estimate_center_with(points: &[Point], window: &SearchWindow) -> Point {
    let Some(&first) = points.first() else {
        return Point::ORIGIN;
    };
    // A single location is its own center; summing it up for the centroid
    // could leave a rounding residue that reads as a tiny radius
    if points.iter().all(|p| *p == first) {
        return first;
    }

    let centroid = centroid(points);
    let mut best_center = centroid;
    let mut best_variance = radial_variance(points, centroid);

    let offsets = window.offsets();
    for &dx in &offsets {
        for &dy in &offsets {
            let candidate = centroid.offset(dx, dy);
            let variance = radial_variance(points, candidate);
            if variance < best_variance {
                best_variance = variance;
                best_center = candidate;
            }
        }
    }

    log::trace!(
        "center ({:.2}, {:.2}) variance {:.4} from centroid ({:.2}, {:.2})",
        best_center.x,
        best_center.y,
        best_variance,
        centroid.x,
        centroid.y
    );
    best_center
}
