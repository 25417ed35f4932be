//! Sub-scores and their weighted combination
//!
//! Each sub-score is in [0, 100]:
//! - consistency: how uniform the radius is
//! - closure: how close the path ends to where it started
//! - roundness: how evenly the samples cover the full turn
//!
//! Errors are normalized by the average radius, so a circle drawn twice as
//! large scores the same.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::point::Point;
use super::radius::mean;
use crate::consts::*;
use crate::normalize_angle;

/// The three independent parts of a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub consistency: f64,
    pub closure: f64,
    pub roundness: f64,
}

impl SubScores {
    /// Weighted sum, clamped to [0, 100]
    pub fn combined(&self) -> f64 {
        let total = finite_or_zero(self.consistency) * CONSISTENCY_WEIGHT
            + finite_or_zero(self.closure) * CLOSURE_WEIGHT
            + finite_or_zero(self.roundness) * ROUNDNESS_WEIGHT;
        total.clamp(0.0, MAX_SCORE)
    }
}

#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[inline]
fn has_radius(average_radius: f64) -> bool {
    average_radius.is_finite() && average_radius > 0.0
}

/// Radius uniformity: 100 minus the mean absolute deviation as a percentage
/// of the average radius. A zero radius scores 0.
pub fn consistency_score(distances: &[f64], average_radius: f64) -> f64 {
    if !has_radius(average_radius) || distances.is_empty() {
        return 0.0;
    }
    let deviations: Vec<f64> = distances
        .iter()
        .map(|d| (d - average_radius).abs())
        .collect();
    let avg_deviation = mean(&deviations);
    (MAX_SCORE - avg_deviation / average_radius * CONSISTENCY_PENALTY).max(0.0)
}

/// Endpoint closure: the gap between last and first sample, penalized at
/// half the consistency rate. A zero radius scores 0.
pub fn closure_score(points: &[Point], average_radius: f64) -> f64 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    if !has_radius(average_radius) {
        return 0.0;
    }
    let gap = last.distance(*first);
    (MAX_SCORE - gap / average_radius * CLOSURE_PENALTY).max(0.0)
}

/// Angular uniformity around `center`
///
/// Sorted sample angles are compared against an even spacing of 2π/n; the
/// mean squared gap error drives the penalty. Fewer than 8 samples cannot be
/// judged and score a neutral 50.
pub fn roundness_score(points: &[Point], center: Point) -> f64 {
    if points.len() < MIN_ROUNDNESS_POINTS {
        return NEUTRAL_ROUNDNESS;
    }

    let mut angles: Vec<f64> = points
        .iter()
        .map(|p| normalize_angle((p.y - center.y).atan2(p.x - center.x)))
        .collect();
    angles.sort_by(f64::total_cmp);

    let expected_gap = TAU / angles.len() as f64;
    if !(expected_gap > 0.0) {
        return NEUTRAL_ROUNDNESS;
    }

    let mut gaps: Vec<f64> = angles.windows(2).map(|w| w[1] - w[0]).collect();
    // Wrap-around from the largest angle back to the smallest
    gaps.push(TAU - angles[angles.len() - 1] + angles[0]);

    let squared_errors: Vec<f64> = gaps
        .iter()
        .map(|gap| (gap - expected_gap) * (gap - expected_gap))
        .collect();
    let angular_variance = mean(&squared_errors);

    (MAX_SCORE - angular_variance / expected_gap * ROUNDNESS_PENALTY).max(0.0)
}

/// Compute all three sub-scores
///
/// With a zero average radius every sample sits on the center, so there is
/// no meaningful angle either: roundness is 0 alongside the other two.
pub fn sub_scores(
    points: &[Point],
    center: Point,
    distances: &[f64],
    average_radius: f64,
) -> SubScores {
    let roundness = if has_radius(average_radius) {
        roundness_score(points, center)
    } else {
        0.0
    };
    SubScores {
        consistency: consistency_score(distances, average_radius),
        closure: closure_score(points, average_radius),
        roundness,
    }
}

/// Final score in [0, 100]
pub fn compose(points: &[Point], center: Point, distances: &[f64], average_radius: f64) -> f64 {
    sub_scores(points, center, distances, average_radius).combined()
}
