//! Circle scoring pipeline
//!
//! Everything here is pure and deterministic:
//! - No global state, no clock, no RNG
//! - Input samples are only read, never mutated
//! - Degenerate input produces defined fallback values, never NaN
//!
//! Flow: samples → center estimate → radius profile → sub-scores → score.

pub mod center;
pub mod circle;
pub mod point;
pub mod radius;
pub mod score;

pub use center::{SearchWindow, centroid, estimate_center, estimate_center_with, radial_variance};
pub use circle::{AnalysisReport, CircleAnalysis, CircleEstimate, analyze, analyze_report, analyze_with};
pub use point::{Point, polar_to_point, sample_circle};
pub use radius::{RadiusProfile, profile};
pub use score::{SubScores, closure_score, compose, consistency_score, roundness_score, sub_scores};
