//! Analysis entry point

use serde::{Deserialize, Serialize};

use super::center::{SearchWindow, estimate_center_with};
use super::point::Point;
use super::radius::profile;
use super::score::{SubScores, sub_scores};
use crate::consts::MIN_POINTS;
use crate::round_to_tenth;

/// Center and radius of the estimated circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleEstimate {
    pub center: Point,
    pub average_radius: f64,
}

/// Result of scoring one gesture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleAnalysis {
    /// Perfection score in [0, 100]
    pub score: f64,
    pub center: Point,
    pub average_radius: f64,
}

impl CircleAnalysis {
    /// Result for input too short to analyze
    pub const fn degenerate() -> Self {
        Self {
            score: 0.0,
            center: Point::ORIGIN,
            average_radius: 0.0,
        }
    }

    /// Score rounded to one decimal place
    pub fn display_score(&self) -> f64 {
        round_to_tenth(self.score)
    }

    pub fn estimate(&self) -> CircleEstimate {
        CircleEstimate {
            center: self.center,
            average_radius: self.average_radius,
        }
    }
}

/// Analysis plus the sub-scores behind it
///
/// `sub_scores` is `None` when the input was too short to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub analysis: CircleAnalysis,
    pub sub_scores: Option<SubScores>,
}

/// Score a gesture with the default center search
pub fn analyze(points: &[Point]) -> CircleAnalysis {
    analyze_with(points, &SearchWindow::default())
}

/// Score a gesture searching for the center within `window`
pub fn analyze_with(points: &[Point], window: &SearchWindow) -> CircleAnalysis {
    analyze_report(points, window).analysis
}

/// Score a gesture and keep the sub-scores
pub fn analyze_report(points: &[Point], window: &SearchWindow) -> AnalysisReport {
    if points.len() < MIN_POINTS {
        log::debug!(
            "{} samples, need {} - scoring as degenerate",
            points.len(),
            MIN_POINTS
        );
        return AnalysisReport {
            analysis: CircleAnalysis::degenerate(),
            sub_scores: None,
        };
    }

    let center = estimate_center_with(points, window);
    let radius = profile(points, center);
    let parts = sub_scores(points, center, &radius.distances, radius.average_radius);
    let score = parts.combined();

    log::debug!(
        "score {:.1} (consistency {:.1}, closure {:.1}, roundness {:.1}), radius {:.1}",
        score,
        parts.consistency,
        parts.closure,
        parts.roundness,
        radius.average_radius
    );

    AnalysisReport {
        analysis: CircleAnalysis {
            score,
            center,
            average_radius: radius.average_radius,
        },
        sub_scores: Some(parts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sample_circle;

    #[test]
    fn test_too_few_points() {
        let points = sample_circle(Point::new(50.0, 50.0), 20.0, 9);
        let report = analyze_report(&points, &SearchWindow::default());
        assert_eq!(report.analysis, CircleAnalysis::degenerate());
        assert!(report.sub_scores.is_none());
    }

    #[test]
    fn test_exactly_min_points_is_scored() {
        let points = sample_circle(Point::new(50.0, 50.0), 20.0, MIN_POINTS);
        let report = analyze_report(&points, &SearchWindow::default());
        assert!(report.sub_scores.is_some());
        assert!(report.analysis.score > 0.0);
    }

    #[test]
    fn test_identical_inexact_points_score_zero() {
        for p in [Point::new(0.1, 0.7), Point::new(123.456, 78.9), Point::new(33.3, 1.1)] {
            let report = analyze_report(&vec![p; 12], &SearchWindow::default());
            assert_eq!(report.analysis.score, 0.0, "{:?}", p);
            assert_eq!(report.analysis.average_radius, 0.0);
            assert_eq!(report.analysis.center, p);
            let parts = report.sub_scores.unwrap();
            assert_eq!((parts.consistency, parts.closure, parts.roundness), (0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_display_score() {
        let analysis = CircleAnalysis {
            score: 97.349,
            center: Point::ORIGIN,
            average_radius: 10.0,
        };
        assert_eq!(analysis.display_score(), 97.3);
    }

    #[test]
    fn test_json_contract() {
        let analysis = CircleAnalysis {
            score: 90.5,
            center: Point::new(1.0, 2.0),
            average_radius: 3.5,
        };
        let json = serde_json::to_value(analysis).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"score": 90.5, "center": {"x": 1.0, "y": 2.0}, "averageRadius": 3.5})
        );
    }

    #[test]
    fn test_report_flattens_analysis() {
        let points = sample_circle(Point::new(0.0, 0.0), 40.0, 20);
        let report = analyze_report(&points, &SearchWindow::default());
        let json = serde_json::to_value(report).unwrap();
        assert!(json.get("score").is_some());
        assert!(json.get("averageRadius").is_some());
        assert!(json["subScores"].get("closure").is_some());
    }
}
