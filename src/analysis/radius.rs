//! Radius profile: distance of every sample to a center

use super::point::Point;

/// Per-sample distances to a center and their mean
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadiusProfile {
    pub distances: Vec<f64>,
    pub average_radius: f64,
}

impl RadiusProfile {
    /// A zero (or non-finite) average radius cannot be used as a divisor
    pub fn is_degenerate(&self) -> bool {
        !(self.average_radius.is_finite() && self.average_radius > 0.0)
    }
}

/// Profile the samples around `center`. Empty input yields radius 0.
pub fn profile(points: &[Point], center: Point) -> RadiusProfile {
    let distances = radial_distances(points, center);
    let average_radius = mean(&distances);
    RadiusProfile {
        distances,
        average_radius,
    }
}

pub(crate) fn radial_distances(points: &[Point], center: Point) -> Vec<f64> {
    let c = center.to_vec();
    points.iter().map(|p| p.to_vec().distance(c)).collect()
}

/// Arithmetic mean, 0 for an empty slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sample_circle;

    #[test]
    fn test_profile_circle() {
        let center = Point::new(50.0, -20.0);
        let points = sample_circle(center, 40.0, 32);
        let profile = profile(&points, center);
        assert_eq!(profile.distances.len(), 32);
        assert!((profile.average_radius - 40.0).abs() < 1e-9);
        assert!(!profile.is_degenerate());
    }

    #[test]
    fn test_profile_empty() {
        let profile = profile(&[], Point::ORIGIN);
        assert!(profile.distances.is_empty());
        assert_eq!(profile.average_radius, 0.0);
        assert!(profile.is_degenerate());
    }

    #[test]
    fn test_profile_mixed_distances() {
        let points = [Point::new(1.0, 0.0), Point::new(0.0, 3.0)];
        let profile = profile(&points, Point::ORIGIN);
        assert_eq!(profile.distances, vec![1.0, 3.0]);
        assert_eq!(profile.average_radius, 2.0);
    }
}
