//! Public `analyze` contract

use perfect_circle::analysis::{
    Point, SearchWindow, analyze, analyze_report, polar_to_point, profile, sample_circle,
    sub_scores,
};
use perfect_circle::{CircleAnalysis, Settings};

fn closed_circle(center: Point, radius: f64, count: usize) -> Vec<Point> {
    let mut points = sample_circle(center, radius, count);
    points.push(points[0]);
    points
}

#[test]
fn test_short_gestures_are_degenerate() {
    for len in 0..10 {
        let points = sample_circle(Point::new(200.0, 200.0), 100.0, len);
        let analysis = analyze(&points);
        assert_eq!(analysis, CircleAnalysis::degenerate(), "len {}", len);
        assert_eq!(analysis.center, Point::new(0.0, 0.0));
        assert_eq!(analysis.average_radius, 0.0);
    }
}

#[test]
fn test_ten_points_are_scored() {
    let points = closed_circle(Point::new(200.0, 200.0), 100.0, 9);
    assert_eq!(points.len(), 10);
    assert!(analyze(&points).score > 0.0);
}

#[test]
fn test_perfect_circle() {
    let center = Point::new(200.0, 200.0);
    let analysis = analyze(&closed_circle(center, 100.0, 64));

    assert!(analysis.score >= 95.0, "score {}", analysis.score);
    assert!(analysis.score <= 100.0);
    // The repeated closing sample pulls the centroid about r/65 toward it
    assert!(analysis.center.distance(center) < 2.0);
    assert!((analysis.average_radius - 100.0).abs() < 1.0);
}

#[test]
fn test_identical_points() {
    for p in [
        Point::new(42.0, 17.0),
        Point::new(0.1, 0.7),
        Point::new(123.456, 78.9),
        Point::new(33.3, 1.1),
        Point::new(-987.654, 0.3),
    ] {
        for len in [10, 12, 30, 64] {
            let analysis = analyze(&vec![p; len]);
            assert_eq!(analysis.average_radius, 0.0, "{:?} x {}", p, len);
            assert_eq!(analysis.score, 0.0, "{:?} x {}", p, len);
        }
    }
}

#[test]
fn test_oversized_settings_window_does_not_blow_up() {
    let settings = Settings::from_json(r#"{"search_range": 1e30, "search_step": 1.0}"#).unwrap();
    let points = closed_circle(Point::new(200.0, 200.0), 100.0, 64);
    let analysis = analyze_report(&points, &settings.search_window()).analysis;
    assert_eq!(analysis, analyze(&points));

    // The window itself is capped even when used directly
    let direct = analyze_report(&points, &SearchWindow::new(1e30, 1.0)).analysis;
    assert!(direct.score >= 95.0);
}

#[test]
fn test_moving_last_point_away_lowers_score() {
    let center = Point::new(200.0, 200.0);
    let mut previous: Option<(f64, f64)> = None;

    for k in 0..6 {
        let mut points = closed_circle(center, 100.0, 64);
        // Slide the closing sample backwards along the circle
        let last = points.len() - 1;
        points[last] = polar_to_point(center, 100.0, -0.1 * k as f64);

        let report = analyze_report(&points, &SearchWindow::default());
        let closure = report.sub_scores.map(|s| s.closure).unwrap_or_default();
        let score = report.analysis.score;

        if let Some((prev_closure, prev_score)) = previous {
            assert!(closure < prev_closure, "k {}: {} !< {}", k, closure, prev_closure);
            assert!(score < prev_score, "k {}: {} !< {}", k, score, prev_score);
        }
        previous = Some((closure, score));
    }
}

#[test]
fn test_shapes_rank_below_circle() {
    let center = Point::new(300.0, 300.0);
    let circle = analyze(&closed_circle(center, 120.0, 64)).score;

    // Ellipse with a 2:1 aspect ratio
    let ellipse: Vec<Point> = (0..=64)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / 64.0;
            Point::new(center.x + 160.0 * theta.cos(), center.y + 80.0 * theta.sin())
        })
        .collect();

    // Square traced along its edges
    let mut square = Vec::new();
    let corners = [(-100.0, -100.0), (100.0, -100.0), (100.0, 100.0), (-100.0, 100.0)];
    for i in 0..4 {
        let (ax, ay) = corners[i];
        let (bx, by) = corners[(i + 1) % 4];
        for s in 0..16 {
            let t = s as f64 / 16.0;
            square.push(Point::new(center.x + ax + (bx - ax) * t, center.y + ay + (by - ay) * t));
        }
    }
    square.push(square[0]);

    let ellipse = analyze(&ellipse).score;
    let square = analyze(&square).score;
    assert!(ellipse < circle, "ellipse {} vs circle {}", ellipse, circle);
    assert!(square < circle, "square {} vs circle {}", square, circle);
}

#[test]
fn test_half_circle_loses_closure() {
    let center = Point::new(200.0, 200.0);
    let arc: Vec<Point> = (0..=32)
        .map(|i| polar_to_point(center, 100.0, std::f64::consts::PI * i as f64 / 32.0))
        .collect();

    let report = analyze_report(&arc, &SearchWindow::default());
    let parts = report.sub_scores.expect("arc has enough samples");
    // Endpoints sit a full diameter apart
    assert_eq!(parts.closure, 0.0);
    assert!(report.analysis.score < 70.0);
}

#[test]
fn test_report_matches_sub_scores() {
    let points = closed_circle(Point::new(150.0, 150.0), 80.0, 40);
    let report = analyze_report(&points, &SearchWindow::default());
    let radius = profile(&points, report.analysis.center);
    let parts = sub_scores(
        &points,
        report.analysis.center,
        &radius.distances,
        radius.average_radius,
    );
    assert_eq!(report.sub_scores, Some(parts));
    assert_eq!(report.analysis.score, parts.combined());
}

#[test]
fn test_settings_window_matches_default() {
    let points = closed_circle(Point::new(210.0, 190.0), 90.0, 50);
    let from_settings = analyze_report(&points, &Settings::default().search_window()).analysis;
    assert_eq!(from_settings, analyze(&points));
}

#[test]
fn test_json_contract() {
    let points = closed_circle(Point::new(200.0, 200.0), 100.0, 64);
    let json = serde_json::to_value(analyze(&points)).unwrap();

    assert!(json.get("score").is_some());
    assert!(json.get("averageRadius").is_some());
    assert!(json["center"].get("x").is_some());
    assert!(json["center"].get("y").is_some());

    let parsed: Vec<Point> =
        serde_json::from_str(r#"[{"x": 1.0, "y": 2.0}, {"x": 3.5, "y": -4.0}]"#).unwrap();
    assert_eq!(parsed, vec![Point::new(1.0, 2.0), Point::new(3.5, -4.0)]);
}
