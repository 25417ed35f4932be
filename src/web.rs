//! JavaScript bindings for the analysis

use wasm_bindgen::prelude::*;

use crate::analysis::{CircleAnalysis, Point, analyze};

/// Score a flat `[x0, y0, x1, y1, ..]` buffer; returns the analysis as JSON.
/// A trailing odd coordinate is ignored.
#[wasm_bindgen(js_name = analyzeCircle)]
pub fn analyze_circle(coords: &[f64]) -> String {
    let points: Vec<Point> = coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect();
    to_json(&analyze(&points))
}

/// Score a JSON array of `{x, y}` points; returns the analysis as JSON.
/// Unparseable input scores as a degenerate gesture.
#[wasm_bindgen(js_name = analyzeCircleJson)]
pub fn analyze_circle_json(points_json: &str) -> String {
    let analysis = match serde_json::from_str::<Vec<Point>>(points_json) {
        Ok(points) => analyze(&points),
        Err(e) => {
            log::warn!("Invalid points JSON: {}", e);
            CircleAnalysis::degenerate()
        }
    };
    to_json(&analysis)
}

fn to_json(analysis: &CircleAnalysis) -> String {
    serde_json::to_string(analysis).unwrap_or_else(|_| "null".to_string())
}
