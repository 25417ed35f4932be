//! Confetti burst for leaderboard celebrations
//!
//! Seeded so a burst can be replayed exactly; the caller picks the seed
//! (e.g. the current time in the browser).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

pub const PIECE_COUNT: usize = 50;
/// How long a burst stays on screen
pub const BURST_DURATION_MS: f64 = 3000.0;
/// Added to vertical velocity every step
pub const GRAVITY: f64 = 0.1;
/// Pieces this far below the viewport are dropped
pub const OFFSCREEN_MARGIN: f64 = 50.0;

pub const COLORS: [&str; 7] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#f9ca24", "#f0932b", "#eb4d4b", "#6c5ce7",
];

/// A single confetti piece
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfettiPiece {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub color: &'static str,
    pub size: f64,
    /// Degrees
    pub rotation: f64,
    /// Degrees per step
    pub rotation_speed: f64,
}

/// All pieces of one burst
#[derive(Debug, Clone)]
pub struct ConfettiBurst {
    pub pieces: Vec<ConfettiPiece>,
}

impl ConfettiBurst {
    /// Spawn pieces just above the top edge, spread across the width
    pub fn new(seed: u64, viewport_width: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let width = viewport_width.max(0.0);
        let pieces = (0..PIECE_COUNT as u32)
            .map(|id| ConfettiPiece {
                id,
                x: rng.random::<f64>() * width,
                y: -10.0,
                vx: (rng.random::<f64>() - 0.5) * 10.0,
                vy: rng.random::<f64>() * 3.0 + 2.0,
                color: COLORS[rng.random_range(0..COLORS.len())],
                size: rng.random::<f64>() * 8.0 + 4.0,
                rotation: rng.random::<f64>() * 360.0,
                rotation_speed: (rng.random::<f64>() - 0.5) * 10.0,
            })
            .collect();
        Self { pieces }
    }

    /// Advance one frame (~16 ms) and drop pieces that fell out of view
    pub fn step(&mut self, viewport_height: f64) {
        for piece in &mut self.pieces {
            piece.x += piece.vx;
            piece.y += piece.vy;
            piece.rotation += piece.rotation_speed;
            piece.vy += GRAVITY;
        }
        let limit = viewport_height + OFFSCREEN_MARGIN;
        self.pieces.retain(|p| p.y < limit);
    }

    pub fn is_finished(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn is_expired(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= BURST_DURATION_MS || self.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_ranges() {
        let burst = ConfettiBurst::new(7, 800.0);
        assert_eq!(burst.pieces.len(), PIECE_COUNT);
        for p in &burst.pieces {
            assert!((0.0..800.0).contains(&p.x));
            assert_eq!(p.y, -10.0);
            assert!((-5.0..5.0).contains(&p.vx));
            assert!((2.0..5.0).contains(&p.vy));
            assert!((4.0..12.0).contains(&p.size));
            assert!(COLORS.contains(&p.color));
        }
    }

    #[test]
    fn test_same_seed_same_burst() {
        let a = ConfettiBurst::new(1234, 640.0);
        let b = ConfettiBurst::new(1234, 640.0);
        assert_eq!(a.pieces, b.pieces);
        let c = ConfettiBurst::new(1235, 640.0);
        assert_ne!(a.pieces, c.pieces);
    }

    #[test]
    fn test_step_applies_gravity() {
        let mut burst = ConfettiBurst::new(3, 400.0);
        let before = burst.pieces[0].clone();
        burst.step(10_000.0);
        let after = &burst.pieces[0];
        assert!((after.x - (before.x + before.vx)).abs() < 1e-12);
        assert!((after.y - (before.y + before.vy)).abs() < 1e-12);
        assert!((after.vy - (before.vy + GRAVITY)).abs() < 1e-12);
    }

    #[test]
    fn test_pieces_fall_out_of_view() {
        let mut burst = ConfettiBurst::new(9, 400.0);
        for _ in 0..500 {
            burst.step(300.0);
        }
        assert!(burst.is_finished());
        assert!(burst.is_expired(0.0));
    }

    #[test]
    fn test_expiry_by_time() {
        let burst = ConfettiBurst::new(9, 400.0);
        assert!(!burst.is_expired(2999.0));
        assert!(burst.is_expired(3000.0));
    }
}
