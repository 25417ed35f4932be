//! Player settings and preferences
//!
//! Persisted separately from scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::analysis::SearchWindow;
use crate::consts::{CENTER_SEARCH_RANGE, CENTER_SEARCH_STEP};
use crate::platform::storage;

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Play feedback sounds
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Effects ===
    /// Confetti when making the leaderboard
    pub confetti: bool,

    // === Round ===
    /// Seconds allowed for one drawing
    pub time_limit_secs: f64,

    // === Analysis ===
    /// Center search range around the centroid (pixels)
    pub search_range: f64,
    /// Center search step (pixels)
    pub search_step: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            master_volume: 0.8,

            confetti: true,

            time_limit_secs: 5.0,

            search_range: CENTER_SEARCH_RANGE,
            search_step: CENTER_SEARCH_STEP,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "perfect_circle_settings";

    /// Center search window for the analysis
    ///
    /// Falls back to the default window when the stored one cannot be
    /// stepped through or would try too many candidates.
    pub fn search_window(&self) -> SearchWindow {
        let window = SearchWindow::new(self.search_range, self.search_step);
        if window.is_bounded() {
            window
        } else {
            log::warn!(
                "Search window range {} step {} is unusable, using default",
                self.search_range,
                self.search_step
            );
            SearchWindow::default()
        }
    }

    /// Drawing time limit in milliseconds (never negative)
    pub fn time_limit_ms(&self) -> f64 {
        if self.time_limit_secs.is_finite() {
            self.time_limit_secs.max(0.0) * 1000.0
        } else {
            crate::gesture::DEFAULT_TIME_LIMIT_MS
        }
    }

    /// Effective volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn load() -> Self {
        match storage::load(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if storage::save(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}
