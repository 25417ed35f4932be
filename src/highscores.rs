//! Leaderboard, personal best and record holder
//!
//! Persisted to LocalStorage. The leaderboard keeps the top 10 scores.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Maximum number of leaderboard entries to keep
pub const MAX_HIGH_SCORES: usize = 10;
/// Longest accepted player name (characters)
pub const MAX_NAME_LEN: usize = 20;

/// Trim a player name and cap its length. Empty names are rejected.
pub fn sanitize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_LEN).collect())
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    /// Perfection score (0-100)
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// ISO-8601 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Top-10 leaderboard, sorted by score (descending)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    const STORAGE_KEY: &'static str = "circleLeaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: f64) -> bool {
        if !(score.is_finite() && score > 0.0) {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a score to the leaderboard (if it qualifies and the name is valid)
    /// Returns the rank achieved (1-indexed)
    pub fn add_entry(
        &mut self,
        username: &str,
        score: f64,
        device_id: Option<String>,
        created_at: Option<String>,
    ) -> Option<usize> {
        let username = sanitize_name(username)?;
        if !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry {
            username,
            score,
            device_id,
            created_at,
        };

        // Equal scores keep their earlier place
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Merge entries from another source (e.g. a remote board), keeping order and size
    pub fn merge(&mut self, others: impl IntoIterator<Item = LeaderboardEntry>) {
        self.entries.extend(others);
        self.entries
            .sort_by(|a, b| b.score.total_cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<f64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load() -> Self {
        match storage::load::<Leaderboard>(Self::STORAGE_KEY) {
            Some(mut board) => {
                // Stored data may come from an older build; restore the invariants
                board.merge(Vec::new());
                log::info!("Loaded {} leaderboard entries", board.entries.len());
                board
            }
            None => {
                log::info!("No leaderboard found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self) {
        if storage::save(Self::STORAGE_KEY, self) {
            log::info!("Leaderboard saved ({} entries)", self.entries.len());
        }
    }
}

/// Best score on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonalBest {
    pub best: Option<f64>,
}

impl PersonalBest {
    const STORAGE_KEY: &'static str = "circlePersonalBest";

    /// Record a score. Returns true if it is a new personal best.
    pub fn record(&mut self, score: f64) -> bool {
        if !score.is_finite() {
            return false;
        }
        let improved = self.best.map_or(true, |best| score > best);
        if improved {
            self.best = Some(score);
        }
        improved
    }

    pub fn load() -> Self {
        Self {
            best: storage::load::<f64>(Self::STORAGE_KEY),
        }
    }

    pub fn save(&self) {
        if let Some(best) = self.best {
            storage::save(Self::STORAGE_KEY, &best);
        }
    }
}

/// Single all-time record with the holder's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub name: String,
    pub score: f64,
}

impl Default for HighScoreRecord {
    fn default() -> Self {
        Self {
            name: "Nobody yet".to_string(),
            score: 0.0,
        }
    }
}

impl HighScoreRecord {
    const STORAGE_KEY: &'static str = "perfectCircleHighScore";

    pub fn is_beaten_by(&self, score: f64) -> bool {
        score.is_finite() && score > self.score
    }

    /// Claim the record. Returns false if the score does not beat it or the
    /// name is empty.
    pub fn claim(&mut self, name: &str, score: f64) -> bool {
        if !self.is_beaten_by(score) {
            return false;
        }
        let Some(name) = sanitize_name(name) else {
            return false;
        };
        self.name = name;
        self.score = score;
        true
    }

    pub fn load() -> Self {
        storage::load(Self::STORAGE_KEY).unwrap_or_default()
    }

    pub fn save(&self) {
        if storage::save(Self::STORAGE_KEY, self) {
            log::info!("Record saved: {} ({:.1}%)", self.name, self.score);
        }
    }
}

const DEVICE_ID_KEY: &str = "circle_device_id";
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `device_<9 base36 chars>_<timestamp ms>`
pub fn generate_device_id<R: Rng>(rng: &mut R, now_ms: u64) -> String {
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("device_{}_{}", suffix, now_ms)
}

/// Stored device id, created on first use
pub fn device_id<R: Rng>(rng: &mut R, now_ms: u64) -> String {
    if let Some(id) = storage::get_item(DEVICE_ID_KEY) {
        return id;
    }
    let id = generate_device_id(rng, now_ms);
    storage::set_item(DEVICE_ID_KEY, &id);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn filled_board() -> Leaderboard {
        let mut board = Leaderboard::new();
        for i in 0..MAX_HIGH_SCORES {
            board.add_entry(&format!("p{i}"), 50.0 + i as f64, None, None);
        }
        board
    }

    #[test]
    fn test_add_keeps_descending_order() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_entry("ann", 80.0, None, None), Some(1));
        assert_eq!(board.add_entry("bob", 90.0, None, None), Some(1));
        assert_eq!(board.add_entry("cat", 85.0, None, None), Some(2));
        assert_eq!(board.add_entry("dan", 85.0, None, None), Some(3));
        let scores: Vec<f64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![90.0, 85.0, 85.0, 80.0]);
        assert_eq!(board.entries[1].username, "cat");
        assert_eq!(board.top_score(), Some(90.0));
    }

    #[test]
    fn test_full_board_qualification() {
        let mut board = filled_board();
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert!(!board.qualifies(50.0));
        assert!(board.qualifies(50.5));
        assert_eq!(board.potential_rank(100.0), Some(1));
        assert_eq!(board.add_entry("late", 49.0, None, None), None);
        assert_eq!(board.add_entry("edge", 51.5, None, None), Some(9));
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().unwrap().score, 51.0);
    }

    #[test]
    fn test_zero_score_never_qualifies() {
        let board = Leaderboard::new();
        assert!(!board.qualifies(0.0));
        assert!(!board.qualifies(f64::NAN));
        assert_eq!(board.potential_rank(0.0), None);
    }

    #[test]
    fn test_names_are_sanitized() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_entry("   ", 80.0, None, None), None);
        board.add_entry("  a very long player name indeed  ", 80.0, None, None);
        assert_eq!(board.entries[0].username, "a very long player n");
        assert_eq!(board.entries[0].username.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_merge() {
        let mut board = filled_board();
        board.merge(vec![LeaderboardEntry {
            username: "remote".into(),
            score: 99.0,
            device_id: Some("device_x".into()),
            created_at: None,
        }]);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries[0].username, "remote");
    }

    #[test]
    fn test_entry_json_shape() {
        let json = r#"[{"username":"ann","score":97.5,"device_id":"device_abc_1","created_at":"2024-01-01T00:00:00Z"},{"username":"bob","score":90}]"#;
        let board: Leaderboard = serde_json::from_str(json).unwrap();
        assert_eq!(board.entries.len(), 2);
        assert_eq!(board.entries[0].device_id.as_deref(), Some("device_abc_1"));
        assert_eq!(board.entries[1].created_at, None);
        let out = serde_json::to_string(&board.entries[1]).unwrap();
        assert_eq!(out, r#"{"username":"bob","score":90.0}"#);
    }

    #[test]
    fn test_leaderboard_persistence() {
        let board = filled_board();
        board.save();
        assert_eq!(Leaderboard::load(), board);
    }

    #[test]
    fn test_personal_best() {
        let mut best = PersonalBest::default();
        assert!(best.record(70.0));
        assert!(!best.record(65.0));
        assert!(!best.record(70.0));
        assert!(best.record(71.2));
        assert_eq!(best.best, Some(71.2));
        best.save();
        assert_eq!(PersonalBest::load(), best);
    }

    #[test]
    fn test_record_holder() {
        let mut record = HighScoreRecord::default();
        assert_eq!(record.name, "Nobody yet");
        assert!(!record.claim("ann", 0.0));
        assert!(!record.claim("  ", 80.0));
        assert!(record.claim(" ann ", 80.0));
        assert_eq!(record.name, "ann");
        assert!(!record.is_beaten_by(80.0));
        assert!(record.is_beaten_by(80.1));
        record.save();
        assert_eq!(HighScoreRecord::load(), record);
    }

    #[test]
    fn test_device_id_format() {
        let mut rng = Pcg32::seed_from_u64(1);
        let id = generate_device_id(&mut rng, 1_700_000_000_000);
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "device");
        assert_eq!(parts[1].len(), 9);
        assert!(parts[1].bytes().all(|b| BASE36.contains(&b)));
        assert_eq!(parts[2], "1700000000000");
    }

    #[test]
    fn test_device_id_is_stable() {
        let mut rng = Pcg32::seed_from_u64(2);
        let first = device_id(&mut rng, 1);
        let second = device_id(&mut rng, 2);
        assert_eq!(first, second);
    }
}
