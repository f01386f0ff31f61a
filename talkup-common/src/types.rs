//! Practice content and scoring data model
//!
//! These types cross three boundaries: the HTTP API (camelCase JSON for the
//! browser client), the generation provider (JSON arrays of `{id, text}`),
//! and the persisted cache snapshot. One set of serde structs serves all
//! three so the shapes can never drift apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One unit of practice content, from generation or the fallback corpus.
///
/// Immutable once created; lives in exactly one queue until consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeItem {
    /// Provider- or corpus-assigned identifier
    pub id: i64,
    /// The topic prompt or grammar sentence
    pub text: String,
}

/// Grammar difficulty level (closed set)
///
/// Keys are fixed for the life of the process; queues for all three levels
/// always exist, even when empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// All levels, in ascending order
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Basic,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Parse a query-string difficulty key; unknown keys are rejected
    /// before any I/O happens on their behalf.
    pub fn parse(key: &str) -> Option<Difficulty> {
        match key {
            "basic" => Some(Difficulty::Basic),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-difficulty grammar queues as persisted in the snapshot document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammarQueues {
    pub basic: Vec<PracticeItem>,
    pub intermediate: Vec<PracticeItem>,
    pub advanced: Vec<PracticeItem>,
}

impl GrammarQueues {
    pub fn get(&self, difficulty: Difficulty) -> &Vec<PracticeItem> {
        match difficulty {
            Difficulty::Basic => &self.basic,
            Difficulty::Intermediate => &self.intermediate,
            Difficulty::Advanced => &self.advanced,
        }
    }

    pub fn get_mut(&mut self, difficulty: Difficulty) -> &mut Vec<PracticeItem> {
        match difficulty {
            Difficulty::Basic => &mut self.basic,
            Difficulty::Intermediate => &mut self.intermediate,
            Difficulty::Advanced => &mut self.advanced,
        }
    }

    /// Total item count across all three levels
    pub fn total_len(&self) -> usize {
        self.basic.len() + self.intermediate.len() + self.advanced.len()
    }
}

/// Whole-cache persisted projection, written and read as a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Topic queue, head first
    pub topics: Vec<PracticeItem>,
    /// Grammar queues keyed by difficulty, head first
    pub grammar: GrammarQueues,
    /// When this snapshot was written (informational only)
    pub saved_at: DateTime<Utc>,
}

impl Default for CacheSnapshot {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            grammar: GrammarQueues::default(),
            saved_at: Utc::now(),
        }
    }
}

/// Counts returned by a cache clear, for observability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearSummary {
    pub removed_topics: usize,
    pub removed_grammar: usize,
}

/// Structured score report for one spoken attempt
///
/// Field casing matches the browser client's JSON expectations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// Word-level edit-distance accuracy, 0-100
    pub accuracy_score: i64,
    /// 100 minus filler/repeat penalties, clamped to 0-100
    pub fluency_rating: i64,
    /// Placeholder heuristic: accuracy + 10, capped at 100
    pub pronunciation_score: i64,
    /// Pace score against the 120-150 wpm target band
    pub speed_score: i64,
    /// Words per minute, rounded
    pub wpm: i64,
    pub details: ScoreDetails,
}

/// Raw counts behind a [`ScoreReport`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    /// Approximate count of unedited target words
    pub correct_words: i64,
    /// Token count of the target text
    pub total_words: i64,
    /// Token count of the transcript
    pub spoken_words: i64,
    pub filler_count: i64,
    pub repeat_count: i64,
    /// Spoken duration in seconds, as reported by the client
    pub duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_known_keys() {
        assert_eq!(Difficulty::parse("basic"), Some(Difficulty::Basic));
        assert_eq!(
            Difficulty::parse("intermediate"),
            Some(Difficulty::Intermediate)
        );
        assert_eq!(Difficulty::parse("advanced"), Some(Difficulty::Advanced));
    }

    #[test]
    fn test_difficulty_parse_rejects_unknown_keys() {
        assert_eq!(Difficulty::parse("french"), None);
        assert_eq!(Difficulty::parse(""), None);
        assert_eq!(Difficulty::parse("Basic"), None); // case-sensitive
    }

    #[test]
    fn test_difficulty_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Intermediate).unwrap();
        assert_eq!(json, "\"intermediate\"");
    }

    #[test]
    fn test_snapshot_round_trip_preserves_order() {
        let mut snapshot = CacheSnapshot::default();
        snapshot.topics = vec![
            PracticeItem { id: 2, text: "second".into() },
            PracticeItem { id: 1, text: "first".into() },
        ];
        snapshot.grammar.advanced = vec![PracticeItem { id: 7, text: "x".into() }];

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: CacheSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.topics, snapshot.topics);
        assert_eq!(restored.grammar, snapshot.grammar);
    }

    #[test]
    fn test_score_report_wire_casing() {
        let report = ScoreReport {
            accuracy_score: 90,
            fluency_rating: 87,
            pronunciation_score: 100,
            speed_score: 100,
            wpm: 135,
            details: ScoreDetails {
                correct_words: 9,
                total_words: 10,
                spoken_words: 10,
                filler_count: 2,
                repeat_count: 1,
                duration: 4.4,
            },
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("accuracyScore").is_some());
        assert!(value.get("details").unwrap().get("correctWords").is_some());
    }
}
