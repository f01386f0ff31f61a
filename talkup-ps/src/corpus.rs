//! Static fallback datasets
//!
//! Pre-built practice content bundled into the binary, served whenever the
//! generation provider is unavailable or returns nothing usable.

use talkup_common::types::PracticeItem;
use talkup_common::Result;

const TOPICS_JSON: &str = include_str!("../data/topics.json");
const GRAMMAR_JSON: &str = include_str!("../data/grammar.json");
const INTERVIEWS_JSON: &str = include_str!("../data/interviews.json");

/// Read-only static datasets, parsed once at startup
pub struct FallbackCorpus {
    topics: Vec<PracticeItem>,
    grammar: Vec<PracticeItem>,
    interviews: Vec<PracticeItem>,
}

impl FallbackCorpus {
    /// Parse the bundled datasets
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            topics: serde_json::from_str(TOPICS_JSON)?,
            grammar: serde_json::from_str(GRAMMAR_JSON)?,
            interviews: serde_json::from_str(INTERVIEWS_JSON)?,
        })
    }

    /// Discussion topic prompts
    pub fn topics(&self) -> &[PracticeItem] {
        &self.topics
    }

    /// Grammar practice sentences (all difficulties mixed)
    pub fn grammar(&self) -> &[PracticeItem] {
        &self.grammar
    }

    /// Interview practice questions
    pub fn interviews(&self) -> &[PracticeItem] {
        &self.interviews
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_datasets_parse() {
        let corpus = FallbackCorpus::bundled().unwrap();
        assert!(!corpus.topics().is_empty());
        assert!(!corpus.interviews().is_empty());
        // Grammar fallback fills take the first 20 sentences
        assert!(corpus.grammar().len() >= 20);
    }

    #[test]
    fn test_bundled_items_are_non_empty_text() {
        let corpus = FallbackCorpus::bundled().unwrap();
        for item in corpus
            .topics()
            .iter()
            .chain(corpus.grammar())
            .chain(corpus.interviews())
        {
            assert!(!item.text.trim().is_empty(), "empty text for id {}", item.id);
        }
    }
}
