//! Category-specific generation prompts

use super::Category;
use talkup_common::types::Difficulty;

/// Build the instruction sent to the provider for one batch request
pub fn build(category: Category, count: usize, difficulty: Option<Difficulty>) -> String {
    match category {
        Category::Topics => format!(
            "Generate {count} interesting, open-ended discussion topics for English \
             speaking practice. They should cover varied themes like technology, \
             society, personal growth, travel, and culture. \
             Return ONLY a JSON array of objects with this structure: \
             [{{\"id\": 1, \"text\": \"Topic question here\"}}, ...]. \
             Do not include markdown formatting."
        ),
        Category::Grammar => {
            let level = difficulty_instruction(difficulty.unwrap_or(Difficulty::Intermediate));
            format!(
                "Generate {count} unique, diverse English sentences for grammar \
                 practice at {level}. \
                 Return ONLY a JSON array of objects with this structure: \
                 [{{\"id\": 1, \"text\": \"Sentence here\"}}, ...]. \
                 Do not include markdown formatting."
            )
        }
    }
}

fn difficulty_instruction(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Basic => {
            "a beginner level: short sentences with everyday vocabulary and simple tenses"
        }
        Difficulty::Intermediate => {
            "an intermediate level: compound sentences with varied tenses and connectors"
        }
        Difficulty::Advanced => {
            "an advanced level: idioms, complex clauses, and mixed conditionals"
        }
    }
}
