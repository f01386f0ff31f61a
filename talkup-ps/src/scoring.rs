//! Transcript scoring engine
//!
//! Pure computation, no I/O: produces a [`ScoreReport`] from a target
//! sentence, a speech-recognition transcript, the spoken duration, and the
//! filler/repeat signals detected by the client.
//!
//! Edit distance is computed over whole-word tokens rather than characters
//! so that minor spelling noise from imperfect transcription costs at most
//! one edit per word.

use talkup_common::types::{ScoreDetails, ScoreReport};

/// Lowercase, strip everything but letters/digits/whitespace, and split
/// into word tokens. Runs of whitespace collapse; empty tokens are dropped.
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Minimum edit distance between two token sequences (Wagner-Fischer),
/// unit cost per insertion, deletion, or substitution.
pub fn word_edit_distance(target: &[String], spoken: &[String]) -> usize {
    if target.is_empty() {
        return spoken.len();
    }
    if spoken.is_empty() {
        return target.len();
    }

    // Two-row formulation; only the previous row is needed.
    let mut prev: Vec<usize> = (0..=spoken.len()).collect();
    let mut curr: Vec<usize> = vec![0; spoken.len() + 1];

    for (i, t) in target.iter().enumerate() {
        curr[0] = i + 1;
        for (j, s) in spoken.iter().enumerate() {
            let substitution = prev[j] + usize::from(t != s);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[spoken.len()]
}

/// Pace score against the 120-150 wpm target band.
///
/// Inside the band: 100. Below: linear ramp from 0 at 0 wpm. Above:
/// 2 points lost per wpm over 150, floored at 0.
pub fn speed_score(wpm: i64) -> i64 {
    if (120..=150).contains(&wpm) {
        100
    } else if wpm < 120 {
        (((wpm as f64 / 120.0) * 100.0).round() as i64).max(0)
    } else {
        ((100.0 - (wpm as f64 - 150.0) / 2.0).round() as i64).max(0)
    }
}

/// Score one spoken attempt. Total and deterministic for any inputs.
pub fn score(
    target_text: &str,
    transcript: &str,
    duration_seconds: f64,
    filler_words: &[String],
    repeating_words: &[String],
) -> ScoreReport {
    let target = normalize(target_text);
    let spoken = normalize(transcript);

    let distance = word_edit_distance(&target, &spoken);
    let longest = target.len().max(spoken.len());
    let accuracy_score = if longest == 0 {
        0
    } else {
        ((1.0 - distance as f64 / longest as f64) * 100.0).round() as i64
    };

    // Approximate count of unedited words, never negative
    let correct_words = (target.len() as i64 - distance as i64).max(0);

    let filler_count = filler_words.len() as i64;
    let repeat_count = repeating_words.len() as i64;
    let fluency_rating = (100 - 5 * filler_count - 3 * repeat_count).clamp(0, 100);

    // Placeholder heuristic standing in for true phonetic comparison
    let pronunciation_score = (accuracy_score + 10).min(100);

    let wpm = if duration_seconds > 0.0 {
        (spoken.len() as f64 / (duration_seconds / 60.0)).round() as i64
    } else {
        0
    };

    ScoreReport {
        accuracy_score,
        fluency_rating,
        pronunciation_score,
        speed_score: speed_score(wpm),
        wpm,
        details: ScoreDetails {
            correct_words,
            total_words: target.len() as i64,
            spoken_words: spoken.len() as i64,
            filler_count,
            repeat_count,
            duration: duration_seconds,
        },
    }
}
