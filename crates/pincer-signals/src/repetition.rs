use pincer_core::AccountTimeline;
use std::collections::HashSet;
use xxhash_rust::xxh3::xxh3_64;

pub const MIN_COMMENTED_EVENTS: usize = 5;

fn normalize_token(token: &str, strip_punctuation: bool) -> String {
    let lower = token.to_lowercase();
    if strip_punctuation {
        lower.chars().filter(|c| !c.is_ascii_punctuation()).collect()
    } else {
        lower
    }
}

// Word-level 3-grams of one content string; windows never span two events.
fn trigram_hashes(text: &str, strip_punctuation: bool) -> Vec<u64> {
    let tokens: Vec<String> = text
        .split_whitespace()
        .map(|t| normalize_token(t, strip_punctuation))
        .filter(|t| !t.is_empty())
        .collect();
    tokens
        .windows(3)
        .map(|w| xxh3_64(w.join(" ").as_bytes()))
        .collect()
}

// 1 - distinct/total over the account's 3-grams. None below the event
// minimum, and None when no content is long enough to form a single 3-gram:
// a zero denominator must never turn into a spurious 0.0 or 1.0.
pub fn repetition_score(timeline: &AccountTimeline, strip_punctuation: bool) -> Option<f64> {
    let texts: Vec<&str> = timeline
        .events
        .iter()
        .map(|e| e.content.as_str())
        .filter(|c| !c.trim().is_empty())
        .collect();

    if texts.len() < MIN_COMMENTED_EVENTS {
        return None;
    }

    let mut total = 0usize;
    let mut distinct: HashSet<u64> = HashSet::new();
    for text in &texts {
        for hash in trigram_hashes(text, strip_punctuation) {
            total += 1;
            distinct.insert(hash);
        }
    }

    if total == 0 {
        return None;
    }

    Some(1.0 - distinct.len() as f64 / total as f64)
}
