use chrono::Timelike;
use pincer_core::AccountTimeline;

// Fraction of the 24 UTC hour-of-day buckets touched by at least one event.
// Degrades gracefully instead of going insufficient: a short observation
// window and a genuine night gap are indistinguishable here, and the
// classifier discounts low-sample accounts rather than this extractor.
pub fn activity_score(timeline: &AccountTimeline) -> f64 {
    let mut buckets = [false; 24];
    for event in &timeline.events {
        buckets[event.created_at.hour() as usize] = true;
    }
    buckets.iter().filter(|covered| **covered).count() as f64 / 24.0
}
