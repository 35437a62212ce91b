use crate::{activity, repetition, structural, timing, variance};
use chrono::{DateTime, Utc};
use pincer_core::{AccountProfile, AccountTimeline};

#[derive(Debug, Clone)]
pub struct ExtractorOptions {
    pub strip_punctuation: bool,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            strip_punctuation: true,
        }
    }
}

// Phase A: one read-only pass over a single account's timeline. No
// population-relative numbers yet; those need the Phase B tables.
pub fn extract_profile(timeline: &AccountTimeline, opts: &ExtractorOptions) -> AccountProfile {
    let samples = timing::latency_samples(timeline);

    let first_seen = timeline
        .events
        .first()
        .map(|e| e.created_at)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let last_seen = timeline
        .events
        .last()
        .map(|e| e.created_at)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    AccountProfile {
        account_id: timeline.account_id.clone(),
        sample_count: timeline.len(),
        avg_latency_secs: timing::average_latency(&samples),
        latency_cv: variance::latency_cv(&samples),
        repetition: repetition::repetition_score(timeline, opts.strip_punctuation),
        activity: activity::activity_score(timeline),
        emoji_only: structural::is_emoji_only(timeline),
        emoji_fast: structural::is_emoji_fast(&samples),
        minting_only: structural::is_minting_only(timeline),
        first_seen,
        last_seen,
    }
}
