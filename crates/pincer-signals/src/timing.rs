use crate::stats;
use pincer_core::AccountTimeline;

pub const MIN_LATENCY_SAMPLES: usize = 2;

// Responses slower than a day are treated as unrelated activity, not replies.
pub const MAX_LATENCY_SECS: f64 = 86_400.0;

// Latency is only computed forward: the trigger precedes the response.
pub fn latency_samples(timeline: &AccountTimeline) -> Vec<f64> {
    timeline
        .events
        .iter()
        .filter_map(|event| {
            let thread = event.thread.as_ref()?;
            let millis = (event.created_at - thread.trigger_at).num_milliseconds();
            let secs = millis as f64 / 1000.0;
            (secs > 0.0 && secs < MAX_LATENCY_SECS).then_some(secs)
        })
        .collect()
}

pub fn average_latency(samples: &[f64]) -> Option<f64> {
    if samples.len() < MIN_LATENCY_SAMPLES {
        return None;
    }
    Some(stats::mean(samples))
}
