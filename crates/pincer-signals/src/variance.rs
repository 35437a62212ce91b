use crate::stats;
use crate::timing::MIN_LATENCY_SAMPLES;

// Consistency of response timing, over the same samples as the timing
// extractor and behind the same insufficiency gate. Distinguishes reliably
// fast from erratically fast.
pub fn latency_cv(samples: &[f64]) -> Option<f64> {
    if samples.len() < MIN_LATENCY_SAMPLES {
        return None;
    }
    Some(stats::coefficient_of_variation(samples))
}
