use pincer_core::ConfidenceLevel;

// Sample-size gradation. Rules that state their own confidence bypass this.
pub fn confidence_from_samples(sample_count: usize) -> ConfidenceLevel {
    match sample_count {
        0..=4 => ConfidenceLevel::Insufficient,
        5..=10 => ConfidenceLevel::Preliminary,
        11..=20 => ConfidenceLevel::Moderate,
        21..=50 => ConfidenceLevel::Good,
        _ => ConfidenceLevel::Strong,
    }
}
