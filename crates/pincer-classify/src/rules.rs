use crate::confidence::confidence_from_samples;
use pincer_core::{AccountProfile, Category, ComponentScores, ConfidenceLevel};
use tracing::trace;

pub const REPETITION_ELEVATED_MIN: f64 = 0.30;
pub const REPETITION_HIGH_MIN: f64 = 0.70;
pub const SCRIPTED_REPETITION_MIN: f64 = 0.90;
pub const FAST_TIMING_MIN: f64 = 0.80;
pub const FAST_VARIANCE_MIN: f64 = 0.60;
pub const MODERATE_TIMING_MIN: f64 = 0.50;
pub const MODERATE_TIMING_MAX: f64 = 0.80;
pub const HUMAN_TIMING_MAX: f64 = 0.30;
pub const HUMAN_ACTIVITY_MAX: f64 = 0.50;
pub const MIN_SAMPLES: usize = 5;
pub const MODERATE_MIN_SAMPLES: usize = 3;

pub struct RuleInput<'a> {
    pub profile: &'a AccountProfile,
    pub scores: &'a ComponentScores,
    pub coordinated: bool,
}

// One row of the category table. A None confidence defers to the
// sample-count gradation.
pub struct Rule {
    pub category: Category,
    pub confidence: Option<ConfidenceLevel>,
    pub guard: fn(&RuleInput) -> bool,
}

fn emoji_bot(input: &RuleInput) -> bool {
    input.profile.emoji_only && input.profile.emoji_fast && input.coordinated
}

fn minting_bot(input: &RuleInput) -> bool {
    input.profile.minting_only && input.profile.sample_count >= 1
}

fn scripted_bot(input: &RuleInput) -> bool {
    input
        .scores
        .repetition
        .is_some_and(|rep| rep > SCRIPTED_REPETITION_MIN)
        && input.profile.sample_count >= MIN_SAMPLES
}

fn fast_responder(input: &RuleInput) -> bool {
    input.scores.timing.is_some_and(|t| t > FAST_TIMING_MIN)
        && input
            .scores
            .variance
            .is_some_and(|v| v > FAST_VARIANCE_MIN)
        && input.profile.sample_count >= MIN_SAMPLES
}

fn moderate_signals(input: &RuleInput) -> bool {
    input
        .scores
        .timing
        .is_some_and(|t| (MODERATE_TIMING_MIN..=MODERATE_TIMING_MAX).contains(&t))
        && input.profile.sample_count >= MODERATE_MIN_SAMPLES
}

fn human_paced(input: &RuleInput) -> bool {
    input.scores.timing.is_some_and(|t| t < HUMAN_TIMING_MAX)
        && input.scores.activity < HUMAN_ACTIVITY_MAX
}

fn insufficient_data(input: &RuleInput) -> bool {
    input.profile.sample_count < MIN_SAMPLES
}

fn catch_all(_input: &RuleInput) -> bool {
    true
}

// Ordered: categories overlap in score-space and the first match wins. The
// structural rules sit on top because their triggers are near-conclusive
// regardless of sample count.
static RULES: [Rule; 8] = [
    Rule {
        category: Category::EmojiBot,
        confidence: Some(ConfidenceLevel::VeryHigh),
        guard: emoji_bot,
    },
    Rule {
        category: Category::MintingBot,
        confidence: Some(ConfidenceLevel::VeryHigh),
        guard: minting_bot,
    },
    Rule {
        category: Category::ScriptedBot,
        confidence: Some(ConfidenceLevel::High),
        guard: scripted_bot,
    },
    Rule {
        category: Category::FastResponder,
        confidence: Some(ConfidenceLevel::LowMedium),
        guard: fast_responder,
    },
    Rule {
        category: Category::ModerateSignals,
        confidence: Some(ConfidenceLevel::Low),
        guard: moderate_signals,
    },
    Rule {
        category: Category::HumanPaced,
        confidence: Some(ConfidenceLevel::Low),
        guard: human_paced,
    },
    Rule {
        category: Category::InsufficientData,
        confidence: None,
        guard: insufficient_data,
    },
    Rule {
        category: Category::Unclassified,
        confidence: None,
        guard: catch_all,
    },
];

pub fn rule_table() -> &'static [Rule] {
    &RULES
}

// Interpretation bands for a repetition rate; only the very-high line feeds
// a rule, the rest label reports.
pub fn repetition_band(repetition: f64) -> &'static str {
    if repetition > SCRIPTED_REPETITION_MIN {
        "very high"
    } else if repetition > REPETITION_HIGH_MIN {
        "high"
    } else if repetition >= REPETITION_ELEVATED_MIN {
        "elevated"
    } else {
        "normal"
    }
}

// Never errors: ambiguity is a valid output (category plus low confidence),
// not a failure.
pub fn classify(input: &RuleInput) -> (Category, ConfidenceLevel) {
    for rule in rule_table() {
        if (rule.guard)(input) {
            let confidence = rule
                .confidence
                .unwrap_or_else(|| confidence_from_samples(input.profile.sample_count));
            trace!(
                account = %input.profile.account_id,
                category = ?rule.category,
                "rule matched"
            );
            return (rule.category, confidence);
        }
    }
    (
        Category::Unclassified,
        confidence_from_samples(input.profile.sample_count),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn profile(sample_count: usize) -> AccountProfile {
        AccountProfile {
            account_id: "a".to_string(),
            sample_count,
            avg_latency_secs: None,
            latency_cv: None,
            repetition: None,
            activity: 0.1,
            emoji_only: false,
            emoji_fast: false,
            minting_only: false,
            first_seen: at("2026-02-01T08:00:00Z"),
            last_seen: at("2026-02-01T20:00:00Z"),
        }
    }

    fn scores() -> ComponentScores {
        ComponentScores {
            timing: None,
            repetition: None,
            variance: None,
            activity: 0.1,
        }
    }

    #[test]
    fn repetition_bands() {
        assert_eq!(repetition_band(0.1), "normal");
        assert_eq!(repetition_band(0.30), "elevated");
        assert_eq!(repetition_band(0.71), "high");
        assert_eq!(repetition_band(0.95), "very high");
    }

    #[test]
    fn table_ends_in_a_catch_all() {
        let table = rule_table();
        assert_eq!(table.len(), 8);
        assert_eq!(table[0].category, Category::EmojiBot);
        assert_eq!(table[7].category, Category::Unclassified);
        let input = RuleInput {
            profile: &profile(100),
            scores: &scores(),
            coordinated: false,
        };
        assert!((table[7].guard)(&input));
    }

    #[test]
    fn structural_rules_precede_score_rules() {
        let table = rule_table();
        let scripted_pos = table
            .iter()
            .position(|r| r.category == Category::ScriptedBot)
            .unwrap();
        assert!(table[..scripted_pos]
            .iter()
            .all(|r| matches!(r.category, Category::EmojiBot | Category::MintingBot)));
    }

    #[test]
    fn minting_bot_overrides_the_sample_gate() {
        let mut p = profile(1);
        p.minting_only = true;
        let input = RuleInput {
            profile: &p,
            scores: &scores(),
            coordinated: false,
        };
        assert_eq!(classify(&input), (Category::MintingBot, ConfidenceLevel::VeryHigh));
    }

    #[test]
    fn emoji_without_coordination_is_not_an_emoji_bot() {
        let mut p = profile(5);
        p.emoji_only = true;
        p.emoji_fast = true;
        let input = RuleInput {
            profile: &p,
            scores: &scores(),
            coordinated: false,
        };
        let (category, _) = classify(&input);
        assert_ne!(category, Category::EmojiBot);
    }

    #[test]
    fn scripted_bot_needs_five_samples() {
        let mut p = profile(4);
        p.repetition = Some(0.95);
        let mut s = scores();
        s.repetition = Some(0.95);
        let input = RuleInput {
            profile: &p,
            scores: &s,
            coordinated: false,
        };
        assert_eq!(classify(&input).0, Category::InsufficientData);

        let p5 = {
            let mut p = profile(5);
            p.repetition = Some(0.95);
            p
        };
        let input = RuleInput {
            profile: &p5,
            scores: &s,
            coordinated: false,
        };
        assert_eq!(classify(&input), (Category::ScriptedBot, ConfidenceLevel::High));
    }

    #[test]
    fn repetition_at_the_line_is_not_scripted() {
        let mut p = profile(10);
        let mut s = scores();
        p.repetition = Some(0.90);
        s.repetition = Some(0.90);
        let input = RuleInput {
            profile: &p,
            scores: &s,
            coordinated: false,
        };
        assert_ne!(classify(&input).0, Category::ScriptedBot);
    }

    #[test]
    fn fast_and_regular_is_a_fast_responder() {
        let p = {
            let mut p = profile(8);
            p.avg_latency_secs = Some(3.0);
            p.latency_cv = Some(0.05);
            p
        };
        let s = ComponentScores {
            timing: Some(0.95),
            repetition: Some(0.1),
            variance: Some(0.9),
            activity: 0.3,
        };
        let input = RuleInput {
            profile: &p,
            scores: &s,
            coordinated: false,
        };
        assert_eq!(
            classify(&input),
            (Category::FastResponder, ConfidenceLevel::LowMedium)
        );
    }

    #[test]
    fn fast_but_erratic_falls_through_to_moderate() {
        let p = profile(8);
        let s = ComponentScores {
            timing: Some(0.7),
            repetition: None,
            variance: Some(0.2),
            activity: 0.3,
        };
        let input = RuleInput {
            profile: &p,
            scores: &s,
            coordinated: false,
        };
        assert_eq!(
            classify(&input),
            (Category::ModerateSignals, ConfidenceLevel::Low)
        );
    }

    #[test]
    fn slow_and_gappy_is_human_paced() {
        let p = profile(10);
        let s = ComponentScores {
            timing: Some(0.05),
            repetition: Some(0.0),
            variance: Some(0.4),
            activity: 0.25,
        };
        let input = RuleInput {
            profile: &p,
            scores: &s,
            coordinated: false,
        };
        assert_eq!(classify(&input), (Category::HumanPaced, ConfidenceLevel::Low));
    }

    #[test]
    fn no_signals_and_few_events_is_insufficient() {
        let input = RuleInput {
            profile: &profile(3),
            scores: &scores(),
            coordinated: false,
        };
        assert_eq!(
            classify(&input),
            (Category::InsufficientData, ConfidenceLevel::Insufficient)
        );
    }

    #[test]
    fn adequate_samples_without_a_pattern_are_unclassified() {
        let p = profile(15);
        let s = ComponentScores {
            timing: Some(0.9),
            repetition: Some(0.2),
            variance: Some(0.1),
            activity: 0.6,
        };
        let input = RuleInput {
            profile: &p,
            scores: &s,
            coordinated: false,
        };
        // fast but erratic, not moderate, not slow: no rule fits
        assert_eq!(
            classify(&input),
            (Category::Unclassified, ConfidenceLevel::Moderate)
        );
    }
}
