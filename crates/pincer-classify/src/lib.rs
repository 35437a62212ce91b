pub mod confidence;
pub mod rules;

pub use confidence::confidence_from_samples;
pub use rules::{classify, repetition_band, rule_table, Rule, RuleInput};
