use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub thread: Option<RawThread>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawThread {
    pub thread_id: String,
    pub trigger_at: String,
}

#[derive(Debug, Clone)]
pub struct ContentEvent {
    pub account_id: String,
    pub created_at: DateTime<Utc>,
    pub content: String,
    pub thread: Option<ThreadRef>,
}

#[derive(Debug, Clone)]
pub struct ThreadRef {
    pub thread_id: String,
    pub trigger_at: DateTime<Utc>,
}

// Events ascending by created_at; equal timestamps keep input order.
#[derive(Debug, Clone)]
pub struct AccountTimeline {
    pub account_id: String,
    pub events: Vec<ContentEvent>,
}

impl AccountTimeline {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// None means the extractor had too little data, which is distinct from 0.0
// and must survive serialization as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub timing: Option<f64>,
    pub repetition: Option<f64>,
    pub variance: Option<f64>,
    pub activity: f64,
}

#[derive(Debug, Clone)]
pub struct AccountProfile {
    pub account_id: String,
    pub sample_count: usize,
    pub avg_latency_secs: Option<f64>,
    pub latency_cv: Option<f64>,
    pub repetition: Option<f64>,
    pub activity: f64,
    pub emoji_only: bool,
    // structural check, deliberately not behind the timing extractor's
    // two-sample gate: one sub-5s reply is enough
    pub emoji_fast: bool,
    pub minting_only: bool,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    EmojiBot,
    MintingBot,
    ScriptedBot,
    FastResponder,
    ModerateSignals,
    HumanPaced,
    InsufficientData,
    Unclassified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Insufficient,
    Preliminary,
    Moderate,
    Good,
    Strong,
    Low,
    #[serde(rename = "Low-Medium")]
    LowMedium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub account_id: String,
    pub component_scores: ComponentScores,
    pub sample_count: usize,
    pub category: Category,
    pub confidence_level: ConfidenceLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountFailure {
    pub account_id: String,
    pub error: String,
}

// Results and failures are sorted by account id so a rerun over the same
// input serializes byte-identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<ClassificationResult>,
    pub failures: Vec<AccountFailure>,
}
