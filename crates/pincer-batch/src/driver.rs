use dashmap::DashMap;
use pincer_classify::{classify, RuleInput};
use pincer_core::{
    AccountFailure, AccountProfile, BatchReport, ClassificationResult, ComponentScores,
    PincerError, PincerResult, RawEvent,
};
use pincer_ingest::{build_timeline, group_by_account};
use pincer_signals::{extract_profile, ExtractorOptions, PopulationStats};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub strip_punctuation: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            strip_punctuation: true,
        }
    }
}

impl BatchOptions {
    fn extractor(&self) -> ExtractorOptions {
        ExtractorOptions {
            strip_punctuation: self.strip_punctuation,
        }
    }
}

fn classify_profile(profile: &AccountProfile, population: &PopulationStats) -> ClassificationResult {
    let scores = ComponentScores {
        timing: profile.avg_latency_secs.map(|avg| population.timing_score(avg)),
        repetition: profile.repetition,
        variance: profile.latency_cv.map(|cv| population.variance_score(cv)),
        activity: profile.activity,
    };
    let input = RuleInput {
        profile,
        scores: &scores,
        coordinated: population.is_coordinated(&profile.account_id),
    };
    let (category, confidence_level) = classify(&input);

    ClassificationResult {
        account_id: profile.account_id.clone(),
        component_scores: scores,
        sample_count: profile.sample_count,
        category,
        confidence_level,
    }
}

fn finalize(
    mut results: Vec<ClassificationResult>,
    mut failures: Vec<AccountFailure>,
) -> BatchReport {
    results.sort_by(|a, b| a.account_id.cmp(&b.account_id));
    failures.sort_by(|a, b| a.account_id.cmp(&b.account_id));
    BatchReport { results, failures }
}

// Single-threaded pipeline: Phase A per-account profiles, Phase B frozen
// population tables, Phase C classification. Reference semantics for the
// parallel path.
pub fn run_batch(events: Vec<RawEvent>, opts: &BatchOptions) -> PincerResult<BatchReport> {
    if events.is_empty() {
        return Err(PincerError::Population(
            "empty batch: no events to classify".to_string(),
        ));
    }

    let grouped = group_by_account(events);
    let extractor_opts = opts.extractor();

    let mut profiles = Vec::with_capacity(grouped.len());
    let mut failures = Vec::new();
    for (account_id, raws) in &grouped {
        match build_timeline(account_id, raws) {
            Ok(timeline) => profiles.push(extract_profile(&timeline, &extractor_opts)),
            Err(e) => {
                warn!(account = %account_id, error = %e, "account failed ingestion");
                failures.push(AccountFailure {
                    account_id: account_id.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    if profiles.is_empty() {
        return Err(PincerError::Population(
            "no well-formed accounts in batch".to_string(),
        ));
    }

    let population = PopulationStats::build(&profiles)?;

    let results = profiles
        .iter()
        .map(|p| classify_profile(p, &population))
        .collect();

    info!(
        accounts = grouped.len(),
        failed = failures.len(),
        "batch classified"
    );

    Ok(finalize(results, failures))
}

// Same semantics, fan-out execution: Phase A and Phase C run one task per
// account; Phase B is the single synchronization point between them. The
// population table is published behind an Arc and never mutated afterwards.
pub async fn run_batch_parallel(
    events: Vec<RawEvent>,
    opts: &BatchOptions,
) -> PincerResult<BatchReport> {
    if events.is_empty() {
        return Err(PincerError::Population(
            "empty batch: no events to classify".to_string(),
        ));
    }

    let grouped = group_by_account(events);
    let account_total = grouped.len();
    let extractor_opts = opts.extractor();

    // Phase A: each account's timeline is exclusively owned by its task.
    let profiles: Arc<DashMap<String, AccountProfile>> = Arc::new(DashMap::new());
    let failures: Arc<DashMap<String, String>> = Arc::new(DashMap::new());

    let mut phase_a = JoinSet::new();
    for (account_id, raws) in grouped {
        let profiles = profiles.clone();
        let failures = failures.clone();
        let extractor_opts = extractor_opts.clone();
        phase_a.spawn(async move {
            match build_timeline(&account_id, &raws) {
                Ok(timeline) => {
                    profiles.insert(account_id, extract_profile(&timeline, &extractor_opts));
                }
                Err(e) => {
                    warn!(account = %account_id, error = %e, "account failed ingestion");
                    failures.insert(account_id, e.to_string());
                }
            }
        });
    }
    while let Some(joined) = phase_a.join_next().await {
        joined.map_err(|e| PincerError::Batch(format!("profile task failed: {}", e)))?;
    }

    let mut profile_list: Vec<AccountProfile> =
        profiles.iter().map(|entry| entry.value().clone()).collect();
    profile_list.sort_by(|a, b| a.account_id.cmp(&b.account_id));

    if profile_list.is_empty() {
        return Err(PincerError::Population(
            "no well-formed accounts in batch".to_string(),
        ));
    }

    // Phase B: build, then freeze.
    let population = Arc::new(PopulationStats::build(&profile_list)?);

    // Phase C: percentile lookups and rule evaluation, independent again.
    let mut phase_c = JoinSet::new();
    for profile in profile_list {
        let population = population.clone();
        phase_c.spawn(async move { classify_profile(&profile, &population) });
    }

    let mut results = Vec::with_capacity(account_total);
    while let Some(joined) = phase_c.join_next().await {
        results.push(joined.map_err(|e| PincerError::Batch(format!("classify task failed: {}", e)))?);
    }

    let failures: Vec<AccountFailure> = failures
        .iter()
        .map(|entry| AccountFailure {
            account_id: entry.key().clone(),
            error: entry.value().clone(),
        })
        .collect();

    info!(
        accounts = account_total,
        failed = failures.len(),
        "batch classified"
    );

    Ok(finalize(results, failures))
}
