use crate::stats::PercentileTable;
use pincer_core::{AccountProfile, PincerError, PincerResult};
use std::collections::BTreeSet;
use tracing::debug;

// Two emoji accounts appearing and disappearing this close together are
// treated as one batch.
pub const EMOJI_COHORT_WINDOW_SECS: i64 = 1800;
pub const EMOJI_COHORT_MIN: usize = 3;

// Phase B output. Built once from every account's Phase A profile, then
// frozen: Phase C only reads.
#[derive(Debug, Clone)]
pub struct PopulationStats {
    timing_table: PercentileTable,
    variance_table: PercentileTable,
    coordinated: BTreeSet<String>,
}

impl PopulationStats {
    pub fn build(profiles: &[AccountProfile]) -> PincerResult<Self> {
        if profiles.is_empty() {
            return Err(PincerError::Population(
                "cannot build population statistics from zero accounts".to_string(),
            ));
        }

        // Negated values so that rank 1.0 = fastest / most regular.
        let timing_table = PercentileTable::new(
            profiles
                .iter()
                .filter_map(|p| p.avg_latency_secs)
                .map(|avg| -avg)
                .collect(),
        );
        let variance_table = PercentileTable::new(
            profiles
                .iter()
                .filter_map(|p| p.latency_cv)
                .map(|cv| -cv)
                .collect(),
        );
        let coordinated = emoji_cohorts(profiles);

        debug!(
            accounts = profiles.len(),
            with_latency = timing_table.len(),
            coordinated = coordinated.len(),
            "population statistics frozen"
        );

        Ok(Self {
            timing_table,
            variance_table,
            coordinated,
        })
    }

    pub fn timing_score(&self, avg_latency_secs: f64) -> f64 {
        self.timing_table.rank(-avg_latency_secs)
    }

    pub fn variance_score(&self, latency_cv: f64) -> f64 {
        self.variance_table.rank(-latency_cv)
    }

    pub fn is_coordinated(&self, account_id: &str) -> bool {
        self.coordinated.contains(account_id)
    }
}

// Greedy clustering of emoji-fast accounts by appearance window: a candidate
// joins the seed's cohort when both its first and last event times are
// within the window of the seed's. Seeds in (first_seen, account_id) order,
// so the grouping is deterministic.
fn emoji_cohorts(profiles: &[AccountProfile]) -> BTreeSet<String> {
    let mut candidates: Vec<&AccountProfile> = profiles
        .iter()
        .filter(|p| p.emoji_only && p.emoji_fast)
        .collect();
    candidates.sort_by(|a, b| {
        a.first_seen
            .cmp(&b.first_seen)
            .then_with(|| a.account_id.cmp(&b.account_id))
    });

    let mut coordinated = BTreeSet::new();
    let mut claimed = vec![false; candidates.len()];

    for seed in 0..candidates.len() {
        if claimed[seed] {
            continue;
        }
        let mut cohort = vec![seed];
        for other in (seed + 1)..candidates.len() {
            if claimed[other] {
                continue;
            }
            let first_gap = (candidates[other].first_seen - candidates[seed].first_seen)
                .num_seconds()
                .abs();
            let last_gap = (candidates[other].last_seen - candidates[seed].last_seen)
                .num_seconds()
                .abs();
            if first_gap <= EMOJI_COHORT_WINDOW_SECS && last_gap <= EMOJI_COHORT_WINDOW_SECS {
                cohort.push(other);
            }
        }
        if cohort.len() >= EMOJI_COHORT_MIN {
            for &member in &cohort {
                claimed[member] = true;
                coordinated.insert(candidates[member].account_id.clone());
            }
        }
    }

    coordinated
}
