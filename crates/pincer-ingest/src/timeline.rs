use chrono::{DateTime, Utc};
use pincer_core::{
    AccountTimeline, ContentEvent, PincerError, PincerResult, RawEvent, ThreadRef,
};
use std::collections::BTreeMap;

fn parse_utc(field: &str, raw: &str) -> PincerResult<DateTime<Utc>> {
    if raw.is_empty() {
        return Err(PincerError::InvalidEvent(format!("missing {}", field)));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PincerError::InvalidEvent(format!("unparseable {} '{}': {}", field, raw, e)))
}

pub fn parse_event(raw: &RawEvent) -> PincerResult<ContentEvent> {
    if raw.account_id.is_empty() {
        return Err(PincerError::InvalidEvent("missing account_id".to_string()));
    }

    let created_at = parse_utc("created_at", &raw.created_at)?;

    let thread = match &raw.thread {
        Some(t) => Some(ThreadRef {
            thread_id: t.thread_id.clone(),
            trigger_at: parse_utc("thread.trigger_at", &t.trigger_at)?,
        }),
        None => None,
    };

    Ok(ContentEvent {
        account_id: raw.account_id.clone(),
        created_at,
        content: raw.content.clone(),
        thread,
    })
}

// One malformed event fails the whole account closed: a corrupted timeline
// never produces a best-effort classification.
pub fn build_timeline(account_id: &str, raws: &[RawEvent]) -> PincerResult<AccountTimeline> {
    if raws.is_empty() {
        return Err(PincerError::InvalidEvent(format!(
            "no events for account '{}'",
            account_id
        )));
    }

    let mut events = Vec::with_capacity(raws.len());
    for raw in raws {
        let event = parse_event(raw)?;
        if event.account_id != account_id {
            return Err(PincerError::InvalidEvent(format!(
                "event account_id '{}' does not match timeline '{}'",
                event.account_id, account_id
            )));
        }
        events.push(event);
    }

    // Vec::sort_by is stable: equal timestamps keep input order.
    events.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    Ok(AccountTimeline {
        account_id: account_id.to_string(),
        events,
    })
}

// BTreeMap keys give a deterministic account iteration order downstream.
pub fn group_by_account(raws: Vec<RawEvent>) -> BTreeMap<String, Vec<RawEvent>> {
    let mut grouped: BTreeMap<String, Vec<RawEvent>> = BTreeMap::new();
    for raw in raws {
        grouped.entry(raw.account_id.clone()).or_default().push(raw);
    }
    grouped
}
