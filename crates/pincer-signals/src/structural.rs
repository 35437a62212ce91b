use pincer_core::AccountTimeline;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

// Average response latency under this marks an emoji account as machine-fast.
pub const EMOJI_FAST_AVG_SECS: f64 = 5.0;

fn emoji_only_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[\s\x{1F300}-\x{1F9FF}\x{2600}-\x{27BF}]+$").expect("emoji pattern")
    })
}

// Unlike the timing extractor this needs only one qualifying sample: the
// emoji rule is structural, not score-derived.
pub fn is_emoji_fast(latency_samples: &[f64]) -> bool {
    !latency_samples.is_empty() && crate::stats::mean(latency_samples) < EMOJI_FAST_AVG_SECS
}

pub fn is_emoji_only(timeline: &AccountTimeline) -> bool {
    if timeline.events.is_empty() {
        return false;
    }
    timeline.events.iter().all(|event| {
        !event.content.trim().is_empty() && emoji_only_pattern().is_match(&event.content)
    })
}

// Token-mint command documents: {"p":"mbc-20",...} or {"op":"mint",...}.
fn is_mint_command(content: &str) -> bool {
    let Ok(value) = serde_json::from_str::<Value>(content) else {
        return false;
    };
    let Some(obj) = value.as_object() else {
        return false;
    };
    obj.get("p").and_then(Value::as_str) == Some("mbc-20")
        || obj.get("op").and_then(Value::as_str) == Some("mint")
}

pub fn is_minting_only(timeline: &AccountTimeline) -> bool {
    if timeline.events.is_empty() {
        return false;
    }
    timeline
        .events
        .iter()
        .all(|event| is_mint_command(&event.content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use pincer_core::ContentEvent;

    fn timeline_of(contents: &[&str]) -> AccountTimeline {
        let base = DateTime::parse_from_rfc3339("2026-02-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let events = contents
            .iter()
            .enumerate()
            .map(|(i, c)| ContentEvent {
                account_id: "a".to_string(),
                created_at: base + chrono::Duration::seconds(i as i64),
                content: c.to_string(),
                thread: None,
            })
            .collect();
        AccountTimeline {
            account_id: "a".to_string(),
            events,
        }
    }

    #[test]
    fn one_fast_reply_qualifies_as_emoji_fast() {
        assert!(is_emoji_fast(&[2.0]));
        assert!(is_emoji_fast(&[1.0, 3.0, 4.5]));
        assert!(!is_emoji_fast(&[]));
        assert!(!is_emoji_fast(&[12.0]));
    }

    #[test]
    fn lobster_spam_is_emoji_only() {
        let t = timeline_of(&["🦞", "🦞", "🦞 🦞", "🔥"]);
        assert!(is_emoji_only(&t));
    }

    #[test]
    fn text_breaks_emoji_only() {
        let t = timeline_of(&["🦞", "nice shell"]);
        assert!(!is_emoji_only(&t));
    }

    #[test]
    fn whitespace_only_content_is_not_emoji() {
        let t = timeline_of(&["🦞", "   "]);
        assert!(!is_emoji_only(&t));
    }

    #[test]
    fn mint_commands_by_protocol_field() {
        let t = timeline_of(&[
            r#"{"p":"mbc-20","op":"mint","tick":"MOLT","amt":"1000"}"#,
            r#"{"p":"mbc-20","op":"mint","tick":"MOLT","amt":"1000"}"#,
        ]);
        assert!(is_minting_only(&t));
    }

    #[test]
    fn mint_commands_by_op_field() {
        let t = timeline_of(&[r#"{"op":"mint","tick":"CLAW"}"#]);
        assert!(is_minting_only(&t));
    }

    #[test]
    fn mixed_content_is_not_minting_only() {
        let t = timeline_of(&[
            r#"{"p":"mbc-20","op":"mint","tick":"MOLT"}"#,
            "gm everyone",
        ]);
        assert!(!is_minting_only(&t));
    }

    #[test]
    fn non_mint_json_is_not_a_mint_command() {
        let t = timeline_of(&[r#"{"op":"transfer","tick":"MOLT"}"#]);
        assert!(!is_minting_only(&t));
    }
}
