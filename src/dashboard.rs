//! Derived statistics over a mood list. Everything here is a pure function
//! of its inputs; callers recompute after each store change.

use crate::models::{BalanceStatus, DashboardResponse, MoodEntry, SentimentBalance};
use chrono::{Duration, Local, NaiveDateTime};

pub const NO_ACTIVITY: &str = "-";

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "happy", "开心", "棒", "good", "great", "excellent", "nice", "cool", "爽", "赞",
];

pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "sad", "难过", "累", "bad", "tired", "angry", "depressed", "烦", "丧", "苦",
];

const POSITIVE_ABOVE: f64 = 60.0;
const NEGATIVE_BELOW: f64 = 40.0;

pub fn total(entries: &[MoodEntry]) -> usize {
    entries.len()
}

/// Entries stamped at or after `now - 7 days`. Unparsable dates never count.
pub fn week_count(entries: &[MoodEntry], now: NaiveDateTime) -> usize {
    let cutoff = now - Duration::days(7);
    entries
        .iter()
        .filter_map(MoodEntry::timestamp)
        .filter(|stamp| *stamp >= cutoff)
        .count()
}

/// Day part of the newest entry, `None` for an empty diary.
pub fn last_active(entries: &[MoodEntry]) -> Option<&str> {
    let first = entries.first()?;
    first.date.split(' ').next()
}

/// Lexical balance: an entry counts once per side when any keyword of that
/// side occurs in its text, so one entry can count for both. Text and
/// keywords are both lower-cased before matching.
pub fn sentiment_balance(
    entries: &[MoodEntry],
    positive: &[&str],
    negative: &[&str],
) -> SentimentBalance {
    let positive: Vec<String> = positive.iter().map(|keyword| keyword.to_lowercase()).collect();
    let negative: Vec<String> = negative.iter().map(|keyword| keyword.to_lowercase()).collect();
    let mut pos_count = 0;
    let mut neg_count = 0;

    for entry in entries {
        let text = entry.text.to_lowercase();
        if positive.iter().any(|keyword| text.contains(keyword.as_str())) {
            pos_count += 1;
        }
        if negative.iter().any(|keyword| text.contains(keyword.as_str())) {
            neg_count += 1;
        }
    }

    let matched = pos_count + neg_count;
    if matched == 0 {
        return SentimentBalance {
            pos_count,
            neg_count,
            balance_pct: 50.0,
            status: BalanceStatus::Neutral,
        };
    }

    let balance_pct = pos_count as f64 / matched as f64 * 100.0;
    let status = if balance_pct > POSITIVE_ABOVE {
        BalanceStatus::Positive
    } else if balance_pct < NEGATIVE_BELOW {
        BalanceStatus::Negative
    } else {
        BalanceStatus::Neutral
    };

    SentimentBalance {
        pos_count,
        neg_count,
        balance_pct,
        status,
    }
}

pub fn build_dashboard(entries: &[MoodEntry]) -> DashboardResponse {
    build_dashboard_at(Local::now().naive_local(), entries)
}

pub fn build_dashboard_at(now: NaiveDateTime, entries: &[MoodEntry]) -> DashboardResponse {
    DashboardResponse {
        total: total(entries),
        week_count: week_count(entries, now),
        last_active: last_active(entries).unwrap_or(NO_ACTIVITY).to_string(),
        balance: sentiment_balance(entries, POSITIVE_KEYWORDS, NEGATIVE_KEYWORDS),
    }
}
