use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Layout of `MoodEntry::date`, local time at creation.
pub const ENTRY_DATE_FORMAT: &str = "%Y/%m/%d %H:%M";

/// One diary record. Entries are never edited, only removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub text: String,
    pub date: String,
}

impl MoodEntry {
    /// Builds an entry stamped with `at`. Returns `None` when `text` is blank.
    pub fn new(text: &str, at: NaiveDateTime) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            date: at.format(ENTRY_DATE_FORMAT).to_string(),
        })
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date, ENTRY_DATE_FORMAT).ok()
    }
}

#[derive(Debug, Deserialize)]
pub struct AddMoodRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub confirm: Option<String>,
}

impl ClearRequest {
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self.confirm.as_deref().map(str::trim),
            Some("true" | "yes" | "1")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentBalance {
    pub pos_count: usize,
    pub neg_count: usize,
    pub balance_pct: f64,
    pub status: BalanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub total: usize,
    pub week_count: usize,
    pub last_active: String,
    pub balance: SentimentBalance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum Achievement {
    Encourage,
    Milestone(u64),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClickResponse {
    pub count: u64,
    pub achievement: Option<Achievement>,
}
