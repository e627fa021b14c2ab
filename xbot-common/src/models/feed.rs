//! Recent messages and log lines shown under the status cards.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// A point in time as the web backend sends it: either epoch milliseconds or a
/// date-time string in one of a few formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(f64),
    Text(String),
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

impl Timestamp {
    /// Resolve into local time. Strings without an offset are read as local.
    pub fn to_local(&self) -> Option<DateTime<Local>> {
        match self {
            Timestamp::Millis(ms) => {
                if !ms.is_finite() {
                    return None;
                }
                DateTime::from_timestamp_millis(*ms as i64).map(|dt| dt.with_timezone(&Local))
            }
            Timestamp::Text(raw) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return None;
                }
                if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
                    return Some(dt.with_timezone(&Local));
                }
                NAIVE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                    .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentMessage {
    pub sender_name: Option<String>,
    pub sender: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub time: Option<Timestamp>,
}

impl RecentMessage {
    /// Display name of whoever sent the message.
    pub fn display_sender(&self) -> &str {
        self.sender_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.sender.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("未知")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    pub level: Option<String>,
    pub content: Option<String>,
    pub message: Option<String>,
    /// The log endpoint has shipped both `time` and `timestamp`.
    #[serde(alias = "timestamp")]
    pub time: Option<Timestamp>,
}

impl LogEntry {
    pub fn text(&self) -> &str {
        self.content
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.message.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesResponse {
    pub messages: Option<Vec<RecentMessage>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogsResponse {
    pub success: Option<bool>,
    pub logs: Option<Vec<LogEntry>>,
    pub message: Option<String>,
}

/// Query parameters accepted by `GET /api/logs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub limit: u32,
    pub level: Option<String>,
    pub search: Option<String>,
}

impl LogQuery {
    pub fn latest(limit: u32) -> Self {
        Self { limit, level: None, search: None }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("limit", self.limit.to_string())];
        if let Some(level) = self.level.as_ref().filter(|l| !l.is_empty()) {
            pairs.push(("level", level.clone()));
        }
        if let Some(search) = self.search.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn timestamp_accepts_numbers_and_strings() {
        let ts: Timestamp = serde_json::from_str("1700000000000").unwrap();
        assert!(matches!(ts, Timestamp::Millis(_)));
        assert!(ts.to_local().is_some());

        let ts: Timestamp = serde_json::from_str(r#""2024-03-05 14:07:09""#).unwrap();
        let local = ts.to_local().unwrap();
        assert_eq!((local.year(), local.month(), local.day()), (2024, 3, 5));
        assert_eq!((local.hour(), local.minute()), (14, 7));

        assert!(Timestamp::Text("yesterday-ish".into()).to_local().is_none());
    }

    #[test]
    fn sender_falls_back_to_unknown() {
        let msg = RecentMessage { sender: Some("wxid_1".into()), ..Default::default() };
        assert_eq!(msg.display_sender(), "wxid_1");
        assert_eq!(RecentMessage::default().display_sender(), "未知");
    }

    #[test]
    fn log_entry_reads_timestamp_alias() {
        let raw = r#"{"level": "error", "message": "boom", "timestamp": "2024-01-01 00:00:00"}"#;
        let entry: LogEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.text(), "boom");
        assert!(entry.time.is_some());
    }

    #[test]
    fn log_query_skips_empty_filters() {
        let q = LogQuery::latest(5).with_level("").with_search("login");
        assert_eq!(
            q.to_pairs(),
            vec![("limit", "5".to_string()), ("search", "login".to_string())]
        );
    }
}
