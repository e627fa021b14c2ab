//! Text formatting shared by every view of the dashboard.

use chrono::{DateTime, Datelike, Local, TimeZone};
use xbot_common::models::Timestamp;

const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const WEEKDAYS: [&str; 7] = ["周日", "周一", "周二", "周三", "周四", "周五", "周六"];

/// Human uptime: `1天 1小时 0分钟`, `3小时 5分钟`, `0分钟`.
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{}天 ", days));
    }
    if hours > 0 || days > 0 {
        out.push_str(&format!("{}小时 ", hours));
    }
    out.push_str(&format!("{}分钟", minutes));
    out
}

/// [`format_uptime`] for values straight off the wire; absent or nonsensical
/// values become `未知`.
pub fn format_uptime_opt(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => format_uptime(s.floor() as u64),
        _ => "未知".to_string(),
    }
}

/// Size in 1024-based units with trailing zeros dropped: `1.5 KB`, `2 MB`.
pub fn format_file_size(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let k = 1024f64;
    let value = bytes as f64;
    let i = ((value.ln() / k.ln()).floor() as usize).min(UNITS.len() - 1);
    let scaled = value / k.powi(i as i32);
    format!("{} {}", trim_fixed(scaled, decimals), UNITS[i])
}

/// Fixed-point rendering without trailing zeros (`1.50` → `1.5`, `2.00` → `2`).
fn trim_fixed(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// Friendly relative time used in the message and log tables.
pub fn format_time(ts: Option<&Timestamp>) -> String {
    format_time_at(ts, Local::now())
}

pub fn format_time_at<Tz: TimeZone>(ts: Option<&Timestamp>, now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(when) = ts.and_then(Timestamp::to_local) else {
        return "-".to_string();
    };
    let now = now.with_timezone(&Local);
    let diff = now.signed_duration_since(when);
    let clock = when.format("%H:%M").to_string();

    if diff < chrono::Duration::hours(24) && when.day() == now.day() {
        return clock;
    }
    if diff < chrono::Duration::days(7) {
        let weekday = WEEKDAYS[when.weekday().num_days_from_sunday() as usize];
        return format!("{} {}", weekday, clock);
    }
    format!("{} {}", when.format("%Y/%m/%d"), clock)
}

/// `YYYY-MM-DD HH:mm:ss`-style pattern rendering.
pub fn format_date_time<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    pattern
        .replacen("YYYY", &dt.format("%Y").to_string(), 1)
        .replacen("MM", &dt.format("%m").to_string(), 1)
        .replacen("DD", &dt.format("%d").to_string(), 1)
        .replacen("HH", &dt.format("%H").to_string(), 1)
        .replacen("mm", &dt.format("%M").to_string(), 1)
        .replacen("ss", &dt.format("%S").to_string(), 1)
}

/// Display name of a chat message type.
pub fn message_type_name(kind: Option<&str>) -> String {
    match kind {
        Some("text") => "文本".to_string(),
        Some("image") => "图片".to_string(),
        Some("voice") => "语音".to_string(),
        Some("video") => "视频".to_string(),
        Some("file") => "文件".to_string(),
        Some("link") => "链接".to_string(),
        Some("system") => "系统".to_string(),
        Some("emoji") => "表情".to_string(),
        Some(other) if !other.is_empty() => other.to_string(),
        _ => "未知".to_string(),
    }
}

/// Cut to `max` characters, appending `...` when something was dropped.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
