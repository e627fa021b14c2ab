use xbot_common::models::LogQuery;
use xbot_common_ui::view::{log_rows, message_rows};

use crate::app::App;
use crate::render::{render_logs, render_messages, render_wechat};

pub const LOG_LIMIT: u32 = 20;
pub const MESSAGE_LIMIT: u32 = 10;

const LEVELS: [&str; 4] = ["DEBUG", "INFO", "WARNING", "ERROR"];

/// Builds the query for `logs [level] [search...]`. A first word that is not a
/// level starts the search text.
pub fn parse_log_args(args: &[&str], limit: u32) -> LogQuery {
    let mut query = LogQuery::latest(limit);
    let mut rest = args;
    if let Some(first) = args.first() {
        let upper = first.to_uppercase();
        if LEVELS.contains(&upper.as_str()) {
            query = query.with_level(upper);
            rest = &args[1..];
        }
    }
    if !rest.is_empty() {
        query = query.with_search(rest.join(" "));
    }
    query
}

pub async fn handle_logs_command(args: &[&str], app: &App) -> String {
    match app.api.fetch_logs(parse_log_args(args, LOG_LIMIT)).await {
        Ok(logs) => render_logs(&log_rows(&logs)),
        Err(e) => format!("获取日志失败: {}", e),
    }
}

pub async fn handle_messages_command(app: &App) -> String {
    match app.api.fetch_messages(MESSAGE_LIMIT).await {
        Ok(messages) => render_messages(&message_rows(&messages)),
        Err(e) => format!("获取消息失败: {}", e),
    }
}

pub async fn handle_wechat_command(app: &App) -> String {
    match app.api.fetch_wechat_status().await {
        Ok(status) => render_wechat(&status),
        Err(e) => format!("获取微信状态失败: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_then_search() {
        let q = parse_log_args(&["error", "插件", "加载"], 20);
        assert_eq!(q.level.as_deref(), Some("ERROR"));
        assert_eq!(q.search.as_deref(), Some("插件 加载"));
    }

    #[test]
    fn search_without_level() {
        let q = parse_log_args(&["timeout"], 5);
        assert_eq!(q.level, None);
        assert_eq!(q.search.as_deref(), Some("timeout"));
        assert_eq!(q.limit, 5);
        assert_eq!(parse_log_args(&[], 5), LogQuery::latest(5));
    }
}
