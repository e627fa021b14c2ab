//! Plain-text rendering of the dashboard view for the terminal.

use colored::{ColoredString, Colorize};
use xbot_common::models::{ControlAction, WechatStatus};
use xbot_common_ui::chart::ChartSeries;
use xbot_common_ui::format::format_date_time;
use xbot_common_ui::view::{
    DashboardView, GaugeLevel, LogBadge, LogRow, MessageRow, RobotIndicator, EMPTY_LOGS_TEXT,
    EMPTY_MESSAGES_TEXT,
};
use xbot_common_ui::{Notification, Severity};

fn gauge(text: &str, level: GaugeLevel) -> ColoredString {
    match level {
        GaugeLevel::Normal => text.green(),
        GaugeLevel::Elevated => text.yellow(),
        GaugeLevel::Critical => text.red(),
    }
}

fn indicator(view: &DashboardView) -> ColoredString {
    let text = view.robot.status_text.as_str();
    match view.robot.indicator {
        RobotIndicator::Online => format!("● {}", text).green().bold(),
        RobotIndicator::Loading => format!("◌ {}", text).yellow(),
        RobotIndicator::Offline => format!("○ {}", text).red(),
        RobotIndicator::Error => format!("⚠ {}", text).red().bold(),
        RobotIndicator::Unknown => text.dimmed(),
    }
}

fn controls(view: &DashboardView) -> String {
    ControlAction::ALL
        .iter()
        .zip(["s", "x", "r"])
        .map(|(action, key)| {
            let label = format!("[{}] {}", key, view.controls.label(*action));
            if view.controls.is_enabled(*action) {
                label.bold().to_string()
            } else {
                label.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "══ XBot 仪表盘 ══".bold().cyan()));
    out.push_str(&format!("机器人: {}\n", indicator(view)));

    if let Some(details) = &view.robot.details {
        out.push_str(&format!(
            "  PID: {}   运行时间: {}   插件: {}\n",
            details.pid, details.uptime, details.plugin_count
        ));
    }
    if let Some(profile) = &view.robot.profile {
        out.push_str(&format!("  账号: {} ({})\n", profile.nickname.bold(), profile.wxid));
    }

    let sys = &view.system;
    out.push_str(&format!(
        "系统: CPU {}   内存 {} ({})   运行 {}\n",
        gauge(&sys.cpu_text, sys.cpu_level),
        gauge(&sys.memory_text, sys.memory_level),
        gauge(&format!("{:.1}%", sys.memory_percent), sys.memory_level),
        sys.uptime_text
    ));

    let p = &view.plugins;
    out.push_str(&format!("插件: 共 {}  启用 {}  禁用 {}\n", p.total, p.enabled, p.disabled));
    let m = &view.messages;
    out.push_str(&format!(
        "消息: 共 {}  今日 {}  群聊 {}  私聊 {}\n",
        m.total, m.today, m.group, m.private
    ));

    if let Some(chart) = &view.chart {
        out.push_str(&render_chart(chart));
        out.push('\n');
    }
    if let Some(rows) = &view.recent_messages {
        out.push_str(&format!("{}\n", "最近消息".bold()));
        out.push_str(&render_messages(rows));
    }
    if let Some(rows) = &view.recent_logs {
        out.push_str(&format!("{}\n", "最近日志".bold()));
        out.push_str(&render_logs(rows));
    }
    out.push_str(&controls(view));
    out
}

pub fn render_chart(chart: &ChartSeries) -> String {
    let first = chart.labels.first().map(String::as_str).unwrap_or("");
    let last = chart.labels.last().map(String::as_str).unwrap_or("");
    format!(
        "消息趋势 ({}): {}  [{} .. {}] max {}",
        chart.period,
        chart.sparkline().cyan(),
        first,
        last,
        chart.max()
    )
}

pub fn render_messages(rows: &[MessageRow]) -> String {
    if rows.is_empty() {
        return format!("  {}\n", EMPTY_MESSAGES_TEXT.dimmed());
    }
    rows.iter()
        .map(|r| format!("  {:<12} {:<4} {:<14} {}\n", r.sender, r.kind, r.time, r.preview))
        .collect()
}

pub fn render_logs(rows: &[LogRow]) -> String {
    if rows.is_empty() {
        return format!("  {}\n", EMPTY_LOGS_TEXT.dimmed());
    }
    rows.iter()
        .map(|r| {
            let level = match r.badge {
                LogBadge::Error => r.level.red(),
                LogBadge::Warning => r.level.yellow(),
                LogBadge::Debug => r.level.dimmed(),
                LogBadge::Info => r.level.blue(),
            };
            format!("  {:<14} {:<8} {}\n", r.time, level, r.preview)
        })
        .collect()
}

pub fn render_notification(note: &Notification) -> String {
    let msg = note.message.as_str();
    match note.severity {
        Severity::Success => format!("✅ {}", msg.green()),
        Severity::Info => format!("ℹ️  {}", msg.blue()),
        Severity::Warning => format!("⚠️  {}", msg.yellow()),
        Severity::Danger => format!("❌ {}", msg.red()),
    }
}

pub fn render_wechat(status: &WechatStatus) -> String {
    if !status.success {
        return format!(
            "微信状态获取失败: {}",
            status.message.as_deref().unwrap_or("未知错误")
        );
    }
    if !status.is_logged_in {
        return "微信: 未登录".yellow().to_string();
    }
    let login = status
        .login_time
        .filter(|t| *t > 0.0)
        .and_then(|t| chrono::DateTime::from_timestamp(t as i64, 0))
        .map(|dt| format_date_time(&dt.with_timezone(&chrono::Local), "YYYY-MM-DD HH:mm:ss"))
        .unwrap_or_else(|| "--".to_string());
    format!(
        "微信: {} {} ({})\n  登录时间: {}   设备: {}",
        "已登录".green(),
        status.nickname.as_deref().unwrap_or("--"),
        status.wxid.as_deref().unwrap_or("--"),
        login,
        status.device_type.as_deref().unwrap_or("--"),
    )
}
