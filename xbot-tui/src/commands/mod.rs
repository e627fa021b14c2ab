// File: xbot-tui/src/commands/mod.rs

use xbot_common_ui::chart::ChartPeriod;

use crate::app::App;
use crate::help::{usage, GENERAL_HELP};
use crate::render::{render_chart, render_dashboard};

pub mod control;
pub mod feed;
pub mod push;

/// Runs one line typed in watch mode. Returns `(quit_requested, output)`.
pub async fn dispatch(line: &str, app: &App) -> (bool, Option<String>) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let cmd = parts.first().map(|c| c.to_lowercase()).unwrap_or_default();
    let args = parts.get(1..).unwrap_or(&[]);

    match cmd.as_str() {
        "" => (false, None),
        "help" | "?" => (false, Some(GENERAL_HELP.to_string())),
        "status" => (false, Some(render_dashboard(&app.state.view()))),
        "refresh" => {
            let poller = app.poller.clone();
            let ran = app.refresh_throttle.try_call(move || {
                poller.spawn_refresh();
            });
            let msg = if ran { "正在刷新..." } else { "刷新过于频繁，请稍后再试" };
            (false, Some(msg.to_string()))
        }
        "start" | "stop" | "restart" | "s" | "x" | "r" => {
            (false, control::handle_control_command(&cmd, app).await)
        }
        "chart" => {
            let Some(period) = args.first().and_then(|p| p.parse::<ChartPeriod>().ok()) else {
                return (false, usage("chart").map(str::to_string));
            };
            let chart = app.state.with(|s| {
                s.set_chart_period(period);
                s.view.chart.clone()
            });
            (false, chart.as_ref().map(render_chart))
        }
        "logs" => (false, Some(feed::handle_logs_command(args, app).await)),
        "messages" => (false, Some(feed::handle_messages_command(app).await)),
        "wechat" => (false, Some(feed::handle_wechat_command(app).await)),
        "push" => (false, Some(push::handle_push_command(args, app).await)),
        "quit" | "exit" => (true, None),
        other => (
            false,
            Some(format!("Unknown command '{}'. Type 'help' for usage.", other)),
        ),
    }
}
