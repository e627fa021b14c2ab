//! Single-command mode: run one subcommand and exit.

use xbot_common::models::{ControlAction, LogQuery};
use xbot_common_ui::view::{log_rows, message_rows};
use xbot_common_ui::{DashboardEvent, DispatchOutcome, EventReceiver};

use crate::app::App;
use crate::commands::{feed, push};
use crate::render::{render_dashboard, render_logs, render_messages, render_notification};

pub async fn status(app: &App) -> anyhow::Result<String> {
    app.poller.refresh().await?;
    Ok(render_dashboard(&app.state.view()))
}

/// Sends `action` and collects the notifications it produced. Follow-up
/// polls die with the process.
pub async fn control(app: &App, events: &mut EventReceiver, action: ControlAction) -> anyhow::Result<String> {
    let outcome = app.dispatcher.dispatch(action, app.confirm.as_ref()).await;

    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let DashboardEvent::Notify(note) = event {
            out.push(render_notification(&note));
        }
    }

    match outcome {
        DispatchOutcome::Cancelled => Ok("已取消".to_string()),
        DispatchOutcome::Succeeded => Ok(out.join("\n")),
        DispatchOutcome::Failed(message) => Err(anyhow::anyhow!(message)),
    }
}

pub async fn logs(
    app: &App,
    level: Option<String>,
    search: Option<String>,
    limit: u32,
) -> anyhow::Result<String> {
    let mut query = LogQuery::latest(limit);
    if let Some(level) = level {
        query = query.with_level(level.to_uppercase());
    }
    if let Some(search) = search {
        query = query.with_search(search);
    }
    let logs = app.api.fetch_logs(query).await?;
    Ok(render_logs(&log_rows(&logs)))
}

pub async fn messages(app: &App, limit: u32) -> anyhow::Result<String> {
    let messages = app.api.fetch_messages(limit).await?;
    Ok(render_messages(&message_rows(&messages)))
}

pub async fn wechat(app: &App) -> anyhow::Result<String> {
    Ok(feed::handle_wechat_command(app).await)
}

pub async fn push(app: &App, title: &str, content: &str) -> anyhow::Result<String> {
    Ok(push::handle_push_command(&[title, content], app).await)
}
