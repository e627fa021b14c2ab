//! Interactive mode: live dashboard plus a command prompt.

use std::io::Write;
use std::sync::Arc;

use chrono::Local;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use xbot_common_ui::debounce::Debouncer;
use xbot_common_ui::format::format_date_time;
use xbot_common_ui::pushplus::{send_push_notification, DEFAULT_TEMPLATE};
use xbot_common_ui::{DashboardEvent, EventReceiver};

use crate::app::App;
use crate::commands::dispatch;
use crate::confirm::InputLines;
use crate::render::{render_dashboard, render_notification};

const PROMPT: &str = "xbot> ";

fn prompt() {
    print!("{}", PROMPT);
    let _ = std::io::stdout().flush();
}

/// Title and body pushed to PushPlus when the robot comes up or goes down.
pub fn transition_message(online: bool) -> (String, String) {
    let now = format_date_time(&Local::now(), "YYYY-MM-DD HH:mm:ss");
    if online {
        ("机器人已上线".to_string(), format!("机器人于 {} 恢复在线", now))
    } else {
        ("机器人已掉线".to_string(), format!("机器人于 {} 掉线，请及时检查", now))
    }
}

/// Drains dashboard events until `cancel` fires or every sender is gone.
pub async fn pump_events(app: Arc<App>, mut events: EventReceiver, cancel: CancellationToken) {
    let debouncer = Debouncer::default();
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = events.recv() => match event {
                Some(event) => event,
                None => break,
            },
        };

        match event {
            DashboardEvent::ViewUpdated
            | DashboardEvent::ControlPending(_)
            | DashboardEvent::ControlSettled(_) => {
                let state = app.state.clone();
                debouncer.call(move || async move {
                    println!("\n{}", render_dashboard(&state.view()));
                    prompt();
                });
            }
            DashboardEvent::Notify(note) => {
                println!("\n{}", render_notification(&note));
                prompt();
            }
            DashboardEvent::RobotTransition { online } => {
                if app.push_transitions {
                    let app = app.clone();
                    tokio::spawn(async move {
                        let (title, content) = transition_message(online);
                        let outcome = send_push_notification(
                            app.api.as_ref(),
                            app.push.as_ref(),
                            &title,
                            &content,
                            DEFAULT_TEMPLATE,
                        )
                        .await;
                        if outcome.success {
                            info!("transition pushed: {}", title);
                        } else {
                            warn!("transition push failed: {}", outcome.message);
                        }
                    });
                }
            }
        }
    }
    debouncer.cancel();
    debug!("event pump stopped");
}

/// Runs the poller and the command loop until `quit` or EOF.
pub async fn run_watch(app: Arc<App>, events: EventReceiver, lines: InputLines) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let poller_task = {
        let poller = app.poller.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { poller.run(cancel).await })
    };
    let pump_task = tokio::spawn(pump_events(app.clone(), events, cancel.clone()));

    println!("Type 'help' for available commands.\n");
    loop {
        prompt();
        let line = {
            let mut lines = lines.lock().await;
            match lines.next_line().await? {
                Some(line) => line.trim().to_string(),
                None => break,
            }
        };
        if line.is_empty() {
            continue;
        }

        let (quit_requested, output) = dispatch(&line, &app).await;
        if let Some(msg) = output {
            println!("{}", msg);
        }
        if quit_requested {
            break;
        }
    }

    cancel.cancel();
    let _ = poller_task.await;
    let _ = pump_task.await;
    println!("Goodbye!");
    Ok(())
}
