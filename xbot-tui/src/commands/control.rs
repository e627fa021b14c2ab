use xbot_common::models::ControlAction;
use xbot_common_ui::DispatchOutcome;

use crate::app::App;

/// Maps a single-letter shortcut to its action.
pub fn shortcut(key: &str) -> Option<ControlAction> {
    match key {
        "s" => Some(ControlAction::Start),
        "x" => Some(ControlAction::Stop),
        "r" => Some(ControlAction::Restart),
        _ => None,
    }
}

/// `start`/`stop`/`restart` always go through; the `s`/`x`/`r` shortcuts are
/// ignored while their control is disabled. Result notifications arrive on
/// the event channel, so only cancellation is reported here.
pub async fn handle_control_command(cmd: &str, app: &App) -> Option<String> {
    let action = match shortcut(cmd) {
        Some(action) => {
            if !app.state.view().controls.is_enabled(action) {
                return None;
            }
            action
        }
        None => cmd.parse::<ControlAction>().ok()?,
    };

    match app.dispatcher.dispatch(action, app.confirm.as_ref()).await {
        DispatchOutcome::Cancelled => Some("已取消".to_string()),
        DispatchOutcome::Succeeded | DispatchOutcome::Failed(_) => None,
    }
}
