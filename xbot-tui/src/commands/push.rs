use xbot_common_ui::pushplus::{send_push_notification, DEFAULT_TEMPLATE};

use crate::app::App;
use crate::help::usage;

pub async fn handle_push_command(args: &[&str], app: &App) -> String {
    if args.len() < 2 {
        return usage("push").unwrap_or_default().to_string();
    }
    let title = args[0];
    let content = args[1..].join(" ");
    let outcome =
        send_push_notification(app.api.as_ref(), app.push.as_ref(), title, &content, DEFAULT_TEMPLATE)
            .await;
    outcome.message
}
