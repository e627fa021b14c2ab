use std::sync::Arc;

use xbot_common::models::{
    ControlAction, ControlResult, LogEntry, LogQuery, RobotStatus, StatusSnapshot,
};
use xbot_common::traits::{DashboardApi, MockDashboardApi, MockPushGateway, PushGateway};
use xbot_common_ui::{event_channel, EventReceiver, FixedAnswer, PollerSettings};
use xbot_tui::commands::dispatch;
use xbot_tui::App;

fn quiet_poller() -> PollerSettings {
    PollerSettings { fetch_feeds: false, refresh_chart: false, ..PollerSettings::default() }
}

fn make_app(api: MockDashboardApi, answer: bool) -> (App, EventReceiver) {
    let api: Arc<dyn DashboardApi> = Arc::new(api);
    let push: Arc<dyn PushGateway> = Arc::new(MockPushGateway::new());
    let (tx, rx) = event_channel();
    let app = App::new(api, push, tx, quiet_poller(), Arc::new(FixedAnswer(answer)));
    (app, rx)
}

fn offline_robot(app: &App) {
    app.state.with(|s| {
        let generation = s.begin_poll();
        s.apply_snapshot(
            generation,
            &StatusSnapshot { robot: Some(RobotStatus::default()), ..Default::default() },
        );
    });
}

#[tokio::test]
async fn quit_and_unknown_commands() {
    colored::control::set_override(false);
    let (app, _rx) = make_app(MockDashboardApi::new(), true);

    assert_eq!(dispatch("quit", &app).await, (true, None));
    let (quit, out) = dispatch("launch", &app).await;
    assert!(!quit);
    assert_eq!(out.unwrap(), "Unknown command 'launch'. Type 'help' for usage.");
}

#[tokio::test]
async fn shortcut_is_ignored_while_control_disabled() {
    let mut api = MockDashboardApi::new();
    api.expect_control().never();
    let (app, _rx) = make_app(api, true);

    // nothing polled yet, so every control is disabled
    assert_eq!(dispatch("s", &app).await, (false, None));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn shortcut_runs_when_control_enabled() {
    let mut api = MockDashboardApi::new();
    api.expect_control()
        .withf(|action| *action == ControlAction::Start)
        .times(1)
        .returning(|_| Ok(ControlResult::ok("ok")));
    api.expect_fetch_status()
        .returning(|| Ok(StatusSnapshot::default()));
    let (app, _rx) = make_app(api, true);
    offline_robot(&app);

    assert_eq!(dispatch("s", &app).await, (false, None));
    // stop is disabled while offline
    assert_eq!(dispatch("x", &app).await, (false, None));
}

#[tokio::test]
async fn declined_confirmation_reports_cancel() {
    let mut api = MockDashboardApi::new();
    api.expect_control().never();
    let (app, _rx) = make_app(api, false);

    let (_, out) = dispatch("restart", &app).await;
    assert_eq!(out.as_deref(), Some("已取消"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn refresh_is_throttled() {
    let mut api = MockDashboardApi::new();
    api.expect_fetch_status().returning(|| Ok(StatusSnapshot::default()));
    let (app, _rx) = make_app(api, true);

    let (_, first) = dispatch("refresh", &app).await;
    let (_, second) = dispatch("refresh", &app).await;
    assert_eq!(first.as_deref(), Some("正在刷新..."));
    assert_eq!(second.as_deref(), Some("刷新过于频繁，请稍后再试"));

    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    let (_, third) = dispatch("refresh", &app).await;
    assert_eq!(third.as_deref(), Some("正在刷新..."));
}

#[tokio::test]
async fn chart_switches_period() {
    colored::control::set_override(false);
    let (app, _rx) = make_app(MockDashboardApi::new(), true);

    let (_, out) = dispatch("chart month", &app).await;
    assert!(out.unwrap().starts_with("消息趋势 (month)"));
    assert_eq!(app.state.lock().view.chart.as_ref().map(|c| c.data.len()), Some(30));

    let (_, out) = dispatch("chart year", &app).await;
    assert_eq!(out.as_deref(), Some("Usage: chart <day|week|month>"));
}

#[tokio::test]
async fn logs_command_forwards_filters() {
    colored::control::set_override(false);
    let mut api = MockDashboardApi::new();
    api.expect_fetch_logs()
        .withf(|q: &LogQuery| {
            q.limit == 20 && q.level.as_deref() == Some("WARNING") && q.search.as_deref() == Some("插件")
        })
        .times(1)
        .returning(|_| {
            Ok(vec![LogEntry {
                level: Some("warning".into()),
                content: Some("插件加载缓慢".into()),
                ..Default::default()
            }])
        });
    let (app, _rx) = make_app(api, true);

    let (_, out) = dispatch("logs warning 插件", &app).await;
    let out = out.unwrap();
    assert!(out.contains("WARNING"));
    assert!(out.contains("插件加载缓慢"));
}

#[tokio::test]
async fn push_without_content_prints_usage() {
    let (app, _rx) = make_app(MockDashboardApi::new(), true);
    let (_, out) = dispatch("push 标题", &app).await;
    assert_eq!(out.as_deref(), Some("Usage: push <title> <content...>"));
}
