mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{snapshot, FakeApi, Harness, StatusStep};
use tokio_util::sync::CancellationToken;
use xbot_common::models::{ControlAction, LogQuery, RecentMessage, StatusSnapshot, SystemStatus};
use xbot_common::traits::{DashboardApi, MockDashboardApi};
use xbot_common::Error;
use xbot_common_ui::view::RobotIndicator;
use xbot_common_ui::{
    event_channel, DashboardEvent, PollOutcome, PollerSettings, Severity, SharedState, StatusPoller,
};

fn transitions(events: &[DashboardEvent]) -> Vec<(String, Severity, Duration)> {
    events
        .iter()
        .filter_map(|e| match e {
            DashboardEvent::Notify(n) => Some((n.message.clone(), n.severity, n.duration)),
            _ => None,
        })
        .collect()
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn timeout_is_retried_exactly_once() {
    let api = FakeApi::new();
    api.push_status(StatusStep::Reply(Err(Error::Timeout)))
        .push_status(StatusStep::Reply(Err(Error::Timeout)));
    let h = Harness::new(api);

    let res = h.poller.refresh().await;
    assert!(matches!(res, Err(Error::Timeout)));

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(h.api.status_calls(), vec![Duration::ZERO, Duration::from_secs(5)]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn hanging_request_is_bounded_then_retried() {
    let api = FakeApi::new();
    api.push_status(StatusStep::Hang)
        .push_status(StatusStep::Reply(Ok(snapshot(true))));
    let h = Harness::new(api);

    let res = h.poller.refresh().await;

    assert_eq!(res.unwrap(), PollOutcome::Updated);
    // 10 s request bound plus the 5 s retry delay
    assert_eq!(h.api.status_calls(), vec![Duration::ZERO, Duration::from_secs(15)]);
    assert_eq!(h.state.view().robot.indicator, RobotIndicator::Online);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn other_failures_are_not_retried() {
    let api = FakeApi::new();
    api.push_status(StatusStep::Reply(Err(Error::Status(502))));
    let h = Harness::new(api);

    let res = h.poller.refresh().await;
    assert!(matches!(res, Err(Error::Status(502))));

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(h.api.status_calls().len(), 1);

    let view = h.state.view();
    assert_eq!(view.robot.indicator, RobotIndicator::Error);
    assert_eq!(view.robot.status_text, "获取状态失败");
    assert!(ControlAction::ALL.iter().all(|a| !view.controls.is_enabled(*a)));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn online_flips_notify_once_each() {
    let api = FakeApi::new();
    for online in [true, true, false, false, true] {
        api.push_status(StatusStep::Reply(Ok(snapshot(online))));
    }
    let mut h = Harness::new(api);

    for _ in 0..5 {
        h.poller.refresh().await.unwrap();
    }

    let events = h.drain_events();
    assert_eq!(
        transitions(&events),
        vec![
            ("机器人已掉线".to_string(), Severity::Danger, Duration::from_secs(5)),
            ("机器人已上线".to_string(), Severity::Success, Duration::from_secs(5)),
        ]
    );
    let flips: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, DashboardEvent::RobotTransition { .. }))
        .collect();
    assert_eq!(flips.len(), 2);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn slow_stale_response_does_not_overwrite_newer_one() {
    let api = FakeApi::new();
    api.push_status(StatusStep::Delayed(Duration::from_secs(3), Ok(snapshot(false))))
        .push_status(StatusStep::Reply(Ok(snapshot(true))));
    let h = Harness::new(api);

    let slow = {
        let poller = h.poller.clone();
        tokio::spawn(async move { poller.refresh().await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(h.poller.refresh().await.unwrap(), PollOutcome::Updated);
    assert_eq!(slow.await.unwrap().unwrap(), PollOutcome::Stale);

    let view = h.state.view();
    assert_eq!(view.robot.indicator, RobotIndicator::Online);
    assert!(view.controls.is_enabled(ControlAction::Stop));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn stale_failure_does_not_show_error() {
    let api = FakeApi::new();
    api.push_status(StatusStep::Delayed(Duration::from_secs(3), Err(Error::Status(500))))
        .push_status(StatusStep::Reply(Ok(snapshot(true))));
    let h = Harness::new(api);

    let slow = {
        let poller = h.poller.clone();
        tokio::spawn(async move { poller.refresh().await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    h.poller.refresh().await.unwrap();
    assert!(slow.await.unwrap().is_err());

    assert_eq!(h.state.view().robot.indicator, RobotIndicator::Online);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn run_polls_at_startup_and_every_interval_until_cancelled() {
    let h = Harness::new(FakeApi::new());
    let cancel = CancellationToken::new();

    let task = {
        let poller = h.poller.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { poller.run(cancel).await })
    };

    tokio::time::sleep(Duration::from_secs(61)).await;
    cancel.cancel();
    task.await.unwrap();
    tokio::time::sleep(Duration::from_secs(120)).await;

    assert_eq!(
        h.api.status_calls(),
        vec![Duration::ZERO, Duration::from_secs(30), Duration::from_secs(60)]
    );
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn snapshot_feeds_view_and_recent_tables() {
    let mut api = MockDashboardApi::new();
    api.expect_fetch_status().times(1).returning(|| {
        Ok(StatusSnapshot {
            system: Some(SystemStatus { cpu: Some(42.0), ..Default::default() }),
            ..snapshot(true)
        })
    });
    api.expect_fetch_messages()
        .withf(|limit| *limit == 5)
        .times(1)
        .returning(|_| {
            Ok(vec![RecentMessage {
                sender_name: Some("张三".into()),
                content: Some("你好".into()),
                kind: Some("text".into()),
                ..Default::default()
            }])
        });
    api.expect_fetch_logs()
        .withf(|q: &LogQuery| q.limit == 5 && q.level.is_none())
        .times(1)
        .returning(|_| Err(Error::Status(500)));

    let api: Arc<dyn DashboardApi> = Arc::new(api);
    let state = SharedState::new();
    let (tx, _rx) = event_channel();
    let poller = StatusPoller::new(api, state.clone(), tx, PollerSettings::default());

    poller.refresh().await.unwrap();

    let view = state.view();
    assert_eq!(view.system.cpu_text, "42%");
    let messages = view.recent_messages.unwrap();
    assert_eq!(messages[0].sender, "张三");
    assert_eq!(messages[0].kind, "文本");
    // a failing log feed stays unloaded
    assert!(view.recent_logs.is_none());
    assert_eq!(view.chart.map(|c| c.data.len()), Some(24));
}

fn message_from(sender: &str) -> RecentMessage {
    RecentMessage { sender_name: Some(sender.into()), content: Some("hi".into()), ..Default::default() }
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn slow_feed_of_older_cycle_is_dropped() {
    let api = FakeApi::new();
    api.push_messages(Duration::from_secs(3), vec![message_from("old")])
        .push_messages(Duration::ZERO, vec![message_from("new")]);
    let h = Harness::new(api);

    h.poller.spawn_refresh();
    tokio::time::sleep(Duration::from_secs(1)).await;
    h.poller.spawn_refresh();
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(h.state.view().recent_messages.unwrap()[0].sender, "new");

    // the first cycle's messages land at 3s
    tokio::time::sleep(Duration::from_secs(5)).await;
    let messages = h.state.view().recent_messages.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, "new");
}
