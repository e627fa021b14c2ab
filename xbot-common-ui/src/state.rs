use std::sync::{Arc, Mutex, MutexGuard};

use xbot_common::models::{RobotStatus, StatusSnapshot};

use crate::chart::{ChartPeriod, ChartSeries};
use crate::view::{self, DashboardView};

/// Result of handing a poll response to [`ClientState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A newer generation already landed; nothing changed.
    Stale,
    /// The view was updated. `transition` carries the new `robot.online`
    /// value when it flipped against the previous snapshot.
    Fresh { transition: Option<bool> },
}

/// Everything the dashboard knows between two polls.
#[derive(Debug, Default)]
pub struct ClientState {
    pub view: DashboardView,
    pub chart_period: ChartPeriod,
    last_robot: Option<RobotStatus>,
    issued: u64,
    applied: u64,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the generation for one poll attempt.
    pub fn begin_poll(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn applied_generation(&self) -> u64 {
        self.applied
    }

    pub fn last_robot(&self) -> Option<&RobotStatus> {
        self.last_robot.as_ref()
    }

    fn accept(&mut self, generation: u64) -> bool {
        if generation < self.applied {
            return false;
        }
        self.applied = generation;
        true
    }

    pub fn apply_snapshot(&mut self, generation: u64, snapshot: &StatusSnapshot) -> Applied {
        if !self.accept(generation) {
            return Applied::Stale;
        }

        let mut transition = None;
        if let Some(robot) = &snapshot.robot {
            if let Some(prev) = &self.last_robot {
                if prev.online != robot.online {
                    transition = Some(robot.online);
                }
            }
            view::update_robot_status(&mut self.view, robot);
            self.last_robot = Some(robot.clone());
        }
        if let Some(system) = &snapshot.system {
            view::update_system_status(&mut self.view.system, system);
        }
        if let Some(plugins) = &snapshot.plugins {
            view::update_plugin_status(&mut self.view.plugins, plugins);
        }
        if let Some(messages) = &snapshot.messages {
            view::update_message_stats(&mut self.view.messages, messages);
        }

        Applied::Fresh { transition }
    }

    /// Error view for a failed attempt. Returns false when a newer
    /// generation already landed.
    pub fn apply_failure(&mut self, generation: u64) -> bool {
        if !self.accept(generation) {
            return false;
        }
        view::show_status_error(&mut self.view);
        true
    }

    pub fn regenerate_chart(&mut self) {
        self.view.chart = Some(ChartSeries::sample(self.chart_period));
    }

    pub fn set_chart_period(&mut self, period: ChartPeriod) {
        self.chart_period = period;
        self.regenerate_chart();
    }
}

/// [`ClientState`] shared between the poller, the dispatcher and the
/// renderer. The lock is never held across an await point.
#[derive(Debug, Clone, Default)]
pub struct SharedState(Arc<Mutex<ClientState>>);

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, ClientState> {
        // a panicking renderer must not take the poller down with it
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut ClientState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Copy of the current view for rendering.
    pub fn view(&self) -> DashboardView {
        self.lock().view.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RobotIndicator;

    fn snapshot(online: bool) -> StatusSnapshot {
        StatusSnapshot {
            robot: Some(RobotStatus { online, ..Default::default() }),
            ..Default::default()
        }
    }

    #[test]
    fn first_snapshot_never_transitions() {
        let mut state = ClientState::new();
        let generation = state.begin_poll();
        assert_eq!(state.apply_snapshot(generation, &snapshot(true)), Applied::Fresh { transition: None });
    }

    #[test]
    fn flips_are_reported_once() {
        let mut state = ClientState::new();
        let g1 = state.begin_poll();
        state.apply_snapshot(g1, &snapshot(true));

        let g2 = state.begin_poll();
        assert_eq!(state.apply_snapshot(g2, &snapshot(true)), Applied::Fresh { transition: None });

        let g3 = state.begin_poll();
        assert_eq!(
            state.apply_snapshot(g3, &snapshot(false)),
            Applied::Fresh { transition: Some(false) }
        );

        let g4 = state.begin_poll();
        assert_eq!(
            state.apply_snapshot(g4, &snapshot(true)),
            Applied::Fresh { transition: Some(true) }
        );
    }

    #[test]
    fn older_generation_is_discarded() {
        let mut state = ClientState::new();
        let old = state.begin_poll();
        let new = state.begin_poll();

        state.apply_snapshot(new, &snapshot(true));
        assert_eq!(state.apply_snapshot(old, &snapshot(false)), Applied::Stale);
        assert!(!state.apply_failure(old));
        assert_eq!(state.view.robot.indicator, RobotIndicator::Online);
        assert_eq!(state.applied_generation(), new);
    }

    #[test]
    fn failure_keeps_last_robot_for_edge_detection() {
        let mut state = ClientState::new();
        let g1 = state.begin_poll();
        state.apply_snapshot(g1, &snapshot(true));
        let g2 = state.begin_poll();
        assert!(state.apply_failure(g2));
        assert_eq!(state.view.robot.indicator, RobotIndicator::Error);

        let g3 = state.begin_poll();
        assert_eq!(state.apply_snapshot(g3, &snapshot(true)), Applied::Fresh { transition: None });
    }

    #[test]
    fn snapshot_without_robot_leaves_robot_view() {
        let mut state = ClientState::new();
        let generation = state.begin_poll();
        state.apply_snapshot(generation, &StatusSnapshot::default());
        assert_eq!(state.view.robot.indicator, RobotIndicator::Unknown);
        assert!(state.last_robot().is_none());
    }

    #[test]
    fn chart_period_switch_regenerates_series() {
        let mut state = ClientState::new();
        state.set_chart_period(ChartPeriod::Week);
        let chart = state.view.chart.clone().unwrap();
        assert_eq!(chart.period, ChartPeriod::Week);
        assert_eq!(chart.data.len(), 7);
    }
}
