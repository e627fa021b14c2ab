pub mod api;

pub use api::{DashboardApi, PushGateway};
#[cfg(any(test, feature = "mock"))]
pub use api::{MockDashboardApi, MockPushGateway};
