pub mod chart;
pub mod debounce;
pub mod dispatcher;
pub mod events;
pub mod format;
pub mod http_client;
pub mod poller;
pub mod pushplus;
pub mod retry;
pub mod state;
pub mod view;

pub use dispatcher::{Confirm, ControlDispatcher, DispatchOutcome, DispatchSettings, FixedAnswer};
pub use events::{event_channel, DashboardEvent, EventReceiver, EventSender, Notification, Severity};
pub use http_client::{HttpClient, PushPlusClient};
pub use poller::{PollOutcome, PollerSettings, StatusPoller};
pub use retry::{Backoff, RetryPolicy};
pub use state::{ClientState, SharedState};
pub use view::DashboardView;
