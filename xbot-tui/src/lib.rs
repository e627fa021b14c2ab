pub mod app;
pub mod commands;
pub mod confirm;
pub mod help;
pub mod oneshot;
pub mod render;
pub mod watch;

pub use app::App;
