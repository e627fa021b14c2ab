// Terminal dashboard for the bot's web backend
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use xbot_common::models::ControlAction;
use xbot_common::traits::DashboardApi;
use xbot_common_ui::{event_channel, Confirm, FixedAnswer, HttpClient, PollerSettings, PushPlusClient};
use xbot_tui::confirm::{stdin_lines, StdinConfirm};
use xbot_tui::{oneshot, watch, App};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser, Debug, Clone)]
#[command(name = "xbot-tui")]
#[command(author, version, about = "XBot dashboard - watch and control the bot from a terminal")]
struct Args {
    /// Web backend root. Falls back to XBOT_BASE_URL, then http://127.0.0.1:8080
    #[arg(long)]
    base_url: Option<String>,

    /// Seconds between status polls. Falls back to XBOT_POLL_INTERVAL_SECS, then 30
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', default_value = "false")]
    yes: bool,

    /// Forward online/offline transitions to PushPlus
    #[arg(long, default_value = "false")]
    push_transitions: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Live dashboard with a command prompt (default)
    Watch,
    /// Print the dashboard once
    Status,
    /// Start the bot
    Start,
    /// Stop the bot
    Stop,
    /// Restart the bot
    Restart,
    /// Show recent log lines
    Logs {
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "20")]
        limit: u32,
    },
    /// Show recent messages
    Messages {
        #[arg(long, default_value = "10")]
        limit: u32,
    },
    /// Send a PushPlus notification
    Push { title: String, content: String },
    /// Show the WeChat login state
    Wechat,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("xbot=info".parse().unwrap_or_default());
    let sub = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {}", e);
    }
}

fn resolve_base_url(args: &Args) -> String {
    args.base_url
        .clone()
        .or_else(|| std::env::var("XBOT_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn resolve_poll_interval(args: &Args) -> anyhow::Result<Duration> {
    let secs = match args.poll_interval {
        Some(secs) => secs,
        None => match std::env::var("XBOT_POLL_INTERVAL_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid XBOT_POLL_INTERVAL_SECS '{}': {}", raw, e))?,
            Err(_) => 30,
        },
    };
    if secs == 0 {
        anyhow::bail!("poll interval must be at least one second");
    }
    Ok(Duration::from_secs(secs))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let base_url = resolve_base_url(&args);
    let poller_settings = PollerSettings {
        interval: resolve_poll_interval(&args)?,
        ..PollerSettings::default()
    };
    info!("XBot dashboard starting. base_url={}, interval={:?}", base_url, poller_settings.interval);

    let api: Arc<dyn DashboardApi> = Arc::new(HttpClient::new(&base_url)?);
    let push = Arc::new(PushPlusClient::new()?);
    let lines = stdin_lines();
    let confirm: Arc<dyn Confirm> = if args.yes {
        Arc::new(FixedAnswer(true))
    } else {
        Arc::new(StdinConfirm::new(lines.clone()))
    };

    let (events_tx, mut events_rx) = event_channel();
    let app = App::new(api, push, events_tx, poller_settings, confirm)
        .with_push_transitions(args.push_transitions);

    let result = match args.command.clone().unwrap_or(Command::Watch) {
        Command::Watch => {
            println!("XBot dashboard ({})", base_url);
            return watch::run_watch(Arc::new(app), events_rx, lines).await;
        }
        Command::Status => oneshot::status(&app).await,
        Command::Start => oneshot::control(&app, &mut events_rx, ControlAction::Start).await,
        Command::Stop => oneshot::control(&app, &mut events_rx, ControlAction::Stop).await,
        Command::Restart => oneshot::control(&app, &mut events_rx, ControlAction::Restart).await,
        Command::Logs { level, search, limit } => oneshot::logs(&app, level, search, limit).await,
        Command::Messages { limit } => oneshot::messages(&app, limit).await,
        Command::Push { title, content } => oneshot::push(&app, &title, &content).await,
        Command::Wechat => oneshot::wechat(&app).await,
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("command failed: {}", e);
            Err(e)
        }
    }
}
