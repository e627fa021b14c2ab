use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use xbot_common_ui::Confirm;

/// Stdin line reader shared by the command loop and confirmation prompts.
pub type InputLines = Arc<Mutex<Lines<BufReader<Stdin>>>>;

pub fn stdin_lines() -> InputLines {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()))
}

/// `y`/`yes`/`是` confirms; anything else, EOF included, declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "是")
}

/// Asks on the terminal.
pub struct StdinConfirm {
    lines: InputLines,
}

impl StdinConfirm {
    pub fn new(lines: InputLines) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        let _ = std::io::stdout().flush();
        let mut lines = self.lines.lock().await;
        match lines.next_line().await {
            Ok(Some(answer)) => is_affirmative(&answer),
            _ => false,
        }
    }
}
