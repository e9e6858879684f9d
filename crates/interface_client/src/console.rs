//! Terminal adapters for the confirmation and notification ports

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use tracing::warn;

use domain_claims::{Confirmation, Notification, NotificationKind, Notifier};

/// Asks on stdin; anything other than `y`/`yes` declines
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleConfirmation;

/// Interprets one line typed at the prompt
pub fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl Confirmation for ConsoleConfirmation {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || -> io::Result<bool> {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{prompt} [y/N] ")?;
            stdout.flush()?;

            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(parse_answer(&line))
        })
        .await;

        match answer {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                warn!(error = %e, "Could not read confirmation, treating as declined");
                false
            }
            Err(e) => {
                warn!(error = %e, "Confirmation prompt aborted");
                false
            }
        }
    }
}

/// Prints notifications; failures go to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => println!("{}", notification.message),
            _ => eprintln!("{}", notification.message),
        }
    }
}
