//! FarmSure - Claim Intake Binary
//!
//! Submits one crop-damage claim from a saved form and a set of images.
//!
//! # Usage
//!
//! ```bash
//! claim-intake draft.json field1.jpg field2.jpg
//!
//! CLAIMS_BASE_URL=https://claims.example.org claim-intake draft.json
//! ```
//!
//! # Environment Variables
//!
//! * `CLAIMS_BASE_URL` - Claims service (default: http://127.0.0.1:8000)
//! * `CLAIMS_CLAIMS_PATH` - Submission path (default: /api/claims)
//! * `CLAIMS_TIMEOUT_SECS` - Request timeout, unset for none
//! * `CLAIMS_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `CLAIMS_POLICY__UNKNOWN_FIELDS` - `reject` or `ignore`
//! * `CLAIMS_POLICY__LOCK_EDITS_WHILE_SUBMITTING`, `CLAIMS_POLICY__RESET_AFTER_SUCCESS`,
//!   `CLAIMS_POLICY__VALIDATE_BEFORE_SUBMIT` - true/false

use std::sync::Arc;

use anyhow::{bail, Context};
use serde_json::{Map, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::{ClaimFormController, SubmissionOutcome};
use interface_client::attachments::load_attachments;
use interface_client::form::apply_form_values;
use interface_client::{ClientConfig, ConsoleConfirmation, ConsoleNotifier, HttpClaimTransport};

const USAGE: &str = "usage: claim-intake <draft.json> [attachment...]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config();
    init_tracing(&config.log_level);

    let mut args = std::env::args().skip(1);
    let draft_path = args.next().context(USAGE)?;
    let attachment_paths: Vec<String> = args.collect();

    tracing::info!(
        base_url = %config.base_url,
        draft = %draft_path,
        attachments = attachment_paths.len(),
        "Starting claim intake"
    );

    let transport = Arc::new(HttpClaimTransport::new(&config)?);
    let mut controller = ClaimFormController::new(transport, Arc::new(ConsoleConfirmation))
        .with_policy(config.policy.clone())
        .with_notifier(Arc::new(ConsoleNotifier));

    let raw = tokio::fs::read_to_string(&draft_path)
        .await
        .with_context(|| format!("reading {draft_path}"))?;
    let values: Map<String, Value> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {draft_path}"))?;
    apply_form_values(&mut controller, &values)?;

    if !attachment_paths.is_empty() {
        let files = load_attachments(attachment_paths.as_slice()).await?;
        controller.apply_attachment_replace(files)?;
    }

    match controller.submit().await? {
        SubmissionOutcome::Succeeded(receipt) => {
            if let Some(pdf) = &receipt.pdf {
                tracing::info!(claim_id = %receipt.claim_id, pdf = %pdf, "Claim document available");
            }
            Ok(())
        }
        SubmissionOutcome::Cancelled => Ok(()),
        SubmissionOutcome::Blocked(report) => {
            for issue in &report.errors {
                eprintln!("  - {}", issue.message);
            }
            bail!("claim is incomplete")
        }
        SubmissionOutcome::RejectedByServer { status } => bail!("claims service answered {status}"),
        SubmissionOutcome::TransportFailed { reason } => bail!("claim not delivered: {reason}"),
    }
}

/// Loads configuration, falling back to defaults when the environment is unusable
fn load_config() -> ClientConfig {
    ClientConfig::from_env().unwrap_or_else(|e| {
        eprintln!("ignoring invalid CLAIMS_* configuration: {e}");
        ClientConfig {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ..ClientConfig::default()
        }
    })
}

/// Initializes the tracing subscriber for structured logging
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
