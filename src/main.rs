#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use finding_relay::config::WebhookConfig;
use finding_relay::finding::Finding;
use finding_relay::markdown::HtmlMarkdownConverter;
use finding_relay::relay::NotificationDispatcher;
use finding_relay::webhook::HttpWebhookSender;

/// Forward scanner findings to a Discord webhook.
#[derive(Parser)]
#[command(name = "finding-relay", version, about)]
struct Cli {
    /// Webhook settings (TOML). Missing keys fall back to defaults.
    #[arg(short, long, default_value = "finding-relay.toml")]
    config: PathBuf,

    /// Finding files (JSON), delivered in order.
    #[arg(required = true)]
    findings: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Install default crypto provider for Rustls TLS before reqwest builds
    // its first client.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: failed to install default crypto provider: {e:?}");
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let cli = Cli::parse();
    let config = WebhookConfig::load(&cli.config)
        .with_context(|| format!("load config from {}", cli.config.display()))?;

    let dispatcher = NotificationDispatcher::new(
        Arc::new(HttpWebhookSender::new()),
        Arc::new(HtmlMarkdownConverter::new()),
    );

    let mut failed = false;

    for path in &cli.findings {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read finding from {}", path.display()))?;
        let finding: Finding = serde_json::from_str(&raw)
            .with_context(|| format!("parse finding from {}", path.display()))?;

        match dispatcher.deliver(&finding, &config).await {
            Ok(report) => {
                if report.all_delivered() {
                    tracing::info!(
                        finding = %finding.name,
                        sends = report.records().len(),
                        "delivered"
                    );
                } else {
                    failed = true;
                    for record in report.failures() {
                        tracing::error!(finding = %finding.name, send = %record.kind, "send failed");
                    }
                }
            }
            Err(error) => {
                failed = true;
                tracing::error!(finding = %finding.name, error = %error, "delivery aborted");
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
