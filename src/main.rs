use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_form::application::session::CheckoutSession;
use payment_form::config::FormConfig;
use payment_form::domain::ports::SurfaceBox;
use payment_form::infrastructure::in_memory::{InMemoryIndicator, InMemorySurface};
use payment_form::interfaces::csv::event_reader::EventReader;
use payment_form::interfaces::output_writer::OutputWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Replays a payment form event script through a headless checkout session
/// and prints every session output as a JSON line.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Event script CSV file (columns: kind, target, value)
    input: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// URL fragment identifying the 3DS success redirect
    #[arg(long)]
    success_pattern: Option<String>,

    /// URL fragment identifying the 3DS failure redirect
    #[arg(long)]
    failure_pattern: Option<String>,

    /// Hide the billing details page
    #[arg(long)]
    no_billing: bool,

    /// Comma separated list of accepted card schemes
    #[arg(long)]
    accepted_cards: Option<String>,
}

impl Cli {
    fn form_config(&self) -> payment_form::error::Result<FormConfig> {
        let mut config = match &self.config {
            Some(path) => FormConfig::from_path(path)?,
            None => FormConfig::default(),
        };
        if let Some(pattern) = &self.success_pattern {
            config.challenge.success_pattern = pattern.clone();
        }
        if let Some(pattern) = &self.failure_pattern {
            config.challenge.failure_pattern = pattern.clone();
        }
        if self.no_billing {
            config.include_billing = false;
        }
        if let Some(list) = &self.accepted_cards {
            config.accepted_cards = FormConfig::parse_accepted_cards(list)?;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,payment_form=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.form_config().into_diagnostic()?;

    let surface = InMemorySurface::new();
    let factory_surface = surface.clone();
    let session = CheckoutSession::new(
        &config,
        Box::new(InMemoryIndicator::new()),
        Box::new(move || Box::new(factory_surface.clone()) as SurfaceBox),
    );

    let (event_tx, event_rx) = mpsc::channel(64);
    let (output_tx, mut output_rx) = mpsc::unbounded_channel();
    let session_handle = tokio::spawn(session.run(event_rx, output_tx));

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);
    for event in reader.events() {
        match event {
            Ok(event) => {
                if event_tx.send(event).await.is_err() {
                    warn!("Session stopped before the script was fully replayed");
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "Error reading event");
            }
        }
    }
    drop(event_tx);

    let stdout = io::stdout();
    let mut writer = OutputWriter::new(stdout.lock());
    while let Some(output) = output_rx.recv().await {
        writer.write_output(&output).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    let session = session_handle.await.into_diagnostic()?;
    info!(
        page = ?session.wizard().page(),
        challenge = ?session.challenge().state(),
        urls_loaded = surface.snapshot().loaded_urls.len(),
        "Replay finished"
    );

    Ok(())
}
