mod console;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use intake_client::ExtractionClient;
use intake_core::config::Config;
use intake_core::preview::FilePreview;
use intake_core::{DocumentFile, SubmissionController, UploadSlot};

use crate::console::ConsoleSurface;

const DEFAULT_CONFIG_PATH: &str = "config/intake.toml";

#[derive(Parser, Debug)]
#[command(
    name = "intake",
    about = "Validate and submit identity documents for data extraction",
    version
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit ID front, ID back and proof of address for extraction
    Submit(SubmitArgs),
    /// Check that the extraction service is reachable
    Health,
    /// Validate files against the upload policy without submitting
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct SubmitArgs {
    /// Image of the front of the ID card
    #[arg(long)]
    front_id: PathBuf,
    /// Image of the back of the ID card
    #[arg(long)]
    back_id: PathBuf,
    /// Image of a recent proof of address
    #[arg(long)]
    proof_of_address: PathBuf,
    /// Also write the rendered result as an HTML fragment
    #[arg(long)]
    html: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Slot whose policy applies (rg_frente, rg_verso, comprovante)
    #[arg(long, default_value = "rg_frente")]
    slot: UploadSlot,
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config.as_deref());
    let config = Config::load(&config_path)?;
    config.validate()?;
    tracing::debug!(path = %config_path.display(), base_url = %config.api.base_url, "configuration loaded");

    match cli.command {
        Command::Submit(args) => submit(&config, args).await,
        Command::Health => health(&config).await,
        Command::Check(args) => check(&config, &args).await,
    }
}

async fn submit(config: &Config, args: SubmitArgs) -> anyhow::Result<()> {
    let client = ExtractionClient::from_config(&config.api)?;
    let mut controller = SubmissionController::new(
        client,
        ConsoleSurface::stdout(),
        config.upload.policy_table(),
    );

    let selections = [
        (UploadSlot::FrontId, &args.front_id),
        (UploadSlot::BackId, &args.back_id),
        (UploadSlot::ProofOfAddress, &args.proof_of_address),
    ];
    let mut rejected = 0;
    for (slot, path) in selections {
        let file = DocumentFile::from_path(path)
            .await
            .with_context(|| format!("cannot open {}", path.display()))?;
        if controller.select(slot, file).is_err() {
            rejected += 1;
        }
    }
    if rejected > 0 {
        bail!("{rejected} file(s) rejected; nothing was submitted");
    }

    let Some(result) = controller.submit().await else {
        bail!("uploads incomplete; nothing was submitted");
    };
    let success = result.is_success();

    if let Some(out) = &args.html
        && let Some(view) = controller.surface().last_view()
    {
        tokio::fs::write(out, view.to_html())
            .await
            .with_context(|| format!("failed to write {}", out.display()))?;
        tracing::info!(path = %out.display(), "HTML result written");
    }

    if !success {
        bail!("document processing failed");
    }
    Ok(())
}

async fn health(config: &Config) -> anyhow::Result<()> {
    let client = ExtractionClient::from_config(&config.api)?;
    let status = client
        .health()
        .await
        .with_context(|| format!("extraction service at {} is unavailable", client.base_url()))?;
    match status.service {
        Some(service) => println!("{service}: {}", status.status),
        None => println!("{}", status.status),
    }
    Ok(())
}

async fn check(config: &Config, args: &CheckArgs) -> anyhow::Result<()> {
    let policies = config.upload.policy_table();
    let mut rejected = 0;
    for path in &args.paths {
        let file = DocumentFile::from_path(path)
            .await
            .with_context(|| format!("cannot open {}", path.display()))?;
        let preview = FilePreview::of(args.slot, &file);
        match policies.validate(&file, args.slot) {
            Ok(()) => println!(
                "{}: ok ({}, {})",
                path.display(),
                preview.size_label,
                preview.mime_type
            ),
            Err(e) => {
                println!("{}: {e}", path.display());
                rejected += 1;
            }
        }
    }
    if rejected > 0 {
        bail!("{rejected} of {} file(s) rejected", args.paths.len());
    }
    Ok(())
}

fn resolve_config_path(cli_path: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_path {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("INTAKE_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_CONFIG_PATH)
}

fn init_subscriber() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
