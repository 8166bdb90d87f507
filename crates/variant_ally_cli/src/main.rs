//! Variant Ally CLI - inspect and resolve script variant preferences
//!
//! A standalone tool for exercising the variant model against a synthetic
//! host environment. Provides:
//! - `inspect`: the full debug report plus the force-dialog URL check
//! - `resolve`: the preferred variant as a single line
//! - `variants`: the supported catalog
//!
//! Host signals come from a `--scenario` JSON snapshot and/or individual
//! flags; flags win over the scenario file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use variant_ally::{
    DebugReporter, DebugSink, HeadlessHost, HostSnapshot, Variant, VariantModel, VariantPrompt,
    STORAGE_KEY,
};

/// Inspect and resolve script variant preferences
#[derive(Parser, Debug)]
#[command(name = "vally")]
#[command(about = "Inspect and resolve script variant preferences")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the full debug report for a host environment
    Inspect(EnvArgs),
    /// Resolve the preferred variant and print its code
    Resolve(EnvArgs),
    /// List the supported variant catalog
    Variants,
}

/// Host environment assembled from a scenario file and/or flags.
#[derive(Args, Debug, Default)]
struct EnvArgs {
    /// Scenario file holding a JSON host snapshot
    #[arg(long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Browser language tag, in priority order (repeatable)
    #[arg(long = "language", value_name = "TAG")]
    languages: Vec<String>,

    /// Variant the page is rendered in
    #[arg(long, value_name = "CODE")]
    page: Option<Variant>,

    /// Treat the session as signed in
    #[arg(long)]
    logged_in: bool,

    /// Account-level variant preference
    #[arg(long, value_name = "CODE")]
    account: Option<Variant>,

    /// Raw value planted in the persisted variant slot
    #[arg(long, value_name = "VALUE")]
    stored: Option<String>,

    /// Document referrer
    #[arg(long, value_name = "URL")]
    referrer: Option<String>,

    /// Page URL, checked for the force-dialog parameter
    #[arg(long, value_name = "URL")]
    url: Option<String>,
}

/// Routes debug report lines to stdout.
struct StdoutSink;

impl DebugSink for StdoutSink {
    fn write_line(&self, line: &str) {
        println!("{line}");
    }
}

/// Prints a marker where a host page would open the variant dialog.
struct StdoutPrompt;

impl VariantPrompt for StdoutPrompt {
    fn show(&self) {
        println!("(variant dialog requested)");
    }
}

fn load_scenario(path: &Path) -> Result<HostSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let snapshot: HostSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(snapshot)
}

/// Overlay individual flags on top of whatever the scenario planted.
///
/// Unset flags leave the host signal alone; `--logged-in` can only turn
/// the signal on, never off.
fn apply_flags(args: &EnvArgs, host: &HeadlessHost) {
    if !args.languages.is_empty() {
        host.set_languages(args.languages.clone());
    }
    if let Some(page) = args.page {
        host.set_page_variant(Some(page));
    }
    if args.logged_in {
        host.set_logged_in(true);
    }
    if let Some(account) = args.account {
        host.set_account_preference(Some(account));
    }
    if let Some(stored) = &args.stored {
        host.insert_storage(STORAGE_KEY, stored.clone());
    }
    if let Some(referrer) = &args.referrer {
        host.set_referrer(Some(referrer.clone()));
    }
    if let Some(url) = &args.url {
        host.set_url(Some(url.clone()));
    }
}

fn build_host(args: &EnvArgs) -> Result<Arc<HeadlessHost>> {
    let host = Arc::new(HeadlessHost::new());

    if let Some(path) = &args.scenario {
        load_scenario(path)?.apply(&host);
    }
    apply_flags(args, &host);

    Ok(host)
}

fn run_inspect(args: &EnvArgs) -> Result<()> {
    let host = build_host(args)?;
    let model = VariantModel::with_host(host.clone());
    let reporter = DebugReporter::new(model, host, Arc::new(StdoutPrompt), Arc::new(StdoutSink));

    reporter.show_debug_info();
    reporter.check_debug_url_param();

    Ok(())
}

fn run_resolve(args: &EnvArgs) -> Result<()> {
    let host = build_host(args)?;
    let model = VariantModel::with_host(host);

    match model.preferred_variant() {
        Some(variant) => println!("{variant}"),
        None => println!("(none)"),
    }

    Ok(())
}

fn run_variants() {
    for variant in Variant::all() {
        println!(
            "{:<8} {:<12} {}",
            variant.code(),
            variant.script().name(),
            variant.region_name()
        );
    }
}

fn main() -> Result<()> {
    // Keep reconciliation logs off stdout unless RUST_LOG asks for them
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    match Cli::parse().command {
        Command::Inspect(args) => run_inspect(&args),
        Command::Resolve(args) => run_resolve(&args),
        Command::Variants => {
            run_variants();
            Ok(())
        }
    }
}
