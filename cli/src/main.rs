use std::sync::Once;

use anyhow::{Context, Result};
use catbench_core::fixture::Fixture;
use catbench_core::perf::cases;
use clap::{Parser, Subcommand};

mod probe;
mod report;

#[cfg(test)]
mod main_test;

static TRACE_INIT: Once = Once::new();

const DEFAULT_TRACE_FILTER: &str = "catbench_core=debug";

#[derive(Debug, Parser)]
#[command(name = "catbench", version, about = "String concatenation micro-benchmarks")]
struct CliArgs {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the canonical rendering once per strategy and print it.
    Show,
    /// Check that every strategy produces identical bytes, including for
    /// empty and non-ASCII fixtures.
    Verify,
    /// Summarize Criterion timings and allocation behavior in one table.
    Report(report::ReportArgs),
}

fn main() -> Result<()> {
    maybe_init_tracing();
    let args = CliArgs::parse();
    match args.command.unwrap_or(Commands::Show) {
        Commands::Show => show(),
        Commands::Verify => verify(),
        Commands::Report(args) => report::run(&args),
    }
}

fn show() -> Result<()> {
    let fixture = Fixture::canonical();
    for case in cases::concat_cases() {
        let output = case.run_verified(fixture)?;
        println!("{:<18} {output}", case.key());
    }
    println!("{:<18} (no output)", cases::BASELINE);
    Ok(())
}

fn verify() -> Result<()> {
    let checks = [
        ("canonical", Fixture::canonical().clone()),
        ("empty", Fixture::new("", "", "", "", "")),
        ("non-ascii", Fixture::new("étiquette", "α", "β", "γ", "δ")),
    ];
    for (name, fixture) in &checks {
        cases::verify_equivalence(fixture).with_context(|| format!("{name} fixture"))?;
        println!("{name}: ok");
    }
    Ok(())
}

/// Tracing stays off unless `CATBENCH_TRACE` is set, so normal runs and the
/// bench harness keep a quiet stderr.
fn maybe_init_tracing() {
    let raw = match std::env::var("CATBENCH_TRACE") {
        Ok(value) => value,
        Err(_) => return,
    };
    let trimmed = raw.trim().to_string();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("0")
        || trimmed.eq_ignore_ascii_case("false")
        || trimmed.eq_ignore_ascii_case("off")
    {
        return;
    }

    TRACE_INIT.call_once(move || {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt;

        // Any value beyond a bare on-switch is taken as a filter expression.
        let filter = match trimmed.as_str() {
            "1" | "true" | "on" => None,
            expr => Some(expr.to_string()),
        }
        .or_else(|| std::env::var("RUST_LOG").ok())
        .and_then(|expr| EnvFilter::try_new(expr).ok());

        let builder = fmt().with_writer(std::io::stderr);
        let _ = match filter {
            Some(filter) => builder.with_env_filter(filter).try_init(),
            None => builder.with_env_filter(DEFAULT_TRACE_FILTER).try_init(),
        };
    });
}
