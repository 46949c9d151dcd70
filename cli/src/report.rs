//! Report subcommand: joins Criterion timing output with allocation probe
//! samples and emits one comparison table plus machine-readable artifacts.

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use catbench_core::concat;
use catbench_core::fixture::Fixture;
use catbench_core::perf::cases;
use chrono::{DateTime, SecondsFormat, Utc};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::probe;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Criterion output directory to read timings from.
    #[arg(long, default_value = "target/criterion", value_name = "DIR")]
    criterion_dir: PathBuf,

    /// Directory the report artifacts are written into.
    #[arg(long, default_value = "target/catbench", value_name = "DIR")]
    output_dir: PathBuf,

    /// Allocation sampling iterations per strategy.
    #[arg(long, default_value_t = 3, value_name = "N")]
    alloc_iters: usize,

    /// Override the run timestamp (RFC3339).
    #[arg(long, value_name = "TS")]
    timestamp: Option<String>,

    /// Attach notes to the run record.
    #[arg(long, value_name = "TEXT")]
    notes: Option<String>,

    /// Reuse existing Criterion output instead of running cargo bench.
    #[arg(long)]
    skip_bench: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct CaseMetrics {
    case: String,
    title: String,
    mean_ns: f64,
    median_ns: f64,
    std_dev_ns: f64,
    p50_ns: f64,
    p95_ns: f64,
    p99_ns: f64,
    allocs_per_build: u64,
    peak_bytes_per_build: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct RunRecord {
    generated_at: String,
    git_rev: Option<String>,
    notes: Option<String>,
    metrics: Vec<CaseMetrics>,
}

#[derive(Deserialize)]
struct EstimateFile {
    mean: EstimateEntry,
    median: EstimateEntry,
    std_dev: EstimateEntry,
}

#[derive(Deserialize)]
struct EstimateEntry {
    point_estimate: f64,
}

#[derive(Debug)]
struct TimeStats {
    mean_ns: f64,
    median_ns: f64,
    std_dev_ns: f64,
    p50_ns: f64,
    p95_ns: f64,
    p99_ns: f64,
}

impl CaseMetrics {
    fn new(case: &str, title: &str, time: TimeStats, alloc: probe::ProbeDelta) -> Self {
        Self {
            case: case.to_string(),
            title: title.to_string(),
            mean_ns: time.mean_ns,
            median_ns: time.median_ns,
            std_dev_ns: time.std_dev_ns,
            p50_ns: time.p50_ns,
            p95_ns: time.p95_ns,
            p99_ns: time.p99_ns,
            allocs_per_build: alloc.allocations as u64,
            peak_bytes_per_build: alloc.peak_bytes as u64,
        }
    }
}

pub fn run(args: &ReportArgs) -> Result<()> {
    if !args.skip_bench {
        run_cargo_bench()?;
    }
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("create output directory {}", args.output_dir.display()))?;

    // Row order comes from the registry, not from a list kept here.
    let fixture = Fixture::canonical();
    let mut metrics = Vec::new();
    for key in cases::bench_case_keys() {
        let time = load_time_stats(&args.criterion_dir, key)?;
        let metric = if key == cases::BASELINE {
            let alloc = probe::profile_build(|| concat::nullop(fixture), args.alloc_iters);
            CaseMetrics::new(key, "Empty body measuring the timer and loop floor", time, alloc)
        } else {
            let case = cases::case_by_key(key)
                .with_context(|| format!("no registered strategy named '{key}'"))?;
            let alloc = probe::profile_build(|| case.build(fixture), args.alloc_iters);
            CaseMetrics::new(case.key(), case.title(), time, alloc)
        };
        metrics.push(metric);
    }

    let record = RunRecord {
        generated_at: run_timestamp(args.timestamp.as_deref())?,
        git_rev: env::var("GITHUB_SHA")
            .ok()
            .map(|sha| sha.chars().take(8).collect()),
        notes: args.notes.clone(),
        metrics,
    };

    print!("{}", render_table(&record));

    let json_path = args.output_dir.join("latest.json");
    let csv_path = args.output_dir.join("latest.csv");
    write_json(&json_path, &record)?;
    write_csv(&csv_path, &record.metrics)?;
    println!("Report written -> {}, {}", json_path.display(), csv_path.display());
    Ok(())
}

fn run_cargo_bench() -> Result<()> {
    let status = Command::new("cargo")
        .args(["bench", "-p", "catbench-core", "--bench", "concat_bench", "--", "--noplot"])
        .status()
        .context("failed to spawn cargo bench")?;
    if !status.success() {
        bail!("cargo bench exited with {status}");
    }
    Ok(())
}

fn load_time_stats(criterion_dir: &Path, case: &str) -> Result<TimeStats> {
    let estimate_path = criterion_dir.join(case).join("new").join("estimates.json");
    let data = fs::read_to_string(&estimate_path)
        .with_context(|| format!("read {}", estimate_path.display()))?;
    let estimates: EstimateFile = serde_json::from_str(&data)
        .with_context(|| format!("parse {}", estimate_path.display()))?;

    let raw_path = criterion_dir.join(case).join("new").join("raw.csv");
    let raw_file = File::open(&raw_path).with_context(|| format!("open {}", raw_path.display()))?;
    let mut reader = BufReader::new(raw_file);
    let mut line = String::new();
    let mut samples = Vec::new();
    while reader.read_line(&mut line)? != 0 {
        if line.starts_with("group") {
            line.clear();
            continue;
        }
        samples.push(parse_sample_value(&line)?);
        line.clear();
    }
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(TimeStats {
        mean_ns: estimates.mean.point_estimate,
        median_ns: estimates.median.point_estimate,
        std_dev_ns: estimates.std_dev.point_estimate,
        p50_ns: quantile(&samples, 0.5),
        p95_ns: quantile(&samples, 0.95),
        p99_ns: quantile(&samples, 0.99),
    })
}

/// One `raw.csv` row holds the total measured time for a batch of
/// iterations; dividing by the iteration count gives per-build time.
fn parse_sample_value(line: &str) -> Result<f64> {
    let parts: Vec<&str> = line.trim_end().split(',').collect();
    if parts.len() < 8 {
        bail!("raw.csv row had {} columns, expected at least 8", parts.len());
    }
    let total: f64 = parts[5]
        .parse()
        .context("raw.csv contained a non-numeric sample_measured_value")?;
    let iterations: f64 = parts[7]
        .parse()
        .context("raw.csv contained a non-numeric iteration_count")?;
    if iterations > 0.0 {
        Ok(total / iterations)
    } else {
        Ok(total)
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = pos - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// The `net ns` column is the mean with the baseline floor subtracted; the
/// baseline row itself shows `-` there.
fn render_table(record: &RunRecord) -> String {
    let floor = record
        .metrics
        .iter()
        .find(|metric| metric.case == cases::BASELINE)
        .map(|metric| metric.mean_ns);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<18} {:>11} {:>11} {:>11} {:>11} {:>11} {:>7} {:>10}",
        "case", "mean ns", "net ns", "median ns", "p95 ns", "p99 ns", "allocs", "peak B"
    );
    for metric in &record.metrics {
        let net = match floor {
            Some(floor) if metric.case != cases::BASELINE => {
                format!("{:.1}", metric.mean_ns - floor)
            }
            _ => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<18} {:>11.1} {:>11} {:>11.1} {:>11.1} {:>11.1} {:>7} {:>10}",
            metric.case,
            metric.mean_ns,
            net,
            metric.median_ns,
            metric.p95_ns,
            metric.p99_ns,
            metric.allocs_per_build,
            metric.peak_bytes_per_build
        );
    }
    out
}

fn run_timestamp(raw: Option<&str>) -> Result<String> {
    let stamp = match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .context("parse --timestamp as RFC3339")?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    Ok(stamp.to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("write {}", path.display()))
}

fn write_csv(path: &Path, metrics: &[CaseMetrics]) -> Result<()> {
    let mut writer =
        BufWriter::new(File::create(path).with_context(|| format!("create {}", path.display()))?);
    writeln!(
        writer,
        "case,mean_ns,median_ns,std_dev_ns,p50_ns,p95_ns,p99_ns,allocs_per_build,peak_bytes_per_build"
    )?;
    for metric in metrics {
        writeln!(
            writer,
            "{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{},{}",
            metric.case,
            metric.mean_ns,
            metric.median_ns,
            metric.std_dev_ns,
            metric.p50_ns,
            metric.p95_ns,
            metric.p99_ns,
            metric.allocs_per_build,
            metric.peak_bytes_per_build
        )?;
    }
    writer.flush()?;
    Ok(())
}
