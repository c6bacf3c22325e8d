#![allow(clippy::uninlined_format_args)]

use anyhow::{bail, Context};
use canvas_conformance::{builtin_suite, RunReport, Runner, RunnerConfig, SoftwareHost};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// canvas-conformance: Run OffscreenCanvas 2D conformance cases against the software canvas
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Only run cases whose id matches this regular expression
    #[clap(short, long)]
    pub filter: Option<String>,

    /// Per-case timeout in milliseconds
    #[clap(long, default_value_t = 10000)]
    pub timeout_ms: u64,

    /// Report format
    #[clap(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Pretty-print JSON reports
    #[clap(short, long)]
    pub pretty: bool,

    /// Path to the report file to be created. Defaults to stdout
    #[clap(short, long)]
    pub output: Option<String>,

    /// Directory receiving PNG snapshots of failing pixel assertions
    #[clap(long)]
    pub artifacts_dir: Option<String>,

    /// List the built-in cases and exit
    #[clap(long)]
    pub list: bool,

    /// Log runner progress at debug level
    #[clap(short, long)]
    pub verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(args).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("canvas-conformance: {:#}", err);
            std::process::exit(2);
        }
    }
}

async fn run(args: Args) -> anyhow::Result<i32> {
    let suite = builtin_suite();

    if args.list {
        for case in suite.cases() {
            println!("{}\t{}\t{}", case.id(), case.category(), case.description());
        }
        return Ok(0);
    }

    if args.timeout_ms == 0 {
        bail!("--timeout-ms must be positive");
    }
    let mut config = RunnerConfig::default().with_timeout(Duration::from_millis(args.timeout_ms));
    if let Some(filter) = &args.filter {
        config = config
            .with_filter(filter)
            .with_context(|| format!("Invalid --filter {:?}", filter))?;
    }
    if let Some(dir) = &args.artifacts_dir {
        config = config.with_artifacts_dir(shellexpand::tilde(dir).to_string());
    }

    log::debug!(
        "Runner config: timeout={:?} filter={:?} artifacts_dir={:?}",
        config.timeout,
        config.filter.as_ref().map(|f| f.as_str()),
        config.artifacts_dir
    );
    let runner = Runner::new(Arc::new(SoftwareHost), config);
    let report = runner.run(&suite).await;

    let rendered = render(&report, &args.format, args.pretty)?;
    match &args.output {
        Some(path) => {
            let path = shellexpand::tilde(path).to_string();
            write_report(Path::new(&path), &rendered)?;
            // The summary still goes to the terminal when the report is a file
            eprintln!(
                "{} passed; {} failed; {} errored; {} skipped",
                report.summary.passed,
                report.summary.failed,
                report.summary.errored,
                report.summary.skipped
            );
        }
        None => print!("{}", rendered),
    }

    Ok(report.exit_code())
}

fn render(report: &RunReport, format: &str, pretty: bool) -> anyhow::Result<String> {
    match format {
        "json" => {
            let mut json = report.to_json(pretty)?;
            json.push('\n');
            Ok(json)
        }
        _ => Ok(report.render_text()),
    }
}

fn write_report(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
