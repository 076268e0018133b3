use anyhow::Context;
use clap::Parser;
use srcstat_cli::args::Args;
use srcstat_cli::config::AppConfig;
use srcstat_cli::{logging, presentation};
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.behavior.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Application Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = AppConfig::try_from(args).context("invalid arguments")?;
    tracing::info!(
        roots = ?config.engine.walk.roots,
        threads = config.engine.walk.threads,
        "srcstat v{} starting",
        srcstat_cli::VERSION
    );

    let result = srcstat_engine::run(&config.engine).context("scan failed")?;
    for (path, err) in &result.errors {
        eprintln!("Error processing {}: {err}", path.display());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    presentation::write_results(&mut out, &result.stats, &config)
        .context("failed to write report")?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}
