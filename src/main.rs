use anyhow::{Context, Result};
use linkify_changelog::{Config, RewriteMode};
use std::process::ExitCode;

fn run(config: &Config) -> Result<ExitCode> {
    let linkifier = config.linkifier().context("Invalid configuration")?;
    let summary = linkify_changelog::rewrite_files(&config.files, &linkifier, config.mode());

    let changed = summary.changed().count();
    tracing::info!(
        files = summary.outcomes().len(),
        changed,
        failed = summary.failures().len(),
        "done"
    );

    if summary.has_failures() || (config.mode() == RewriteMode::Check && changed > 0) {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let config = Config::parse();
    linkify_changelog::logging::init(config.verbose);

    match run(&config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
