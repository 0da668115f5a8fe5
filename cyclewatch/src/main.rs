// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! cyclewatch - battery cycle count monitor
//!
//! Watches the battery cycle count and prints a panel label line (`Bat:318`)
//! per sample until Ctrl+C, or prints a one-shot report with `--once`.

use anyhow::{Context, Result};
use clap::Parser;
use cyclewatch::{monitor, AppConfig, Cli, Report};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    cli.apply(&mut config);

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if cli.once {
        return report(&cli, &config);
    }

    let shutdown = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
        }
        info!("Ctrl+C received, stopping");
    };

    monitor::run(&config, &mut std::io::stdout(), shutdown).await?;
    Ok(ExitCode::SUCCESS)
}

fn report(cli: &Cli, config: &AppConfig) -> Result<ExitCode> {
    let report = Report::collect(
        &config.battery.sysfs_root,
        config.battery.name.as_deref(),
        cli.verbose,
        cli.check_system,
    );

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        print!("{}", report.render_text());
    }

    Ok(ExitCode::from(report.exit_code()))
}
