// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The long-running mode: one panel label line per sample until shutdown.

use crate::battery::{find_battery, Battery, CycleCountSource};
use crate::config::AppConfig;
use crate::label::PanelLabel;
use anyhow::{Context, Result};
use cyclewatch_sampler::{Latest, SampleStatus, Sampler};
use futures::StreamExt;
use std::future::Future;
use std::io::Write;
use tracing::{info, warn};

const FALLBACK_BATTERY: &str = "BAT0";

/// Battery to watch: the configured or first discovered one.
///
/// When discovery finds nothing the conventional `class/power_supply/BAT0`
/// path (or the configured name) is watched anyway, which shows up as
/// `Unavailable` samples until the battery appears.
#[must_use]
pub fn select_battery(config: &AppConfig) -> Battery {
    let root = &config.battery.sysfs_root;
    let name = config.battery.name.as_deref();

    find_battery(root, name).unwrap_or_else(|| {
        let name = name.unwrap_or(FALLBACK_BATTERY);
        warn!(
            "no battery {} found under {}, watching the default path",
            name,
            root.display()
        );
        Battery::new(name, root.join("class/power_supply").join(name))
    })
}

/// Sample the cycle count and write a label line per result to `out` until
/// `shutdown` completes, then stop the sampler.
///
/// The placeholder label is written first, before any read.
pub async fn run<W, F>(config: &AppConfig, out: &mut W, shutdown: F) -> Result<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    let battery = select_battery(config);
    let label = PanelLabel::new(config.label.prefix.clone());
    let source = CycleCountSource::new(&battery);

    info!("watching {}", source.path().display());
    let sampler = Sampler::new(config.sampler_config(source, battery.name()))
        .context("Invalid sampler configuration")?;
    let mut samples = sampler.watch();

    writeln!(out, "{}", label.format(&Latest::NoSampleYet))?;
    out.flush()?;
    sampler.start().context("Failed to start the sampler")?;

    tokio::pin!(shutdown);
    let outcome = loop {
        tokio::select! {
            sample = samples.next() => {
                let Some(sample) = sample else { break Ok(()) };
                if sample.status() == SampleStatus::Error {
                    warn!(
                        "{}: cycle count read failed: {}",
                        battery.name(),
                        sample.error_detail().unwrap_or_default()
                    );
                }
                let line = label.format_sample(&sample);
                if let Err(error) = writeln!(out, "{line}").and_then(|()| out.flush()) {
                    break Err(error).context("Failed to write label");
                }
            }
            () = &mut shutdown => {
                info!("shutting down");
                break Ok(());
            }
        }
    };

    sampler.stop().await;
    outcome
}
