// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cyclewatch_sampler::{
    Latest, Sampler, SamplerConfig, SamplerError, SamplerState, Timer, DEFAULT_INTERVAL,
};
use cyclewatch_test_utils::{Recorder, ScriptedSource, Step};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{advance, pause};

/// A clock whose sleeps blow up, taking the driver down with them.
#[derive(Clone, Debug)]
struct BrokenClock;

impl Timer for BrokenClock {
    type Sleep = tokio::time::Sleep;
    type Instant = tokio::time::Instant;

    fn sleep_until(&self, _deadline: Self::Instant) -> Self::Sleep {
        panic!("clock went away");
    }

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }
}

fn scripted(values: &[&str]) -> ScriptedSource {
    ScriptedSource::new(values.iter().map(|value| Step::value(*value)))
}

#[test]
fn test_config_defaults() {
    let config = SamplerConfig::new(scripted(&["1"]));

    assert_eq!(config.interval(), DEFAULT_INTERVAL);
    assert_eq!(config.interval(), Duration::from_secs(30));
    assert!(config.initial_run());
    assert_eq!(config.read_timeout(), None);
    assert_eq!(config.name(), "sampler");
}

#[test]
fn test_zero_interval_is_rejected() {
    let result = Sampler::new(SamplerConfig::new(scripted(&["1"])).with_interval(Duration::ZERO));

    assert!(matches!(result, Err(SamplerError::InvalidConfig { .. })));
}

#[test]
fn test_zero_read_timeout_is_rejected() {
    let result =
        Sampler::new(SamplerConfig::new(scripted(&["1"])).with_read_timeout(Duration::ZERO));

    assert!(matches!(result, Err(SamplerError::InvalidConfig { .. })));
}

#[test]
fn test_start_outside_runtime_leaves_state_unchanged() -> anyhow::Result<()> {
    let sampler = Sampler::new(SamplerConfig::new(scripted(&["1"])))?;

    assert_eq!(sampler.start(), Err(SamplerError::RuntimeUnavailable));
    assert_eq!(sampler.state(), SamplerState::NotStarted);
    Ok(())
}

#[tokio::test]
async fn test_latest_is_sentinel_before_start() -> anyhow::Result<()> {
    let sampler = Sampler::new(SamplerConfig::new(scripted(&["1"])).with_name("bat0"))?;

    assert_eq!(sampler.latest(), Latest::NoSampleYet);
    assert_eq!(sampler.state(), SamplerState::NotStarted);
    assert_eq!(sampler.name(), "bat0");
    Ok(())
}

#[tokio::test]
async fn test_double_start_fails_and_keeps_running() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let sampler = Sampler::new(SamplerConfig::new(scripted(&["1", "2", "3"])))?;
    let _subscription = sampler.subscribe(recorder.observer());

    // Act
    sampler.start()?;
    let second = sampler.start();

    // Assert
    assert_eq!(second, Err(SamplerError::AlreadyStarted));
    assert_eq!(sampler.state(), SamplerState::Running);

    recorder.wait_for(2).await;
    assert_eq!(recorder.sequences(), vec![1, 2]);

    sampler.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_start_after_stop_is_rejected() -> anyhow::Result<()> {
    pause();
    let sampler = Sampler::new(SamplerConfig::new(scripted(&["1"])))?;

    sampler.start()?;
    sampler.stop().await;

    assert_eq!(sampler.start(), Err(SamplerError::Stopped));
    assert_eq!(sampler.state(), SamplerState::Stopped);
    Ok(())
}

#[tokio::test]
async fn test_stop_is_idempotent() -> anyhow::Result<()> {
    pause();
    let sampler = Sampler::new(SamplerConfig::new(scripted(&["1"])))?;
    sampler.start()?;

    sampler.stop().await;
    sampler.stop().await;

    assert_eq!(sampler.state(), SamplerState::Stopped);
    Ok(())
}

#[tokio::test]
async fn test_stop_before_start_retires_sampler() -> anyhow::Result<()> {
    let recorder = Recorder::new();
    let sampler = Sampler::new(SamplerConfig::new(scripted(&["1"])))?;
    let _subscription = sampler.subscribe(recorder.observer());

    sampler.stop().await;

    assert_eq!(sampler.state(), SamplerState::Stopped);
    assert_eq!(sampler.start(), Err(SamplerError::Stopped));
    assert_eq!(sampler.latest(), Latest::NoSampleYet);
    assert!(recorder.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_stops_both_wait_for_driver() -> anyhow::Result<()> {
    pause();
    let recorder = Recorder::new();
    let sampler = Sampler::new(SamplerConfig::new(scripted(&["1"])))?;
    let _subscription = sampler.subscribe(recorder.observer());
    sampler.start()?;

    tokio::join!(sampler.stop(), sampler.stop());

    let published = recorder.len();
    advance(Duration::from_secs(300)).await;
    tokio::task::yield_now().await;

    assert_eq!(recorder.len(), published);
    assert_eq!(sampler.state(), SamplerState::Stopped);
    Ok(())
}

#[tokio::test]
async fn test_dropping_sampler_stops_schedule() -> anyhow::Result<()> {
    // Arrange
    pause();
    let source = scripted(&["1"]);
    let recorder = Recorder::new();
    let sampler = Sampler::new(SamplerConfig::new(source.clone()))?;
    let _subscription = sampler.subscribe(recorder.observer());
    sampler.start()?;
    recorder.wait_for(1).await;

    // Act
    drop(sampler);
    for _ in 0..10 {
        advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
    }

    // Assert
    assert_eq!(recorder.len(), 1);
    assert_eq!(source.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_independent_samplers_coexist() -> anyhow::Result<()> {
    pause();
    let bat0 = Recorder::new();
    let bat1 = Recorder::new();
    let first = Sampler::new(SamplerConfig::new(scripted(&["100"])).with_name("bat0"))?;
    let second = Sampler::new(SamplerConfig::new(scripted(&["200"])).with_name("bat1"))?;
    let _first_subscription = first.subscribe(bat0.observer());
    let _second_subscription = second.subscribe(bat1.observer());

    first.start()?;
    second.start()?;
    bat0.wait_for(1).await;
    bat1.wait_for(1).await;
    first.stop().await;

    assert_eq!(second.state(), SamplerState::Running);
    assert_eq!(bat0.values(), vec![Some("100".to_string())]);
    assert_eq!(bat1.values(), vec![Some("200".to_string())]);

    second.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_dead_driver_reports_stopped() -> anyhow::Result<()> {
    // Arrange
    let sampler = Sampler::with_timer(SamplerConfig::new(scripted(&["1"])), BrokenClock)?;
    let mut samples = sampler.watch();

    // Act
    sampler.start()?;
    let ended = samples.next().await.is_none();

    // Assert
    assert!(ended);
    assert_eq!(sampler.state(), SamplerState::Stopped);
    assert_eq!(sampler.start(), Err(SamplerError::Stopped));
    assert_eq!(sampler.latest(), Latest::NoSampleYet);

    sampler.stop().await;
    assert_eq!(sampler.state(), SamplerState::Stopped);
    Ok(())
}
