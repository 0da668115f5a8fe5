// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cyclewatch_sampler::{
    blocking_source, source_fn, Latest, ReadError, SampleResult, SampleStatus, Sampler,
    SamplerConfig,
};
use cyclewatch_test_utils::{next_sample, Recorder, ScriptedSource, SlowSource, Step};
use std::time::Duration;
use tokio::time::pause;

const INTERVAL: Duration = Duration::from_secs(30);

fn assert_payload_matches_status(sample: &SampleResult) {
    match sample.status() {
        SampleStatus::Ok => {
            assert!(sample.value().is_some());
            assert!(sample.error_detail().is_none());
        }
        SampleStatus::Unavailable => {
            assert!(sample.value().is_none());
            assert!(sample.error_detail().is_none());
        }
        SampleStatus::Error => {
            assert!(sample.value().is_none());
            assert!(sample.error_detail().is_some());
        }
    }
}

#[tokio::test]
async fn test_value_unavailable_error_scenario() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let sampler = Sampler::new(
        SamplerConfig::new(ScriptedSource::new([
            Step::value("42"),
            Step::fail(ReadError::Unavailable),
            Step::fail(ReadError::failed("bad utf8")),
        ]))
        .with_interval(INTERVAL),
    )?;
    let _subscription = sampler.subscribe(recorder.observer());

    // Act
    sampler.start()?;
    recorder.wait_for(3).await;
    sampler.stop().await;

    // Assert
    let samples = recorder.samples();
    assert_eq!(samples[0].status(), SampleStatus::Ok);
    assert_eq!(samples[0].value(), Some("42"));
    assert_eq!(samples[1].status(), SampleStatus::Unavailable);
    assert_eq!(samples[2].status(), SampleStatus::Error);
    assert_eq!(samples[2].error_detail(), Some("bad utf8"));
    samples.iter().for_each(assert_payload_matches_status);

    let latest = sampler.latest().into_sample().expect("three samples were published");
    assert_eq!(*latest, samples[2]);
    Ok(())
}

#[tokio::test]
async fn test_value_is_trimmed() -> anyhow::Result<()> {
    pause();
    let sampler = Sampler::new(SamplerConfig::new(source_fn(|| async {
        Ok::<_, ReadError>("  318\n".to_string())
    })))?;
    let mut samples = sampler.watch();

    sampler.start()?;
    let sample = next_sample(&mut samples).await;
    sampler.stop().await;

    assert_eq!(sample.value(), Some("318"));
    Ok(())
}

#[tokio::test]
async fn test_panicking_source_becomes_error_sample() -> anyhow::Result<()> {
    // Arrange
    pause();
    let sampler = Sampler::new(
        SamplerConfig::new(ScriptedSource::new([Step::panic("sysfs on fire"), Step::value("7")]))
            .with_interval(INTERVAL),
    )?;
    let mut samples = sampler.watch();

    // Act
    sampler.start()?;
    let failed = next_sample(&mut samples).await;
    let recovered = next_sample(&mut samples).await;
    sampler.stop().await;

    // Assert
    assert_eq!(failed.status(), SampleStatus::Error);
    assert_eq!(failed.error_detail(), Some("source panicked: sysfs on fire"));
    assert_eq!(recovered.value(), Some("7"));
    Ok(())
}

#[tokio::test]
async fn test_read_timeout_produces_error_sample() -> anyhow::Result<()> {
    // Arrange
    pause();
    let source = SlowSource::new("never", Duration::from_secs(10));
    let sampler = Sampler::new(
        SamplerConfig::new(source.clone())
            .with_interval(INTERVAL)
            .with_read_timeout(Duration::from_millis(1_500)),
    )?;
    let mut samples = sampler.watch();

    // Act
    sampler.start()?;
    let sample = next_sample(&mut samples).await;
    sampler.stop().await;

    // Assert
    assert_eq!(sample.status(), SampleStatus::Error);
    assert_eq!(sample.error_detail(), Some("read timed out after 1.5s"));
    assert_eq!(source.completed(), 0);
    assert_eq!(source.max_in_flight(), 1);
    Ok(())
}

#[tokio::test]
async fn test_read_within_timeout_is_ok() -> anyhow::Result<()> {
    pause();
    let sampler = Sampler::new(
        SamplerConfig::new(SlowSource::new("12", Duration::from_millis(200)))
            .with_read_timeout(Duration::from_secs(1)),
    )?;
    let mut samples = sampler.watch();

    sampler.start()?;
    let sample = next_sample(&mut samples).await;
    sampler.stop().await;

    assert_eq!(sample.value(), Some("12"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_blocking_source_runs_off_the_driver() -> anyhow::Result<()> {
    let sampler = Sampler::new(SamplerConfig::new(blocking_source(|| {
        std::thread::sleep(Duration::from_millis(20));
        Ok("600".to_string())
    })))?;
    let mut samples = sampler.watch();

    sampler.start()?;
    let sample = next_sample(&mut samples).await;
    sampler.stop().await;

    assert_eq!(sample.value(), Some("600"));
    assert!(matches!(sampler.latest(), Latest::Sample(_)));
    Ok(())
}
