// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cyclewatch_core::SamplerError;
use cyclewatch_runtime::{DriverTask, Timer, TokioTimer};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{advance, pause};

#[test]
fn test_spawn_outside_runtime_fails() {
    let result = DriverTask::spawn(|_cancel| async {});

    assert_eq!(result.unwrap_err(), SamplerError::RuntimeUnavailable);
}

#[tokio::test]
async fn test_shutdown_waits_for_task_to_return() -> anyhow::Result<()> {
    pause();
    let exited = Arc::new(AtomicBool::new(false));

    let task = DriverTask::spawn({
        let exited = exited.clone();
        |cancel| async move {
            cancel.cancelled().await;
            // Cleanup that takes virtual time still finishes before shutdown returns.
            tokio::time::sleep(Duration::from_millis(50)).await;
            exited.store(true, Ordering::SeqCst);
        }
    })?;

    task.shutdown().await;

    assert!(exited.load(Ordering::SeqCst));
    Ok(())
}

#[tokio::test]
async fn test_drop_cancels_without_waiting() -> anyhow::Result<()> {
    pause();
    let iterations = Arc::new(AtomicU32::new(0));

    let task = DriverTask::spawn({
        let iterations = iterations.clone();
        |cancel| async move {
            while !cancel.is_cancelled() {
                iterations.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        }
    })?;

    advance(Duration::from_millis(25)).await;
    drop(task);
    tokio::time::sleep(Duration::from_millis(20)).await;
    let after_drop = iterations.load(Ordering::SeqCst);

    advance(Duration::from_millis(100)).await;
    tokio::task::yield_now().await;

    assert_eq!(iterations.load(Ordering::SeqCst), after_drop);
    Ok(())
}

#[tokio::test]
async fn test_shutdown_tolerates_panicking_task() -> anyhow::Result<()> {
    let task = DriverTask::spawn(|_cancel| async {
        panic!("driver blew up");
    })?;
    tokio::task::yield_now().await;

    task.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_is_finished_after_return() -> anyhow::Result<()> {
    let task = DriverTask::spawn(|_cancel| async {})?;

    tokio::time::timeout(Duration::from_millis(100), async {
        while !task.is_finished() {
            tokio::task::yield_now().await;
        }
    })
    .await?;

    assert!(task.is_finished());
    assert!(!task.is_cancelled());
    Ok(())
}

#[tokio::test]
async fn test_tokio_timer_follows_paused_clock() {
    pause();
    let timer = TokioTimer;
    let start = timer.now();

    timer.sleep_future(Duration::from_secs(30)).await;

    assert_eq!(timer.now() - start, Duration::from_secs(30));
}
