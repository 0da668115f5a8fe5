// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::Battery;
use async_trait::async_trait;
use cyclewatch_sampler::{FileSource, ReadError, Source};
use std::path::{Path, PathBuf};

/// Reads a battery's `cycle_count` attribute.
///
/// A missing attribute is unavailable; content that is not a non-negative
/// integer is a read failure rather than a value.
#[derive(Debug, Clone)]
pub struct CycleCountSource {
    file: FileSource,
}

impl CycleCountSource {
    #[must_use]
    pub fn new(battery: &Battery) -> Self {
        Self::at(battery.attribute_path("cycle_count"))
    }

    /// Read an explicit attribute path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            file: FileSource::new(path),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl Source for CycleCountSource {
    async fn read(&self) -> Result<String, ReadError> {
        let raw = self.file.read().await?;
        let count = raw.trim();

        count
            .parse::<u32>()
            .map(|_| count.to_string())
            .map_err(|error| ReadError::failed(format!("invalid cycle count {count:?}: {error}")))
    }
}
