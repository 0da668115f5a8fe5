// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Batteries exposed by the Linux power-supply class.

pub mod condition;
pub mod discovery;
pub mod info;
pub mod source;

pub use condition::Condition;
pub use discovery::{discover, find_battery, Battery};
pub use info::{BatteryInfo, ATTRIBUTES};
pub use source::CycleCountSource;
