//! Common utilities module
//!
//! This module contains shared utilities used across the depth pipeline.

pub mod error;
pub mod timing;

pub use error::{ConversionError, Result};
pub use timing::{PipelineTimings, StepTiming, Timer};
