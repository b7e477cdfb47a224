//! Rasterizer configuration
//!
//! Every boundary or ambiguity the rasterizer has to resolve is an explicit,
//! serializable policy here. The defaults reproduce the classic behavior:
//! upper-bound-only truncation, duplicates kept, NDC 1.0 mapped one past the
//! last pixel, weights sampled at pixel centers.

use crate::logging::{log, LogCategory, LogLevel};
use crate::RasterError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the line tracer treats points outside `[0,width) x [0,height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Stop the trace at the first point with `x >= width` or `y >= height`.
    /// Negative coordinates are emitted unchanged.
    #[default]
    UpperOnly,
    /// Stop the trace at the first point outside the canvas on either side.
    Stop,
    /// Skip points outside the canvas on either side but keep tracing.
    Discard,
}

/// Whether triangle output may contain the same coordinate more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Edge pixels followed by fill pixels, overlaps included.
    #[default]
    Keep,
    /// Drop repeated coordinates, keeping the first occurrence.
    Unique,
}

/// Integer conversion of mapped NDC coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NdcEdgePolicy {
    /// Truncate only; NDC 1.0 lands on `width`/`height`.
    #[default]
    Unclamped,
    /// Truncate, then clamp into `[0, width-1]` / `[0, height-1]`.
    ClampToLastPixel,
}

/// Where inside a pixel the contribution estimator samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplePoint {
    /// `(x + 0.5, y + 0.5)`
    #[default]
    Center,
    /// `(x, y)`
    Corner,
}

impl SamplePoint {
    #[inline]
    pub fn offset(self) -> f32 {
        match self {
            SamplePoint::Center => 0.5,
            SamplePoint::Corner => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub bounds: BoundsPolicy,
    pub duplicates: DuplicatePolicy,
    pub ndc_edge: NdcEdgePolicy,
    pub sample_point: SamplePoint,
}

impl RasterConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, RasterError> {
        serde_json::from_str(json).map_err(|e| RasterError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, RasterError> {
        serde_json::to_string_pretty(self).map_err(|e| RasterError::Config(e.to_string()))
    }

    /// Load a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load a JSON config file, falling back to defaults on any error
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log(LogCategory::Config, LogLevel::Warn, || {
                    format!(
                        "Config: failed to load {} ({}), using defaults",
                        path.display(),
                        e
                    )
                });
                Self::default()
            }
        }
    }
}
