//! Core software rasterization primitives.
//!
//! Answers two questions for a software 3D pipeline: which integer pixel
//! coordinates does a line or filled triangle cover, and with what per-vertex
//! weights should attributes be interpolated at those pixels.

pub mod config;
pub mod logging;
pub mod raster;

pub use config::{BoundsPolicy, DuplicatePolicy, NdcEdgePolicy, RasterConfig, SamplePoint};
pub use raster::{CoordinateMapper, Rasterizer, ScanlineRange, ScanlineTable, VertexWeights};

pub mod types {
    use serde::{Deserialize, Serialize};

    /// Integer pixel coordinate in buffer space (origin top-left).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct BufferPoint {
        pub x: i32,
        pub y: i32,
    }

    impl BufferPoint {
        pub const fn new(x: i32, y: i32) -> Self {
            Self { x, y }
        }
    }

    impl From<(i32, i32)> for BufferPoint {
        fn from((x, y): (i32, i32)) -> Self {
            Self { x, y }
        }
    }

    /// Primitive endpoint in normalized device coordinates, nominally in [-1, 1].
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct NormalizedVertex {
        pub x: f32,
        pub y: f32,
    }

    impl NormalizedVertex {
        pub const fn new(x: f32, y: f32) -> Self {
            Self { x, y }
        }
    }

    /// Ordered pixel coordinates produced by a single draw call.
    pub type PixelList = Vec<BufferPoint>;
}

use thiserror::Error;
use types::BufferPoint;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid raster config: {0}")]
    Config(String),
    #[error("Failed to read raster config: {0}")]
    Io(#[from] std::io::Error),
}

/// Caller-owned destination for rasterized pixels.
///
/// Raster operations only ever append; they never read back or retain the sink.
pub trait PixelSink {
    fn push_pixel(&mut self, point: BufferPoint);
}

impl PixelSink for Vec<BufferPoint> {
    #[inline]
    fn push_pixel(&mut self, point: BufferPoint) {
        self.push(point);
    }
}
