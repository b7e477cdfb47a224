//! Line and triangle coverage plus per-pixel vertex weights
//!
//! # Pipeline
//!
//! ```text
//! NDC vertex -> CoordinateMapper -> BufferPoint -> raster_line / raster_triangle -> PixelList
//!                                                                  |
//!                                         vertex_contributions <---+
//! ```
//!
//! A [`Rasterizer`] holds nothing but the canvas size and its [`RasterConfig`],
//! so one instance can be shared freely across threads. Every call builds its
//! output from scratch and hands ownership to the caller.
//!
//! # Usage
//!
//! ```
//! use raster_core::Rasterizer;
//!
//! let raster = Rasterizer::new(10, 10).unwrap();
//! let pixels = raster.raster_triangle(1, 1, 8, 1, 1, 8);
//! let weights = raster.vertex_contributions(
//!     (1, 1).into(),
//!     (8, 1).into(),
//!     (1, 8).into(),
//!     &pixels,
//! );
//! assert_eq!(weights.len(), pixels.len());
//! ```

mod contribution;
mod line;
mod mapping;
mod triangle;

pub use contribution::VertexWeights;
pub use mapping::CoordinateMapper;
pub use triangle::{ScanlineRange, ScanlineTable};

use crate::config::RasterConfig;
use crate::RasterError;

/// Stateless rasterizer bound to a fixed canvas size
#[derive(Debug, Clone)]
pub struct Rasterizer {
    width: i32,
    height: i32,
    config: RasterConfig,
    mapper: CoordinateMapper,
}

impl Rasterizer {
    /// Create a rasterizer with the default [`RasterConfig`]
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        Self::with_config(width, height, RasterConfig::default())
    }

    /// Create a rasterizer with explicit policies
    ///
    /// Fails if either dimension is zero or does not fit an `i32` coordinate.
    pub fn with_config(width: u32, height: u32, config: RasterConfig) -> Result<Self, RasterError> {
        let invalid = || RasterError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let w = i32::try_from(width).map_err(|_| invalid())?;
        let h = i32::try_from(height).map_err(|_| invalid())?;

        Ok(Self {
            width: w,
            height: h,
            config,
            mapper: CoordinateMapper::new(width, height, config.ndc_edge),
        })
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    #[inline]
    fn in_canvas(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}
