//! NDC to buffer-space mapping

use crate::config::NdcEdgePolicy;
use crate::logging::{log, LogCategory, LogLevel};
use crate::types::{BufferPoint, NormalizedVertex};

/// Affine map from `[-1, 1]^2` onto a `width x height` canvas
///
/// `-1` maps to `0` and `1` maps to exactly `width` (or `height`), which is one
/// past the last valid index. What happens to that value when it becomes an
/// integer pixel is decided by the [`NdcEdgePolicy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    width: u32,
    height: u32,
    edge_policy: NdcEdgePolicy,
}

impl CoordinateMapper {
    pub fn new(width: u32, height: u32, edge_policy: NdcEdgePolicy) -> Self {
        Self {
            width,
            height,
            edge_policy,
        }
    }

    pub fn edge_policy(&self) -> NdcEdgePolicy {
        self.edge_policy
    }

    /// Exact buffer-space position of a normalized vertex
    #[inline]
    pub fn map(&self, v: NormalizedVertex) -> (f32, f32) {
        (
            (v.x + 1.0) / 2.0 * self.width as f32,
            (v.y + 1.0) / 2.0 * self.height as f32,
        )
    }

    /// Integer pixel for a normalized vertex (truncation toward zero)
    pub fn to_buffer_point(&self, v: NormalizedVertex) -> BufferPoint {
        let (fx, fy) = self.map(v);
        let (x, y) = (fx as i32, fy as i32);

        match self.edge_policy {
            NdcEdgePolicy::Unclamped => BufferPoint::new(x, y),
            NdcEdgePolicy::ClampToLastPixel => {
                let max_x = self.width.saturating_sub(1).min(i32::MAX as u32) as i32;
                let max_y = self.height.saturating_sub(1).min(i32::MAX as u32) as i32;
                let clamped = BufferPoint::new(x.clamp(0, max_x), y.clamp(0, max_y));
                if clamped.x != x || clamped.y != y {
                    log(LogCategory::Mapping, LogLevel::Trace, || {
                        format!(
                            "Mapping: ({:.4}, {:.4}) -> ({}, {}) clamped to ({}, {})",
                            v.x, v.y, x, y, clamped.x, clamped.y
                        )
                    });
                }
                clamped
            }
        }
    }
}
