//! Per-pixel vertex weights for attribute interpolation
//!
//! Weights are barycentric coordinates of each pixel's sample point, computed
//! from twice-signed areas (edge functions) and divided by the triangle's own
//! twice-signed area, so winding order does not matter.

use super::Rasterizer;
use crate::logging::{log, LogCategory, LogLevel};
use crate::types::BufferPoint;
use serde::{Deserialize, Serialize};

/// How much each triangle vertex contributes at one pixel
///
/// The three weights are non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexWeights {
    pub w1: f32,
    pub w2: f32,
    pub w3: f32,
}

impl VertexWeights {
    pub const fn new(w1: f32, w2: f32, w3: f32) -> Self {
        Self { w1, w2, w3 }
    }

    pub fn sum(&self) -> f32 {
        self.w1 + self.w2 + self.w3
    }

    /// Blend one scalar attribute given its value at each vertex
    #[inline]
    pub fn interpolate(&self, a: f32, b: f32, c: f32) -> f32 {
        a * self.w1 + b * self.w2 + c * self.w3
    }

    /// Blend a vector attribute (color, normal, uv...) component-wise
    pub fn interpolate_array<const N: usize>(&self, a: [f32; N], b: [f32; N], c: [f32; N]) -> [f32; N] {
        std::array::from_fn(|i| self.interpolate(a[i], b[i], c[i]))
    }

    /// Clamp negative weights to zero and renormalize.
    ///
    /// Outline pixels are sampled at integer positions that can sit just outside
    /// the exact triangle, which yields small negative weights. Clamping is
    /// unconditional: a sample far outside the triangle is pulled onto its
    /// boundary rather than extrapolated, so the result is always a convex blend.
    fn from_raw(w1: f64, w2: f64, w3: f64) -> Self {
        let (w1, w2, w3) = (w1.max(0.0), w2.max(0.0), w3.max(0.0));
        let total = w1 + w2 + w3;
        if total <= 0.0 {
            return Self::new(1.0, 0.0, 0.0);
        }
        Self::new((w1 / total) as f32, (w2 / total) as f32, (w3 / total) as f32)
    }
}

#[derive(Clone, Copy)]
struct Point {
    x: f64,
    y: f64,
}

impl From<BufferPoint> for Point {
    fn from(p: BufferPoint) -> Self {
        Self {
            x: f64::from(p.x),
            y: f64::from(p.y),
        }
    }
}

/// Twice the signed area of (a, b, p)
#[inline]
fn edge_function(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn length_sq(a: Point, b: Point) -> f64 {
    (b.x - a.x).powi(2) + (b.y - a.y).powi(2)
}

impl Rasterizer {
    /// Barycentric weights of `pixels` relative to the triangle (p1, p2, p3)
    ///
    /// Returns one [`VertexWeights`] per pixel, in the same order. Every weight
    /// is non-negative, including for pixels outside the triangle. Zero-area
    /// triangles fall back to interpolating along their longest edge.
    pub fn vertex_contributions(
        &self,
        p1: BufferPoint,
        p2: BufferPoint,
        p3: BufferPoint,
        pixels: &[BufferPoint],
    ) -> Vec<VertexWeights> {
        let (a, b, c) = (Point::from(p1), Point::from(p2), Point::from(p3));
        let offset = f64::from(self.config.sample_point.offset());
        let sample = |p: &BufferPoint| Point {
            x: f64::from(p.x) + offset,
            y: f64::from(p.y) + offset,
        };

        let area = edge_function(a, b, c);
        if area != 0.0 {
            return pixels
                .iter()
                .map(|p| {
                    let s = sample(p);
                    VertexWeights::from_raw(
                        edge_function(b, c, s) / area,
                        edge_function(c, a, s) / area,
                        edge_function(a, b, s) / area,
                    )
                })
                .collect();
        }

        log(LogCategory::Contribution, LogLevel::Debug, || {
            format!(
                "Contribution: zero-area triangle {:?} {:?} {:?}, interpolating along longest edge",
                p1, p2, p3
            )
        });

        // Longest edge as (start slot, end slot, start, end)
        let edges = [(0, 1, a, b), (1, 2, b, c), (2, 0, c, a)];
        let (from, to, start, end) = edges
            .into_iter()
            .max_by(|l, r| length_sq(l.2, l.3).total_cmp(&length_sq(r.2, r.3)))
            .unwrap_or(edges[0]);
        let len_sq = length_sq(start, end);

        pixels
            .iter()
            .map(|p| {
                if len_sq == 0.0 {
                    return VertexWeights::new(1.0, 0.0, 0.0);
                }
                let s = sample(p);
                let t = (((s.x - start.x) * (end.x - start.x) + (s.y - start.y) * (end.y - start.y))
                    / len_sq)
                    .clamp(0.0, 1.0);
                let mut raw = [0.0; 3];
                raw[from] = 1.0 - t;
                raw[to] = t;
                VertexWeights::from_raw(raw[0], raw[1], raw[2])
            })
            .collect()
    }
}
