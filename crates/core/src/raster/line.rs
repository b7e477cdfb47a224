//! Incremental line tracing
//!
//! Integer-only midpoint tracer working in all octants. The error term starts
//! at `dx + dy` (with `dy` negated) and each iteration may step x, y, or both.

use super::Rasterizer;
use crate::config::BoundsPolicy;
use crate::logging::{log, LogCategory, LogLevel};
use crate::types::{BufferPoint, NormalizedVertex, PixelList};
use crate::PixelSink;

impl Rasterizer {
    /// Trace a segment in buffer space and return the covered pixels
    ///
    /// With `tailless` set the end point itself is not emitted, so edges traced
    /// back to back share each vertex exactly once.
    pub fn raster_line(&self, x1: i32, y1: i32, x2: i32, y2: i32, tailless: bool) -> PixelList {
        let mut pixels = PixelList::new();
        self.raster_line_into(x1, y1, x2, y2, tailless, &mut pixels);
        pixels
    }

    /// Trace a segment given in normalized device coordinates
    pub fn raster_line_ndc(
        &self,
        a: NormalizedVertex,
        b: NormalizedVertex,
        tailless: bool,
    ) -> PixelList {
        let p1 = self.mapper.to_buffer_point(a);
        let p2 = self.mapper.to_buffer_point(b);
        self.raster_line(p1.x, p1.y, p2.x, p2.y, tailless)
    }

    /// Trace a segment into a caller-owned sink, returning how many pixels were appended
    pub fn raster_line_into<S: PixelSink + ?Sized>(
        &self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        tailless: bool,
        sink: &mut S,
    ) -> usize {
        // i64 so extreme endpoints cannot overflow the error term
        let dx = (i64::from(x2) - i64::from(x1)).abs();
        let dy = -(i64::from(y2) - i64::from(y1)).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut e = dx + dy;

        let (mut x, mut y) = (x1, y1);
        let mut emitted = 0;

        loop {
            if tailless && x == x2 && y == y2 {
                break;
            }

            let emit = match self.config.bounds {
                BoundsPolicy::UpperOnly => {
                    if x >= self.width || y >= self.height {
                        self.log_truncated(x1, y1, x2, y2, x, y);
                        break;
                    }
                    true
                }
                BoundsPolicy::Stop => {
                    if !self.in_canvas(x, y) {
                        self.log_truncated(x1, y1, x2, y2, x, y);
                        break;
                    }
                    true
                }
                BoundsPolicy::Discard => self.in_canvas(x, y),
            };
            if emit {
                sink.push_pixel(BufferPoint::new(x, y));
                emitted += 1;
            }

            let e2 = 2 * e;
            if e2 >= dy {
                if x == x2 {
                    break;
                }
                e += dy;
                x += sx;
            }
            if e2 <= dx {
                if y == y2 {
                    break;
                }
                e += dx;
                y += sy;
            }
        }

        emitted
    }

    fn log_truncated(&self, x1: i32, y1: i32, x2: i32, y2: i32, x: i32, y: i32) {
        log(LogCategory::Line, LogLevel::Debug, || {
            format!(
                "Line: ({}, {}) -> ({}, {}) stopped at ({}, {}) outside {}x{} ({:?})",
                x1, y1, x2, y2, x, y, self.width, self.height, self.config.bounds
            )
        });
    }
}
