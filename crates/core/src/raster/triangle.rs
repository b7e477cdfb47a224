//! Filled triangle coverage
//!
//! The three edges are traced tailless, so each vertex is emitted once by the
//! edge that starts there. Interior coverage comes from the per-row extent of
//! those edge pixels: every pixel strictly between a row's leftmost and
//! rightmost edge pixel is filled.

use super::Rasterizer;
use crate::config::DuplicatePolicy;
use crate::logging::{log, LogCategory, LogLevel};
use crate::types::{BufferPoint, NormalizedVertex, PixelList};
use crate::PixelSink;
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Horizontal extent of the edge pixels on one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanlineRange {
    pub min_x: i32,
    pub max_x: i32,
}

impl ScanlineRange {
    fn include(&mut self, x: i32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
    }

    /// Pixels strictly between the two extremes (empty when they touch)
    pub fn interior(&self) -> RangeInclusive<i32> {
        (self.min_x + 1)..=(self.max_x - 1)
    }
}

/// Per-row [`ScanlineRange`]s, stored densely from the lowest to the highest row seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanlineTable {
    min_row: i32,
    rows: Vec<Option<ScanlineRange>>,
}

impl ScanlineTable {
    /// Build the table from edge pixels; `None` when there are none
    pub fn from_pixels(pixels: &[BufferPoint]) -> Option<Self> {
        let min_row = pixels.iter().map(|p| p.y).min()?;
        let max_row = pixels.iter().map(|p| p.y).max()?;
        let len = (i64::from(max_row) - i64::from(min_row) + 1) as usize;

        let mut table = Self {
            min_row,
            rows: vec![None; len],
        };
        for p in pixels {
            let slot = &mut table.rows[(i64::from(p.y) - i64::from(min_row)) as usize];
            match slot {
                Some(range) => range.include(p.x),
                None => {
                    *slot = Some(ScanlineRange {
                        min_x: p.x,
                        max_x: p.x,
                    })
                }
            }
        }
        Some(table)
    }

    pub fn min_row(&self) -> i32 {
        self.min_row
    }

    pub fn max_row(&self) -> i32 {
        self.min_row + self.rows.len() as i32 - 1
    }

    pub fn get(&self, row: i32) -> Option<ScanlineRange> {
        let idx = usize::try_from(i64::from(row) - i64::from(self.min_row)).ok()?;
        self.rows.get(idx).copied().flatten()
    }

    /// Populated rows in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (i32, ScanlineRange)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(move |(i, r)| r.map(|r| (self.min_row + i as i32, r)))
    }
}

impl Rasterizer {
    /// Cover a filled triangle given in buffer space
    pub fn raster_triangle(
        &self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
    ) -> PixelList {
        let mut pixels = PixelList::new();
        self.raster_triangle_into(x1, y1, x2, y2, x3, y3, &mut pixels);
        pixels
    }

    /// Cover a filled triangle given in normalized device coordinates
    pub fn raster_triangle_ndc(
        &self,
        a: NormalizedVertex,
        b: NormalizedVertex,
        c: NormalizedVertex,
    ) -> PixelList {
        let p1 = self.mapper.to_buffer_point(a);
        let p2 = self.mapper.to_buffer_point(b);
        let p3 = self.mapper.to_buffer_point(c);
        self.raster_triangle(p1.x, p1.y, p2.x, p2.y, p3.x, p3.y)
    }

    /// Cover a filled triangle into a caller-owned sink
    ///
    /// Edge pixels come first (edge order p1->p2, p2->p3, p3->p1), then fill
    /// pixels row by row from top to bottom. Returns the number of pixels appended.
    #[allow(clippy::too_many_arguments)]
    pub fn raster_triangle_into<S: PixelSink + ?Sized>(
        &self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        sink: &mut S,
    ) -> usize {
        let mut edges = PixelList::new();
        self.raster_line_into(x1, y1, x2, y2, true, &mut edges);
        self.raster_line_into(x2, y2, x3, y3, true, &mut edges);
        self.raster_line_into(x3, y3, x1, y1, true, &mut edges);

        let Some(table) = ScanlineTable::from_pixels(&edges) else {
            log(LogCategory::Triangle, LogLevel::Debug, || {
                format!(
                    "Triangle: ({}, {}) ({}, {}) ({}, {}) has no visible edge pixels",
                    x1, y1, x2, y2, x3, y3
                )
            });
            return 0;
        };

        // i128: each product of i32 deltas can approach 2^64
        let twice_area = (i128::from(x2) - i128::from(x1)) * (i128::from(y3) - i128::from(y1))
            - (i128::from(y2) - i128::from(y1)) * (i128::from(x3) - i128::from(x1));
        let fill = twice_area != 0;
        if !fill {
            log(LogCategory::Triangle, LogLevel::Debug, || {
                format!(
                    "Triangle: ({}, {}) ({}, {}) ({}, {}) is degenerate, edges only",
                    x1, y1, x2, y2, x3, y3
                )
            });
        }

        let fill_pixels = table
            .iter()
            .filter(|_| fill)
            .filter(|(_, range)| range.min_x != range.max_x)
            .flat_map(|(row, range)| range.interior().map(move |x| BufferPoint::new(x, row)));

        let mut emitted = 0;
        match self.config.duplicates {
            DuplicatePolicy::Keep => {
                for &p in &edges {
                    sink.push_pixel(p);
                }
                emitted += edges.len();
                for p in fill_pixels {
                    sink.push_pixel(p);
                    emitted += 1;
                }
            }
            DuplicatePolicy::Unique => {
                // Fill spans never overlap each other, only the edge pixels.
                let mut seen = HashSet::with_capacity(edges.len());
                for &p in &edges {
                    if seen.insert(p) {
                        sink.push_pixel(p);
                        emitted += 1;
                    }
                }
                for p in fill_pixels.filter(|p| !seen.contains(p)) {
                    sink.push_pixel(p);
                    emitted += 1;
                }
            }
        }

        log(LogCategory::Triangle, LogLevel::Trace, || {
            format!(
                "Triangle: {} edge pixels, {} total, rows {}..={}",
                edges.len(),
                emitted,
                table.min_row(),
                table.max_row()
            )
        });
        emitted
    }
}
