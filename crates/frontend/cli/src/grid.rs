//! Text rendering of pixel coverage for terminal output

use raster_core::types::BufferPoint;
use raster_core::VertexWeights;
use serde::Serialize;

/// Largest canvas the text grid will allocate
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Number of grid cells for a canvas, or `None` past [`MAX_GRID_CELLS`]
pub fn grid_cells(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&cells| cells <= MAX_GRID_CELLS)
}

/// Per-pixel hit counts over the canvas
pub struct CoverageGrid {
    width: usize,
    height: usize,
    hits: Vec<u32>,
    off_canvas: usize,
}

impl CoverageGrid {
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let cells = grid_cells(width, height)?;
        Some(Self {
            width: width as usize,
            height: height as usize,
            hits: vec![0; cells],
            off_canvas: 0,
        })
    }

    pub fn from_pixels(width: u32, height: u32, pixels: &[BufferPoint]) -> Option<Self> {
        let mut grid = Self::new(width, height)?;
        for &p in pixels {
            grid.add(p);
        }
        Some(grid)
    }

    pub fn add(&mut self, p: BufferPoint) {
        match (usize::try_from(p.x), usize::try_from(p.y)) {
            (Ok(x), Ok(y)) if x < self.width && y < self.height => {
                self.hits[y * self.width + x] += 1;
            }
            _ => self.off_canvas += 1,
        }
    }

    pub fn hits(&self, x: usize, y: usize) -> u32 {
        self.hits[y * self.width + x]
    }

    pub fn off_canvas(&self) -> usize {
        self.off_canvas
    }

    /// `.` for uncovered, `#` for a single hit, digits for repeated hits (capped at 9)
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.hits.chunks(self.width) {
            for &n in row {
                out.push(match n {
                    0 => '.',
                    1 => '#',
                    n => char::from_digit(n.min(9), 10).unwrap_or('9'),
                });
            }
            out.push('\n');
        }
        out
    }
}

/// JSON report of one draw call
#[derive(Serialize)]
pub struct Report<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [BufferPoint],
    pub off_canvas: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<&'a [VertexWeights]>,
}
