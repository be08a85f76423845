//! HeightGrid: sampled heightmap with bilinear height queries.

use thiserror::Error;

use trek_core::interfaces::TerrainQuery;

/// Errors building a height grid.
#[derive(Debug, Error, PartialEq)]
pub enum TerrainError {
    #[error("grid dimensions must be non-zero (got {width}x{depth})")]
    EmptyGrid { width: u32, depth: u32 },
    #[error("expected {expected} height samples, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f64),
}

/// Heightmap over the horizontal plane.
///
/// Sample `(row, col)` sits at world `(origin_x + col * cell_size,
/// origin_z + row * cell_size)`. Rows run along +z, columns along +x.
#[derive(Debug, Clone)]
pub struct HeightGrid {
    origin_x: f64,
    origin_z: f64,
    cell_size: f64,
    width: u32,
    depth: u32,
    /// Heights in world units, row-major.
    heights: Vec<f32>,
}

impl HeightGrid {
    /// Create a grid from pre-sampled heights.
    pub fn new(
        origin_x: f64,
        origin_z: f64,
        cell_size: f64,
        width: u32,
        depth: u32,
        heights: Vec<f32>,
    ) -> Result<Self, TerrainError> {
        if width == 0 || depth == 0 {
            return Err(TerrainError::EmptyGrid { width, depth });
        }
        if cell_size <= 0.0 || !cell_size.is_finite() {
            return Err(TerrainError::InvalidCellSize(cell_size));
        }
        let expected = width as usize * depth as usize;
        if heights.len() != expected {
            return Err(TerrainError::SizeMismatch {
                expected,
                actual: heights.len(),
            });
        }
        Ok(Self {
            origin_x,
            origin_z,
            cell_size,
            width,
            depth,
            heights,
        })
    }

    /// Build a grid centered on the origin by sampling `f(x, z)` at every cell.
    pub fn from_fn(
        width: u32,
        depth: u32,
        cell_size: f64,
        f: impl Fn(f64, f64) -> f32,
    ) -> Result<Self, TerrainError> {
        let origin_x = -(width.saturating_sub(1) as f64) * cell_size / 2.0;
        let origin_z = -(depth.saturating_sub(1) as f64) * cell_size / 2.0;

        let mut heights = Vec::with_capacity(width as usize * depth as usize);
        for row in 0..depth {
            for col in 0..width {
                let x = origin_x + col as f64 * cell_size;
                let z = origin_z + row as f64 * cell_size;
                heights.push(f(x, z));
            }
        }
        Self::new(origin_x, origin_z, cell_size, width, depth, heights)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Convert world (x, z) to fractional (row, col).
    /// Returns None if outside the sampled area.
    fn world_to_grid(&self, x: f64, z: f64) -> Option<(f64, f64)> {
        let col = (x - self.origin_x) / self.cell_size;
        let row = (z - self.origin_z) / self.cell_size;

        let max_col = (self.width - 1) as f64;
        let max_row = (self.depth - 1) as f64;
        if !(0.0..=max_col).contains(&col) || !(0.0..=max_row).contains(&row) {
            return None;
        }

        Some((row, col))
    }

    fn raw_height(&self, row: usize, col: usize) -> f32 {
        self.heights[row * self.width as usize + col]
    }

    /// Bilinear interpolation at fractional row/col.
    fn bilinear(&self, row: f64, col: f64) -> f64 {
        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let r1 = (r0 + 1).min(self.depth as usize - 1);
        let c1 = (c0 + 1).min(self.width as usize - 1);

        let fr = row - r0 as f64;
        let fc = col - c0 as f64;

        let h00 = self.raw_height(r0, c0) as f64;
        let h01 = self.raw_height(r0, c1) as f64;
        let h10 = self.raw_height(r1, c0) as f64;
        let h11 = self.raw_height(r1, c1) as f64;

        let top = h00 * (1.0 - fc) + h01 * fc;
        let bot = h10 * (1.0 - fc) + h11 * fc;
        top * (1.0 - fr) + bot * fr
    }
}

impl TerrainQuery for HeightGrid {
    fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        let (row, col) = self.world_to_grid(x, z)?;
        Some(self.bilinear(row, col))
    }
}
