//! Cell-state image conventions shared by every kernel
//!
//! A generation is a single-channel `R32Uint` image with one texel per cell,
//! holding exactly [`DEAD`] or [`ALIVE`]. The grid is a torus: both axes wrap, so
//! every cell has eight neighbors and there is no edge.

use std::fmt;

/// Value stored for a dead cell
pub const DEAD: u32 = 0;
/// Value stored for a live cell
pub const ALIVE: u32 = 1;

/// Texel format of the two generation images
pub const CELL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R32Uint;
/// Texel format of the display image written by the presenter
pub const DISPLAY_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Binding slot of the grid parameter uniform
pub const PARAMS_BINDING: u32 = 0;
/// Binding slot of the cell-state image a kernel reads
pub const INPUT_BINDING: u32 = 1;
/// Binding slot of the image a kernel writes
pub const OUTPUT_BINDING: u32 = 2;

/// Every kernel runs one invocation per workgroup, one workgroup per cell
pub const WORKGROUP_SIZE: (u32, u32, u32) = (1, 1, 1);

/// Half-width of the initial live square, in cells
pub const DEFAULT_SEED_HALF_WIDTH: u32 = 100;

/// Neighbor offsets in the order the step kernel sums them
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Fixed dimensions of a toroidal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of a cell
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }

    /// Workgroup counts covering the grid with exactly one invocation per cell
    pub fn dispatch_size(&self) -> (u32, u32, u32) {
        (
            self.width.div_ceil(WORKGROUP_SIZE.0),
            self.height.div_ceil(WORKGROUP_SIZE.1),
            1,
        )
    }

    /// The eight toroidal neighbors of `(x, y)`, in [`NEIGHBOR_OFFSETS`] order
    pub fn neighbors(&self, x: u32, y: u32) -> [(u32, u32); 8] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| {
            (
                wrap_offset(x, dx, self.width),
                wrap_offset(y, dy, self.height),
            )
        })
    }

    /// Inclusive bounds of the seed square as `(min_x, max_x, min_y, max_y)`.
    ///
    /// Computed with unsigned wraparound, exactly like the initializer kernel, so
    /// a square wider than the grid produces `min > max` on that axis.
    pub fn seed_bounds(&self, half_width: u32) -> (u32, u32, u32, u32) {
        let cx = self.width / 2;
        let cy = self.height / 2;
        (
            cx.wrapping_sub(half_width),
            cx.wrapping_add(half_width),
            cy.wrapping_sub(half_width),
            cy.wrapping_add(half_width),
        )
    }

    /// Whether the seed square keeps `min <= max` on both axes, i.e. is non-empty
    pub fn seed_fits(&self, half_width: u32) -> bool {
        let (min_x, max_x, min_y, max_y) = self.seed_bounds(half_width);
        min_x <= max_x && min_y <= max_y
    }

    /// Whether the initializer marks `(x, y)` alive for the given half-width
    pub fn in_seed(&self, x: u32, y: u32, half_width: u32) -> bool {
        let (min_x, max_x, min_y, max_y) = self.seed_bounds(half_width);
        x >= min_x && x <= max_x && y >= min_y && y <= max_y
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Moves `coord` by -1, 0 or +1 on an axis of length `dim`.
///
/// Negative steps use `(coord + dim - 1) % dim` so unsigned arithmetic never
/// underflows.
pub fn wrap_offset(coord: u32, delta: i32, dim: u32) -> u32 {
    match delta {
        -1 => (coord + dim - 1) % dim,
        1 => (coord + 1) % dim,
        _ => coord,
    }
}
