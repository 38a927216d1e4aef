//! Shared helpers for the GPU integration tests

#![allow(dead_code)]

use toroid_life::grid::{GridSize, ALIVE, DEAD};
use toroid_life::GpuContext;

/// Headless GPU context, or `None` when the machine has no usable adapter
pub fn gpu() -> Option<GpuContext> {
    let _ = env_logger::builder().is_test(true).try_init();
    match GpuContext::headless() {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            eprintln!("skipping GPU test: {}", e);
            None
        }
    }
}

/// Evaluates to the GPU context or returns early from the test
macro_rules! require_gpu {
    () => {
        match common::gpu() {
            Some(gpu) => gpu,
            None => return,
        }
    };
}

/// Row-major grid with the listed cells alive
pub fn pattern(grid: GridSize, alive: &[(u32, u32)]) -> Vec<u32> {
    let mut cells = vec![DEAD; grid.cell_count()];
    for &(x, y) in alive {
        cells[grid.index(x, y)] = ALIVE;
    }
    cells
}

/// Sorted coordinates of live cells
pub fn live_coords(grid: GridSize, cells: &[u32]) -> Vec<(u32, u32)> {
    let mut coords = Vec::new();
    for y in 0..grid.height {
        for x in 0..grid.width {
            if cells[grid.index(x, y)] == ALIVE {
                coords.push((x, y));
            }
        }
    }
    coords
}

/// Straightforward reference for one generation, used to cross-check the kernel
pub fn reference_step(grid: GridSize, cells: &[u32]) -> Vec<u32> {
    let mut next = vec![DEAD; cells.len()];
    for y in 0..grid.height {
        for x in 0..grid.width {
            let sum: u32 = grid
                .neighbors(x, y)
                .iter()
                .map(|&(nx, ny)| cells[grid.index(nx, ny)])
                .sum();
            let current = cells[grid.index(x, y)];
            if sum == 3 || (sum == 2 && current == ALIVE) {
                next[grid.index(x, y)] = ALIVE;
            }
        }
    }
    next
}
