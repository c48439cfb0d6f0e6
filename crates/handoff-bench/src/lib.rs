//! Benchmark profiles for the handoff workspace.
//!
//! Provides pre-built [`SceneConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 100x100 grid, ~10% walls, 8 cameras, 16 objects
//! - [`stress_profile`]: 300x300 grid, ~10% walls, 32 cameras, 64 objects
//! - [`init_positions`]: deterministic cell placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashSet;

use handoff_core::{Appearance, CameraId, Cell, ObjectId, Rotation};
use handoff_scene::{CameraSpec, ObjectSpec, SceneConfig, SceneError, Waypoint};
use handoff_space::GridMap;

/// Build the reference profile: 100x100 grid (10K cells).
pub fn reference_profile(seed: u64) -> Result<SceneConfig, SceneError> {
    profile(100, 100, 8, 16, seed)
}

/// Build the stress profile: 300x300 grid (90K cells).
///
/// Same layout rules as [`reference_profile`] at 9x the cell count.
pub fn stress_profile(seed: u64) -> Result<SceneConfig, SceneError> {
    profile(300, 300, 32, 64, seed)
}

fn profile(
    width: u32,
    height: u32,
    cameras: u16,
    objects: u16,
    seed: u64,
) -> Result<SceneConfig, SceneError> {
    let cell_count = (width as usize) * (height as usize);
    let w = width as usize;
    let to_cell = |idx: usize| Cell::new((idx % w) as i32, (idx / w) as i32);

    // One wall per ten cells, then clear the camera cells so no camera
    // is buried in a wall.
    let mut occupied = vec![false; cell_count];
    for idx in init_positions(cell_count, (cell_count / 10) as u32, seed) {
        occupied[idx] = true;
    }
    let camera_cells = init_positions(cell_count, u32::from(cameras), seed ^ 0x5eed);
    for &idx in &camera_cells {
        occupied[idx] = false;
    }
    let map = GridMap::new(width, height, occupied)?;

    let camera_specs = camera_cells
        .iter()
        .enumerate()
        .map(|(i, &idx)| CameraSpec {
            id: CameraId(i as u32),
            position: to_cell(idx),
            view_range: None,
        })
        .collect();

    let starts = init_positions(cell_count, u32::from(objects), seed.wrapping_add(1));
    let ends = init_positions(cell_count, u32::from(objects), seed.wrapping_add(2));
    let appearance = Appearance::new(2, 2, vec![0.5, 1.0, 1.0, 0.5])?;
    let object_specs = starts
        .iter()
        .zip(&ends)
        .enumerate()
        .map(|(i, (&a, &b))| {
            let (from, to) = (to_cell(a), to_cell(b));
            let duration = from.chebyshev(to).max(1);
            ObjectSpec {
                id: ObjectId(i as u32),
                appearance: appearance.clone(),
                path: vec![
                    Waypoint::new(from.x.into(), from.y.into(), duration, Rotation::Deg0),
                    Waypoint::new(to.x.into(), to.y.into(), 0, Rotation::Deg90),
                ],
            }
        })
        .collect();

    Ok(SceneConfig {
        map,
        cameras: camera_specs,
        objects: object_specs,
    })
}

/// Generate `n` distinct deterministic flat indices in `0..cell_count`.
///
/// A simple multiplicative hash of the seed spreads the picks across the
/// grid; collisions are resolved by linear probing.
pub fn init_positions(cell_count: usize, n: u32, seed: u64) -> Vec<usize> {
    let n = (n as usize).min(cell_count);
    let mut positions = Vec::with_capacity(n);
    let mut taken = HashSet::with_capacity(n);

    for i in 0..n as u64 {
        let mut pos = (seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(i.wrapping_mul(1442695040888963407))
            % cell_count as u64) as usize;
        while taken.contains(&pos) {
            pos = (pos + 1) % cell_count;
        }
        taken.insert(pos);
        positions.push(pos);
    }

    positions
}
