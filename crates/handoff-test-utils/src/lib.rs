//! Map and scene fixtures for handoff development.
//!
//! Small builders for hand-drawn maps and straight-line objects, plus the
//! canonical scenes in [`fixtures`] shared by unit tests, integration
//! tests, benches and the demo.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{two_halves_scene, two_room_scene, walled_scene, TWO_ROOMS};

use handoff_core::{Appearance, Cell, ObjectId, Position, Rotation};
use handoff_scene::{CameraSpec, ObjectSpec, Scene, SceneConfig, Waypoint};
use handoff_space::GridMap;

/// Build a map from rows of text. `#` is a wall, anything else is free.
///
/// # Panics
///
/// If the rows are empty or have different lengths.
pub fn map_from_ascii(rows: &[&str]) -> GridMap {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
    let mut occupied = Vec::with_capacity((width * height) as usize);
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(
            row.chars().count() as u32,
            width,
            "row {y} has a different width"
        );
        occupied.extend(row.chars().map(|c| c == '#'));
    }
    GridMap::new(width, height, occupied).expect("valid ascii map")
}

/// An open map with a closed one-cell-thick rectangle of walls from `min`
/// to `max` (inclusive).
pub fn ring_map(width: u32, height: u32, min: Cell, max: Cell) -> GridMap {
    let mut walls = Vec::new();
    for x in min.x..=max.x {
        walls.push(Cell::new(x, min.y));
        walls.push(Cell::new(x, max.y));
    }
    for y in min.y + 1..max.y {
        walls.push(Cell::new(min.x, y));
        walls.push(Cell::new(max.x, y));
    }
    GridMap::with_walls(width, height, walls).expect("ring fits the map")
}

/// A single lit cell.
pub fn dot() -> Appearance {
    block(1, 1, 1.0)
}

/// A solid `w × h` block of `value`.
pub fn block(w: u32, h: u32, value: f32) -> Appearance {
    Appearance::new(w, h, vec![value; (w * h) as usize]).expect("non-empty block")
}

/// An object travelling from `from` to `to` in `duration` ticks, then
/// standing still.
pub fn straight_line_object(
    id: u32,
    appearance: Appearance,
    from: Position,
    to: Position,
    duration: u32,
) -> ObjectSpec {
    ObjectSpec {
        id: ObjectId(id),
        appearance,
        path: vec![
            Waypoint::new(from.x, from.y, duration, Rotation::Deg0),
            Waypoint::new(to.x, to.y, 0, Rotation::Deg0),
        ],
    }
}

/// A scene with a single dot (object 0) moving in a straight line.
pub fn straight_line_scene(
    map: GridMap,
    cameras: Vec<CameraSpec>,
    from: Position,
    to: Position,
    duration: u32,
) -> Scene {
    Scene::new(SceneConfig {
        map,
        cameras,
        objects: vec![straight_line_object(0, dot(), from, to, duration)],
    })
    .expect("valid straight-line scene")
}
