//! Canonical scenes.
//!
//! - [`two_halves_scene`]: open 10×10 hall, two range-limited cameras
//!   splitting it down the middle, one dot crossing from left to right.
//! - [`walled_scene`]: the target's whole path is enclosed by a wall ring
//!   and no camera is inside.
//! - [`two_room_scene`]: two rooms joined by a doorway, one camera per
//!   room, the target walking through the doorway past a distractor.

use handoff_core::{Cell, Position};
use handoff_scene::{CameraSpec, Scene, SceneConfig};
use handoff_space::GridMap;

use crate::{block, dot, map_from_ascii, ring_map, straight_line_object};

/// Camera 0 at (0,4) and camera 1 at (9,4), both with range 4, so camera 0
/// covers `x <= 4` and camera 1 covers `x >= 5`. Object 0 moves from
/// (1,4) to (8,4) at one cell per tick; it enters camera 1's half at the
/// end of tick 4.
pub fn two_halves_scene() -> Scene {
    Scene::new(SceneConfig {
        map: GridMap::open(10, 10).expect("10x10"),
        cameras: vec![
            CameraSpec::new(0, 0, 4).with_range(4),
            CameraSpec::new(1, 9, 4).with_range(4),
        ],
        objects: vec![straight_line_object(
            0,
            dot(),
            Position::new(1.0, 4.0),
            Position::new(8.0, 4.0),
            7,
        )],
    })
    .expect("valid two-halves scene")
}

/// 12×12 map with a wall ring from (3,3) to (8,8). Object 0 moves inside
/// the ring; cameras sit in opposite outer corners.
pub fn walled_scene() -> Scene {
    Scene::new(SceneConfig {
        map: ring_map(12, 12, Cell::new(3, 3), Cell::new(8, 8)),
        cameras: vec![CameraSpec::new(0, 0, 0), CameraSpec::new(1, 11, 11)],
        objects: vec![straight_line_object(
            0,
            dot(),
            Position::new(4.0, 5.0),
            Position::new(7.0, 6.0),
            3,
        )],
    })
    .expect("valid walled scene")
}

/// Map rows for [`two_room_scene`]: a wall down column 8 with a doorway
/// at (8,4).
pub const TWO_ROOMS: [&str; 9] = [
    "........#.......",
    "........#.......",
    "........#.......",
    "........#.......",
    "................",
    "........#.......",
    "........#.......",
    "........#.......",
    "........#.......",
];

/// Camera 0 at (1,1) watches the left room, camera 1 at (14,7) the right
/// one. Object 0 (the target, a dot) walks from (2,4) through the doorway
/// to (13,4). Object 1, a 2×2 distractor, stands in the right room.
pub fn two_room_scene() -> Scene {
    Scene::new(SceneConfig {
        map: map_from_ascii(&TWO_ROOMS),
        cameras: vec![CameraSpec::new(0, 1, 1), CameraSpec::new(1, 14, 7)],
        objects: vec![
            straight_line_object(
                0,
                dot(),
                Position::new(2.0, 4.0),
                Position::new(13.0, 4.0),
                11,
            ),
            straight_line_object(
                1,
                block(2, 2, 0.8),
                Position::new(11.0, 6.0),
                Position::new(11.0, 6.0),
                1,
            ),
        ],
    })
    .expect("valid two-room scene")
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_core::CameraId;

    #[test]
    fn halves_do_not_overlap() {
        let s = two_halves_scene();
        let a = s.camera(CameraId(0)).unwrap().visible_area();
        let b = s.camera(CameraId(1)).unwrap().visible_area();
        assert!(a.contains(Cell::new(4, 4)));
        assert!(!a.contains(Cell::new(5, 4)));
        assert!(b.contains(Cell::new(5, 4)));
        assert!(!b.contains(Cell::new(4, 4)));
    }

    #[test]
    fn ring_interior_is_hidden() {
        let s = walled_scene();
        for cam in s.cameras() {
            for y in 4..8 {
                for x in 4..8 {
                    assert!(!cam.visible_area().contains(Cell::new(x, y)));
                }
            }
        }
    }

    #[test]
    fn rooms_are_separated() {
        let s = two_room_scene();
        let right = s.camera(CameraId(1)).unwrap().visible_area();
        assert!(right.contains(Cell::new(13, 4)));
        assert!(!right.contains(Cell::new(1, 8)));
        assert_eq!(s.object_count(), 2);
    }
}
