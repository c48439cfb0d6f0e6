//! What a camera actually sees of an object.
//!
//! An object's footprint is its oriented appearance laid over the grid
//! with the top-left corner at the floor of its position. A footprint
//! cell contributes only if the camera has direct line of sight to it;
//! everything else reads as zero.

use handoff_core::Appearance;
use handoff_scene::{Camera, MovingObject};
use handoff_space::GridMap;

/// The object's oriented appearance with every cell the camera cannot
/// see set to zero.
///
/// The result always has the oriented appearance's dimensions. Footprint
/// cells that fall off the map are treated as not visible.
pub fn clip_appearance(map: &GridMap, camera: &Camera, object: &MovingObject) -> Appearance {
    let mut appearance = object.oriented_appearance();
    let viewpoint = camera.viewpoint();
    let origin = object.position().cell();
    for y in 0..appearance.height() {
        for x in 0..appearance.width() {
            if appearance.get(x, y) == 0.0 {
                continue;
            }
            let cell = origin.offset(x as i32, y as i32);
            if !viewpoint.sees(map, cell) {
                appearance.clear(x, y);
            }
        }
    }
    appearance
}

/// Whether any non-zero cell of the object's footprint is visible to the
/// camera. Equivalent to `!clip_appearance(..).is_blank()`.
pub fn camera_sees(map: &GridMap, camera: &Camera, object: &MovingObject) -> bool {
    let appearance = object.oriented_appearance();
    let viewpoint = camera.viewpoint();
    let origin = object.position().cell();
    (0..appearance.height()).any(|y| {
        (0..appearance.width()).any(|x| {
            appearance.get(x, y) != 0.0 && viewpoint.sees(map, origin.offset(x as i32, y as i32))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_core::{CameraId, ObjectId, Rotation};
    use handoff_scene::{CameraSpec, ObjectSpec, Scene, SceneConfig, Waypoint};
    use handoff_test_utils::map_from_ascii;

    fn scene(map: GridMap, camera: CameraSpec, appearance: Appearance, at: (f64, f64)) -> Scene {
        Scene::new(SceneConfig {
            map,
            cameras: vec![camera],
            objects: vec![ObjectSpec {
                id: ObjectId(0),
                appearance,
                path: vec![Waypoint::new(at.0, at.1, 0, Rotation::Deg0)],
            }],
        })
        .unwrap()
    }

    fn parts(s: &Scene) -> (&GridMap, &Camera, &MovingObject) {
        (
            s.map(),
            s.camera(CameraId(0)).unwrap(),
            s.object(ObjectId(0)).unwrap(),
        )
    }

    #[test]
    fn fully_visible_object_is_unchanged() {
        let a = Appearance::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
        let s = scene(
            GridMap::open(6, 6).unwrap(),
            CameraSpec::new(0, 0, 0),
            a.clone(),
            (3.0, 3.0),
        );
        let (map, cam, obj) = parts(&s);
        assert_eq!(clip_appearance(map, cam, obj), a);
        assert!(camera_sees(map, cam, obj));
    }

    #[test]
    fn wall_hides_part_of_footprint() {
        // Camera at (0,1). Wall at (2,0) blocks the top row behind it;
        // the bottom row (y = 1) is clear.
        let map = map_from_ascii(&[
            "..#...", //
            "......",
        ]);
        let a = Appearance::from_rows(&[&[5.0, 6.0], &[7.0, 8.0]]).unwrap();
        let s = scene(map, CameraSpec::new(0, 0, 1), a, (3.0, 0.0));
        let (map, cam, obj) = parts(&s);
        let clipped = clip_appearance(map, cam, obj);
        assert_eq!(clipped.width(), 2);
        assert_eq!(clipped.height(), 2);
        assert_eq!(clipped.get(0, 0), 0.0);
        assert_eq!(clipped.get(0, 1), 7.0);
        assert_eq!(clipped.get(1, 1), 8.0);
        assert!(camera_sees(map, cam, obj));
    }

    #[test]
    fn out_of_range_object_is_blank() {
        let a = Appearance::from_rows(&[&[1.0]]).unwrap();
        let s = scene(
            GridMap::open(10, 1).unwrap(),
            CameraSpec::new(0, 0, 0).with_range(3),
            a,
            (5.0, 0.0),
        );
        let (map, cam, obj) = parts(&s);
        assert!(clip_appearance(map, cam, obj).is_blank());
        assert!(!camera_sees(map, cam, obj));
    }

    #[test]
    fn footprint_off_the_map_is_clipped() {
        let a = Appearance::from_rows(&[&[1.0, 1.0, 1.0]]).unwrap();
        let s = scene(
            GridMap::open(4, 1).unwrap(),
            CameraSpec::new(0, 0, 0),
            a,
            (2.0, 0.0),
        );
        let (map, cam, obj) = parts(&s);
        let clipped = clip_appearance(map, cam, obj);
        assert_eq!(clipped.data(), &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn zero_cells_never_count_as_seen() {
        // Only the right-hand cell is non-zero, and it sits behind a wall.
        let map = map_from_ascii(&["..#."]);
        let a = Appearance::from_rows(&[&[0.0, 0.0, 9.0]]).unwrap();
        let s = scene(map, CameraSpec::new(0, 0, 0), a, (1.0, 0.0));
        let (map, cam, obj) = parts(&s);
        assert!(!camera_sees(map, cam, obj));
        assert!(clip_appearance(map, cam, obj).is_blank());
    }

    #[test]
    fn clipping_uses_oriented_appearance() {
        let a = Appearance::from_rows(&[&[1.0, 2.0]]).unwrap();
        let s = Scene::new(SceneConfig {
            map: GridMap::open(5, 5).unwrap(),
            cameras: vec![CameraSpec::new(0, 0, 0)],
            objects: vec![ObjectSpec {
                id: ObjectId(0),
                appearance: a.clone(),
                path: vec![Waypoint::new(2.0, 2.0, 0, Rotation::Deg90)],
            }],
        })
        .unwrap();
        let (map, cam, obj) = parts(&s);
        let clipped = clip_appearance(map, cam, obj);
        assert_eq!(clipped, a.rotated(Rotation::Deg90));
        assert_eq!((clipped.width(), clipped.height()), (1, 2));
    }
}
