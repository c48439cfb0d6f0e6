//! Scene construction, validation, and layout changes.
//!
//! [`SceneConfig`] is the builder-input handed over by an external loader.
//! [`Scene::new`] validates it and computes every camera's visible area.
//! Cameras and objects are kept in insertion order; that order is the
//! fixed scan order the tracking state machine relies on.

use std::collections::HashSet;

use handoff_core::{CameraId, ObjectId};
use handoff_space::{compute_visible_area, compute_visible_areas, GridMap};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::camera::{Camera, CameraSpec, Handshake};
use crate::error::SceneError;
use crate::object::{MovingObject, ObjectSpec};

/// Everything needed to build a [`Scene`].
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Immutable occupancy grid.
    pub map: GridMap,
    /// Cameras, in scan order.
    pub cameras: Vec<CameraSpec>,
    /// Objects, in iteration order.
    pub objects: Vec<ObjectSpec>,
}

/// A validated scene: map, cameras with visible areas, moving objects.
#[derive(Clone, Debug)]
pub struct Scene {
    map: GridMap,
    cameras: IndexMap<CameraId, Camera>,
    objects: IndexMap<ObjectId, MovingObject>,
}

impl Scene {
    /// Validate `config` and build the scene.
    ///
    /// Visible areas are computed for all cameras in parallel before this
    /// returns.
    ///
    /// # Errors
    ///
    /// Any [`SceneError`] validation failure: duplicate ids, cameras or
    /// waypoints off the map, empty paths, zero-duration segments.
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        let SceneConfig {
            map,
            cameras: camera_specs,
            objects: object_specs,
        } = config;

        let mut seen = HashSet::with_capacity(camera_specs.len());
        for spec in &camera_specs {
            check_camera(&map, spec)?;
            if !seen.insert(spec.id) {
                return Err(SceneError::DuplicateCamera { id: spec.id });
            }
        }

        let viewpoints: Vec<_> = camera_specs.iter().map(CameraSpec::viewpoint).collect();
        let areas = compute_visible_areas(&map, &viewpoints)?;
        let cameras: IndexMap<CameraId, Camera> = camera_specs
            .into_iter()
            .zip(areas)
            .map(|(spec, area)| (spec.id, Camera::new(spec, area)))
            .collect();

        let mut objects = IndexMap::with_capacity(object_specs.len());
        for spec in object_specs {
            let id = spec.id;
            for (index, waypoint) in spec.path.iter().enumerate() {
                if !waypoint.position.is_finite() || !map.contains(waypoint.position.cell()) {
                    return Err(SceneError::WaypointOutOfBounds {
                        object: id,
                        index,
                        position: waypoint.position,
                    });
                }
            }
            let object = MovingObject::new(spec)?;
            if objects.insert(id, object).is_some() {
                return Err(SceneError::DuplicateObject { id });
            }
        }

        info!(
            width = map.width(),
            height = map.height(),
            cameras = cameras.len(),
            objects = objects.len(),
            "scene built"
        );
        Ok(Self {
            map,
            cameras,
            objects,
        })
    }

    /// The occupancy grid.
    pub fn map(&self) -> &GridMap {
        &self.map
    }

    /// Cameras in scan order.
    pub fn cameras(&self) -> impl Iterator<Item = &Camera> + '_ {
        self.cameras.values()
    }

    /// Number of cameras.
    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    /// Look up a camera.
    pub fn camera(&self, id: CameraId) -> Option<&Camera> {
        self.cameras.get(&id)
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &MovingObject> + '_ {
        self.objects.values()
    }

    /// Number of objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Look up an object.
    pub fn object(&self, id: ObjectId) -> Option<&MovingObject> {
        self.objects.get(&id)
    }

    /// Advance every object by one tick.
    pub fn advance_objects(&mut self) {
        for object in self.objects.values_mut() {
            object.advance();
        }
    }

    /// Empty every camera's handshake slot.
    pub fn clear_handshakes(&mut self) {
        for camera in self.cameras.values_mut() {
            camera.clear_handshake();
        }
    }

    /// Put `handshake` into the slot of camera `to`.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownCamera`] if `to` does not exist.
    pub fn deliver_handshake(
        &mut self,
        to: CameraId,
        handshake: Handshake,
    ) -> Result<(), SceneError> {
        let camera = self
            .cameras
            .get_mut(&to)
            .ok_or(SceneError::UnknownCamera { id: to })?;
        camera.receive_handshake(handshake);
        Ok(())
    }

    /// Add a camera and compute its visible area.
    ///
    /// Other cameras' areas depend only on the map and their own position,
    /// so they are left as they are.
    pub fn add_camera(&mut self, spec: CameraSpec) -> Result<(), SceneError> {
        check_camera(&self.map, &spec)?;
        if self.cameras.contains_key(&spec.id) {
            return Err(SceneError::DuplicateCamera { id: spec.id });
        }
        let area = compute_visible_area(&self.map, spec.viewpoint())?;
        debug!(camera = %spec.id, visible = area.visible_count(), "camera added");
        self.cameras.insert(spec.id, Camera::new(spec, area));
        Ok(())
    }

    /// Remove a camera, preserving the scan order of the rest.
    pub fn remove_camera(&mut self, id: CameraId) -> Option<Camera> {
        self.cameras.shift_remove(&id)
    }

    /// Replace the map and recompute every camera's visible area.
    ///
    /// # Errors
    ///
    /// Fails without modifying the scene if a camera or an object's
    /// current position would fall outside the new map.
    pub fn replace_map(&mut self, map: GridMap) -> Result<(), SceneError> {
        for camera in self.cameras.values() {
            check_camera(&map, &camera.spec())?;
        }
        for object in self.objects.values() {
            let cell = object.position().cell();
            map.check_bounds(cell)?;
        }
        let viewpoints: Vec<_> = self.cameras.values().map(Camera::viewpoint).collect();
        let areas = compute_visible_areas(&map, &viewpoints)?;
        for (camera, area) in self.cameras.values_mut().zip(areas) {
            camera.set_visible_area(area);
        }
        info!(cameras = self.cameras.len(), "map replaced, visible areas recomputed");
        self.map = map;
        Ok(())
    }

    /// Verify that no camera holds a visible area computed for another map
    /// or another position.
    pub fn check_areas_current(&self) -> Result<(), SceneError> {
        for camera in self.cameras.values() {
            if !camera.visible_area().is_current_for(&self.map, camera.viewpoint()) {
                return Err(SceneError::StaleVisibleArea {
                    camera: camera.id(),
                });
            }
        }
        Ok(())
    }
}

fn check_camera(map: &GridMap, spec: &CameraSpec) -> Result<(), SceneError> {
    if map.contains(spec.position) {
        Ok(())
    } else {
        Err(SceneError::CameraOutOfBounds {
            id: spec.id,
            position: spec.position,
        })
    }
}
