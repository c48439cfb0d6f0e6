//! Scene validation errors.

use handoff_core::{CameraId, Cell, ContractViolation, ObjectId, Position};
use handoff_space::SpaceError;
use thiserror::Error;

/// Errors detected while building or modifying a [`Scene`](crate::Scene).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// The map itself is invalid.
    #[error("map: {0}")]
    Space(#[from] SpaceError),
    /// A value broke an API precondition.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
    /// Two cameras share an id.
    #[error("duplicate camera id {id}")]
    DuplicateCamera {
        /// The repeated id.
        id: CameraId,
    },
    /// Two objects share an id.
    #[error("duplicate object id {id}")]
    DuplicateObject {
        /// The repeated id.
        id: ObjectId,
    },
    /// A camera was placed outside the map.
    #[error("camera {id} at {position} is outside the map")]
    CameraOutOfBounds {
        /// The camera.
        id: CameraId,
        /// Its requested position.
        position: Cell,
    },
    /// No camera with this id exists.
    #[error("unknown camera {id}")]
    UnknownCamera {
        /// The missing id.
        id: CameraId,
    },
    /// An object has no waypoints.
    #[error("object {object} has an empty path")]
    EmptyPath {
        /// The object.
        object: ObjectId,
    },
    /// A waypoint that starts a segment has zero duration.
    #[error("object {object} waypoint {index} starts a segment but has zero duration")]
    ZeroDuration {
        /// The object.
        object: ObjectId,
        /// Index of the waypoint in the path.
        index: usize,
    },
    /// A waypoint lies outside the map or has a non-finite coordinate.
    #[error("object {object} waypoint {index} at {position} is outside the map")]
    WaypointOutOfBounds {
        /// The object.
        object: ObjectId,
        /// Index of the waypoint in the path.
        index: usize,
        /// The waypoint position.
        position: Position,
    },
    /// A camera's visible area no longer matches the map or its position.
    #[error("camera {camera} has a stale visible area")]
    StaleVisibleArea {
        /// The camera.
        camera: CameraId,
    },
}
