//! Fixed cameras and their single-slot handshake mailbox.

use handoff_core::{Appearance, CameraId, Cell, Position};
use handoff_space::{Viewpoint, VisibleArea};

/// Loader-side description of a camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraSpec {
    /// Unique camera id.
    pub id: CameraId,
    /// Grid cell the camera sits on.
    pub position: Cell,
    /// Optional Chebyshev view radius; `None` = limited only by walls.
    pub view_range: Option<u32>,
}

impl CameraSpec {
    /// A camera limited only by walls.
    pub fn new(id: u32, x: i32, y: i32) -> Self {
        Self {
            id: CameraId(id),
            position: Cell::new(x, y),
            view_range: None,
        }
    }

    /// Limit the camera to `range` cells.
    pub fn with_range(mut self, range: u32) -> Self {
        self.view_range = Some(range);
        self
    }

    /// The viewpoint this camera observes from.
    pub fn viewpoint(&self) -> Viewpoint {
        Viewpoint {
            origin: self.position,
            range: self.view_range,
        }
    }
}

/// A provisional descriptor of the tracked object, left by the responsible
/// camera for a peer to re-identify against.
#[derive(Clone, Debug, PartialEq)]
pub struct Handshake {
    /// Camera that wrote this handshake.
    pub sender: CameraId,
    /// Where the sender expects the object to be next tick.
    pub predicted_position: Position,
    /// The object as the sender saw it (occluded cells zeroed).
    pub appearance: Appearance,
}

/// A placed camera with its precomputed visible area.
#[derive(Clone, Debug)]
pub struct Camera {
    spec: CameraSpec,
    visible_area: VisibleArea,
    handshake: Option<Handshake>,
}

impl Camera {
    pub(crate) fn new(spec: CameraSpec, visible_area: VisibleArea) -> Self {
        Self {
            spec,
            visible_area,
            handshake: None,
        }
    }

    /// Camera id.
    pub fn id(&self) -> CameraId {
        self.spec.id
    }

    /// Grid cell the camera sits on.
    pub fn position(&self) -> Cell {
        self.spec.position
    }

    /// Configured view radius.
    pub fn view_range(&self) -> Option<u32> {
        self.spec.view_range
    }

    /// The viewpoint this camera observes from.
    pub fn viewpoint(&self) -> Viewpoint {
        self.spec.viewpoint()
    }

    /// The spec the camera was built from.
    pub fn spec(&self) -> CameraSpec {
        self.spec
    }

    /// Precomputed visible area.
    pub fn visible_area(&self) -> &VisibleArea {
        &self.visible_area
    }

    pub(crate) fn set_visible_area(&mut self, area: VisibleArea) {
        self.visible_area = area;
    }

    /// The handshake received this tick, if any.
    pub fn handshake(&self) -> Option<&Handshake> {
        self.handshake.as_ref()
    }

    /// Store a handshake, replacing any previous one.
    pub fn receive_handshake(&mut self, handshake: Handshake) {
        self.handshake = Some(handshake);
    }

    /// Empty the handshake slot.
    pub fn clear_handshake(&mut self) {
        self.handshake = None;
    }
}
