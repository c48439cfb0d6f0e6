//! Moving objects on deterministic waypoint paths.

use handoff_core::{Appearance, ContractViolation, ObjectId, Position, Rotation};

use crate::error::SceneError;

/// One waypoint of an object's path.
///
/// `duration` is the number of ticks spent travelling from this waypoint
/// to the next. It is ignored on the final waypoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    /// Where the waypoint is.
    pub position: Position,
    /// Ticks to reach the next waypoint.
    pub duration: u32,
    /// Orientation the object takes while heading *to* this waypoint.
    pub orientation: Rotation,
}

impl Waypoint {
    /// Construct a waypoint.
    pub fn new(x: f64, y: f64, duration: u32, orientation: Rotation) -> Self {
        Self {
            position: Position::new(x, y),
            duration,
            orientation,
        }
    }

    /// Construct a waypoint from an orientation in degrees.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::UnsupportedRotation`] unless `degrees` is a
    /// multiple of 90 in `[0, 270]`.
    pub fn from_degrees(
        x: f64,
        y: f64,
        duration: u32,
        degrees: u32,
    ) -> Result<Self, ContractViolation> {
        Ok(Self::new(x, y, duration, Rotation::try_from(degrees)?))
    }
}

/// Loader-side description of an object.
#[derive(Clone, Debug)]
pub struct ObjectSpec {
    /// Unique object id.
    pub id: ObjectId,
    /// Unrotated appearance.
    pub appearance: Appearance,
    /// Ordered, non-empty path.
    pub path: Vec<Waypoint>,
}

/// An object moving along its path, one interpolation step per tick.
#[derive(Clone, Debug)]
pub struct MovingObject {
    id: ObjectId,
    appearance: Appearance,
    path: Vec<Waypoint>,
    position: Position,
    previous: Option<Position>,
    path_index: usize,
    ticks_remaining: u32,
    orientation: Rotation,
}

impl MovingObject {
    /// Place an object at the first waypoint of its path.
    ///
    /// # Errors
    ///
    /// [`SceneError::EmptyPath`] for an empty path and
    /// [`SceneError::ZeroDuration`] for any non-final waypoint with zero
    /// duration (its segment would have no per-tick step).
    pub fn new(spec: ObjectSpec) -> Result<Self, SceneError> {
        let ObjectSpec {
            id,
            appearance,
            path,
        } = spec;
        let first = *path.first().ok_or(SceneError::EmptyPath { object: id })?;
        let last = path.len() - 1;
        if let Some(index) = path[..last].iter().position(|w| w.duration == 0) {
            return Err(SceneError::ZeroDuration { object: id, index });
        }
        Ok(Self {
            id,
            appearance,
            path,
            position: first.position,
            previous: None,
            path_index: 0,
            ticks_remaining: first.duration,
            orientation: first.orientation,
        })
    }

    /// Object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Current continuous position (top-left corner of the footprint).
    pub fn position(&self) -> Position {
        self.position
    }

    /// Position before the most recent [`advance`](Self::advance), if any.
    pub fn previous_position(&self) -> Option<Position> {
        self.previous
    }

    /// Current orientation.
    pub fn orientation(&self) -> Rotation {
        self.orientation
    }

    /// Unrotated appearance.
    pub fn base_appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Appearance in the current orientation.
    pub fn oriented_appearance(&self) -> Appearance {
        self.appearance.rotated(self.orientation)
    }

    /// The path this object follows.
    pub fn path(&self) -> &[Waypoint] {
        &self.path
    }

    /// Index of the waypoint that starts the current segment.
    pub fn path_index(&self) -> usize {
        self.path_index
    }

    /// Ticks left before the next waypoint is reached.
    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    /// True once the final waypoint has been reached; the object is then
    /// stationary for the rest of the run.
    pub fn is_finished(&self) -> bool {
        self.path_index == self.path.len() - 1
    }

    /// Move one tick along the path.
    ///
    /// Records the current position as the previous one, then either
    /// rolls over to the next segment (when the current one is used up) or
    /// adds one per-tick step of `(next − start) / duration`.
    pub fn advance(&mut self) {
        self.previous = Some(self.position);
        if self.is_finished() {
            return;
        }
        if self.ticks_remaining == 0 {
            self.path_index += 1;
            self.ticks_remaining = self.path[self.path_index].duration;
            if self.is_finished() {
                return;
            }
        }
        let start = self.path[self.path_index];
        let dest = self.path[self.path_index + 1];
        let step = (dest.position - start.position).scale(1.0 / f64::from(start.duration));
        self.position = self.position + step;
        self.ticks_remaining -= 1;
        self.orientation = dest.orientation;
    }
}
