//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a camera within a scene.
///
/// Camera ids are unique and stable for the lifetime of a run. Scene
/// iteration order (insertion order) is the fixed scan order used by the
/// tracking state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CameraId(pub u32);

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CameraId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a moving object within a scene.
///
/// Ordering matters: `best_match` breaks score ties in favour of the
/// lowest `ObjectId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ObjectId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time the tracking engine completes one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Counter for unique [`MapInstanceId`] allocation.
static MAP_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a grid map.
///
/// Allocated from a monotonic atomic counter via [`MapInstanceId::next`].
/// Two distinct maps always have different ids, even with identical
/// occupancy. Visible areas record the id of the map they were computed
/// from, so an area computed against a replaced map is detectably stale.
///
/// Cloning a map preserves its instance id, which is correct because maps
/// are immutable after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapInstanceId(u64);

impl MapInstanceId {
    /// Allocate a fresh, unique instance id. Thread-safe.
    pub fn next() -> Self {
        Self(MAP_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MapInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
