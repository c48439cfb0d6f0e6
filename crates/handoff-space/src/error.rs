//! Error types for map construction.

use handoff_core::Cell;
use thiserror::Error;

/// Errors arising from building a [`GridMap`](crate::GridMap).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpaceError {
    /// Attempted to construct a map with zero cells.
    #[error("map must have at least one cell")]
    EmptySpace,
    /// A dimension exceeds what `i32` cell coordinates can address.
    #[error("{name} = {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
        /// The value supplied.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },
    /// The occupancy vector does not have `width * height` entries.
    #[error("occupancy has {actual} cells, expected {expected}")]
    CellCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
    /// A wall was placed outside the map.
    #[error("wall {cell} outside {width}x{height} map")]
    WallOutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// Map width.
        width: u32,
        /// Map height.
        height: u32,
    },
}
