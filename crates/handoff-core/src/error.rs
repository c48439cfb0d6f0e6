//! Contract-violation errors.
//!
//! A [`ContractViolation`] is a programmer error: the caller broke a
//! documented precondition. These are surfaced as `Err` values and must
//! be propagated, never swallowed.

use thiserror::Error;

use crate::geom::Cell;
use crate::id::ObjectId;

/// A broken API precondition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// A cell passed to a grid query is outside the grid.
    #[error("cell {cell} out of bounds for {width}x{height} grid")]
    CellOutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// A rotation other than 0, 90, 180 or 270 degrees was requested.
    #[error("unsupported rotation of {degrees} degrees (expected 0, 90, 180 or 270)")]
    UnsupportedRotation {
        /// The requested angle.
        degrees: u32,
    },
    /// Bitmap dimensions do not match the supplied data.
    #[error("malformed {width}x{height} bitmap with {len} cells")]
    MalformedBitmap {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Number of cells actually supplied.
        len: usize,
    },
    /// Position prediction was requested before the object completed a tick.
    #[error("object {object} has no previous position; prediction requires one completed tick")]
    PredictionBeforeFirstTick {
        /// The object that has not yet moved.
        object: ObjectId,
    },
}
