//! Core types for the Handoff camera-tracking framework.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared by every other crate in the workspace: strongly-typed
//! identifiers, grid cells and continuous positions, appearance bitmaps,
//! and the [`ContractViolation`] error raised when a caller breaks an API
//! precondition.
//!
//! # Coordinate convention
//!
//! Everything uses `(x, y)`: `x` is the column, `y` is the row, and `y`
//! grows downward. Row-major flat indices are `y * width + x`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod appearance;
pub mod error;
pub mod geom;
pub mod id;

pub use appearance::{Appearance, BoundingBox, Rotation};
pub use error::ContractViolation;
pub use geom::{Cell, Position};
pub use id::{CameraId, MapInstanceId, ObjectId, TickId};
