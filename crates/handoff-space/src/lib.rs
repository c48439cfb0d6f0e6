//! Occupancy grids and visibility for Handoff.
//!
//! This crate owns the geometric half of the tracking problem:
//!
//! - [`GridMap`]: an immutable wall/free occupancy grid.
//! - [`line_of_sight`]: a digital-line walk that fails on the first
//!   occupied cell.
//! - [`compute_visible_area`]: a frontier-bounded 8-connected flood fill
//!   gated by line of sight, producing a per-camera [`VisibleArea`].
//!
//! Visible areas are expensive and computed once at setup.
//! [`compute_visible_areas`] fans the work out across viewpoints in
//! parallel; each task only reads the shared map.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod los;
pub mod map;
pub mod visibility;

pub use error::SpaceError;
pub use los::{line_of_sight, segment_cells};
pub use map::GridMap;
pub use visibility::{compute_visible_area, compute_visible_areas, Viewpoint, VisibleArea};
