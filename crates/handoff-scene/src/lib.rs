//! Cameras, moving objects, and validated scenes for Handoff.
//!
//! A [`Scene`] is built once from a [`SceneConfig`] supplied by an
//! external loader. Construction validates every camera and object and
//! computes each camera's [`VisibleArea`](handoff_space::VisibleArea) in
//! parallel. After that the map and camera positions are fixed; only
//! object state and handshake slots change tick to tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod camera;
pub mod error;
pub mod object;
pub mod scene;

pub use camera::{Camera, CameraSpec, Handshake};
pub use error::SceneError;
pub use object::{MovingObject, ObjectSpec, Waypoint};
pub use scene::{Scene, SceneConfig};
