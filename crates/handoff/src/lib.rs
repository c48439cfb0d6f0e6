//! Handoff: decentralised multi-camera object tracking.
//!
//! Fixed cameras on an occupancy grid each know what they can see. One
//! camera at a time is responsible for the tracked object; when it loses
//! sight, it has already left handshakes (predicted position and observed
//! appearance) with the peers that can see the object's cell, and the
//! first peer to re-identify the object takes over.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all handoff sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use handoff::prelude::*;
//!
//! // A 10x10 hall split between two cameras with a 4-cell view range.
//! let map = GridMap::open(10, 10).unwrap();
//! let dot = Appearance::from_rows(&[&[1.0]]).unwrap();
//! let scene = Scene::new(SceneConfig {
//!     map,
//!     cameras: vec![
//!         CameraSpec::new(0, 0, 4).with_range(4),
//!         CameraSpec::new(1, 9, 4).with_range(4),
//!     ],
//!     objects: vec![ObjectSpec {
//!         id: ObjectId(0),
//!         appearance: dot,
//!         path: vec![
//!             Waypoint::new(1.0, 4.0, 7, Rotation::Deg0),
//!             Waypoint::new(8.0, 4.0, 0, Rotation::Deg0),
//!         ],
//!     }],
//! })
//! .unwrap();
//!
//! let mut engine = TrackingEngine::new(scene, HandoffConfig::default()).unwrap();
//! engine.run(5).unwrap();
//! assert_eq!(engine.state().camera(), Some(CameraId(1)));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `handoff-core` | ids, cells and positions, appearances, `ContractViolation` |
//! | [`space`] | `handoff-space` | grid map, line of sight, visible areas |
//! | [`scene`] | `handoff-scene` | cameras, handshakes, moving objects, scene validation |
//! | [`engine`] | `handoff-engine` | clipping, prediction, scoring, tracking engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`handoff-core`).
pub use handoff_core as types;

/// Grid map, line of sight and visible areas (`handoff-space`).
///
/// [`space::compute_visible_area`] is the frontier-bounded flood fill;
/// [`space::compute_visible_areas`] runs it for many viewpoints in
/// parallel.
pub use handoff_space as space;

/// Cameras, objects and the scene container (`handoff-scene`).
pub use handoff_scene as scene;

/// The handoff protocol and tracking loop (`handoff-engine`).
///
/// [`engine::TrackingEngine`] drives the per-tick order; the free
/// functions ([`engine::clip_appearance`], [`engine::best_match`],
/// [`engine::reevaluate`], ...) are usable on their own.
pub use handoff_engine as engine;

/// Common imports for typical handoff usage.
///
/// ```rust
/// use handoff::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use handoff_core::{
        Appearance, CameraId, Cell, ContractViolation, ObjectId, Position, Rotation, TickId,
    };

    // Space
    pub use handoff_space::{line_of_sight, GridMap, SpaceError, Viewpoint, VisibleArea};

    // Scene
    pub use handoff_scene::{
        Camera, CameraSpec, Handshake, MovingObject, ObjectSpec, Scene, SceneConfig, SceneError,
        Waypoint,
    };

    // Engine
    pub use handoff_engine::{
        best_match, camera_sees, clip_appearance, predict_next_position, score, ConfigError,
        HandoffConfig, ScoreWeights, StepError, TickMetrics, TickReport, TrackingEngine,
        TrackingEvent, TrackingState,
    };
}
