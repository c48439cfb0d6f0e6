//! Handoff and re-identification engine.
//!
//! Given a [`Scene`](handoff_scene::Scene), the engine keeps one camera
//! responsible for the tracked object. When that camera loses sight of
//! it, cameras holding a handshake try to re-identify the object among
//! what they currently see, and responsibility moves to the first one
//! that finds a qualifying match.
//!
//! The building blocks are free functions so they can be tested and
//! reused on their own:
//!
//! - [`clip_appearance`] / [`camera_sees`]: what a camera actually sees.
//! - [`predict_next_position`]: two-sample linear extrapolation.
//! - [`score`] / [`best_match`]: weighted position, appearance and size
//!   distance.
//! - [`reevaluate`]: the responsibility state machine as a pure function.
//!
//! [`TrackingEngine`] drives them in the fixed per-tick order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod matching;
pub mod metrics;
pub mod observe;
pub mod predict;
pub mod tick;
pub mod tracking;

pub use config::{ConfigError, HandoffConfig, ScoreWeights};
pub use matching::{best_match, score, score_breakdown, Match, ScoreBreakdown};
pub use metrics::TickMetrics;
pub use observe::{camera_sees, clip_appearance};
pub use predict::predict_next_position;
pub use tick::{StepError, TickReport, TrackingEngine};
pub use tracking::{acquire, reevaluate, Reevaluation, TrackingEvent, TrackingState};
