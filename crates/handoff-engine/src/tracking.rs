//! The responsibility state machine.
//!
//! [`reevaluate`] is a pure function of the previous state, the scene and
//! the configuration. The engine owns the state and feeds it back in each
//! tick; nothing here mutates the scene.

use std::fmt;

use handoff_core::{CameraId, ObjectId};
use handoff_scene::Scene;

use crate::config::HandoffConfig;
use crate::matching::{best_match, ScoreBreakdown};
use crate::observe::camera_sees;

/// Which camera, if any, is responsible for which object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackingState {
    /// No camera has seen the target yet.
    #[default]
    NoResponsibleCamera,
    /// `camera` is responsible for `object`.
    Tracking {
        /// The responsible camera.
        camera: CameraId,
        /// The object it believes is the target.
        object: ObjectId,
    },
}

impl TrackingState {
    /// The responsible camera, if any.
    pub fn camera(&self) -> Option<CameraId> {
        match self {
            Self::NoResponsibleCamera => None,
            Self::Tracking { camera, .. } => Some(*camera),
        }
    }

    /// The tracked object, if any.
    pub fn object(&self) -> Option<ObjectId> {
        match self {
            Self::NoResponsibleCamera => None,
            Self::Tracking { object, .. } => Some(*object),
        }
    }
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResponsibleCamera => f.write_str("no responsible camera"),
            Self::Tracking { camera, object } => write!(f, "camera {camera} tracking {object}"),
        }
    }
}

/// Something that happened to responsibility during a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackingEvent {
    /// A camera saw the target and became responsible.
    Acquired {
        /// The camera.
        camera: CameraId,
        /// The target object.
        object: ObjectId,
    },
    /// Responsibility moved after a re-identification.
    HandedOff {
        /// Previously responsible camera.
        from: CameraId,
        /// Newly responsible camera.
        to: CameraId,
        /// Object `to` matched against its handshake.
        object: ObjectId,
        /// Score of that match.
        score: ScoreBreakdown,
    },
    /// The responsible camera lost sight and no peer re-identified the
    /// object. The stale pair is kept unless the camera was removed.
    Lost {
        /// The responsible camera.
        camera: CameraId,
        /// The object it was tracking.
        object: ObjectId,
    },
}

/// Outcome of one [`reevaluate`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct Reevaluation {
    /// The state to carry into the rest of the tick.
    pub state: TrackingState,
    /// What changed, if anything.
    pub event: Option<TrackingEvent>,
    /// How many candidates were scored while searching for a match.
    pub candidates_scored: u32,
}

impl Reevaluation {
    fn unchanged(state: TrackingState) -> Self {
        Self {
            state,
            event: None,
            candidates_scored: 0,
        }
    }
}

/// Scan cameras in order; the first that sees the target becomes
/// responsible for it.
pub fn acquire(scene: &Scene, target: ObjectId) -> TrackingState {
    let Some(object) = scene.object(target) else {
        return TrackingState::NoResponsibleCamera;
    };
    scene
        .cameras()
        .find(|camera| camera_sees(scene.map(), camera, object))
        .map_or(TrackingState::NoResponsibleCamera, |camera| {
            TrackingState::Tracking {
                camera: camera.id(),
                object: target,
            }
        })
}

fn acquisition(scene: &Scene, target: ObjectId) -> Reevaluation {
    let state = acquire(scene, target);
    let event = match state {
        TrackingState::Tracking { camera, object } => {
            Some(TrackingEvent::Acquired { camera, object })
        }
        TrackingState::NoResponsibleCamera => None,
    };
    Reevaluation {
        state,
        event,
        candidates_scored: 0,
    }
}

/// One step of the responsibility state machine.
///
/// - `NoResponsibleCamera`: retry [`acquire`].
/// - `Tracking` but the camera has been removed from the scene: retry
///   [`acquire`]. If nothing sees the target the state drops to
///   `NoResponsibleCamera` and a `Lost` event names the removed camera.
/// - `Tracking` and the camera still sees its object: unchanged.
/// - Otherwise scan the cameras that hold a handshake, in order. Each
///   matches its handshake against the objects it currently sees; the
///   first qualifying match takes over responsibility. With no qualifying
///   match the previous pair is kept and a `Lost` event is reported.
pub fn reevaluate(
    previous: TrackingState,
    scene: &Scene,
    config: &HandoffConfig,
) -> Reevaluation {
    let (camera_id, object_id) = match previous {
        TrackingState::NoResponsibleCamera => return acquisition(scene, config.target),
        TrackingState::Tracking { camera, object } => (camera, object),
    };

    // The responsible camera was removed from the scene: nobody can send
    // handshakes for it, so start over from a fresh scan.
    let Some(responsible) = scene.camera(camera_id) else {
        let mut outcome = acquisition(scene, config.target);
        if outcome.event.is_none() {
            outcome.event = Some(TrackingEvent::Lost {
                camera: camera_id,
                object: object_id,
            });
        }
        return outcome;
    };

    let map = scene.map();
    let still_seen = scene
        .object(object_id)
        .is_some_and(|object| camera_sees(map, responsible, object));
    if still_seen {
        return Reevaluation::unchanged(previous);
    }

    let mut candidates_scored = 0u32;
    for camera in scene.cameras() {
        let Some(handshake) = camera.handshake() else {
            continue;
        };
        let visible: Vec<_> = scene
            .objects()
            .filter(|object| camera_sees(map, camera, object))
            .collect();
        candidates_scored += visible.len() as u32;
        let found = best_match(
            map,
            camera,
            visible,
            handshake.predicted_position,
            &handshake.appearance,
            &config.weights,
        );
        if let Some(m) = found.filter(|m| config.accepts(m.score.total)) {
            return Reevaluation {
                state: TrackingState::Tracking {
                    camera: camera.id(),
                    object: m.object,
                },
                event: Some(TrackingEvent::HandedOff {
                    from: camera_id,
                    to: camera.id(),
                    object: m.object,
                    score: m.score,
                }),
                candidates_scored,
            };
        }
    }

    Reevaluation {
        state: previous,
        event: Some(TrackingEvent::Lost {
            camera: camera_id,
            object: object_id,
        }),
        candidates_scored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_core::{Appearance, Position, Rotation};
    use handoff_scene::{CameraSpec, Handshake, ObjectSpec, SceneConfig, Waypoint};
    use handoff_space::GridMap;

    fn dot_at(id: u32, x: f64, y: f64) -> ObjectSpec {
        ObjectSpec {
            id: ObjectId(id),
            appearance: Appearance::from_rows(&[&[1.0]]).unwrap(),
            path: vec![Waypoint::new(x, y, 0, Rotation::Deg0)],
        }
    }

    /// 10x1 corridor: camera 0 at the left end sees x <= 3, camera 1 at
    /// the right end sees x >= 6.
    fn corridor(objects: Vec<ObjectSpec>) -> Scene {
        Scene::new(SceneConfig {
            map: GridMap::open(10, 1).unwrap(),
            cameras: vec![
                CameraSpec::new(0, 0, 0).with_range(3),
                CameraSpec::new(1, 9, 0).with_range(3),
            ],
            objects,
        })
        .unwrap()
    }

    fn handshake_for(scene: &mut Scene, to: u32, at: Position) {
        scene
            .deliver_handshake(
                CameraId(to),
                Handshake {
                    sender: CameraId(0),
                    predicted_position: at,
                    appearance: Appearance::from_rows(&[&[1.0]]).unwrap(),
                },
            )
            .unwrap();
    }

    fn tracking(camera: u32, object: u32) -> TrackingState {
        TrackingState::Tracking {
            camera: CameraId(camera),
            object: ObjectId(object),
        }
    }

    #[test]
    fn acquire_picks_first_camera_in_scan_order() {
        // Both cameras see x = 4 when unlimited.
        let s = Scene::new(SceneConfig {
            map: GridMap::open(10, 1).unwrap(),
            cameras: vec![CameraSpec::new(3, 9, 0), CameraSpec::new(1, 0, 0)],
            objects: vec![dot_at(0, 4.0, 0.0)],
        })
        .unwrap();
        assert_eq!(acquire(&s, ObjectId(0)), tracking(3, 0));
    }

    #[test]
    fn acquire_without_sighting_stays_unassigned() {
        let s = corridor(vec![dot_at(0, 5.0, 0.0)]);
        assert_eq!(acquire(&s, ObjectId(0)), TrackingState::NoResponsibleCamera);
        assert_eq!(acquire(&s, ObjectId(9)), TrackingState::NoResponsibleCamera);
    }

    #[test]
    fn unassigned_state_retries_acquisition() {
        let s = corridor(vec![dot_at(0, 7.0, 0.0)]);
        let r = reevaluate(
            TrackingState::NoResponsibleCamera,
            &s,
            &HandoffConfig::default(),
        );
        assert_eq!(r.state, tracking(1, 0));
        assert_eq!(
            r.event,
            Some(TrackingEvent::Acquired {
                camera: CameraId(1),
                object: ObjectId(0)
            })
        );
    }

    #[test]
    fn visible_object_keeps_its_camera() {
        let s = corridor(vec![dot_at(0, 2.0, 0.0)]);
        let r = reevaluate(tracking(0, 0), &s, &HandoffConfig::default());
        assert_eq!(r, Reevaluation::unchanged(tracking(0, 0)));
    }

    #[test]
    fn handshake_holder_takes_over() {
        let mut s = corridor(vec![dot_at(0, 7.0, 0.0)]);
        handshake_for(&mut s, 1, Position::new(7.0, 0.0));
        let r = reevaluate(tracking(0, 0), &s, &HandoffConfig::default());
        assert_eq!(r.state, tracking(1, 0));
        assert_eq!(r.candidates_scored, 1);
        match r.event {
            Some(TrackingEvent::HandedOff {
                from, to, object, score,
            }) => {
                assert_eq!((from, to, object), (CameraId(0), CameraId(1), ObjectId(0)));
                assert_eq!(score.total, 0.0);
            }
            other => panic!("expected handoff, got {other:?}"),
        }
    }

    #[test]
    fn camera_without_handshake_is_not_consulted() {
        let s = corridor(vec![dot_at(0, 7.0, 0.0)]);
        let r = reevaluate(tracking(0, 0), &s, &HandoffConfig::default());
        assert_eq!(r.state, tracking(0, 0));
        assert_eq!(r.candidates_scored, 0);
        assert_eq!(
            r.event,
            Some(TrackingEvent::Lost {
                camera: CameraId(0),
                object: ObjectId(0)
            })
        );
    }

    #[test]
    fn handshake_with_nothing_in_view_is_lost() {
        let mut s = corridor(vec![dot_at(0, 5.0, 0.0)]);
        handshake_for(&mut s, 1, Position::new(6.0, 0.0));
        let r = reevaluate(tracking(0, 0), &s, &HandoffConfig::default());
        assert_eq!(r.state, tracking(0, 0));
        assert!(matches!(r.event, Some(TrackingEvent::Lost { .. })));
    }

    #[test]
    fn threshold_rejects_poor_match() {
        let mut s = corridor(vec![dot_at(0, 9.0, 0.0)]);
        // Predicted far from where the object is: position term 0.1 * 3.
        handshake_for(&mut s, 1, Position::new(6.0, 0.0));
        let strict = HandoffConfig {
            match_threshold: Some(0.2),
            ..HandoffConfig::default()
        };
        let r = reevaluate(tracking(0, 0), &s, &strict);
        assert_eq!(r.state, tracking(0, 0));
        assert!(matches!(r.event, Some(TrackingEvent::Lost { .. })));

        let loose = HandoffConfig {
            match_threshold: Some(0.5),
            ..HandoffConfig::default()
        };
        assert_eq!(reevaluate(tracking(0, 0), &s, &loose).state, tracking(1, 0));
    }

    #[test]
    fn handoff_may_switch_object() {
        // Camera 1 sees a distractor closer to the prediction than the
        // true target; it takes responsibility for the distractor.
        let mut s = corridor(vec![dot_at(0, 9.0, 0.0), dot_at(1, 7.0, 0.0)]);
        handshake_for(&mut s, 1, Position::new(7.0, 0.0));
        let r = reevaluate(tracking(0, 0), &s, &HandoffConfig::default());
        assert_eq!(r.state, tracking(1, 1));
        assert_eq!(r.candidates_scored, 2);
    }

    #[test]
    fn removed_camera_with_target_out_of_view_drops_to_unassigned() {
        let mut s = corridor(vec![dot_at(0, 2.0, 0.0)]);
        s.remove_camera(CameraId(0));
        let r = reevaluate(tracking(0, 0), &s, &HandoffConfig::default());
        assert_eq!(r.state, TrackingState::NoResponsibleCamera);
        assert_eq!(
            r.event,
            Some(TrackingEvent::Lost {
                camera: CameraId(0),
                object: ObjectId(0)
            })
        );
    }

    #[test]
    fn removed_camera_is_replaced_by_one_that_sees_the_target() {
        let mut s = corridor(vec![dot_at(0, 7.0, 0.0)]);
        s.remove_camera(CameraId(0));
        let r = reevaluate(tracking(0, 0), &s, &HandoffConfig::default());
        assert_eq!(r.state, tracking(1, 0));
        assert_eq!(
            r.event,
            Some(TrackingEvent::Acquired {
                camera: CameraId(1),
                object: ObjectId(0)
            })
        );
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(
            TrackingState::NoResponsibleCamera.to_string(),
            "no responsible camera"
        );
        assert_eq!(tracking(2, 5).camera(), Some(CameraId(2)));
        assert_eq!(tracking(2, 5).object(), Some(ObjectId(5)));
        assert_eq!(TrackingState::default().camera(), None);
    }
}
