//! Candidate scoring and best-match selection.
//!
//! A candidate is scored against a target descriptor (position and
//! appearance, usually taken from a [`Handshake`](handoff_scene::Handshake))
//! as seen through one camera. Three distances are combined linearly:
//!
//! | term       | distance                                              |
//! |------------|-------------------------------------------------------|
//! | position   | Manhattan distance between positions                  |
//! | appearance | mean absolute difference, top-left anchored, zero-padded |
//! | size       | `|Δw| + |Δh|` of the non-zero bounding boxes          |
//!
//! Lower is better; a perfect match scores `0`.

use handoff_core::{Appearance, ObjectId, Position};
use handoff_scene::{Camera, MovingObject};
use handoff_space::GridMap;
use tracing::debug;

use crate::config::ScoreWeights;
use crate::observe::clip_appearance;

/// The weighted components of one score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreBreakdown {
    /// Weighted position term.
    pub position: f64,
    /// Weighted appearance term.
    pub appearance: f64,
    /// Weighted size term.
    pub size: f64,
    /// Sum of the three terms.
    pub total: f64,
}

/// The winning candidate of [`best_match`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// The matched object.
    pub object: ObjectId,
    /// Its score.
    pub score: ScoreBreakdown,
}

/// Score `candidate`, as `camera` sees it, against a target descriptor.
pub fn score_breakdown(
    map: &GridMap,
    camera: &Camera,
    candidate: &MovingObject,
    target_position: Position,
    target_appearance: &Appearance,
    weights: &ScoreWeights,
) -> ScoreBreakdown {
    let seen = clip_appearance(map, camera, candidate);
    let position = weights.position * candidate.position().manhattan(target_position);
    let appearance = weights.appearance * seen.mean_abs_diff(target_appearance);
    let size = weights.size * f64::from(seen.size_diff(target_appearance));
    ScoreBreakdown {
        position,
        appearance,
        size,
        total: position + appearance + size,
    }
}

/// Total score of `candidate`; see [`score_breakdown`].
pub fn score(
    map: &GridMap,
    camera: &Camera,
    candidate: &MovingObject,
    target_position: Position,
    target_appearance: &Appearance,
    weights: &ScoreWeights,
) -> f64 {
    score_breakdown(
        map,
        camera,
        candidate,
        target_position,
        target_appearance,
        weights,
    )
    .total
}

/// The candidate with the lowest score.
///
/// Ties go to the lowest object id, so the result does not depend on the
/// order candidates are supplied in. Returns `None` only when
/// `candidates` is empty.
pub fn best_match<'a>(
    map: &GridMap,
    camera: &Camera,
    candidates: impl IntoIterator<Item = &'a MovingObject>,
    target_position: Position,
    target_appearance: &Appearance,
    weights: &ScoreWeights,
) -> Option<Match> {
    let mut best: Option<Match> = None;
    for candidate in candidates {
        let breakdown = score_breakdown(
            map,
            camera,
            candidate,
            target_position,
            target_appearance,
            weights,
        );
        debug!(
            camera = %camera.id(),
            object = %candidate.id(),
            position = breakdown.position,
            appearance = breakdown.appearance,
            size = breakdown.size,
            total = breakdown.total,
            "scored candidate"
        );
        let better = match &best {
            None => true,
            Some(b) => {
                breakdown.total < b.score.total
                    || (breakdown.total == b.score.total && candidate.id() < b.object)
            }
        };
        if better {
            best = Some(Match {
                object: candidate.id(),
                score: breakdown,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_core::{CameraId, Cell, Rotation};
    use handoff_scene::{CameraSpec, ObjectSpec, Scene, SceneConfig, Waypoint};
    use proptest::prelude::*;

    fn block(w: usize, h: usize, v: f32) -> Appearance {
        let rows: Vec<Vec<f32>> = vec![vec![v; w]; h];
        let refs: Vec<&[f32]> = rows.iter().map(Vec::as_slice).collect();
        Appearance::from_rows(&refs).unwrap()
    }

    fn spec(id: u32, appearance: Appearance, x: f64, y: f64) -> ObjectSpec {
        ObjectSpec {
            id: ObjectId(id),
            appearance,
            path: vec![Waypoint::new(x, y, 0, Rotation::Deg0)],
        }
    }

    fn open_scene(objects: Vec<ObjectSpec>) -> Scene {
        Scene::new(SceneConfig {
            map: GridMap::open(12, 12).unwrap(),
            cameras: vec![CameraSpec::new(0, 0, 0)],
            objects,
        })
        .unwrap()
    }

    #[test]
    fn identical_descriptor_scores_zero() {
        let s = open_scene(vec![spec(0, block(2, 2, 0.5), 4.0, 4.0)]);
        let cam = s.camera(CameraId(0)).unwrap();
        let obj = s.object(ObjectId(0)).unwrap();
        let b = score_breakdown(
            s.map(),
            cam,
            obj,
            obj.position(),
            &clip_appearance(s.map(), cam, obj),
            &ScoreWeights::default(),
        );
        assert_eq!(b.total, 0.0);
        assert_eq!(b.position, 0.0);
        assert_eq!(b.appearance, 0.0);
        assert_eq!(b.size, 0.0);
    }

    #[test]
    fn breakdown_terms_are_weighted() {
        let s = open_scene(vec![spec(0, block(2, 1, 1.0), 4.0, 4.0)]);
        let cam = s.camera(CameraId(0)).unwrap();
        let obj = s.object(ObjectId(0)).unwrap();
        // Target: 1x1 block of 1.0 at (6, 5).
        let b = score_breakdown(
            s.map(),
            cam,
            obj,
            Position::new(6.0, 5.0),
            &block(1, 1, 1.0),
            &ScoreWeights::default(),
        );
        // Manhattan 3 * 0.1.
        assert!((b.position - 0.3).abs() < 1e-9);
        // Shared 2x1 box: |1-1| + |1-0| over 2 cells.
        assert!((b.appearance - 0.5).abs() < 1e-9);
        // Sizes 2x1 vs 1x1.
        assert!((b.size - 4.0).abs() < 1e-9);
        assert!((b.total - 4.8).abs() < 1e-9);
    }

    #[test]
    fn score_equals_breakdown_total() {
        let s = open_scene(vec![spec(0, block(3, 2, 0.25), 2.0, 7.0)]);
        let cam = s.camera(CameraId(0)).unwrap();
        let obj = s.object(ObjectId(0)).unwrap();
        let w = ScoreWeights::default();
        let target = block(1, 3, 0.75);
        let p = Position::new(9.0, 1.5);
        assert_eq!(
            score(s.map(), cam, obj, p, &target, &w),
            score_breakdown(s.map(), cam, obj, p, &target, &w).total
        );
    }

    #[test]
    fn empty_candidate_set_has_no_match() {
        let s = open_scene(vec![spec(0, block(1, 1, 1.0), 1.0, 1.0)]);
        let cam = s.camera(CameraId(0)).unwrap();
        let none: Vec<&MovingObject> = Vec::new();
        assert_eq!(
            best_match(
                s.map(),
                cam,
                none,
                Position::new(0.0, 0.0),
                &block(1, 1, 1.0),
                &ScoreWeights::default()
            ),
            None
        );
    }

    #[test]
    fn ground_truth_wins_over_distractors() {
        let s = open_scene(vec![
            spec(0, block(1, 1, 1.0), 2.0, 2.0),
            spec(1, block(2, 2, 0.6), 6.0, 6.0),
            spec(2, block(3, 1, 0.6), 9.0, 2.0),
            spec(3, block(2, 2, 0.2), 3.0, 9.0),
        ]);
        let cam = s.camera(CameraId(0)).unwrap();
        let truth = s.object(ObjectId(1)).unwrap();
        let target = clip_appearance(s.map(), cam, truth);
        let m = best_match(
            s.map(),
            cam,
            s.objects(),
            truth.position(),
            &target,
            &ScoreWeights::default(),
        )
        .unwrap();
        assert_eq!(m.object, ObjectId(1));
        assert_eq!(m.score.total, 0.0);
    }

    #[test]
    fn ties_go_to_lowest_id() {
        // Insert the higher id first; identical descriptors tie exactly.
        let s = open_scene(vec![
            spec(5, block(1, 1, 1.0), 4.0, 4.0),
            spec(2, block(1, 1, 1.0), 4.0, 4.0),
        ]);
        let cam = s.camera(CameraId(0)).unwrap();
        let m = best_match(
            s.map(),
            cam,
            s.objects(),
            Position::new(4.0, 4.0),
            &block(1, 1, 1.0),
            &ScoreWeights::default(),
        )
        .unwrap();
        assert_eq!(m.object, ObjectId(2));
    }

    #[test]
    fn occluded_candidate_is_penalised() {
        // Same object twice; the hidden copy clips to blank and loses on
        // appearance and size.
        let map = GridMap::with_walls(12, 12, [Cell::new(3, 0), Cell::new(3, 1)]).unwrap();
        let s = Scene::new(SceneConfig {
            map,
            cameras: vec![CameraSpec::new(0, 0, 0)],
            objects: vec![
                spec(0, block(1, 1, 1.0), 6.0, 0.0),
                spec(1, block(1, 1, 1.0), 0.0, 6.0),
            ],
        })
        .unwrap();
        let cam = s.camera(CameraId(0)).unwrap();
        let m = best_match(
            s.map(),
            cam,
            s.objects(),
            Position::new(3.0, 3.0),
            &block(1, 1, 1.0),
            &ScoreWeights::default(),
        )
        .unwrap();
        assert_eq!(m.object, ObjectId(1));
    }

    proptest! {
        #[test]
        fn score_is_deterministic(
            tx in 0.0f64..12.0, ty in 0.0f64..12.0,
            v in 0.0f32..1.0,
        ) {
            let s = open_scene(vec![spec(0, block(2, 2, 0.5), 4.0, 4.0)]);
            let cam = s.camera(CameraId(0)).unwrap();
            let obj = s.object(ObjectId(0)).unwrap();
            let target = block(2, 1, v);
            let w = ScoreWeights::default();
            let p = Position::new(tx, ty);
            let a = score(s.map(), cam, obj, p, &target, &w);
            let b = score(s.map(), cam, obj, p, &target, &w);
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }

        #[test]
        fn score_strictly_increases_with_position_distance(
            near in 0u32..5, extra in 1u32..6,
        ) {
            let s = open_scene(vec![spec(0, block(1, 1, 1.0), 4.0, 4.0)]);
            let cam = s.camera(CameraId(0)).unwrap();
            let obj = s.object(ObjectId(0)).unwrap();
            let target = block(1, 1, 1.0);
            let w = ScoreWeights::default();
            let close = Position::new(4.0 + f64::from(near), 4.0);
            let far = Position::new(4.0 + f64::from(near + extra), 4.0);
            prop_assert!(
                score(s.map(), cam, obj, close, &target, &w)
                    < score(s.map(), cam, obj, far, &target, &w)
            );
        }
    }
}
