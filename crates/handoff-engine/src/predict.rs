//! Next-position prediction.

use handoff_core::{ContractViolation, Position};
use handoff_scene::MovingObject;

/// Linear extrapolation from the last two samples:
/// `current + (current − previous)`.
///
/// # Errors
///
/// [`ContractViolation::PredictionBeforeFirstTick`] if the object has not
/// advanced yet and so has no previous position.
pub fn predict_next_position(object: &MovingObject) -> Result<Position, ContractViolation> {
    let previous = object
        .previous_position()
        .ok_or(ContractViolation::PredictionBeforeFirstTick {
            object: object.id(),
        })?;
    let current = object.position();
    Ok(current + (current - previous))
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_core::{Appearance, ObjectId, Rotation};
    use handoff_scene::{ObjectSpec, Waypoint};

    fn walker(path: Vec<Waypoint>) -> MovingObject {
        MovingObject::new(ObjectSpec {
            id: ObjectId(7),
            appearance: Appearance::blank(1, 1),
            path,
        })
        .unwrap()
    }

    #[test]
    fn before_first_tick_is_a_contract_violation() {
        let o = walker(vec![Waypoint::new(0.0, 0.0, 0, Rotation::Deg0)]);
        assert_eq!(
            predict_next_position(&o),
            Err(ContractViolation::PredictionBeforeFirstTick {
                object: ObjectId(7)
            })
        );
    }

    #[test]
    fn extrapolates_constant_velocity() {
        let mut o = walker(vec![
            Waypoint::new(0.0, 0.0, 4, Rotation::Deg0),
            Waypoint::new(8.0, 4.0, 0, Rotation::Deg0),
        ]);
        o.advance();
        let p = predict_next_position(&o).unwrap();
        assert!(p.approx_eq(Position::new(4.0, 2.0), 1e-9));
    }

    #[test]
    fn stationary_object_predicts_its_own_position() {
        let mut o = walker(vec![Waypoint::new(3.0, 1.0, 0, Rotation::Deg0)]);
        o.advance();
        assert_eq!(predict_next_position(&o), Ok(Position::new(3.0, 1.0)));
    }

    #[test]
    fn prediction_does_not_see_the_corner() {
        // One tick before the turn, the prediction overshoots along the
        // current heading.
        let mut o = walker(vec![
            Waypoint::new(0.0, 0.0, 2, Rotation::Deg0),
            Waypoint::new(2.0, 0.0, 2, Rotation::Deg0),
            Waypoint::new(2.0, 2.0, 0, Rotation::Deg0),
        ]);
        o.advance();
        o.advance();
        let p = predict_next_position(&o).unwrap();
        assert!(p.approx_eq(Position::new(3.0, 0.0), 1e-9));
        o.advance();
        assert!(o.position().approx_eq(Position::new(2.0, 1.0), 1e-9));
    }
}
