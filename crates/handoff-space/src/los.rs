//! Discrete line of sight.
//!
//! Bresenham's line algorithm split into its shallow (`|dy| < |dx|`) and
//! steep halves. Endpoints are always ordered so the walk runs toward
//! increasing x (shallow) or increasing y (steep); this canonical ordering
//! is what makes `a → b` and `b → a` traverse the same cells.

use handoff_core::{Cell, ContractViolation};

use crate::map::GridMap;

/// Whether the straight segment `a → b` crosses no occupied cell.
///
/// Both endpoints are tested, so an occupied endpoint blocks the line.
///
/// # Errors
///
/// Returns [`ContractViolation::CellOutOfBounds`] if either endpoint lies
/// outside `map`.
pub fn line_of_sight(map: &GridMap, a: Cell, b: Cell) -> Result<bool, ContractViolation> {
    map.check_bounds(a)?;
    map.check_bounds(b)?;
    Ok(is_clear(map, a, b))
}

/// Unchecked walk. Both endpoints must be in bounds; every cell on a
/// Bresenham segment lies inside the endpoints' bounding box, so no
/// further checks are needed.
pub(crate) fn is_clear(map: &GridMap, a: Cell, b: Cell) -> bool {
    walk(a, b, |cell| !map.occupied_at(cell.x, cell.y))
}

/// The cells on the digital segment between `a` and `b`, in canonical
/// walk order (independent of argument order).
pub fn segment_cells(a: Cell, b: Cell) -> Vec<Cell> {
    let mut cells = Vec::new();
    walk(a, b, |cell| {
        cells.push(cell);
        true
    });
    cells
}

/// Visit each cell on the segment until `visit` returns `false`.
/// Returns `true` if every cell was accepted.
///
/// Deltas and error terms are `i64`, so any pair of `i32` cells is safe.
fn walk(a: Cell, b: Cell, visit: impl FnMut(Cell) -> bool) -> bool {
    let dx = (i64::from(b.x) - i64::from(a.x)).abs();
    let dy = (i64::from(b.y) - i64::from(a.y)).abs();
    if dy < dx {
        if a.x > b.x {
            walk_shallow(b, a, visit)
        } else {
            walk_shallow(a, b, visit)
        }
    } else if a.y > b.y {
        walk_steep(b, a, visit)
    } else {
        walk_steep(a, b, visit)
    }
}

fn walk_shallow(from: Cell, to: Cell, mut visit: impl FnMut(Cell) -> bool) -> bool {
    let dx = i64::from(to.x) - i64::from(from.x);
    let mut dy = i64::from(to.y) - i64::from(from.y);
    let mut step = 1;
    if dy < 0 {
        step = -1;
        dy = -dy;
    }
    let mut d = 2 * dy - dx;
    let mut y = from.y;
    for x in from.x..=to.x {
        if !visit(Cell::new(x, y)) {
            return false;
        }
        if d > 0 {
            y += step;
            d += 2 * (dy - dx);
        } else {
            d += 2 * dy;
        }
    }
    true
}

fn walk_steep(from: Cell, to: Cell, mut visit: impl FnMut(Cell) -> bool) -> bool {
    let mut dx = i64::from(to.x) - i64::from(from.x);
    let dy = i64::from(to.y) - i64::from(from.y);
    let mut step = 1;
    if dx < 0 {
        step = -1;
        dx = -dx;
    }
    let mut d = 2 * dx - dy;
    let mut x = from.x;
    for y in from.y..=to.y {
        if !visit(Cell::new(x, y)) {
            return false;
        }
        if d > 0 {
            x += step;
            d += 2 * (dx - dy);
        } else {
            d += 2 * dx;
        }
    }
    true
}
