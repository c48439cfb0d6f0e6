//! Per-viewpoint visible-area computation.
//!
//! The fill starts at the viewpoint and grows through 8-connected
//! neighbours, but only *through* cells that passed the line-of-sight
//! test. A cell that fails is marked blocked and becomes part of the
//! frontier boundary; nothing behind it is reached from that side. This
//! keeps the number of line-of-sight walks proportional to the visible
//! region plus its rim rather than the whole map.

use std::collections::VecDeque;

use handoff_core::{Cell, ContractViolation, MapInstanceId};
use rayon::prelude::*;
use tracing::debug;

use crate::los::is_clear;
use crate::map::GridMap;

/// Tri-state fill marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellState {
    Unvisited,
    Visible,
    Blocked,
}

/// Where a camera looks from, and how far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewpoint {
    /// The observing cell.
    pub origin: Cell,
    /// Optional Chebyshev view radius. `None` = limited only by walls.
    pub range: Option<u32>,
}

impl Viewpoint {
    /// An unlimited-range viewpoint.
    pub fn new(origin: Cell) -> Self {
        Self {
            origin,
            range: None,
        }
    }

    /// A viewpoint limited to `range` cells (Chebyshev).
    pub fn with_range(origin: Cell, range: u32) -> Self {
        Self {
            origin,
            range: Some(range),
        }
    }

    /// Whether `cell` is within the view radius (ignores walls).
    pub fn in_range(&self, cell: Cell) -> bool {
        self.range.map_or(true, |r| self.origin.chebyshev(cell) <= r)
    }

    /// Whether `cell` is directly visible: in bounds, in range, and with
    /// clear line of sight from the origin.
    ///
    /// Out-of-bounds cells are simply not visible. The origin itself must
    /// be in bounds; an out-of-bounds origin sees nothing.
    pub fn sees(&self, map: &GridMap, cell: Cell) -> bool {
        map.contains(self.origin)
            && map.contains(cell)
            && self.in_range(cell)
            && is_clear(map, self.origin, cell)
    }
}

/// The set of cells visible from one viewpoint on one map.
///
/// Records the map instance and viewpoint it was computed for, so a
/// stale area (map replaced, camera moved) can be detected with
/// [`is_current_for`](Self::is_current_for).
#[derive(Clone, Debug)]
pub struct VisibleArea {
    width: u32,
    height: u32,
    visible: Vec<bool>,
    viewpoint: Viewpoint,
    map_id: MapInstanceId,
    tested: usize,
}

impl VisibleArea {
    /// Grid width (equal to the source map's).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height (equal to the source map's).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major visibility flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.visible
    }

    /// Whether `cell` is visible. Out-of-bounds cells are not.
    pub fn contains(&self, cell: Cell) -> bool {
        if cell.x < 0 || cell.y < 0 || cell.x as u32 >= self.width || cell.y as u32 >= self.height
        {
            return false;
        }
        self.visible[(cell.y as usize) * (self.width as usize) + cell.x as usize]
    }

    /// Number of visible cells.
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|&&v| v).count()
    }

    /// Iterate over visible cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let w = self.width as usize;
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(move |(i, _)| Cell::new((i % w) as i32, (i / w) as i32))
    }

    /// Number of cells the fill evaluated (visible plus blocked rim).
    pub fn tested_count(&self) -> usize {
        self.tested
    }

    /// The viewpoint this area was computed from.
    pub fn viewpoint(&self) -> Viewpoint {
        self.viewpoint
    }

    /// Instance id of the map this area was computed against.
    pub fn map_id(&self) -> MapInstanceId {
        self.map_id
    }

    /// True if this area was computed for exactly `map` and `viewpoint`.
    pub fn is_current_for(&self, map: &GridMap, viewpoint: Viewpoint) -> bool {
        self.map_id == map.instance_id() && self.viewpoint == viewpoint
    }
}

/// Flood-fill the cells visible from `viewpoint`.
///
/// Every cell is evaluated at most once. Occupied cells, cells beyond the
/// view range and cells without line of sight are marked blocked and not
/// expanded. The fill terminates on any finite grid.
///
/// # Errors
///
/// Returns [`ContractViolation::CellOutOfBounds`] if the origin lies
/// outside `map`.
pub fn compute_visible_area(
    map: &GridMap,
    viewpoint: Viewpoint,
) -> Result<VisibleArea, ContractViolation> {
    map.check_bounds(viewpoint.origin)?;

    let mut state = vec![CellState::Unvisited; map.cell_count()];
    let mut queue = VecDeque::new();
    let mut tested = 0usize;
    queue.push_back(viewpoint.origin);

    while let Some(cell) = queue.pop_front() {
        let Some(i) = map.index(cell) else { continue };
        if state[i] != CellState::Unvisited {
            continue;
        }
        tested += 1;

        let visible = !map.is_occupied(cell)
            && viewpoint.in_range(cell)
            && is_clear(map, viewpoint.origin, cell);
        if !visible {
            state[i] = CellState::Blocked;
            continue;
        }

        state[i] = CellState::Visible;
        for n in map.neighbours8(cell) {
            if map.index(n).is_some_and(|j| state[j] == CellState::Unvisited) {
                queue.push_back(n);
            }
        }
    }

    let visible: Vec<bool> = state.iter().map(|&s| s == CellState::Visible).collect();
    let area = VisibleArea {
        width: map.width(),
        height: map.height(),
        visible,
        viewpoint,
        map_id: map.instance_id(),
        tested,
    };
    debug!(
        origin = %viewpoint.origin,
        visible = area.visible_count(),
        tested,
        "visible area computed"
    );
    Ok(area)
}

/// Compute visible areas for many viewpoints in parallel.
///
/// Each viewpoint is independent: tasks only read the shared immutable
/// map. Results are returned in input order.
pub fn compute_visible_areas(
    map: &GridMap,
    viewpoints: &[Viewpoint],
) -> Result<Vec<VisibleArea>, ContractViolation> {
    viewpoints
        .par_iter()
        .map(|&vp| compute_visible_area(map, vp))
        .collect()
}
