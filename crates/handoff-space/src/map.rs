//! Immutable wall/free occupancy grid.

use handoff_core::{Cell, ContractViolation, MapInstanceId};
use smallvec::SmallVec;

use crate::error::SpaceError;

/// All 8 offsets as `(dx, dy)`: W, E, N, S, NW, NE, SW, SE.
const OFFSETS_8: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// A two-dimensional occupancy grid.
///
/// Cell `(x, y)` is stored at flat index `y * width + x`. `true` means
/// occupied (an opaque wall). Maps never change after construction; a
/// layout change is a new map with a new [`MapInstanceId`].
#[derive(Debug, Clone)]
pub struct GridMap {
    width: u32,
    height: u32,
    occupied: Vec<bool>,
    instance_id: MapInstanceId,
}

impl GridMap {
    /// Largest accepted dimension: cell coordinates are `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Build a map from row-major occupancy.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0,
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds `i32::MAX`,
    /// or `Err(SpaceError::CellCountMismatch)` on a length mismatch.
    pub fn new(width: u32, height: u32, occupied: Vec<bool>) -> Result<Self, SpaceError> {
        Self::check_dims(width, height)?;
        let expected = (width as usize) * (height as usize);
        if occupied.len() != expected {
            return Err(SpaceError::CellCountMismatch {
                expected,
                actual: occupied.len(),
            });
        }
        Ok(Self {
            width,
            height,
            occupied,
            instance_id: MapInstanceId::next(),
        })
    }

    /// A wall-free map.
    pub fn open(width: u32, height: u32) -> Result<Self, SpaceError> {
        Self::check_dims(width, height)?;
        Self::new(width, height, vec![false; (width as usize) * (height as usize)])
    }

    /// A map that is free except for the given wall cells.
    pub fn with_walls(
        width: u32,
        height: u32,
        walls: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, SpaceError> {
        Self::check_dims(width, height)?;
        let mut occupied = vec![false; (width as usize) * (height as usize)];
        for cell in walls {
            if !in_bounds(cell, width, height) {
                return Err(SpaceError::WallOutOfBounds {
                    cell,
                    width,
                    height,
                });
            }
            occupied[(cell.y as usize) * (width as usize) + cell.x as usize] = true;
        }
        Self::new(width, height, occupied)
    }

    fn check_dims(width: u32, height: u32) -> Result<(), SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(())
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.occupied.len()
    }

    /// Unique id of this map instance.
    pub fn instance_id(&self) -> MapInstanceId {
        self.instance_id
    }

    /// Whether `cell` lies inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        in_bounds(cell, self.width, self.height)
    }

    /// Return `Ok(())` if `cell` is inside the grid, else a
    /// [`ContractViolation::CellOutOfBounds`].
    pub fn check_bounds(&self, cell: Cell) -> Result<(), ContractViolation> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(ContractViolation::CellOutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Flat row-major index of an in-bounds cell.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| (cell.y as usize) * (self.width as usize) + cell.x as usize)
    }

    /// Whether `cell` is a wall. Out-of-bounds cells are reported as walls.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.index(cell).map_or(true, |i| self.occupied[i])
    }

    /// Occupancy of an in-bounds cell. Callers must have checked bounds.
    pub(crate) fn occupied_at(&self, x: i32, y: i32) -> bool {
        self.occupied[(y as usize) * (self.width as usize) + x as usize]
    }

    /// In-bounds 8-connected neighbours of `cell`.
    pub fn neighbours8(&self, cell: Cell) -> SmallVec<[Cell; 8]> {
        OFFSETS_8
            .iter()
            .map(|&(dx, dy)| cell.offset(dx, dy))
            .filter(|&n| self.contains(n))
            .collect()
    }
}

fn in_bounds(cell: Cell, width: u32, height: u32) -> bool {
    cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < width && (cell.y as u32) < height
}
