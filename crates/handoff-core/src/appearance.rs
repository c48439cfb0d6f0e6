//! Appearance bitmaps and quarter-turn rotation.
//!
//! An [`Appearance`] is a fixed `width × height` grid of non-negative
//! intensities stored row-major. Zero means "no silhouette here"; clipping
//! zeroes cells a camera cannot see, so a blank bitmap means "not seen".

use std::fmt;
use std::ops::Add;

use crate::error::ContractViolation;

/// A quarter-turn rotation, counter-clockwise on the `(x right, y down)` grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// One quarter turn.
    Deg90,
    /// Half turn.
    Deg180,
    /// Three quarter turns.
    Deg270,
}

impl Rotation {
    /// Angle in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    fn quarter_turns(self) -> u32 {
        self.degrees() / 90
    }

    fn from_quarter_turns(n: u32) -> Self {
        match n % 4 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }
}

impl TryFrom<u32> for Rotation {
    type Error = ContractViolation;

    fn try_from(degrees: u32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(ContractViolation::UnsupportedRotation { degrees }),
        }
    }
}

impl Add for Rotation {
    type Output = Rotation;

    fn add(self, rhs: Rotation) -> Rotation {
        Rotation::from_quarter_turns(self.quarter_turns() + rhs.quarter_turns())
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Tight bounding box of the non-zero cells of an appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    /// Leftmost non-zero column.
    pub min_x: u32,
    /// Topmost non-zero row.
    pub min_y: u32,
    /// Box width in cells.
    pub width: u32,
    /// Box height in cells.
    pub height: u32,
}

/// A fixed-size intensity bitmap.
#[derive(Clone, Debug, PartialEq)]
pub struct Appearance {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Appearance {
    /// Build an appearance from row-major data.
    ///
    /// Returns `Err(ContractViolation::MalformedBitmap)` if either dimension
    /// is zero or `data.len() != width * height`.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Result<Self, ContractViolation> {
        if width == 0 || height == 0 || data.len() != (width as usize) * (height as usize) {
            return Err(ContractViolation::MalformedBitmap {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an appearance from a list of equal-length rows (top row first).
    pub fn from_rows(rows: &[&[f32]]) -> Result<Self, ContractViolation> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for row in rows {
            if row.len() as u32 != width {
                return Err(ContractViolation::MalformedBitmap {
                    width,
                    height,
                    len: data.len() + row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::new(width, height, data)
    }

    /// An all-zero appearance.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width as usize) * (height as usize)],
        }
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major intensity data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Intensity at `(x, y)`, or `0.0` outside the bitmap.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Zero the cell at `(x, y)`. Out-of-bitmap cells are ignored.
    pub fn clear(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.data[(y as usize) * (self.width as usize) + x as usize] = 0.0;
        }
    }

    /// True if every cell is zero.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&v| v == 0.0)
    }

    /// Return this bitmap rotated by `rotation`.
    pub fn rotated(&self, rotation: Rotation) -> Appearance {
        let (w, h) = (self.width, self.height);
        let (nw, nh) = match rotation {
            Rotation::Deg0 | Rotation::Deg180 => (w, h),
            Rotation::Deg90 | Rotation::Deg270 => (h, w),
        };
        let mut data = Vec::with_capacity(self.data.len());
        for y in 0..nh {
            for x in 0..nw {
                let v = match rotation {
                    Rotation::Deg0 => self.get(x, y),
                    Rotation::Deg90 => self.get(w - 1 - y, x),
                    Rotation::Deg180 => self.get(w - 1 - x, h - 1 - y),
                    Rotation::Deg270 => self.get(y, h - 1 - x),
                };
                data.push(v);
            }
        }
        Appearance {
            width: nw,
            height: nh,
            data,
        }
    }

    /// Rotate by an angle in degrees.
    ///
    /// Only 0, 90, 180 and 270 are accepted; anything else is a
    /// [`ContractViolation::UnsupportedRotation`].
    pub fn rotate_degrees(&self, degrees: u32) -> Result<Appearance, ContractViolation> {
        Ok(self.rotated(Rotation::try_from(degrees)?))
    }

    /// Tight bounding box of the non-zero cells, or `None` if blank.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        let mut any = false;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) != 0.0 {
                    any = true;
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }
        any.then(|| BoundingBox {
            min_x,
            min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    /// Effective `(width, height)` of the non-zero region; `(0, 0)` if blank.
    pub fn effective_size(&self) -> (u32, u32) {
        self.bounding_box().map_or((0, 0), |b| (b.width, b.height))
    }

    /// Mean absolute per-cell difference over the shared bounding box.
    ///
    /// Both bitmaps are anchored at their top-left corner on a
    /// `max(width) × max(height)` canvas; the smaller is zero-padded.
    pub fn mean_abs_diff(&self, other: &Appearance) -> f64 {
        let w = self.width.max(other.width);
        let h = self.height.max(other.height);
        if w == 0 || h == 0 {
            return 0.0;
        }
        let mut sum = 0.0f64;
        for y in 0..h {
            for x in 0..w {
                sum += f64::from((self.get(x, y) - other.get(x, y)).abs());
            }
        }
        sum / (f64::from(w) * f64::from(h))
    }

    /// `|Δwidth| + |Δheight|` between the effective sizes of two bitmaps.
    pub fn size_diff(&self, other: &Appearance) -> u32 {
        let (aw, ah) = self.effective_size();
        let (bw, bh) = other.effective_size();
        aw.abs_diff(bw) + ah.abs_diff(bh)
    }
}
