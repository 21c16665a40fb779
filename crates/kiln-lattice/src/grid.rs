//! Periodic square grids in two or three dimensions.

use crate::error::GridError;

/// A periodic square grid.
///
/// Sites are addressed row-major by flat index. Coordinates wrap at every
/// boundary, so every site has a full neighborhood regardless of position.
/// 2D grids are stored with a depth of 1, which keeps the index math
/// uniform across ranks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquareGrid {
    rank: usize,
    width: usize,
    height: usize,
    depth: usize,
}

impl SquareGrid {
    /// Build a grid from a dimension list of rank 2 (`[w, h]`) or rank 3
    /// (`[w, h, d]`).
    pub fn new(dims: &[usize]) -> Result<Self, GridError> {
        if dims.len() != 2 && dims.len() != 3 {
            return Err(GridError::BadRank { rank: dims.len() });
        }
        if dims.contains(&0) {
            return Err(GridError::EmptySide {
                dims: dims.to_vec(),
            });
        }
        Ok(Self {
            rank: dims.len(),
            width: dims[0],
            height: dims[1],
            depth: if dims.len() == 3 { dims[2] } else { 1 },
        })
    }

    /// A cube (or square) with the given edge length and rank.
    pub fn cube(edge: usize, rank: usize) -> Result<Self, GridError> {
        match rank {
            2 => Self::new(&[edge, edge]),
            3 => Self::new(&[edge, edge, edge]),
            other => Err(GridError::BadRank { rank: other }),
        }
    }

    /// Grid rank: 2 or 3.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Side lengths as declared at construction.
    pub fn dims(&self) -> Vec<usize> {
        if self.rank == 2 {
            vec![self.width, self.height]
        } else {
            vec![self.width, self.height, self.depth]
        }
    }

    /// Total number of sites.
    pub fn site_count(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Flat index of the site at possibly-out-of-range coordinates,
    /// wrapping periodically.
    pub fn index(&self, x: i64, y: i64, z: i64) -> usize {
        let wrap = |v: i64, side: usize| -> usize {
            (v.rem_euclid(side as i64)) as usize
        };
        let (x, y, z) = (
            wrap(x, self.width),
            wrap(y, self.height),
            wrap(z, self.depth),
        );
        (z * self.height + y) * self.width + x
    }

    /// Coordinates of the site at `index`.
    pub fn coords(&self, index: usize) -> (i64, i64, i64) {
        let x = index % self.width;
        let y = (index / self.width) % self.height;
        let z = index / (self.width * self.height);
        (x as i64, y as i64, z as i64)
    }
}
