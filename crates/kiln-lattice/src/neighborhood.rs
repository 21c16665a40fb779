//! Precomputed von-Neumann neighborhood graphs.
//!
//! The transition rule scores interactions between a site and each of its
//! neighbors, weighted by distance. Neighborhoods are the same shape at
//! every site on a periodic grid, so the offset stencil is computed once
//! and resolved per site into flat indices at construction time.

use smallvec::SmallVec;

use crate::grid::SquareGrid;

/// Default Manhattan radius for reaction neighborhoods.
pub const DEFAULT_NEIGHBORHOOD_RADIUS: u32 = 5;

/// A neighbor of some site: its flat index and Euclidean distance.
pub type Neighbor = (usize, f64);

/// Precomputed neighborhoods for every site of a grid.
///
/// On small periodic grids two distinct offsets can wrap onto the same
/// site; both appear, each with its own distance, mirroring periodic
/// images. Offsets that wrap back onto the origin site are dropped.
#[derive(Clone, Debug)]
pub struct NeighborGraph {
    neighbors: Vec<Vec<Neighbor>>,
}

impl NeighborGraph {
    /// Build the von-Neumann neighborhood of Manhattan radius `radius`
    /// for every site of `grid`.
    pub fn von_neumann(grid: &SquareGrid, radius: u32) -> Self {
        let offsets = Self::stencil(grid.rank(), radius);
        let neighbors = (0..grid.site_count())
            .map(|site| {
                let (x, y, z) = grid.coords(site);
                offsets
                    .iter()
                    .filter_map(|&(dx, dy, dz, dist)| {
                        let nb = grid.index(x + dx, y + dy, z + dz);
                        (nb != site).then_some((nb, dist))
                    })
                    .collect()
            })
            .collect();
        Self { neighbors }
    }

    /// The neighbors of `site`, in stencil order.
    pub fn neighbors_of(&self, site: usize) -> &[Neighbor] {
        &self.neighbors[site]
    }

    /// Number of sites the graph covers.
    pub fn site_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Offset stencil: every nonzero offset with Manhattan norm within
    /// `radius`, paired with its Euclidean length.
    fn stencil(rank: usize, radius: u32) -> Vec<(i64, i64, i64, f64)> {
        let r = radius as i64;
        let z_range: SmallVec<[i64; 11]> = if rank == 2 {
            SmallVec::from_slice(&[0])
        } else {
            (-r..=r).collect()
        };
        let mut offsets = Vec::new();
        for dx in -r..=r {
            for dy in -r..=r {
                for &dz in &z_range {
                    let manhattan = dx.abs() + dy.abs() + dz.abs();
                    if manhattan == 0 || manhattan > r {
                        continue;
                    }
                    let dist = ((dx * dx + dy * dy + dz * dz) as f64).sqrt();
                    offsets.push((dx, dy, dz, dist));
                }
            }
        }
        offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn radius_one_2d_is_the_four_neighborhood() {
        let grid = SquareGrid::new(&[5, 5]).unwrap();
        let graph = NeighborGraph::von_neumann(&grid, 1);
        let nbrs = graph.neighbors_of(grid.index(2, 2, 0));
        assert_eq!(nbrs.len(), 4);
        assert!(nbrs.iter().all(|&(_, d)| (d - 1.0).abs() < 1e-12));
    }

    #[test]
    fn radius_one_3d_is_the_six_neighborhood() {
        let grid = SquareGrid::new(&[4, 4, 4]).unwrap();
        let graph = NeighborGraph::von_neumann(&grid, 1);
        assert_eq!(graph.neighbors_of(0).len(), 6);
    }

    #[test]
    fn no_site_neighbors_itself() {
        // 3x3 grid with radius 5: many offsets wrap onto the origin.
        let grid = SquareGrid::new(&[3, 3]).unwrap();
        let graph = NeighborGraph::von_neumann(&grid, 5);
        for site in 0..grid.site_count() {
            assert!(graph.neighbors_of(site).iter().all(|&(nb, _)| nb != site));
        }
    }

    proptest! {
        #[test]
        fn neighborhood_is_symmetric(w in 2usize..7, h in 2usize..7, radius in 1u32..4) {
            let grid = SquareGrid::new(&[w, h]).unwrap();
            let graph = NeighborGraph::von_neumann(&grid, radius);
            for site in 0..grid.site_count() {
                for &(nb, _) in graph.neighbors_of(site) {
                    prop_assert!(
                        graph.neighbors_of(nb).iter().any(|&(back, _)| back == site),
                        "site {} sees {} but not vice versa", site, nb
                    );
                }
            }
        }

        #[test]
        fn distances_are_positive_and_bounded(w in 2usize..7, h in 2usize..7, radius in 1u32..4) {
            let grid = SquareGrid::new(&[w, h]).unwrap();
            let graph = NeighborGraph::von_neumann(&grid, radius);
            for site in 0..grid.site_count() {
                for &(_, dist) in graph.neighbors_of(site) {
                    // Euclidean length never exceeds the Manhattan bound.
                    prop_assert!(dist > 0.0 && dist <= radius as f64);
                }
            }
        }
    }
}
