//! Uniform spatial hashing for fixed-radius neighbor queries.
//!
//! Points are binned into cubic cells keyed by `floor(coordinate / cell_size)` on each
//! axis. A radius query visits every cell overlapping the query's bounding cube and then
//! filters candidates by exact Euclidean distance, so the cells only prune the search.

use nalgebra::Point3;
use std::collections::HashMap;

type CellKey = (i64, i64, i64);

/// A sparse uniform grid mapping cells to the values stored in them.
///
/// Only occupied cells are allocated, so the hash works for structures of any extent
/// without a precomputed bounding box. Several values may share a position.
///
/// # Performance
///
/// - Insertion: **O(1)** amortized.
/// - Radius query: proportional to the number of cells overlapped plus the values in
///   them; with `cell_size` close to the query radius that is 27 cells.
#[derive(Debug, Clone)]
pub struct SpatialHash3D<V> {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<(Point3<f64>, V)>>,
    len: usize,
}

impl<V> SpatialHash3D<V> {
    /// Creates an empty hash.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not a positive finite number.
    pub fn new(cell_size: f64) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "Cell size must be positive"
        );
        Self {
            cell_size,
            cells: HashMap::new(),
            len: 0,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn axis_key(&self, coordinate: f64) -> i64 {
        (coordinate / self.cell_size).floor() as i64
    }

    #[inline]
    fn cell_key(&self, position: &Point3<f64>) -> CellKey {
        (
            self.axis_key(position.x),
            self.axis_key(position.y),
            self.axis_key(position.z),
        )
    }

    /// Stores `value` in the cell containing `position`.
    pub fn put(&mut self, position: Point3<f64>, value: V) {
        let key = self.cell_key(&position);
        self.cells.entry(key).or_default().push((position, value));
        self.len += 1;
    }

    /// Every stored entry whose position lies within `radius` (inclusive) of `position`.
    ///
    /// No particular order is guaranteed.
    pub fn neighbors(&self, position: &Point3<f64>, radius: f64) -> Vec<(&Point3<f64>, &V)> {
        let radius_sq = radius * radius;
        let (x0, y0, z0) = (
            self.axis_key(position.x - radius),
            self.axis_key(position.y - radius),
            self.axis_key(position.z - radius),
        );
        let (x1, y1, z1) = (
            self.axis_key(position.x + radius),
            self.axis_key(position.y + radius),
            self.axis_key(position.z + radius),
        );

        let mut found = Vec::new();
        for x in x0..=x1 {
            for y in y0..=y1 {
                for z in z0..=z1 {
                    let Some(cell) = self.cells.get(&(x, y, z)) else {
                        continue;
                    };
                    for (p, v) in cell {
                        if (p - position).norm_squared() <= radius_sq {
                            found.push((p, v));
                        }
                    }
                }
            }
        }
        found
    }

    /// Values of [`SpatialHash3D::neighbors`] without their positions.
    pub fn neighbor_values(&self, position: &Point3<f64>, radius: f64) -> Vec<&V> {
        self.neighbors(position, radius)
            .into_iter()
            .map(|(_, v)| v)
            .collect()
    }
}
