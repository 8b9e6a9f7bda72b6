// src/data_analysis/hexbin.rs

use std::collections::BTreeMap;

use crate::error::BinningError;

/// A degenerate extent is widened by this fraction of its magnitude.
const NONSINGULAR_EXPANDER: f64 = 0.1;
const NONSINGULAR_TINY: f64 = 1e-15;
/// Relative padding applied to the X extent so the maximum lands inside the grid.
const X_EXTENT_PADDING: f64 = 1e-9;

/// Unit hexagon, scaled by (sx, sy / 3) around each center.
const HEXAGON_UNIT_VERTICES: [(f64, f64); 6] = [
    (0.5, -0.5),
    (0.5, 0.5),
    (0.0, 1.0),
    (-0.5, 0.5),
    (-0.5, -0.5),
    (0.0, -1.0),
];

/// Centers on grid corners come first, centers on cell midpoints second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Lattice {
    Main,
    Offset,
}

/// One populated hexagon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexBin {
    pub center: (f64, f64),
    /// Number of samples with a finite metric that fell in this hexagon.
    pub count: usize,
    /// Mean metric of those samples.
    pub mean: f64,
}

/// Result of binning samples onto a hexagonal lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct HexbinGrid {
    /// Hexagons across X.
    pub nx: usize,
    /// Hexagons along Y.
    pub ny: usize,
    pub x_extent: (f64, f64),
    pub y_extent: (f64, f64),
    /// Horizontal spacing between hexagon centers.
    pub sx: f64,
    /// Vertical spacing between rows of the same lattice.
    pub sy: f64,
    /// Populated hexagons, main lattice first.
    pub bins: Vec<HexBin>,
    /// Samples left out because a coordinate or the metric was not finite.
    pub skipped: usize,
}

impl HexbinGrid {
    /// Corner points of the hexagon around `center`, in data coordinates.
    pub fn hexagon_vertices(&self, center: (f64, f64)) -> Vec<(f64, f64)> {
        HEXAGON_UNIT_VERTICES
            .iter()
            .map(|&(ux, uy)| (center.0 + ux * self.sx, center.1 + uy * self.sy / 3.0))
            .collect()
    }

    /// Smallest and largest bin mean, if any bin was populated.
    pub fn mean_range(&self) -> Option<(f64, f64)> {
        self.bins.iter().fold(None, |acc, bin| match acc {
            None => Some((bin.mean, bin.mean)),
            Some((lo, hi)) => Some((lo.min(bin.mean), hi.max(bin.mean))),
        })
    }

    /// Total number of samples that landed in a hexagon.
    pub fn binned_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Plot extent that fully contains every hexagon of the lattice.
    pub fn plot_extent(&self) -> ((f64, f64), (f64, f64)) {
        (
            (self.x_extent.0 - self.sx * 0.5, self.x_extent.1 + self.sx * 0.5),
            (self.y_extent.0 - self.sy / 3.0, self.y_extent.1 + self.sy / 3.0),
        )
    }
}

/// Widens an extent that is empty or too narrow to divide into bins.
fn nonsingular(min: f64, max: f64) -> (f64, f64) {
    let max_abs = min.abs().max(max.abs());
    if max_abs < (1e6 / NONSINGULAR_TINY) * f64::MIN_POSITIVE {
        return (-NONSINGULAR_EXPANDER, NONSINGULAR_EXPANDER);
    }
    if max - min <= max_abs * NONSINGULAR_TINY {
        if min == 0.0 && max == 0.0 {
            return (-NONSINGULAR_EXPANDER, NONSINGULAR_EXPANDER);
        }
        return (
            min - NONSINGULAR_EXPANDER * min.abs(),
            max + NONSINGULAR_EXPANDER * max.abs(),
        );
    }
    (min, max)
}

fn finite_extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Bins `(x, y)` onto a hexagonal lattice `gridsize` hexagons wide and
/// reduces `metric` per hexagon with the mean.
///
/// Two interleaved lattices are used: the main one with `(nx + 1) * (ny + 1)`
/// centers on grid corners, and an offset one with `nx * ny` centers on grid
/// cell midpoints. Each sample goes to whichever candidate center is closer
/// under `dx² + 3·dy²` in grid units.
pub fn hexbin_mean(
    x: &[f64],
    y: &[f64],
    metric: &[f64],
    gridsize: usize,
) -> Result<HexbinGrid, BinningError> {
    if gridsize == 0 {
        return Err(BinningError::InvalidGridSize);
    }
    if x.len() != y.len() || x.len() != metric.len() {
        return Err(BinningError::LengthMismatch {
            x: x.len(),
            y: y.len(),
            metric: metric.len(),
        });
    }

    let nx = gridsize;
    let ny = ((nx as f64 / 3f64.sqrt()) as usize).max(1);

    let finite_points = || {
        x.iter()
            .zip(y)
            .zip(metric)
            .filter(|((px, py), m)| px.is_finite() && py.is_finite() && m.is_finite())
            .map(|((&px, &py), &m)| (px, py, m))
    };

    let x_data = finite_extent(finite_points().map(|p| p.0)).unwrap_or((0.0, 0.0));
    let y_data = finite_extent(finite_points().map(|p| p.1)).unwrap_or((0.0, 0.0));
    let (mut x_min, mut x_max) = nonsingular(x_data.0, x_data.1);
    let (y_min, y_max) = nonsingular(y_data.0, y_data.1);

    let padding = X_EXTENT_PADDING * (x_max - x_min);
    x_min -= padding;
    x_max += padding;

    let sx = (x_max - x_min) / nx as f64;
    let sy = (y_max - y_min) / ny as f64;

    // Only populated cells are stored, so memory follows the sample count
    // rather than the lattice size.
    let (nx1, ny1) = match (nx.checked_add(1), ny.checked_add(1)) {
        (Some(nx1), Some(ny1)) => (nx1, ny1),
        _ => return Err(BinningError::InvalidGridSize),
    };
    let (nx2, ny2) = (nx, ny);
    let mut cells: BTreeMap<(Lattice, usize, usize), (f64, usize)> = BTreeMap::new();

    let mut binned = 0usize;
    for (px, py, m) in finite_points() {
        let ix = (px - x_min) / sx;
        let iy = (py - y_min) / sy;
        let ix1 = ix.round_ties_even();
        let iy1 = iy.round_ties_even();
        let ix2 = ix.floor();
        let iy2 = iy.floor();

        let d1 = (ix - ix1).powi(2) + 3.0 * (iy - iy1).powi(2);
        let d2 = (ix - ix2 - 0.5).powi(2) + 3.0 * (iy - iy2 - 0.5).powi(2);

        let key = if d1 < d2 {
            lattice_cell(ix1, iy1, nx1, ny1).map(|(i, j)| (Lattice::Main, i, j))
        } else {
            lattice_cell(ix2, iy2, nx2, ny2).map(|(i, j)| (Lattice::Offset, i, j))
        };
        if let Some(key) = key {
            let (sum, count) = cells.entry(key).or_insert((0.0, 0));
            *sum += m;
            *count += 1;
            binned += 1;
        }
    }

    let bins = cells
        .into_iter()
        .map(|((lattice, i, j), (sum, count))| {
            let offset = match lattice {
                Lattice::Main => 0.0,
                Lattice::Offset => 0.5,
            };
            HexBin {
                center: (
                    x_min + (i as f64 + offset) * sx,
                    y_min + (j as f64 + offset) * sy,
                ),
                count,
                mean: sum / count as f64,
            }
        })
        .collect();

    Ok(HexbinGrid {
        nx,
        ny,
        x_extent: (x_min, x_max),
        y_extent: (y_min, y_max),
        sx,
        sy,
        bins,
        skipped: x.len() - binned,
    })
}

/// Cell of a lattice with `n_cols * n_rows` centers, if `(i, j)` lies on it.
fn lattice_cell(i: f64, j: f64, n_cols: usize, n_rows: usize) -> Option<(usize, usize)> {
    if i < 0.0 || j < 0.0 || i >= n_cols as f64 || j >= n_rows as f64 {
        return None;
    }
    Some((i as usize, j as usize))
}


// src/data_analysis/hexbin.rs
