//! Periodic-box geometry on a square domain of side `L`.
//!
//! All displacements follow the minimum-image convention: of every periodic
//! image of a pair of points, the shortest displacement is the one returned.
//! Callers guard `L > 0`; nothing here checks it.

use glam::DVec2;

/// Dense row-major `n x n` matrix of pairwise quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct PairMatrix {
    n: usize,
    data: Vec<f64>,
}

impl PairMatrix {
    fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                data.push(f(i, j));
            }
        }
        Self { n, data }
    }

    /// Number of rows (and columns).
    pub fn n(&self) -> usize {
        self.n
    }

    /// Entry for the pair `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= n`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "pair ({i}, {j}) out of bounds for n = {}", self.n);
        self.data[i * self.n + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }
}

/// Reduces a signed coordinate difference to its minimum image:
/// `d - L * round(d / L)`, landing in `(-L/2, L/2]`.
///
/// A separation of exactly half a box has two equally short images; the
/// positive one is returned.
pub fn minimum_image(d: f64, box_len: f64) -> f64 {
    let r = d - box_len * (d / box_len).round();
    let half = 0.5 * box_len;
    if r <= -half {
        r + box_len
    } else if r > half {
        r - box_len
    } else {
        r
    }
}

/// Minimum-image displacement `a - b` between two points.
pub fn displacement(a: DVec2, b: DVec2, box_len: f64) -> DVec2 {
    DVec2::new(
        minimum_image(a.x - b.x, box_len),
        minimum_image(a.y - b.y, box_len),
    )
}

/// Wraps a coordinate into `[0, L)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `L`; that case
/// is folded back to 0 so the half-open bound always holds.
pub fn wrap_coordinate(x: f64, box_len: f64) -> f64 {
    let r = x.rem_euclid(box_len);
    if r >= box_len {
        0.0
    } else {
        r
    }
}

/// Wraps both coordinates of a point into `[0, L)`.
pub fn wrap_point(p: DVec2, box_len: f64) -> DVec2 {
    DVec2::new(wrap_coordinate(p.x, box_len), wrap_coordinate(p.y, box_len))
}

/// Pairwise minimum-image displacement components `(dx, dy)`.
///
/// Entry `(i, j)` holds the displacement of particle `i` relative to `j`.
pub fn minimum_image_deltas(positions: &[DVec2], box_len: f64) -> (PairMatrix, PairMatrix) {
    let n = positions.len();
    let dx = PairMatrix::from_fn(n, |i, j| {
        minimum_image(positions[i].x - positions[j].x, box_len)
    });
    let dy = PairMatrix::from_fn(n, |i, j| {
        minimum_image(positions[i].y - positions[j].y, box_len)
    });
    (dx, dy)
}

/// Pairwise minimum-image squared distances.
pub fn pairwise_sq_distances(positions: &[DVec2], box_len: f64) -> PairMatrix {
    let (dx, dy) = minimum_image_deltas(positions, box_len);
    let data = dx
        .data
        .iter()
        .zip(dy.data.iter())
        .map(|(x, y)| x * x + y * y)
        .collect();
    PairMatrix { n: dx.n, data }
}

/// Rebuilds a continuous path from a track recorded in the periodic box.
///
/// Each increment is reduced to its minimum image and accumulated from the
/// first point, so box crossings no longer show up as jumps of ~`L`.
pub fn unwrap_track(points: &[DVec2], box_len: f64) -> Vec<DVec2> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(points.len());
    out.push(first);
    let mut current = first;
    for pair in points.windows(2) {
        current += displacement(pair[1], pair[0], box_len);
        out.push(current);
    }
    out
}
