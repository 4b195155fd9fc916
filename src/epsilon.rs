// This file contains the density-radius estimator. It builds the nearest-neighbour distance
// curve of an embedding and locates its knee (Kneedle, convex increasing form) to pick the
// radius for the density split, scaled by the user's sensitivity setting.

// Copyright 2025 Longbin contributors

// This file is part of Longbin. Longbin is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Longbin is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Longbin. If not, see <http://www.gnu.org/licenses/>.

use kiddo::float::distance::SquaredEuclidean;
use kiddo::float::kdtree::KdTree;
use rayon::prelude::*;

use crate::log::warning;

const FALLBACK_EPSILON: f64 = 0.5;
const KNEEDLE_SENSITIVITY: f64 = 1.0;
const SMOOTHING_DEGREE: usize = 7;


pub fn estimate_epsilon(points: &[[f64; 2]], sensitivity: u32) -> f64 {
    // Estimates the neighbourhood radius for a density split of the given embedding. The
    // sensitivity is the caller-facing 1-10 setting; it becomes a multiplier of (11 - s), so
    // higher sensitivity gives a smaller radius and therefore more, finer clusters.
    //
    // The lower half of the sorted distance curve is discarded before knee detection: those
    // distances come from dense interior regions and drag the knee downward.
    let factor = (11 - sensitivity) as f64;
    let mut distances = nearest_neighbour_distances(points);
    distances.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
    let upper = &distances[distances.len() / 2..];
    let epsilon = match knee_index(upper) {
        Some(knee) => factor * upper[knee],
        None => {
            warning(&format!("no knee found in the nearest-neighbour distance curve, \
                              using the fallback radius of {}", FALLBACK_EPSILON));
            FALLBACK_EPSILON
        },
    };
    if epsilon == 0.0 { 1.0 } else { epsilon }  // a zero radius would turn every point into noise
}


fn nearest_neighbour_distances(points: &[[f64; 2]]) -> Vec<f64> {
    // Distance from each point to its single nearest neighbour, excluding itself.
    if points.len() < 2 {
        return Vec::new();
    }
    let mut tree: KdTree<f64, u64, 2, 256, u32> = KdTree::new();
    for (i, point) in points.iter().enumerate() {
        tree.add(point, i as u64);
    }
    points.par_iter().map(|point| {
        let neighbours = tree.nearest_n::<SquaredEuclidean>(point, 2);
        neighbours[1].distance.sqrt()  // neighbours[0] is the point itself at distance zero
    }).collect()
}


fn knee_index(values: &[f64]) -> Option<usize> {
    // Kneedle on a convex increasing curve: smooth, normalise, flip into the canonical concave
    // increasing form, then find where the difference curve falls back below the threshold set
    // at its last local maximum. Returns the index into values, or None when the curve is flat
    // or too short to hold a knee.
    let n = values.len();
    if n < 5 {
        return None;
    }
    let x: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    let smoothed = polynomial_smooth(&x, values).unwrap_or_else(|| values.to_vec());
    let min = smoothed.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = smoothed.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max - min < 1e-12 * max.abs().max(1.0) {
        return None;  // flat curve (allowing for float noise in the fit), no knee to find
    }
    let y: Vec<f64> = smoothed.iter().map(|v| (v - min) / (max - min)).collect();
    let diff: Vec<f64> = (0..n).map(|i| (1.0 - y[n - 1 - i]) - x[i]).collect();

    let threshold_step = KNEEDLE_SENSITIVITY / (n - 1) as f64;
    let mut candidate: Option<usize> = None;
    let mut threshold = 0.0;
    for i in 1..n {
        let local_max = i + 1 < n && diff[i] >= diff[i - 1] && diff[i] >= diff[i + 1];
        let local_min = i + 1 < n && diff[i] <= diff[i - 1] && diff[i] <= diff[i + 1];
        if local_max {
            candidate = Some(i);
            threshold = diff[i] - threshold_step;
        } else if local_min {
            candidate = None;
        } else if candidate.is_some() && diff[i] < threshold {
            // The difference curve dropped below the threshold, so the last maximum was a true
            // knee. Flip its index back onto the original curve.
            return Some(n - 1 - candidate.unwrap());
        }
    }
    None
}


fn polynomial_smooth(x: &[f64], y: &[f64]) -> Option<Vec<f64>> {
    // Least-squares polynomial fit evaluated back at the input positions. The x values are
    // already normalised to [0, 1], which keeps the normal equations well conditioned.
    let terms = SMOOTHING_DEGREE.min(x.len() - 1) + 1;
    let mut ata = vec![vec![0.0; terms]; terms];
    let mut aty = vec![0.0; terms];
    for (xi, yi) in x.iter().zip(y) {
        let mut powers = vec![1.0; terms];
        for p in 1..terms {
            powers[p] = powers[p - 1] * xi;
        }
        for r in 0..terms {
            aty[r] += powers[r] * yi;
            for c in 0..terms {
                ata[r][c] += powers[r] * powers[c];
            }
        }
    }
    let coefficients = solve_linear_system(ata, aty)?;
    Some(x.iter().map(|xi| {
        let mut value = 0.0;
        let mut power = 1.0;
        for c in &coefficients {
            value += c * power;
            power *= xi;
        }
        value
    }).collect())
}


fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    // Gaussian elimination with partial pivoting. Returns None for a singular system, in which
    // case the caller skips smoothing rather than failing the whole estimate.
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&r1, &r2| {
            a[r1][col].abs().partial_cmp(&a[r2][col].abs()).unwrap()
        })?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..n {
            let ratio = a[row][col] / a[col][col];
            for c in col..n {
                a[row][c] -= ratio * a[col][c];
            }
            b[row] -= ratio * b[col];
        }
    }
    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let mut value = b[row];
        for col in row + 1..n {
            value -= a[row][col] * solution[col];
        }
        solution[row] = value / a[row][row];
    }
    Some(solution)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::assert_almost_eq;

    #[test]
    fn test_knee_index() {
        // Slow growth then a sharp rise: the knee lands where the rise begins.
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 10.0, 40.0, 100.0];
        assert_eq!(knee_index(&values), Some(5));
    }

    #[test]
    fn test_knee_index_flat_curve() {
        assert_eq!(knee_index(&[2.0; 40]), None);
    }

    #[test]
    fn test_knee_index_straight_line() {
        let values: Vec<f64> = (0..40).map(|i| i as f64).collect();
        assert_eq!(knee_index(&values), None);
    }

    #[test]
    fn test_knee_index_too_short() {
        assert_eq!(knee_index(&[1.0, 2.0, 30.0]), None);
    }

    #[test]
    fn test_nearest_neighbour_distances() {
        let points = [[0.0, 0.0], [3.0, 4.0], [0.0, 1.0]];
        let distances = nearest_neighbour_distances(&points);
        assert_almost_eq(distances[0], 1.0, 1e-10);   // nearest to (0,0) is (0,1)
        assert_almost_eq(distances[1], 10.0f64.sqrt(), 1e-10);
        assert_almost_eq(distances[2], 1.0, 1e-10);
    }

    #[test]
    fn test_estimate_epsilon_fallback() {
        // A regular grid has identical nearest-neighbour distances everywhere, so the curve is
        // flat and the estimate must fall back to the default radius.
        let mut points = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                points.push([i as f64, j as f64]);
            }
        }
        assert_almost_eq(estimate_epsilon(&points, 10), FALLBACK_EPSILON, 1e-10);
    }

    #[test]
    fn test_estimate_epsilon_monotone_in_sensitivity() {
        // Points on a line with six unit gaps then increasingly large ones. The knee of the
        // upper-half distance curve lands on the distance 4 gap, and lowering the sensitivity
        // scales the radius up from there.
        let gaps = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 4.0, 30.0, 100.0];
        let mut position = 0.0;
        let mut points = vec![[0.0, 0.0]];
        for gap in gaps {
            position += gap;
            points.push([position, 0.0]);
        }
        let high = estimate_epsilon(&points, 10);
        let mid = estimate_epsilon(&points, 8);
        let low = estimate_epsilon(&points, 4);
        assert_almost_eq(high, 4.0, 1e-6);
        assert_almost_eq(mid, 12.0, 1e-6);
        assert_almost_eq(low, 28.0, 1e-6);
        assert!(high <= mid && mid <= low);
    }

    #[test]
    fn test_estimate_epsilon_too_few_points() {
        assert_almost_eq(estimate_epsilon(&[[1.0, 1.0]], 10), FALLBACK_EPSILON, 1e-10);
    }
}
