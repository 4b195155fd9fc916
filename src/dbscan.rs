// This file contains the density-based clustering step used for splitting clusters. It runs
// DBSCAN over a 2-D embedding with a kd-tree for the radius queries, labelling each point with a
// cluster id or the noise sentinel (-1).

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
use std::collections::VecDeque;

pub const NOISE: isize = -1;
pub const MIN_SAMPLES: usize = 5;


pub fn dbscan(points: &[[f64; 2]], epsilon: f64) -> Vec<isize> {
    // Labels each point with a 0-based cluster id, or NOISE for points without a dense
    // neighbourhood. Cluster ids are assigned in order of the first point scanned into each
    // cluster, so the labelling is deterministic for a given embedding.
    let mut tree: KdTree<f64, u64, 2, 256, u32> = KdTree::new();
    for (i, point) in points.iter().enumerate() {
        tree.add(point, i as u64);
    }

    // All neighbourhoods are needed at least once, so they are precomputed in parallel rather
    // than queried lazily during the sequential expansion below. Note that kiddo's distances are
    // squared, so the radius is squared to match.
    let epsilon_sq = epsilon * epsilon;
    let neighbourhoods: Vec<Vec<usize>> = points.par_iter().map(|point| {
        tree.within::<SquaredEuclidean>(point, epsilon_sq)
            .into_iter().map(|n| n.item as usize).collect()
    }).collect();

    let mut labels = vec![NOISE; points.len()];
    let mut visited = vec![false; points.len()];
    let mut cluster_id: isize = 0;
    for i in 0..points.len() {
        if visited[i] || neighbourhoods[i].len() < MIN_SAMPLES {
            continue;  // noise for now, but border points can be claimed by a later expansion
        }
        visited[i] = true;
        labels[i] = cluster_id;
        let mut seeds: VecDeque<usize> = neighbourhoods[i].iter().cloned().collect();
        while let Some(j) = seeds.pop_front() {
            if labels[j] == NOISE {
                labels[j] = cluster_id;  // border point, joins the cluster but doesn't expand it
            }
            if visited[j] {
                continue;
            }
            visited[j] = true;
            if neighbourhoods[j].len() >= MIN_SAMPLES {
                labels[j] = cluster_id;
                seeds.extend(neighbourhoods[j].iter().cloned());
            }
        }
        cluster_id += 1;
    }
    labels
}
