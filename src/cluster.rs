// This file contains the Cluster type: a named group of reads referencing the shared read store
// by index, along with the per-signal statistics the binner uses for splitting and for the
// probabilistic reassignment of sampled clusters.

// Copyright 2025 Longbin contributors

// This file is part of Longbin. Longbin is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Longbin is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Longbin. If not, see <http://www.gnu.org/licenses/>.

use rand::rngs::StdRng;
use std::f64::consts::PI;

use crate::profile::Read;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Signal {
    Coverage,
    Composition,
}

impl Signal {
    pub fn tag(&self) -> &'static str {
        // Single-letter split-type tag used in cluster names.
        match self {
            Signal::Coverage => "x",
            Signal::Composition => "c",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Signal::Coverage => "coverage",
            Signal::Composition => "composition",
        }
    }

    pub fn vector<'a>(&self, read: &'a Read) -> &'a [f64] {
        match self {
            Signal::Coverage => &read.coverage,
            Signal::Composition => &read.composition,
        }
    }
}


#[derive(Clone)]
pub struct Cluster {
    pub name: String,

    // Creation-sequence index, unique across the whole run. Reassignment ties and output
    // ordering are resolved with this instead of any container's iteration order.
    pub order: usize,

    // Indices into the read store. Always the full population of the cluster.
    pub members: Vec<usize>,

    // Set only when this cluster was subsampled for an oversized split. Never replaces members.
    pub sampled: Option<Vec<usize>>,
}

impl Cluster {
    pub fn new(name: String, order: usize, members: Vec<usize>) -> Cluster {
        Cluster { name, order, members, sampled: None }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn mean(&self, reads: &[Read], signal: Signal) -> Vec<f64> {
        let dims = signal.vector(&reads[self.members[0]]).len();
        let mut totals = vec![0.0; dims];
        for &i in &self.members {
            for (total, value) in totals.iter_mut().zip(signal.vector(&reads[i])) {
                *total += value;
            }
        }
        let n = self.size() as f64;
        for total in totals.iter_mut() { *total /= n; }
        totals
    }

    pub fn std(&self, reads: &[Read], signal: Signal) -> Vec<f64> {
        // Per-dimension population standard deviation over the full member set.
        let mean = self.mean(reads, signal);
        let mut totals = vec![0.0; mean.len()];
        for &i in &self.members {
            for ((total, value), mu) in totals.iter_mut().zip(signal.vector(&reads[i]))
                                                          .zip(&mean) {
                let diff = value - mu;
                *total += diff * diff;
            }
        }
        let n = self.size() as f64;
        totals.into_iter().map(|t| (t / n).sqrt()).collect()
    }

    pub fn gaussian(&self, reads: &[Read], signal: Signal) -> Gaussian {
        Gaussian { mean: self.mean(reads, signal), std: self.std(reads, signal) }
    }

    pub fn log_likelihood(&self, reads: &[Read], signal: Signal, read: &Read) -> f64 {
        self.gaussian(reads, signal).log_likelihood(signal.vector(read))
    }

    pub fn sample(&mut self, k: usize, rng: &mut StdRng) {
        // Draws a uniform random subset of k members without replacement into sampled.
        let picks = rand::seq::index::sample(rng, self.members.len(), k);
        self.sampled = Some(picks.into_iter().map(|i| self.members[i]).collect());
    }

    pub fn split_basis(&self) -> &[usize] {
        // The reads a split actually embeds and clusters: the subsample when one was drawn,
        // otherwise the full member set.
        self.sampled.as_deref().unwrap_or(&self.members)
    }
}


// Per-dimension independent Gaussian model of one cluster, frozen so that reassignment doesn't
// recompute the statistics for every read it scores.
pub struct Gaussian {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Gaussian {
    pub fn log_likelihood(&self, vector: &[f64]) -> f64 {
        // Sum over dimensions of the Gaussian log-density. The same formula serves both the
        // coverage and composition signals. A zero standard deviation means a constant
        // dimension, which can't support a Gaussian model, so this fails fast instead of
        // letting NaNs leak into assignments.
        let mut total = 0.0;
        for ((x, mu), sigma) in vector.iter().zip(&self.mean).zip(&self.std) {
            assert!(*sigma > 0.0, "cluster model has a zero-variance dimension");
            let z = (x - mu) / sigma;
            total += -0.5 * z * z - ((2.0 * PI).sqrt() * sigma).ln();
        }
        total
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::assert_almost_eq;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn make_reads(vectors: &[Vec<f64>]) -> Vec<Read> {
        vectors.iter().map(|v| Read { label: None,
                                      composition: v.clone(),
                                      coverage: v.iter().map(|x| x * 10.0).collect() }).collect()
    }

    #[test]
    fn test_mean_and_std() {
        let reads = make_reads(&[vec![1.0, 2.0], vec![2.0, 3.0], vec![3.0, 4.0]]);
        let cluster = Cluster::new("Root".to_string(), 0, vec![0, 1, 2]);
        let mean = cluster.mean(&reads, Signal::Composition);
        assert_almost_eq(mean[0], 2.0, 1e-10);
        assert_almost_eq(mean[1], 3.0, 1e-10);
        let std = cluster.std(&reads, Signal::Composition);
        assert_almost_eq(std[0], (2.0f64 / 3.0).sqrt(), 1e-10);
        assert_almost_eq(std[1], (2.0f64 / 3.0).sqrt(), 1e-10);

        // The coverage vectors are scaled by ten, so their statistics scale with them.
        let mean = cluster.mean(&reads, Signal::Coverage);
        assert_almost_eq(mean[0], 20.0, 1e-10);
        let std = cluster.std(&reads, Signal::Coverage);
        assert_almost_eq(std[0], 10.0 * (2.0f64 / 3.0).sqrt(), 1e-10);
    }

    #[test]
    fn test_log_likelihood() {
        let gaussian = Gaussian { mean: vec![0.0, 0.0], std: vec![1.0, 1.0] };
        // At the mean, each dimension contributes -ln(sqrt(2*pi)).
        let expected = -2.0 * (2.0 * PI).sqrt().ln();
        assert_almost_eq(gaussian.log_likelihood(&[0.0, 0.0]), expected, 1e-10);
        // One standard deviation away in one dimension adds -0.5.
        assert_almost_eq(gaussian.log_likelihood(&[1.0, 0.0]), expected - 0.5, 1e-10);
    }

    #[test]
    fn test_log_likelihood_prefers_nearer_model() {
        let reads = make_reads(&[vec![0.0, 0.1], vec![0.2, 0.0], vec![10.0, 9.9], vec![9.8, 10.0]]);
        let near = Cluster::new("Root-c-1".to_string(), 1, vec![0, 1]);
        let far = Cluster::new("Root-c-2".to_string(), 2, vec![2, 3]);
        let probe = Read { label: None, composition: vec![0.1, 0.05], coverage: vec![1.0, 0.5] };
        let p_near = near.log_likelihood(&reads, Signal::Composition, &probe);
        let p_far = far.log_likelihood(&reads, Signal::Composition, &probe);
        assert!(p_near > p_far);
    }

    #[test]
    fn test_zero_std_fails_fast() {
        // A single-member cluster has zero variance in every dimension, so scoring a read
        // against it must panic rather than return a finite value.
        let reads = make_reads(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        let cluster = Cluster::new("Root-c-1".to_string(), 1, vec![0]);
        assert!(std::panic::catch_unwind(|| {
            cluster.log_likelihood(&reads, Signal::Composition, &reads[1])
        }).is_err());
    }

    #[test]
    fn test_sample() {
        let reads = make_reads(&(0..50).map(|i| vec![i as f64]).collect::<Vec<_>>());
        let mut cluster = Cluster::new("Root".to_string(), 0,
                                       (0..reads.len()).collect());
        let mut rng = StdRng::seed_from_u64(0);
        cluster.sample(20, &mut rng);
        let sampled = cluster.sampled.as_ref().unwrap();
        assert_eq!(sampled.len(), 20);
        assert_eq!(sampled.iter().collect::<HashSet<_>>().len(), 20);
        assert!(sampled.iter().all(|i| *i < 50));
        assert_eq!(cluster.split_basis().len(), 20);
        assert_eq!(cluster.size(), 50);
    }

    #[test]
    fn test_split_basis_without_sampling() {
        let cluster = Cluster::new("Root".to_string(), 0, vec![4, 5, 6]);
        assert_eq!(cluster.split_basis(), &[4, 5, 6]);
    }

    #[test]
    fn test_signal_tags() {
        assert_eq!(Signal::Coverage.tag(), "x");
        assert_eq!(Signal::Composition.tag(), "c");
        assert_eq!(Signal::Coverage.name(), "coverage");
        assert_eq!(Signal::Composition.name(), "composition");
    }
}
