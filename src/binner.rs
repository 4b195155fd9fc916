// This file contains the code for the longbin bin subcommand: the recursive divisive binning
// engine. It splits the root cluster once by coverage, then splits each coverage cluster
// recursively by composition, and finally filters the leaves into the output bins.

// Copyright 2025 Longbin contributors

// This file is part of Longbin. Longbin is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Longbin is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Longbin. If not, see <http://www.gnu.org/licenses/>.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cluster::{Cluster, Gaussian, Signal};
use crate::dbscan::{dbscan, NOISE};
use crate::embed::Embedding;
use crate::epsilon::estimate_epsilon;
use crate::evaluate::{self, UNBINNED};
use crate::log::{section_header, explanation, warning};
use crate::metrics::BinningMetrics;
use crate::misc::{check_if_dir_is_not_dir, check_if_file_exists, create_dir, format_float,
                  quit_with_error, spinner};
use crate::profile::{load_reads, Read};

// Size rules for a single split, applied to the pre-split cluster.
const MIN_SPLIT_SIZE: usize = 200;
const SUBSAMPLE_THRESHOLD: usize = 2000;
const SUBSAMPLE_SIZE: usize = 1000;

// Rules for the final assembly of leaves into bins.
const MIN_BIN_SIZE: usize = 500;      // leaves must exceed this to become a bin
const MIN_LEAF_SIZE: usize = 100;     // leaves below this are deleted outright
const MIN_BIN_SENSITIVITY: u32 = 8;   // bins are only emitted at this sensitivity or higher


pub fn bin(composition_file: PathBuf, coverage_file: PathBuf, ground_truth: Option<PathBuf>,
           out_dir: PathBuf, embedding: String, sensitivity: u32, recurse_threshold: usize,
           threads: usize, no_subsample: bool, plot: bool, seed: u64) {
    check_settings(&out_dir, &composition_file, &coverage_file, ground_truth.as_deref(),
                   &embedding, sensitivity, recurse_threshold, threads);
    create_dir(&out_dir);
    starting_message();
    print_settings(&composition_file, &coverage_file, ground_truth.as_deref(), &out_dir,
                   &embedding, sensitivity, recurse_threshold, threads, no_subsample, plot, seed);
    let reads = load_input(&composition_file, &coverage_file, ground_truth.as_deref());

    let plot_dir = if plot { Some(out_dir.join("plots")) } else { None };
    if let Some(dir) = &plot_dir { create_dir(dir); }
    let mut binner = Binner { reads: &reads,
                              embedding: Embedding::from_name(&embedding).unwrap(),
                              sensitivity,
                              recurse_threshold,
                              subsample: !no_subsample,
                              plot_dir,
                              rng: StdRng::seed_from_u64(seed),
                              next_order: 1 };

    let coverage_clusters = coverage_phase(&mut binner, reads.len());
    let leaves = composition_phase(&mut binner, &coverage_clusters);
    let metrics = assemble_bins(&reads, &coverage_clusters, &leaves, sensitivity, &out_dir);
    metrics.save_to_yaml(&out_dir.join("binning.yaml"));
    finished_message(&out_dir);
}


fn check_settings(out_dir: &Path, composition_file: &Path, coverage_file: &Path,
                  ground_truth: Option<&Path>, embedding: &str, sensitivity: u32,
                  recurse_threshold: usize, threads: usize) {
    check_if_dir_is_not_dir(out_dir);
    check_if_file_exists(composition_file);
    check_if_file_exists(coverage_file);
    if let Some(truth) = ground_truth { check_if_file_exists(truth); }
    if Embedding::from_name(embedding).is_none() {
        quit_with_error("--embedding must be one of: tsne, umap, graph");
    }
    if !(1..=10).contains(&sensitivity) {
        quit_with_error("--sensitivity must be between 1 and 10 (inclusive)");
    }
    if recurse_threshold < 1 { quit_with_error("--recurse_threshold cannot be less than 1"); }
    if threads < 1   { quit_with_error("--threads cannot be less than 1"); }
    if threads > 100 { quit_with_error("--threads cannot be greater than 100"); }

    // The global pool can only be built once per process, so a second build (as happens when
    // tests run multiple commands) is ignored.
    let _ = ThreadPoolBuilder::new().num_threads(threads).build_global();
}


fn starting_message() {
    section_header("Starting longbin bin");
    explanation("This command bins long reads by their coverage and composition profiles. It \
                 splits the full read set once by coverage, then splits each coverage cluster \
                 recursively by composition, and emits the sufficiently large leaf clusters as \
                 bins.");
}


fn print_settings(composition_file: &Path, coverage_file: &Path, ground_truth: Option<&Path>,
                  out_dir: &Path, embedding: &str, sensitivity: u32, recurse_threshold: usize,
                  threads: usize, no_subsample: bool, plot: bool, seed: u64) {
    eprintln!("Settings:");
    eprintln!("  --composition {}", composition_file.display());
    eprintln!("  --coverage {}", coverage_file.display());
    if let Some(truth) = ground_truth {
        eprintln!("  --ground_truth {}", truth.display());
    }
    eprintln!("  --out_dir {}", out_dir.display());
    eprintln!("  --embedding {}", embedding);
    eprintln!("  --sensitivity {}", sensitivity);
    eprintln!("  --recurse_threshold {}", recurse_threshold);
    eprintln!("  --threads {}", threads);
    if no_subsample { eprintln!("  --no_subsample"); }
    if plot { eprintln!("  --plot"); }
    eprintln!("  --seed {}", seed);
    eprintln!();
}


fn load_input(composition_file: &Path, coverage_file: &Path,
              ground_truth: Option<&Path>) -> Vec<Read> {
    section_header("Loading read profiles");
    explanation("Longbin reads the two row-aligned profile matrices (and the ground-truth \
                 labels, if given) produced by the upstream k-mer counting tools.");
    let reads = load_reads(composition_file, coverage_file, ground_truth);
    eprintln!("Input reads: {}", reads.len());
    eprintln!("  composition dimensions: {}", reads[0].composition.len());
    eprintln!("  coverage dimensions: {}", reads[0].coverage.len());
    eprintln!();
    reads
}


fn coverage_phase(binner: &mut Binner<'_>, read_count: usize) -> Vec<Cluster> {
    section_header("Splitting by coverage");
    explanation("The full read set is split once using the coverage signal. Reads from genomes \
                 at different sequencing depths separate here even when their composition is \
                 similar.");
    let root = Cluster::new("Root".to_string(), 0, (0..read_count).collect());
    let coverage_clusters = match binner.split(root, Signal::Coverage) {
        Split::Leaf(leaf) => vec![leaf],
        Split::Children(children) => children,
    };
    if coverage_clusters.is_empty() {
        warning("the coverage split marked every read as noise, so no bins will be produced");
    }
    for cluster in &coverage_clusters {
        eprintln!("  {}: {} reads", cluster.name, cluster.size());
    }
    eprintln!();
    coverage_clusters
}


fn composition_phase(binner: &mut Binner<'_>,
                     coverage_clusters: &[Cluster]) -> Vec<(usize, Cluster)> {
    // Returns the composition-level leaves, each tagged with the index of its coverage-phase
    // ancestor (whose coverage statistics the stats artifact needs).
    section_header("Splitting by composition");
    explanation("Each coverage cluster is now split recursively using the composition signal, \
                 separating genomes that share a sequencing depth.");
    let mut leaves = Vec::new();
    for (cov_index, cov_cluster) in coverage_clusters.iter().enumerate() {
        let mut branch_leaves = binner.composition_leaves(cov_cluster.clone());
        branch_leaves.sort_by_key(|leaf| leaf.order);  // work-stack order isn't creation order
        eprintln!("  {}: {} reads -> {} leaves", cov_cluster.name, cov_cluster.size(),
                  branch_leaves.len());
        leaves.extend(branch_leaves.into_iter().map(|leaf| (cov_index, leaf)));
    }
    eprintln!();
    leaves
}


fn assemble_bins(reads: &[Read], coverage_clusters: &[Cluster], leaves: &[(usize, Cluster)],
                 sensitivity: u32, out_dir: &Path) -> BinningMetrics {
    section_header("Assembling bins");
    explanation("Leaves with enough reads become the output bins. Smaller leaves are kept in \
                 the leaf summary down to the retention minimum, and anything below that is \
                 discarded.");

    // Bins are the leaves above the bin-size threshold, but only at high sensitivity: at low
    // sensitivity the radii are large and the big leaves are too coarse to report as genomes.
    let mut bins: Vec<(String, usize, &Cluster)> = Vec::new();
    if sensitivity >= MIN_BIN_SENSITIVITY {
        for (cov_index, leaf) in leaves {
            if leaf.size() > MIN_BIN_SIZE {
                bins.push((format!("Bin-{}", bins.len() + 1), *cov_index, leaf));
            }
        }
    } else {
        eprintln!("Sensitivity is below {}, so no bins will be emitted.", MIN_BIN_SENSITIVITY);
    }
    let filtered_leaves: Vec<&Cluster> = leaves.iter()
        .filter(|(_, leaf)| leaf.size() >= MIN_LEAF_SIZE).map(|(_, leaf)| leaf).collect();
    eprintln!("Leaf clusters: {} ({} retained)", leaves.len(), filtered_leaves.len());
    eprintln!("Bins: {}", bins.len());
    for (name, _, leaf) in &bins {
        eprintln!("  {}: {} reads ({})", name, leaf.size(), leaf.name);
    }
    eprintln!();

    save_stats(reads, coverage_clusters, &bins, &out_dir.join("cluster-stats.txt"))
        .unwrap_or_else(|e| quit_with_error(&format!("failed to write cluster stats\n{}", e)));
    save_read_bins(reads.len(), &bins, &out_dir.join("read_bins.txt"))
        .unwrap_or_else(|e| quit_with_error(&format!("failed to write read bins\n{}", e)));
    save_leaves(&filtered_leaves, &out_dir.join("leaves.tsv"))
        .unwrap_or_else(|e| quit_with_error(&format!("failed to write leaf summary\n{}", e)));

    let mut metrics = BinningMetrics::new();
    metrics.read_count = reads.len();
    metrics.coverage_cluster_count = coverage_clusters.len();
    metrics.leaf_cluster_count = filtered_leaves.len();
    metrics.bin_count = bins.len();
    metrics.binned_read_count = bins.iter().map(|(_, _, leaf)| leaf.size()).sum();
    metrics.calculate_fraction();

    if reads.iter().any(|read| read.label.is_some()) {
        evaluate_bins(reads, &bins, &mut metrics);
    }
    metrics
}


fn evaluate_bins(reads: &[Read], bins: &[(String, usize, &Cluster)],
                 metrics: &mut BinningMetrics) {
    section_header("Evaluating bins");
    explanation("Ground-truth labels were provided, so the accepted bins are scored against \
                 them with a contingency matrix, precision, recall and the adjusted Rand \
                 index.");
    if bins.is_empty() {
        eprintln!("There are no bins to evaluate.");
        eprintln!();
        return;
    }
    let mut truth = Vec::new();
    let mut assigned = Vec::new();
    for (name, _, leaf) in bins {
        for &i in &leaf.members {
            truth.push(reads[i].label.clone().unwrap());
            assigned.push(name.clone());
        }
    }
    let evaluation = evaluate::score(&truth, &assigned);
    evaluation.print_report();
    metrics.precision = Some(evaluation.precision);
    metrics.recall = Some(evaluation.recall);
    metrics.adjusted_rand_index = Some(evaluation.adjusted_rand_index);
}


fn save_stats(reads: &[Read], coverage_clusters: &[Cluster], bins: &[(String, usize, &Cluster)],
              filename: &Path) -> io::Result<()> {
    // Five lines per bin: id, coverage mean, composition mean, coverage standard deviation,
    // composition standard deviation. The coverage statistics come from the bin's coverage-phase
    // ancestor, the composition statistics from the leaf itself. This layout is what the
    // downstream read classifier parses.
    let mut file = File::create(filename)?;
    for (name, cov_index, leaf) in bins {
        let ancestor = &coverage_clusters[*cov_index];
        writeln!(file, "{}", name)?;
        writeln!(file, "{}", format_vector(&ancestor.mean(reads, Signal::Coverage)))?;
        writeln!(file, "{}", format_vector(&leaf.mean(reads, Signal::Composition)))?;
        writeln!(file, "{}", format_vector(&ancestor.std(reads, Signal::Coverage)))?;
        writeln!(file, "{}", format_vector(&leaf.std(reads, Signal::Composition)))?;
    }
    Ok(())
}


fn save_read_bins(read_count: usize, bins: &[(String, usize, &Cluster)],
                  filename: &Path) -> io::Result<()> {
    // One line per input read: its bin id, or "unbinned" for reads in no accepted bin.
    let mut assignments = vec![UNBINNED; read_count];
    let mut file = File::create(filename)?;
    for (name, _, leaf) in bins {
        for &i in &leaf.members {
            assignments[i] = name.as_str();
        }
    }
    for assignment in assignments {
        writeln!(file, "{}", assignment)?;
    }
    Ok(())
}


fn save_leaves(filtered_leaves: &[&Cluster], filename: &Path) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for leaf in filtered_leaves {
        writeln!(file, "{}\t{}", leaf.name, leaf.size())?;
    }
    Ok(())
}


fn format_vector(values: &[f64]) -> String {
    values.iter().map(|v| format_float(*v)).collect::<Vec<_>>().join(" ")
}


fn finished_message(out_dir: &Path) {
    section_header("Finished!");
    eprintln!("Bin statistics:      {}", out_dir.join("cluster-stats.txt").display());
    eprintln!("Per-read bins:       {}", out_dir.join("read_bins.txt").display());
    eprintln!("Leaf summary:        {}", out_dir.join("leaves.tsv").display());
    eprintln!("Run metrics:         {}", out_dir.join("binning.yaml").display());
    eprintln!();
}


// The result of one split operation.
enum Split {
    Leaf(Cluster),           // too small to split, returned unchanged with a -N name
    Children(Vec<Cluster>),  // empty when the density clustering marked every point as noise
}


struct Binner<'a> {
    reads: &'a [Read],
    embedding: Embedding,
    sensitivity: u32,
    recurse_threshold: usize,
    subsample: bool,
    plot_dir: Option<PathBuf>,
    rng: StdRng,
    next_order: usize,
}

impl<'a> Binner<'a> {
    fn next_order(&mut self) -> usize {
        self.next_order += 1;
        self.next_order - 1
    }

    fn split(&mut self, mut cluster: Cluster, signal: Signal) -> Split {
        // One split operation: embed the cluster's reads (or a subsample of them) into 2-D,
        // estimate a density radius and run the density clustering. Clusters below the minimum
        // size are never split, and oversized clusters are split via a subsample whose
        // discovered subclusters then reabsorb the full population.
        if cluster.size() < MIN_SPLIT_SIZE {
            cluster.name.push_str("-N");
            return Split::Leaf(cluster);
        }
        let subsampled = self.subsample && cluster.size() > SUBSAMPLE_THRESHOLD;
        if subsampled {
            cluster.sample(SUBSAMPLE_SIZE, &mut self.rng);
        }
        let basis = cluster.split_basis().to_vec();
        let data: Vec<Vec<f64>> = basis.iter()
            .map(|&i| signal.vector(&self.reads[i]).to_vec()).collect();

        let pb = spinner(&format!("embedding {} ({} reads, {} signal)...",
                                  cluster.name, data.len(), signal.name()));
        let embedded = self.embedding.embed(&data);
        pb.finish_and_clear();
        let epsilon = estimate_epsilon(&embedded, self.sensitivity);
        let labels = dbscan(&embedded, epsilon);
        if let Some(dir) = &self.plot_dir {
            save_plot_data(dir, &cluster.name, signal, self.reads, &basis, &embedded, &labels)
                .unwrap_or_else(|e| quit_with_error(&format!("failed to write plot data\n{}",
                                                             e)));
        }

        // Group the non-noise points into child clusters. Noise is decided on the raw density
        // label; the 1-based child numbering only covers the surviving labels, in first-seen
        // order, so a noise marker can never leak into a cluster name.
        let mut seen_labels: Vec<isize> = Vec::new();
        let mut children: Vec<Cluster> = Vec::new();
        for (&read_index, &label) in basis.iter().zip(&labels) {
            if label == NOISE {
                continue;
            }
            let position = match seen_labels.iter().position(|l| *l == label) {
                Some(p) => p,
                None => {
                    seen_labels.push(label);
                    let name = format!("{}-{}-{}", cluster.name, signal.tag(), seen_labels.len());
                    let order = self.next_order();
                    children.push(Cluster::new(name, order, Vec::new()));
                    seen_labels.len() - 1
                },
            };
            children[position].members.push(read_index);
        }
        if subsampled {
            children = self.reassign(&cluster, children, signal);
        }
        Split::Children(children)
    }

    fn reassign(&self, parent: &Cluster, children: Vec<Cluster>, signal: Signal) -> Vec<Cluster> {
        // After a subsampled split, every member of the full population (sampled or not) is
        // assigned to the subcluster whose Gaussian model gives it the highest log-likelihood.
        // The strict > comparison means ties go to the earliest-created subcluster. Subclusters
        // that attract no reads are dropped.
        if children.is_empty() {
            return children;  // every sampled point was noise, so there is nothing to model
        }
        let models: Vec<Gaussian> = children.iter()
            .map(|child| child.gaussian(self.reads, signal)).collect();
        let best: Vec<usize> = parent.members.par_iter().map(|&read_index| {
            let vector = signal.vector(&self.reads[read_index]);
            let mut best_child = 0;
            let mut best_p = f64::NEG_INFINITY;
            for (c, model) in models.iter().enumerate() {
                let p = model.log_likelihood(vector);
                if p > best_p {
                    best_p = p;
                    best_child = c;
                }
            }
            best_child
        }).collect();
        let mut reassigned: Vec<Vec<usize>> = vec![Vec::new(); children.len()];
        for (&read_index, &child) in parent.members.iter().zip(&best) {
            reassigned[child].push(read_index);
        }
        children.into_iter().zip(reassigned)
            .filter(|(_, members)| !members.is_empty())
            .map(|(mut child, members)| { child.members = members;
                                          child.sampled = None;
                                          child })
            .collect()
    }

    fn composition_leaves(&mut self, cov_cluster: Cluster) -> Vec<Cluster> {
        // Recursive composition splitting of one coverage cluster, run on an explicit work
        // stack so deep split chains can't exhaust the call stack. A split's children are only
        // re-split when there are more of them than the recurse threshold; otherwise they are
        // accepted as leaves.
        let mut leaves = Vec::new();
        let mut stack = vec![cov_cluster];
        while let Some(cluster) = stack.pop() {
            match self.split(cluster, Signal::Composition) {
                Split::Leaf(leaf) => leaves.push(leaf),
                Split::Children(children) => {
                    if children.len() > self.recurse_threshold {
                        stack.extend(children);
                    } else {
                        leaves.extend(children);
                    }
                },
            }
        }
        leaves
    }
}


fn save_plot_data(plot_dir: &Path, cluster_name: &str, signal: Signal, reads: &[Read],
                  basis: &[usize], embedded: &[[f64; 2]], labels: &[isize]) -> io::Result<()> {
    // Writes the embedding of one split as a TSV (read index, coordinates, raw density label and
    // the ground-truth label when present) for external plotting tools.
    let filename = plot_dir.join(format!("{}-{}.tsv", cluster_name, signal.name()));
    let mut file = File::create(filename)?;
    for ((&read_index, point), &label) in basis.iter().zip(embedded).zip(labels) {
        match &reads[read_index].label {
            Some(truth) => writeln!(file, "{}\t{}\t{}\t{}\t{}", read_index, point[0], point[1],
                                    label, truth)?,
            None => writeln!(file, "{}\t{}\t{}\t{}", read_index, point[0], point[1], label)?,
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashSet;

    fn test_binner(reads: &[Read]) -> Binner<'_> {
        Binner { reads,
                 embedding: Embedding::Tsne,
                 sensitivity: 10,
                 recurse_threshold: 100,
                 subsample: true,
                 plot_dir: None,
                 rng: StdRng::seed_from_u64(0),
                 next_order: 1 }
    }

    fn blob_reads(centres: &[[f64; 2]], count_per_blob: usize, seed: u64) -> Vec<Read> {
        // Reads whose composition vectors form tight 2-D blobs around the given centres (the
        // coverage vectors get the same values, scaled).
        let mut rng = StdRng::seed_from_u64(seed);
        let mut reads = Vec::new();
        for centre in centres {
            for _ in 0..count_per_blob {
                let composition = vec![centre[0] + rng.random_range(-0.5..0.5),
                                       centre[1] + rng.random_range(-0.5..0.5)];
                let coverage = composition.iter().map(|x| x * 2.0).collect();
                reads.push(Read { label: None, composition, coverage });
            }
        }
        reads
    }

    #[test]
    fn test_small_cluster_is_a_no_split_leaf() {
        let reads = blob_reads(&[[0.0, 0.0]], 150, 0);
        let mut binner = test_binner(&reads);
        let cluster = Cluster::new("Root-x-1".to_string(), 1, (0..150).collect());
        match binner.split(cluster, Signal::Composition) {
            Split::Leaf(leaf) => {
                assert_eq!(leaf.name, "Root-x-1-N");
                assert_eq!(leaf.members, (0..150).collect::<Vec<_>>());
            },
            Split::Children(_) => panic!("a 150-read cluster must not be split"),
        }
    }

    #[test]
    fn test_three_blob_split() {
        // Three well-separated blobs of 200 reads each must come out of one composition split
        // as exactly three children, each containing reads from only one source blob.
        let reads = blob_reads(&[[0.0, 0.0], [1000.0, 0.0], [0.0, 1000.0]], 200, 1);
        let mut binner = test_binner(&reads);
        let cluster = Cluster::new("Root".to_string(), 0, (0..600).collect());
        let children = match binner.split(cluster, Signal::Composition) {
            Split::Children(children) => children,
            Split::Leaf(_) => panic!("a 600-read cluster must be split"),
        };
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].name, "Root-c-1");
        assert_eq!(children[1].name, "Root-c-2");
        assert_eq!(children[2].name, "Root-c-3");
        let mut seen: HashSet<usize> = HashSet::new();
        for child in &children {
            let blobs: HashSet<usize> = child.members.iter().map(|i| i / 200).collect();
            assert_eq!(blobs.len(), 1, "child {} mixes source blobs", child.name);
            for &i in &child.members {
                assert!(seen.insert(i), "read {} appears in two children", i);
            }
        }
        assert!(seen.len() <= 600);
    }

    #[test]
    fn test_reassignment_is_total() {
        // Reassignment must place every member of the full population into exactly one child,
        // regardless of which reads were in the subsample.
        let reads = blob_reads(&[[0.0, 0.0], [1000.0, 1000.0]], 300, 2);
        let binner = test_binner(&reads);
        let parent = Cluster::new("Root".to_string(), 0, (0..600).collect());
        // Children built from only part of each blob, as if discovered on a subsample.
        let child_a = Cluster::new("Root-c-1".to_string(), 1, (0..100).collect());
        let child_b = Cluster::new("Root-c-2".to_string(), 2, (300..400).collect());
        let reassigned = binner.reassign(&parent, vec![child_a, child_b], Signal::Composition);
        assert_eq!(reassigned.len(), 2);
        let total: usize = reassigned.iter().map(|c| c.size()).sum();
        assert_eq!(total, 600);
        assert_eq!(reassigned[0].members, (0..300).collect::<Vec<_>>());
        assert_eq!(reassigned[1].members, (300..600).collect::<Vec<_>>());
    }

    #[test]
    fn test_reassignment_ties_go_to_earliest_child() {
        // Two children with identical models: every read ties, so all of them must land in the
        // earlier-created child and the other is dropped as empty.
        let reads = blob_reads(&[[0.0, 0.0]], 200, 3);
        let binner = test_binner(&reads);
        let parent = Cluster::new("Root".to_string(), 0, (0..200).collect());
        let child_a = Cluster::new("Root-c-1".to_string(), 1, (0..50).collect());
        let child_b = Cluster::new("Root-c-2".to_string(), 2, (0..50).collect());
        let reassigned = binner.reassign(&parent, vec![child_a, child_b], Signal::Composition);
        assert_eq!(reassigned.len(), 1);
        assert_eq!(reassigned[0].name, "Root-c-1");
        assert_eq!(reassigned[0].size(), 200);
    }

    #[test]
    fn test_reassignment_with_no_children() {
        let reads = blob_reads(&[[0.0, 0.0]], 200, 4);
        let binner = test_binner(&reads);
        let parent = Cluster::new("Root".to_string(), 0, (0..200).collect());
        assert!(binner.reassign(&parent, Vec::new(), Signal::Composition).is_empty());
    }

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(&[1.0, 0.25, 3.5]), "1 0.25 3.5");
    }
}
