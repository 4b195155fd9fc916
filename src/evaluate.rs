// This file contains the code for scoring a binning against ground-truth species labels: a
// contingency matrix, precision, recall and the adjusted Rand index. The longbin evaluate
// subcommand applies the same scoring to a saved read_bins.txt file so a run can be re-scored
// without repeating the binning.

// Copyright 2025 Longbin contributors

// This file is part of Longbin. Longbin is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Longbin is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Longbin. If not, see <http://www.gnu.org/licenses/>.

use fxhash::FxHashMap;
use std::path::PathBuf;

use crate::log::{section_header, explanation};
use crate::misc::{check_if_file_exists, load_file_lines, quit_with_error};

pub const UNBINNED: &str = "unbinned";


pub struct Evaluation {
    pub species: Vec<String>,
    pub bins: Vec<String>,
    pub matrix: Vec<Vec<u64>>,
    pub total_reads: usize,
    pub precision: f64,
    pub recall: f64,
    pub adjusted_rand_index: f64,
}


pub fn evaluate(ground_truth: PathBuf, read_bins: PathBuf) {
    check_settings(&ground_truth, &read_bins);
    starting_message();
    print_settings(&ground_truth, &read_bins);
    let (truth, assigned) = load_assignments(&ground_truth, &read_bins);
    if truth.is_empty() {
        quit_with_error("no binned reads to evaluate");
    }
    eprintln!("Binned reads: {}", truth.len());
    eprintln!();
    let evaluation = score(&truth, &assigned);
    evaluation.print_report();
}


fn check_settings(ground_truth: &PathBuf, read_bins: &PathBuf) {
    check_if_file_exists(ground_truth);
    check_if_file_exists(read_bins);
}


fn starting_message() {
    section_header("Starting longbin evaluate");
    explanation("This command scores a previously saved binning (a read_bins.txt file from \
                 longbin bin) against ground-truth species labels. Unbinned reads are excluded \
                 from the scoring.");
}


fn print_settings(ground_truth: &PathBuf, read_bins: &PathBuf) {
    eprintln!("Settings:");
    eprintln!("  --ground_truth {}", ground_truth.display());
    eprintln!("  --read_bins {}", read_bins.display());
    eprintln!();
}


fn load_assignments(ground_truth: &PathBuf, read_bins: &PathBuf) -> (Vec<String>, Vec<String>) {
    // Loads the two row-aligned label files, dropping any trailing blank lines, and filters out
    // reads that were not assigned to a bin.
    let mut truth: Vec<String> = load_file_lines(ground_truth).iter()
        .map(|l| l.trim().to_string()).collect();
    let mut assigned: Vec<String> = load_file_lines(read_bins).iter()
        .map(|l| l.trim().to_string()).collect();
    while truth.last().is_some_and(|l| l.is_empty()) { truth.pop(); }
    while assigned.last().is_some_and(|l| l.is_empty()) { assigned.pop(); }
    if truth.len() != assigned.len() {
        quit_with_error(&format!("{} has {} labels but {} has {}", ground_truth.display(),
                                 truth.len(), read_bins.display(), assigned.len()));
    }
    truth.into_iter().zip(assigned).filter(|(_, bin)| bin != UNBINNED).unzip()
}


pub fn score(truth: &[String], assigned: &[String]) -> Evaluation {
    // Builds the species-by-bin contingency matrix and the three summary scores. Rows and
    // columns are ordered by first appearance over the reads, so for a binning run (which feeds
    // reads in bin order) the columns come out in bin-creation order.
    assert_eq!(truth.len(), assigned.len());
    let mut species_index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut bin_index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut species: Vec<String> = Vec::new();
    let mut bins: Vec<String> = Vec::new();
    for (s, b) in truth.iter().zip(assigned) {
        species_index.entry(s).or_insert_with(|| { species.push(s.clone());
                                                   species.len() - 1 });
        bin_index.entry(b).or_insert_with(|| { bins.push(b.clone());
                                               bins.len() - 1 });
    }
    let mut matrix = vec![vec![0_u64; bins.len()]; species.len()];
    for (s, b) in truth.iter().zip(assigned) {
        matrix[species_index[s.as_str()]][bin_index[b.as_str()]] += 1;
    }

    let total = truth.len() as u64;
    let row_max: u64 = matrix.iter().map(|row| *row.iter().max().unwrap()).sum();
    let col_max: u64 = (0..bins.len())
        .map(|c| matrix.iter().map(|row| row[c]).max().unwrap()).sum();

    Evaluation { precision: row_max as f64 / total as f64,
                 recall: col_max as f64 / total as f64,
                 adjusted_rand_index: adjusted_rand_index(&matrix, total),
                 species, bins, matrix, total_reads: truth.len() }
}


fn adjusted_rand_index(matrix: &[Vec<u64>], total: u64) -> f64 {
    // Chance-corrected agreement between the two labellings, computed from the contingency
    // matrix. Degenerate cases where the expected index equals the maximum (e.g. a single
    // species and a single bin) score 1.
    fn comb2(n: u64) -> f64 {
        (n as f64) * (n as f64 - 1.0) / 2.0
    }
    let index: f64 = matrix.iter().flatten().map(|&n| comb2(n)).sum();
    let row_sum: f64 = matrix.iter().map(|row| comb2(row.iter().sum())).sum();
    let col_sum: f64 = (0..matrix[0].len())
        .map(|c| comb2(matrix.iter().map(|row| row[c]).sum())).sum();
    let expected = row_sum * col_sum / comb2(total);
    let max_index = (row_sum + col_sum) / 2.0;
    if (max_index - expected).abs() < f64::EPSILON {
        return 1.0;
    }
    (index - expected) / (max_index - expected)
}


impl Evaluation {
    pub fn print_report(&self) {
        // Prints the contingency matrix (species as rows, bins as columns) followed by the
        // summary scores, all to stderr like the rest of the logging.
        let name_width = self.species.iter().map(|s| s.len()).max().unwrap_or(0);
        let col_widths: Vec<usize> = self.bins.iter().enumerate().map(|(c, bin)| {
            let widest_count = self.matrix.iter()
                .map(|row| row[c].to_string().len()).max().unwrap_or(1);
            bin.len().max(widest_count)
        }).collect();
        let mut header = format!("{:name_width$}", "");
        for (bin, &width) in self.bins.iter().zip(&col_widths) {
            header += &format!("  {:>width$}", bin);
        }
        eprintln!("{}", header);
        for (s, row) in self.species.iter().zip(&self.matrix) {
            let mut line = format!("{:name_width$}", s);
            for (&count, &width) in row.iter().zip(&col_widths) {
                line += &format!("  {:>width$}", count);
            }
            eprintln!("{}", line);
        }
        eprintln!();
        eprintln!("Total reads: {}", self.total_reads);
        eprintln!("Precision:   {:.3}", self.precision);
        eprintln!("Recall:      {:.3}", self.recall);
        eprintln!("ARI:         {:.3}", self.adjusted_rand_index);
        eprintln!();
    }
}
