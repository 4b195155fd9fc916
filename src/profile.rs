// This file contains the code for loading per-read profile matrices and ground-truth labels.
// Profiles are plain-text numeric matrices (optionally gzipped) with one whitespace-separated
// row per read, as written by the upstream k-mer counting tools.

// Copyright 2025 Longbin contributors

// This file is part of Longbin. Longbin is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Longbin is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Longbin. If not, see <http://www.gnu.org/licenses/>.

use std::path::Path;

use crate::misc::{load_file_lines, quit_with_error};


pub struct Read {
    pub label: Option<String>,
    pub composition: Vec<f64>,
    pub coverage: Vec<f64>,
}


pub fn load_reads(composition_file: &Path, coverage_file: &Path,
                  ground_truth_file: Option<&Path>) -> Vec<Read> {
    // Loads the two row-aligned profile matrices (and optional ground-truth tags) and bundles
    // them into one Read per row. Any mismatch between the files is fatal.
    let composition = load_matrix(composition_file);
    let coverage = load_matrix(coverage_file);
    if composition.len() != coverage.len() {
        quit_with_error(&format!("row count mismatch: {} has {} rows but {} has {}",
                                 composition_file.display(), composition.len(),
                                 coverage_file.display(), coverage.len()));
    }
    let labels = match ground_truth_file {
        Some(f) => load_ground_truth(f, composition.len()).into_iter().map(Some).collect(),
        None => vec![None; composition.len()],
    };
    composition.into_iter().zip(coverage).zip(labels)
        .map(|((composition, coverage), label)| Read { label, composition, coverage })
        .collect()
}


fn load_matrix(filename: &Path) -> Vec<Vec<f64>> {
    // Parses a whitespace-separated numeric matrix, one row per line. All rows must have the
    // same width. Blank lines are ignored.
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (line_num, line) in load_file_lines(filename).iter().enumerate() {
        if line.trim().is_empty() { continue; }
        let row: Vec<f64> = line.split_whitespace().map(|v| {
            v.parse().unwrap_or_else(|_| {
                quit_with_error(&format!("{} line {} contains a non-numeric value: {}",
                                         filename.display(), line_num + 1, v));
            })
        }).collect();
        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                quit_with_error(&format!("{} line {} has {} values but earlier rows have {}",
                                         filename.display(), line_num + 1, row.len(),
                                         first.len()));
            }
        }
        rows.push(row);
    }
    if rows.is_empty() {
        quit_with_error(&format!("{} contains no profile rows", filename.display()));
    }
    rows
}


fn load_ground_truth(filename: &Path, read_count: usize) -> Vec<String> {
    // Loads one ground-truth tag per line, aligned with the profile rows. Trailing blank lines
    // are tolerated (files usually end with a newline).
    let mut labels: Vec<String> = load_file_lines(filename).iter()
        .map(|l| l.trim().to_string()).collect();
    while labels.last().is_some_and(|l| l.is_empty()) { labels.pop(); }
    if labels.len() != read_count {
        quit_with_error(&format!("{} has {} labels but the profiles have {} rows",
                                 filename.display(), labels.len(), read_count));
    }
    labels
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::make_test_file;

    #[test]
    fn test_load_reads() {
        let dir = tempfile::tempdir().unwrap();
        let comp = dir.path().join("comp.txt");
        let cov = dir.path().join("cov.txt");
        let truth = dir.path().join("truth.txt");
        make_test_file(&comp, "0.1 0.2 0.3\n0.4 0.5 0.6\n");
        make_test_file(&cov, "1 2\n3 4\n");
        make_test_file(&truth, "species_a\nspecies_b\n\n");
        let reads = load_reads(&comp, &cov, Some(&truth));
        assert_eq!(reads.len(), 2);
        assert_eq!(reads[0].composition, vec![0.1, 0.2, 0.3]);
        assert_eq!(reads[1].coverage, vec![3.0, 4.0]);
        assert_eq!(reads[0].label.as_deref(), Some("species_a"));
        assert_eq!(reads[1].label.as_deref(), Some("species_b"));

        let reads = load_reads(&comp, &cov, None);
        assert!(reads[0].label.is_none());
    }

    #[test]
    fn test_load_matrix_ragged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.txt");
        make_test_file(&path, "1 2 3\n4 5\n");
        assert!(std::panic::catch_unwind(|| load_matrix(&path)).is_err());
    }

    #[test]
    fn test_load_matrix_non_numeric() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        make_test_file(&path, "1 2 3\n4 oops 6\n");
        assert!(std::panic::catch_unwind(|| load_matrix(&path)).is_err());
    }

    #[test]
    fn test_row_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let comp = dir.path().join("comp.txt");
        let cov = dir.path().join("cov.txt");
        make_test_file(&comp, "1 2\n3 4\n");
        make_test_file(&cov, "1 2\n");
        assert!(std::panic::catch_unwind(|| load_reads(&comp, &cov, None)).is_err());
    }

    #[test]
    fn test_ground_truth_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let comp = dir.path().join("comp.txt");
        let cov = dir.path().join("cov.txt");
        let truth = dir.path().join("truth.txt");
        make_test_file(&comp, "1 2\n3 4\n");
        make_test_file(&cov, "1 2\n3 4\n");
        make_test_file(&truth, "only_one\n");
        assert!(std::panic::catch_unwind(|| load_reads(&comp, &cov, Some(&truth))).is_err());
    }
}
