// This file contains the code for writing Longbin's YAML file of run metrics.

// Copyright 2025 Longbin contributors

// This file is part of Longbin. Longbin is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Longbin is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Longbin. If not, see <http://www.gnu.org/licenses/>.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::PathBuf;


#[derive(Serialize, Deserialize, Debug, Default)]
pub struct BinningMetrics {
    pub read_count: usize,
    pub coverage_cluster_count: usize,
    pub leaf_cluster_count: usize,
    pub bin_count: usize,
    pub binned_read_count: usize,
    pub binned_read_fraction: f64,

    // Only set when ground truth was provided and at least one bin was accepted.
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub adjusted_rand_index: Option<f64>,
}

impl BinningMetrics {
    pub fn new() -> Self { Self::default() }

    pub fn calculate_fraction(&mut self) {
        if self.read_count > 0 {
            self.binned_read_fraction = self.binned_read_count as f64 / self.read_count as f64;
        }
    }

    pub fn save_to_yaml(&self, filename: &PathBuf) { save_yaml(filename, self).unwrap(); }
}


fn save_yaml<T: Serialize>(yaml_filename: &PathBuf, data: T) -> io::Result<()> {
    let yaml_string = serde_yaml::to_string(&data).unwrap();
    let mut file = File::create(yaml_filename)?;
    file.write_all(yaml_string.as_bytes())?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::assert_almost_eq;
    use std::fs::read_to_string;

    #[test]
    fn test_calculate_fraction() {
        let mut metrics = BinningMetrics::new();
        metrics.read_count = 200;
        metrics.binned_read_count = 150;
        metrics.calculate_fraction();
        assert_almost_eq(metrics.binned_read_fraction, 0.75, 1e-10);

        let mut empty = BinningMetrics::new();
        empty.calculate_fraction();
        assert_almost_eq(empty.binned_read_fraction, 0.0, 1e-10);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("binning.yaml");
        let mut metrics = BinningMetrics::new();
        metrics.read_count = 1000;
        metrics.bin_count = 3;
        metrics.precision = Some(0.95);
        metrics.save_to_yaml(&yaml);
        let contents = read_to_string(&yaml).unwrap();
        assert!(contents.contains("read_count: 1000"));
        assert!(contents.contains("bin_count: 3"));
        let reloaded: BinningMetrics = serde_yaml::from_str(&contents).unwrap();
        assert_eq!(reloaded.read_count, 1000);
        assert_almost_eq(reloaded.precision.unwrap(), 0.95, 1e-10);
        assert!(reloaded.recall.is_none());
    }
}
