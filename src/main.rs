// This is the main file of Longbin and where execution starts. It mainly handles the CLI and
// then calls into other files to run whichever subcommand the user chose.

// Copyright 2025 Longbin contributors

// This file is part of Longbin. Longbin is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Longbin is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Longbin. If not, see <http://www.gnu.org/licenses/>.

use std::path::PathBuf;
use clap::{Parser, Subcommand, crate_version};

mod binner;
mod cluster;
mod dbscan;
mod embed;
mod epsilon;
mod evaluate;
mod log;
mod metrics;
mod misc;
mod profile;


#[derive(Parser)]
#[clap(name = "Longbin",
       version = concat!("v", crate_version!()),
       about = "a tool for reference-free binning of long reads\n\
                by coverage and composition",
       before_help = concat!(r#"  _                      _     _       "#, "\n",
                             r#" | |    ___  _ __   __ _| |__ (_)_ __  "#, "\n",
                             r#" | |   / _ \| '_ \ / _` | '_ \| | '_ \ "#, "\n",
                             r#" | |__| (_) | | | | (_| | |_) | | | | |"#, "\n",
                             r#" |_____\___/|_| |_|\__, |_.__/|_|_| |_|"#, "\n",
                             r#"                   |___/               "#))]
#[command(author, version, long_about = None, disable_help_subcommand = true,
          propagate_version = true)]
#[clap(subcommand_required = true)]
#[clap(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {

    /// bin long reads using their coverage and composition profiles
    Bin {
        /// Composition profile matrix, one row per read (required)
        #[clap(short = 'c', long = "composition", required = true)]
        composition: PathBuf,

        /// Coverage profile matrix, one row per read (required)
        #[clap(short = 'k', long = "coverage", required = true)]
        coverage: PathBuf,

        /// Ground-truth species labels, one per read
        #[clap(short = 'g', long = "ground_truth")]
        ground_truth: Option<PathBuf>,

        /// Output directory (required)
        #[clap(short = 'o', long = "out_dir", required = true)]
        out_dir: PathBuf,

        /// Embedding method: tsne, umap or graph
        #[clap(short = 'e', long = "embedding", default_value = "tsne")]
        embedding: String,

        /// Binning sensitivity (1-10, higher finds more, finer bins)
        #[clap(short = 's', long = "sensitivity", default_value = "10")]
        sensitivity: u32,

        /// Recurse into a split's children only when there are more than this many of them
        #[clap(long = "recurse_threshold", default_value = "100")]
        recurse_threshold: usize,

        /// Number of CPU threads
        #[clap(short = 't', long = "threads", default_value = "8")]
        threads: usize,

        /// Do not subsample oversized clusters before splitting
        #[clap(long = "no_subsample")]
        no_subsample: bool,

        /// Save per-split embedding TSVs for external plotting
        #[clap(long = "plot")]
        plot: bool,

        /// Seed for random number generator
        #[clap(long = "seed", default_value = "0")]
        seed: u64,
    },

    /// score a saved binning against ground-truth labels
    Evaluate {
        /// Ground-truth species labels, one per read (required)
        #[clap(short = 'g', long = "ground_truth", required = true)]
        ground_truth: PathBuf,

        /// read_bins.txt file from a longbin bin run (required)
        #[clap(short = 'b', long = "read_bins", required = true)]
        read_bins: PathBuf,
    },
}


fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Bin { composition, coverage, ground_truth, out_dir, embedding,
                             sensitivity, recurse_threshold, threads, no_subsample, plot,
                             seed }) => {
            binner::bin(composition, coverage, ground_truth, out_dir, embedding, sensitivity,
                        recurse_threshold, threads, no_subsample, plot, seed);
        },
        Some(Commands::Evaluate { ground_truth, read_bins }) => {
            evaluate::evaluate(ground_truth, read_bins);
        },
        None => {}
    }
}
