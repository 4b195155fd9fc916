// This file contains functions for printing nicely formatted log messages to stderr.

// Copyright 2025 Longbin contributors

// This file is part of Longbin. Longbin is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Longbin is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Longbin. If not, see <http://www.gnu.org/licenses/>.

use chrono::Local;
use colored::Colorize;


pub fn section_header(text: &str) {
    // Prints a timestamped section header, used to mark the start of each stage of a run.
    let now = Local::now();
    let date = format!("({})", now.format("%Y-%m-%d %H:%M:%S"));
    eprintln!();
    eprintln!("{} {}", text.bold().bright_yellow().underline(), date.dimmed());
}


pub fn explanation(text: &str) {
    // Prints a dimmed description paragraph under a section header, wrapped to the terminal
    // width (capped at 80 columns so wide terminals stay readable).
    let width = match term_size::dimensions_stderr() {
        Some((w, _)) => std::cmp::min(w, 80),
        None => 80,
    };
    for line in textwrap::wrap(text, width) {
        eprintln!("{}", line.dimmed());
    }
    eprintln!();
}


pub fn warning(text: &str) {
    eprintln!("{} {}", "WARNING:".bold().bright_yellow(), text);
}
