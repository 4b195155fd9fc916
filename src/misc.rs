// This file contains miscellaneous functions used by various parts of Longbin.

// Copyright 2025 Longbin contributors

// This file is part of Longbin. Longbin is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Longbin is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Longbin. If not, see <http://www.gnu.org/licenses/>.

use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{create_dir_all, File};
use std::io::{prelude::*, BufReader};
use std::path::Path;
use std::time::Duration;


pub fn create_dir(dir_path: &Path) {
    match create_dir_all(dir_path) {
        Ok(_) => {},
        Err(e) => quit_with_error(&format!("failed to create directory {}\n{}",
                                           dir_path.display(), e)),
    }
}


pub fn check_if_file_exists(filename: &Path) {
    // Quits with an error if the given path is not an existing file.
    if !filename.exists() {
        quit_with_error(&format!("file does not exist: {}", filename.display()));
    }
    if !filename.is_file() {
        quit_with_error(&format!("{} is not a file", filename.display()));
    }
}


pub fn check_if_dir_is_not_dir(dir: &Path) {
    // Quits with an error if the given path exists but is not a directory (not existing is okay).
    if dir.exists() && !dir.is_dir() {
        quit_with_error(&format!("{} exists but is not a directory", dir.display()));
    }
}


#[cfg(not(test))]
pub fn quit_with_error(text: &str) -> ! {
    // For friendly error messages, this function normally just prints the error and quits.
    eprintln!();
    eprintln!("Error: {}", text);
    std::process::exit(1);
}
#[cfg(test)]
pub fn quit_with_error(text: &str) -> ! {
    // But when running unit tests, this function instead panics so I can catch it for the test.
    panic!("{}", text);
}


pub fn text_reader(filename: &Path) -> BufReader<Box<dyn Read>> {
    // Returns a buffered reader for a text file that works on both plain and gzipped files.
    let file = File::open(filename).unwrap_or_else(|e| {
        quit_with_error(&format!("unable to open {}\n{}", filename.display(), e));
    });
    let reader: Box<dyn Read> = if is_file_gzipped(filename) { Box::new(GzDecoder::new(file)) }
                                                        else { Box::new(file) };
    BufReader::new(reader)
}


pub fn load_file_lines(filename: &Path) -> Vec<String> {
    text_reader(filename).lines().map(|line_result| {
        line_result.unwrap_or_else(|e| {
            quit_with_error(&format!("failed to read {}\n{}", filename.display(), e));
        })
    }).collect()
}


fn is_file_gzipped(filename: &Path) -> bool {
    // This function returns true if the file appears to be gzipped (based on the first two bytes)
    // and false if not. If it can't open the file, it will quit with an error message. Files too
    // small to hold the gzip magic bytes are treated as plain text.
    let open_result = File::open(filename);
    match open_result {
        Ok(_)  => (),
        Err(e) => quit_with_error(&format!("unable to open {}\n{}", filename.display(), e)),
    }
    let file = open_result.unwrap();
    let mut reader = BufReader::new(file);
    let mut buf = vec![0u8; 2];
    if reader.read_exact(&mut buf).is_err() {
        return false;
    }
    buf[0] == 31 && buf[1] == 139
}


pub fn format_float(num: f64) -> String {
    // Formats a float with up to six decimal places but then drops trailing zeros.
    let mut formatted = format!("{:.6}", num);
    if !formatted.contains('.') { return formatted }
    while formatted.chars().last().unwrap() == '0' { formatted.pop(); }
    if formatted.chars().last().unwrap() == '.' { formatted.pop(); }
    formatted
}


pub fn spinner(message: &str) -> ProgressBar {
    if cfg!(test) {
        ProgressBar::hidden() // don't show a spinner during unit tests
    } else {
        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&vec!["⠋", "⠙", "⠚", "⠞", "⠖", "⠦", "⠴", "⠲", "⠳", "⠓"])  // dots3 from github.com/sindresorhus/cli-spinners
                .template("{spinner} {msg}").unwrap(),
        );
        pb.set_message(message.to_string().clone());
        pb
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(0.11), "0.11");
        assert_eq!(format_float(0.111), "0.111");
        assert_eq!(format_float(0.1111), "0.1111");
        assert_eq!(format_float(0.11111), "0.11111");
        assert_eq!(format_float(0.111111), "0.111111");
        assert_eq!(format_float(0.1111111), "0.111111");
        assert_eq!(format_float(10.0), "10");
    }

    #[test]
    fn test_load_file_lines_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "first line").unwrap();
        writeln!(file, "second line").unwrap();
        assert_eq!(load_file_lines(&path), vec!["first line", "second line"]);
    }

    #[test]
    fn test_load_file_lines_gzipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zipped.txt.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        writeln!(encoder, "first line").unwrap();
        writeln!(encoder, "second line").unwrap();
        encoder.finish().unwrap();
        assert!(is_file_gzipped(&path));
        assert_eq!(load_file_lines(&path), vec!["first line", "second line"]);
    }

    #[test]
    fn test_check_if_file_exists() {
        assert!(std::panic::catch_unwind(|| {
            check_if_file_exists(Path::new("not/a/real/file"));
        }).is_err());
    }
}
