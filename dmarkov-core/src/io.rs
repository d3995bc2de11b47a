use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{DMarkovError, Result};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Reads a text file as a sequence of character symbols.
///
/// Line breaks are dropped, so a sequence may be wrapped over several lines.
pub fn read_sequence<P: AsRef<Path>>(filename: P) -> Result<Vec<char>> {
	let lines = read_file(filename)?;
	Ok(lines.iter().flat_map(|line| line.chars()).collect())
}

/// Reads a comma separated file.
///
/// Returns every non-blank row with its 1-based line number, cells trimmed.
/// No quoting is supported: a cell never contains a comma.
pub(crate) fn read_table<P: AsRef<Path>>(filename: P) -> Result<Vec<(usize, Vec<String>)>> {
	let rows = read_file(filename)?
		.iter()
		.enumerate()
		.filter(|(_, line)| !line.trim().is_empty())
		.map(|(index, line)| (index + 1, split_row(line)))
		.collect();
	Ok(rows)
}

fn split_row(line: &str) -> Vec<String> {
	line.split(',').map(|cell| cell.trim().to_owned()).collect()
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/states.csv` + `"bin"` → `data/states.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path.file_stem().ok_or_else(|| {
		std::io::Error::new(std::io::ErrorKind::InvalidInput, "Input path has no filename")
	})?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Whether `derived` exists and is at least as recent as every `sources` file.
pub(crate) fn is_up_to_date<P: AsRef<Path>>(derived: P, sources: &[&Path]) -> Result<bool> {
	let derived = derived.as_ref();
	if !derived.exists() {
		return Ok(false);
	}
	let built = derived.metadata()?.modified()?;
	for source in sources {
		if source.metadata()?.modified()? > built {
			return Ok(false);
		}
	}
	Ok(true)
}

/// Serializes a value with `postcard` and writes it to `path`.
pub(crate) fn save_binary<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
	let bytes = postcard::to_stdvec(value)?;
	std::fs::write(path, bytes)?;
	Ok(())
}

/// Reads a `postcard` encoded value from `path`.
pub(crate) fn load_binary<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
	let bytes = std::fs::read(path)?;
	postcard::from_bytes(&bytes).map_err(DMarkovError::from)
}
