use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads a whole text file into memory.
pub fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	fs::read_to_string(filename)
}

/// Extension of debug dump files.
pub const DUMP_EXTENSION: &str = "dump";

/// Names the dump file of a chain trained on `inputs`.
///
/// The dump sits next to the first input and takes its name: a file
/// `corpus/novel.txt` gives `corpus/novel.dump`, a directory `corpus` gives
/// `corpus.dump`.
///
/// # Errors
/// Returns `InvalidInput` if `inputs` is empty or the first input has no
/// file name (e.g. `..`).
pub fn dump_path<P: AsRef<Path>>(inputs: &[P]) -> io::Result<PathBuf> {
	let first = inputs
		.first()
		.map(AsRef::as_ref)
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "No input to name the dump after"))?;
	if first.file_name().is_none() {
		return Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("Cannot name a dump after {}", first.display()),
		));
	}
	Ok(first.with_extension(DUMP_EXTENSION))
}

/// Lists all files with a given extension in a directory.
///
/// Returns full paths, sorted. Subdirectories are not visited.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}

/// Expands a list of training inputs into files.
///
/// Files are kept as given; directories contribute their files with
/// `extension` (see [`list_files`]).
///
/// # Errors
/// Returns an error if an input does not exist or a directory cannot be read.
pub fn collect_inputs<P: AsRef<Path>>(inputs: &[P], extension: &str) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();
	for input in inputs {
		let input = input.as_ref();
		if input.is_dir() {
			files.extend(list_files(input, extension)?);
		} else if input.is_file() {
			files.push(input.to_path_buf());
		} else {
			return Err(io::Error::new(
				io::ErrorKind::NotFound,
				format!("No such file or directory: {}", input.display()),
			));
		}
	}
	Ok(files)
}
