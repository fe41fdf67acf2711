use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads line by line through a buffered reader
/// - Splits on `\n` / `\r\n`
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	BufReader::new(File::open(filename)?).lines().collect()
}

/// Writes one string per line to `path`.
///
/// - `append = true` adds to the end of an existing file
/// - `append = false` truncates (or creates) the file first
pub fn write_lines<P, S>(lines: &[S], path: P, append: bool) -> io::Result<()>
where
	P: AsRef<Path>,
	S: AsRef<str>,
{
	let file = OpenOptions::new()
		.create(true)
		.write(true)
		.append(append)
		.truncate(!append)
		.open(path)?;

	let mut writer = BufWriter::new(file);
	for line in lines {
		writeln!(writer, "{}", line.as_ref())?;
	}
	writer.flush()
}
