// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::{
	error::Error,
	io::{self, Write as _},
	path::Path,
};

use goldenfile::Mint;

use crate::testscript::{Command, parser::parse};

/// Executes script commands.
pub trait Runner {
	/// Runs one command and returns its output. Errors are rendered as the
	/// output of commands prefixed with `!` and abort the script otherwise.
	fn run(&mut self, command: &Command) -> Result<String, Box<dyn Error>>;

	/// Called once before the first block.
	fn start_script(&mut self) -> Result<(), Box<dyn Error>> {
		Ok(())
	}
}

/// Runs the script at `path` and compares the regenerated file against it.
///
/// Panics on mismatch when the golden file is checked. Files ending in
/// `.skip` are ignored.
pub fn run_path<R: Runner>(runner: &mut R, path: impl AsRef<Path>) -> io::Result<()> {
	let path = path.as_ref();
	let (Some(dir), Some(filename)) = (path.parent(), path.file_name()) else {
		return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("invalid path '{}'", path.display())));
	};

	if filename.to_string_lossy().ends_with(".skip") {
		return Ok(());
	}

	let input = std::fs::read_to_string(path)?;
	let output = generate(runner, &input)?;

	let mut mint = Mint::new(dir);
	mint.new_goldenfile(filename)?.write_all(output.as_bytes())
}

/// Regenerates the output sections of `input`.
pub fn generate<R: Runner>(runner: &mut R, input: &str) -> io::Result<String> {
	let mut output = String::with_capacity(input.len());

	let blocks = parse(input).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

	runner.start_script().map_err(|e| io::Error::other(format!("start_script failed: {e}")))?;

	for (i, block) in blocks.iter().enumerate() {
		if block.commands.is_empty() {
			output.push_str(&block.literal);
			continue;
		}

		let mut block_output = String::new();
		for command in &block.commands {
			let result = match runner.run(command) {
				Ok(result) if command.fail => {
					return Err(io::Error::other(format!(
						"expected command '{}' to fail at line {}, succeeded with: {result}",
						command.name, command.line_number
					)));
				}
				Ok(result) => result,
				Err(e) if command.fail => format!("Error: {e}"),
				Err(e) => {
					return Err(io::Error::other(format!(
						"command '{}' failed at line {}: {e}",
						command.name, command.line_number
					)));
				}
			};
			block_output.push_str(&ensure_eol(result));
		}

		if block_output.is_empty() {
			block_output.push_str("ok\n");
		}

		// blank lines would end the output section, so quote it instead
		if block_output.starts_with('\n') || block_output.contains("\n\n") {
			block_output = format!("> {}", block_output.replace('\n', "\n> "));
			block_output.truncate(block_output.len() - 2);
		}

		output.push_str(&block.literal);
		output.push_str("---\n");
		output.push_str(&block_output);
		if i < blocks.len() - 1 {
			output.push('\n');
		}
	}

	Ok(output)
}

fn ensure_eol(mut s: String) -> String {
	if !s.is_empty() && !s.ends_with('\n') {
		s.push('\n');
	}
	s
}
