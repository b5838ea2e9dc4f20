// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::{error::Error, str::FromStr};

/// A group of commands sharing one output section.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
	/// Everything before the `---` line, copied verbatim into the output.
	pub literal: String,
	pub commands: Vec<Command>,
	pub line_number: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
	pub name: String,
	pub args: Vec<Argument>,
	/// Prefixed with `!`.
	pub fail: bool,
	pub line_number: u32,
}

/// A positional `value` or a `key=value` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
	pub key: Option<String>,
	pub value: String,
}

impl Argument {
	/// Parses the value, naming the argument in the error.
	pub fn parse<T>(&self) -> Result<T, Box<dyn Error>>
	where
		T: FromStr,
		T::Err: Error + 'static,
	{
		self.value.parse().map_err(|e| {
			let name = self.key.as_deref().unwrap_or("argument");
			format!("invalid {} '{}': {}", name, self.value, e).into()
		})
	}
}

impl Command {
	pub fn positional(&self) -> impl Iterator<Item = &Argument> {
		self.args.iter().filter(|a| a.key.is_none())
	}

	/// Last value given for `key`.
	pub fn get(&self, key: &str) -> Option<&Argument> {
		self.args.iter().rev().find(|a| a.key.as_deref() == Some(key))
	}

	/// Fails if any keyed argument is not in `allowed`.
	pub fn reject_unknown(&self, allowed: &[&str]) -> Result<(), Box<dyn Error>> {
		match self.args.iter().filter_map(|a| a.key.as_deref()).find(|k| !allowed.contains(k)) {
			Some(key) => Err(format!("unknown argument '{}' for {}", key, self.name).into()),
			None => Ok(()),
		}
	}
}
