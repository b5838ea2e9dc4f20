// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::{fmt, iter::Peekable, str::Chars};

use crate::testscript::{Argument, Block, Command};

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
	pub line: u32,
	pub message: String,
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "parse error at line {}: {}", self.line, self.message)
	}
}

impl std::error::Error for ParseError {}

fn is_comment(line: &str) -> bool {
	let line = line.trim_start();
	line.starts_with('#') || line.starts_with("//")
}

fn is_separator(line: &str) -> bool {
	line.trim_end() == "---"
}

pub(crate) fn parse(input: &str) -> Result<Vec<Block>, ParseError> {
	let lines: Vec<&str> = input.split_inclusive('\n').collect();
	let mut blocks = Vec::new();
	let mut i = 0;

	while i < lines.len() {
		if lines[i].trim().is_empty() {
			i += 1;
			continue;
		}

		let line_number = i as u32 + 1;
		let mut literal = String::new();
		let mut commands = Vec::new();

		while i < lines.len() && !is_separator(lines[i]) {
			let line = lines[i];
			literal.push_str(line);
			if !line.trim().is_empty() && !is_comment(line) {
				commands.push(parse_command(line, i as u32 + 1)?);
			}
			i += 1;
		}

		if i == lines.len() {
			if !commands.is_empty() {
				return Err(ParseError {
					line: line_number,
					message: "block is missing its --- separator".to_string(),
				});
			}
			// trailing comments
			blocks.push(Block {
				literal,
				commands,
				line_number,
			});
			break;
		}

		if commands.is_empty() {
			return Err(ParseError {
				line: i as u32 + 1,
				message: "--- without preceding commands".to_string(),
			});
		}

		// skip the separator and the previously generated output
		i += 1;
		if i < lines.len() && lines[i].starts_with('>') {
			while i < lines.len() && lines[i].starts_with('>') {
				i += 1;
			}
		} else {
			while i < lines.len() && !lines[i].trim().is_empty() {
				i += 1;
			}
		}

		blocks.push(Block {
			literal,
			commands,
			line_number,
		});
	}

	Ok(blocks)
}

enum Token {
	Word(String),
	Equals,
}

/// Parses `[!]name arg key=value "quoted arg"`.
pub(crate) fn parse_command(line: &str, line_number: u32) -> Result<Command, ParseError> {
	let error = |message: &str| ParseError {
		line: line_number,
		message: message.to_string(),
	};

	let mut rest = line.trim();
	let fail = match rest.strip_prefix('!') {
		Some(stripped) => {
			rest = stripped.trim_start();
			true
		}
		None => false,
	};

	let mut tokens = tokenize(rest).map_err(|m| error(&m))?.into_iter().peekable();
	let name = match tokens.next() {
		Some(Token::Word(name)) => name,
		_ => return Err(error("expected command name")),
	};

	let mut args = Vec::new();
	while let Some(token) = tokens.next() {
		let Token::Word(word) = token else {
			return Err(error("unexpected '='"));
		};
		if !matches!(tokens.peek(), Some(Token::Equals)) {
			args.push(Argument {
				key: None,
				value: word,
			});
			continue;
		}
		tokens.next();
		match tokens.next() {
			Some(Token::Word(value)) => args.push(Argument {
				key: Some(word),
				value,
			}),
			_ => return Err(error(&format!("missing value for '{}'", word))),
		}
	}

	Ok(Command {
		name,
		args,
		fail,
		line_number,
	})
}

fn tokenize(text: &str) -> Result<Vec<Token>, String> {
	let mut tokens = Vec::new();
	let mut chars = text.chars().peekable();

	while let Some(&c) = chars.peek() {
		match c {
			c if c.is_whitespace() => {
				chars.next();
			}
			'=' => {
				chars.next();
				tokens.push(Token::Equals);
			}
			'"' | '\'' => {
				chars.next();
				tokens.push(Token::Word(quoted(&mut chars, c)?));
			}
			_ => {
				let mut word = String::new();
				while let Some(&c) = chars.peek() {
					if c.is_whitespace() || matches!(c, '=' | '"' | '\'') {
						break;
					}
					word.push(c);
					chars.next();
				}
				tokens.push(Token::Word(word));
			}
		}
	}

	Ok(tokens)
}

fn quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Result<String, String> {
	let mut value = String::new();
	loop {
		match chars.next() {
			None => return Err("unterminated string".to_string()),
			Some(c) if c == quote => return Ok(value),
			Some('\\') => match chars.next() {
				Some('n') => value.push('\n'),
				Some('t') => value.push('\t'),
				Some('0') => value.push('\0'),
				Some(c) => value.push(c),
				None => return Err("unterminated escape".to_string()),
			},
			Some(c) => value.push(c),
		}
	}
}
