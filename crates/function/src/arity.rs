// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::Result;

use crate::FunctionError;

/// Number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
	Exact(usize),
	/// Inclusive on both ends.
	Range(usize, usize),
	AtLeast(usize),
}

impl Arity {
	pub fn accepts(&self, actual: usize) -> bool {
		match *self {
			Arity::Exact(n) => actual == n,
			Arity::Range(min, max) => (min..=max).contains(&actual),
			Arity::AtLeast(min) => actual >= min,
		}
	}

	/// Construction time check, fails with [`FunctionError::InvalidArgumentNumber`].
	pub fn check(&self, function: &str, actual: usize) -> Result<()> {
		if self.accepts(actual) {
			return Ok(());
		}

		Err(FunctionError::InvalidArgumentNumber {
			function: function.to_string(),
			expected: *self,
			actual,
		}
		.into())
	}

	/// Rewrite time check. Only fixed arity nodes reject here; variadic nodes
	/// are validated again by their constructor.
	pub fn check_children(&self, node: &str, actual: usize) -> Result<()> {
		match *self {
			Arity::Exact(expected) if expected != actual => Err(FunctionError::InvalidChildrenNumber {
				node: node.to_string(),
				actual,
				expected,
			}
			.into()),
			_ => Ok(()),
		}
	}
}

impl Display for Arity {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match *self {
			Arity::Exact(n) => write!(f, "{}", n),
			Arity::Range(min, max) if max == min + 1 => write!(f, "{} or {}", min, max),
			Arity::Range(min, max) => {
				for n in min..max {
					write!(f, "{}, ", n)?;
				}
				write!(f, "or {}", max)
			}
			Arity::AtLeast(n) => write!(f, "at least {}", n),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display() {
		assert_eq!(Arity::Exact(2).to_string(), "2");
		assert_eq!(Arity::Range(1, 2).to_string(), "1 or 2");
		assert_eq!(Arity::Range(1, 3).to_string(), "1, 2, or 3");
		assert_eq!(Arity::AtLeast(2).to_string(), "at least 2");
	}

	#[test]
	fn test_accepts() {
		assert!(Arity::Exact(1).accepts(1));
		assert!(!Arity::Exact(1).accepts(2));
		assert!(Arity::Range(1, 3).accepts(3));
		assert!(!Arity::Range(1, 3).accepts(0));
		assert!(Arity::AtLeast(2).accepts(10));
		assert!(!Arity::AtLeast(2).accepts(1));
	}

	#[test]
	fn test_check() {
		let err = Arity::Range(1, 3).check("ST_PointFromText", 4).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_002");
		assert_eq!(err.message, "function 'ST_PointFromText' expected 1, 2, or 3 arguments, 4 received");
	}

	#[test]
	fn test_check_children() {
		let err = Arity::Exact(2).check_children("POINT", 1).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_003");
		assert!(Arity::AtLeast(2).check_children("CONCAT", 0).is_ok());
	}
}
