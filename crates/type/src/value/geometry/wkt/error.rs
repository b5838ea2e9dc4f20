// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

use thiserror::Error;

use crate::{
	IntoDiagnostic,
	error::{Diagnostic, diagnostic::gis},
	value::geometry::GeometryKind,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WktError {
	#[error("missing opening parenthesis")]
	MissingParenthesis,

	#[error("unbalanced parentheses")]
	Unbalanced,

	#[error("expected ',' between groups, found '{0}'")]
	UnexpectedToken(String),

	#[error("expected 2 coordinates, found {0}")]
	TokenCount(usize),

	#[error("invalid coordinate '{0}'")]
	InvalidCoordinate(String),

	#[error("polygon ring is not closed")]
	OpenRing,

	#[error("{what} requires at least {min} points")]
	TooFewPoints {
		what: &'static str,
		min: usize,
	},

	#[error("unknown geometry type '{0}'")]
	UnknownType(String),

	#[error("expected {expected}, found {actual}")]
	KindMismatch {
		expected: GeometryKind,
		actual: GeometryKind,
	},

	#[error("empty geometry body")]
	Empty,
}

impl IntoDiagnostic for WktError {
	fn into_diagnostic(self) -> Diagnostic {
		gis::malformed_wkt(self.to_string())
	}
}
