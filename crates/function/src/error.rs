// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use tessera_type::{
	Type,
	error::{
		Diagnostic, Error, IntoDiagnostic,
		diagnostic::{function, gis},
	},
	value::geometry::wkt::WktError,
};

use crate::Arity;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FunctionError {
	#[error("function '{function}' expected {expected} arguments, {actual} received")]
	InvalidArgumentNumber {
		function: String,
		expected: Arity,
		actual: usize,
	},

	#[error("{node}: invalid children number, got {actual}, expected {expected}")]
	InvalidChildrenNumber {
		node: String,
		actual: usize,
		expected: usize,
	},

	#[error("Incorrect arguments to {function}")]
	InvalidArgument {
		function: String,
	},

	#[error("invalid GIS data provided to function {function}")]
	InvalidGisData {
		function: String,
		cause: Option<WktError>,
	},

	#[error("There's no spatial reference system with SRID {srid}")]
	InvalidSrid {
		srid: u32,
	},

	#[error("{axis} {value} is out of range in function {function}")]
	CoordinateOutOfRange {
		function: String,
		axis: &'static str,
		value: f64,
		min: f64,
		max: f64,
	},

	#[error("function {function} requires a geographic SRID, found {srid}")]
	NotGeographic {
		function: String,
		srid: u32,
	},

	#[error("Function {function} argument {} has invalid type", .index + 1)]
	InvalidArgumentType {
		function: String,
		index: usize,
		expected: Vec<Type>,
		actual: Type,
	},

	#[error("Unknown function: {name}")]
	UnknownFunction {
		name: String,
	},

	#[error("field {name} at index {index} is out of range")]
	FieldOutOfRange {
		name: String,
		index: usize,
		width: usize,
	},
}

impl FunctionError {
	pub fn invalid_gis_data(function: &str) -> Self {
		FunctionError::InvalidGisData {
			function: function.to_string(),
			cause: None,
		}
	}

	pub fn invalid_argument(function: &str) -> Self {
		FunctionError::InvalidArgument {
			function: function.to_string(),
		}
	}
}

impl IntoDiagnostic for FunctionError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			FunctionError::InvalidArgumentNumber {
				function,
				expected,
				actual,
			} => function::invalid_argument_number(&function, &expected.to_string(), actual),
			FunctionError::InvalidChildrenNumber {
				node,
				actual,
				expected,
			} => function::invalid_children_number(&node, actual, expected),
			FunctionError::InvalidArgument {
				function,
			} => function::invalid_argument(&function),
			FunctionError::InvalidGisData {
				function,
				cause,
			} => {
				let diagnostic = gis::invalid_gis_data(&function);
				match cause {
					Some(cause) => diagnostic.with_cause(cause.into_diagnostic()),
					None => diagnostic,
				}
			}
			FunctionError::InvalidSrid {
				srid,
			} => gis::invalid_srid(srid),
			FunctionError::CoordinateOutOfRange {
				function,
				axis,
				value,
				min,
				max,
			} => gis::coordinate_out_of_range(axis, value, &function, min, max),
			FunctionError::NotGeographic {
				function,
				srid,
			} => gis::not_geographic(&function, srid),
			FunctionError::InvalidArgumentType {
				function,
				index,
				expected,
				actual,
			} => function::invalid_argument_type(&function, index, &expected, actual),
			FunctionError::UnknownFunction {
				name,
			} => function::unknown_function(&name),
			FunctionError::FieldOutOfRange {
				name,
				index,
				width,
			} => function::field_out_of_range(&name, index, width),
		}
	}
}

impl From<FunctionError> for Error {
	fn from(err: FunctionError) -> Self {
		Error(err.into_diagnostic())
	}
}
