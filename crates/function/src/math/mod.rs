// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use tessera_type::{Result, Row, Type};

use crate::{Context, Expression, FunctionError};

pub mod angle;
pub mod sign;

pub use angle::{AngleConversion, AngleUnit};
pub use sign::Sign;

/// Evaluates a numeric argument with the leading numeric prefix fallback for
/// text. NULL yields `None`; geometries are rejected.
pub(crate) fn eval_numeric(function: &str, expr: &dyn Expression, ctx: &Context, row: &Row) -> Result<Option<f64>> {
	let value = expr.eval(ctx, row)?;
	if value.is_null() {
		return Ok(None);
	}

	match value.to_f64_lenient() {
		Some(v) => Ok(Some(v)),
		None => Err(FunctionError::InvalidArgumentType {
			function: function.to_string(),
			index: 0,
			expected: vec![Type::Float8, Type::Int8, Type::Utf8],
			actual: value.get_type(),
		}
		.into()),
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::{Point, Value};

	use super::*;
	use crate::expression::testing::lit;

	#[test]
	fn test_eval_numeric_rejects_geometry() {
		let arg = lit(Value::geometry(Point::new(0, 1.0, 2.0)));
		let err = eval_numeric("SIGN", arg.as_ref(), &Context::default(), &Row::empty()).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_004");
	}
}
