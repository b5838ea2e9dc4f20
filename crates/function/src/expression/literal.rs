// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{Result, Row, Type, Value};

use crate::{
	Arity, Context,
	expression::{BoxedExpression, Expression},
};

/// A constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
	value: Value,
	ty: Type,
}

impl Literal {
	pub fn new(value: Value) -> Self {
		let ty = value.get_type();
		Self {
			value,
			ty,
		}
	}

	/// A literal whose declared type differs from its value, e.g. a typed NULL.
	pub fn typed(value: Value, ty: Type) -> Self {
		Self {
			value,
			ty,
		}
	}

	pub fn value(&self) -> &Value {
		&self.value
	}
}

impl Expression for Literal {
	fn eval(&self, _ctx: &Context, _row: &Row) -> Result<Value> {
		Ok(self.value.clone())
	}

	fn r#type(&self) -> Type {
		self.ty
	}

	fn is_nullable(&self) -> bool {
		self.value.is_null()
	}

	fn children(&self) -> Vec<&dyn Expression> {
		vec![]
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Arity::Exact(0).check_children("Literal", children.len())?;
		Ok(self.clone_boxed())
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Display for Literal {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.value {
			Value::Utf8(s) => write!(f, "'{}'", s.replace('\'', "''")),
			other => Display::fmt(other, f),
		}
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::Point;

	use super::*;
	use crate::expression::testing::lit;

	#[test]
	fn test_display_quotes_text() {
		assert_eq!(Literal::new(Value::utf8("it's")).to_string(), "'it''s'");
		assert_eq!(Literal::new(Value::Int8(4326)).to_string(), "4326");
		assert_eq!(Literal::new(Value::Null).to_string(), "NULL");
	}

	#[test]
	fn test_display_geometry_is_bare_wkt() {
		let geometry = Literal::new(Value::geometry(Point::new(0, 1.0, 2.0)));
		let text = Literal::new(Value::utf8("POINT(1 2)"));
		assert_eq!(geometry.to_string(), "POINT(1 2)");
		assert_eq!(text.to_string(), "'POINT(1 2)'");
		assert_ne!(geometry.to_string(), text.to_string());
	}

	#[test]
	fn test_nullability_and_type() {
		let literal = Literal::typed(Value::Null, Type::Utf8);
		assert!(literal.is_nullable());
		assert_eq!(literal.r#type(), Type::Utf8);
		assert!(!Literal::new(Value::Boolean(true)).is_nullable());
	}

	#[test]
	fn test_with_children_rejects_children() {
		let err = Literal::new(Value::Int8(1)).with_children(vec![lit(1i64)]).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_003");
	}
}
