// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{Result, Row, Type, Value};

use crate::{
	Arity, Context, FunctionError,
	expression::{BoxedExpression, Expression},
};

/// Reads one column of the current row.
#[derive(Debug, Clone, PartialEq)]
pub struct GetField {
	index: usize,
	ty: Type,
	nullable: bool,
	name: String,
}

impl GetField {
	pub fn new(index: usize, ty: Type, nullable: bool, name: impl Into<String>) -> Self {
		Self {
			index,
			ty,
			nullable,
			name: name.into(),
		}
	}

	pub fn index(&self) -> usize {
		self.index
	}
}

impl Expression for GetField {
	fn eval(&self, _ctx: &Context, row: &Row) -> Result<Value> {
		match row.get(self.index) {
			Some(value) => Ok(value.clone()),
			None => Err(FunctionError::FieldOutOfRange {
				name: self.name.clone(),
				index: self.index,
				width: row.len(),
			}
			.into()),
		}
	}

	fn r#type(&self) -> Type {
		self.ty
	}

	fn is_nullable(&self) -> bool {
		self.nullable
	}

	fn children(&self) -> Vec<&dyn Expression> {
		vec![]
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Arity::Exact(0).check_children("GetField", children.len())?;
		Ok(self.clone_boxed())
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Display for GetField {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_eval_reads_column() {
		let field = GetField::new(1, Type::Utf8, true, "t.name");
		let row = Row::new(vec![Value::Int8(1), Value::utf8("x")]);
		assert_eq!(field.eval(&Context::default(), &row).unwrap(), Value::utf8("x"));
		assert_eq!(field.to_string(), "t.name");
	}

	#[test]
	fn test_eval_out_of_range() {
		let field = GetField::new(3, Type::Utf8, true, "t.name");
		let err = field.eval(&Context::default(), &Row::new(vec![Value::Null])).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_006");
	}
}
