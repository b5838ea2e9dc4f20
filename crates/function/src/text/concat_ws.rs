// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{Result, Row, Type, Value};

use crate::{
	Arity, Context,
	expression::{BoxedExpression, Expression, Function, children_of, write_call},
};

/// `CONCAT_WS(sep, a, ...)`: NULL only for a NULL separator, NULL arguments
/// are skipped.
#[derive(Debug, Clone)]
pub struct TextConcatWs {
	args: Vec<BoxedExpression>,
}

impl TextConcatWs {
	const ARITY: Arity = Arity::AtLeast(2);

	pub fn new(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check("CONCAT_WS", args.len())?;
		Ok(Self {
			args,
		})
	}
}

impl Expression for TextConcatWs {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let Some(separator) = self.args[0].eval(ctx, row)?.as_text() else {
			return Ok(Value::Null);
		};

		let mut parts = Vec::with_capacity(self.args.len() - 1);
		for arg in &self.args[1..] {
			if let Some(text) = arg.eval(ctx, row)?.as_text() {
				parts.push(text);
			}
		}
		Ok(Value::Utf8(parts.join(&separator)))
	}

	fn r#type(&self) -> Type {
		Type::Utf8
	}

	fn is_nullable(&self) -> bool {
		self.args[0].is_nullable()
	}

	fn children(&self) -> Vec<&dyn Expression> {
		children_of(&self.args)
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Ok(Box::new(Self::new(children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for TextConcatWs {
	fn function_name(&self) -> &'static str {
		"CONCAT_WS"
	}

	fn description(&self) -> &'static str {
		"Concatenates its arguments with a separator, skipping NULLs."
	}
}

impl Display for TextConcatWs {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write_call(f, self.function_name(), &self.args)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::expression::testing::{eval, lit, null};

	#[test]
	fn test_concat_ws() {
		let f: BoxedExpression = Box::new(TextConcatWs::new(vec![lit(","), lit("a"), lit("b"), lit(3i64)]).unwrap());
		assert_eq!(eval(&f), Value::utf8("a,b,3"));
	}

	#[test]
	fn test_null_separator() {
		let f: BoxedExpression = Box::new(TextConcatWs::new(vec![null(), lit("a"), lit("b")]).unwrap());
		assert_eq!(eval(&f), Value::Null);
		assert!(f.is_nullable());
	}

	#[test]
	fn test_null_arguments_skipped() {
		let f: BoxedExpression = Box::new(TextConcatWs::new(vec![lit("-"), lit("a"), null(), lit("c")]).unwrap());
		assert_eq!(eval(&f), Value::utf8("a-c"));
		assert!(!f.is_nullable());
	}

	#[test]
	fn test_all_arguments_null() {
		let f: BoxedExpression = Box::new(TextConcatWs::new(vec![lit("-"), null(), null()]).unwrap());
		assert_eq!(eval(&f), Value::utf8(""));
	}

	#[test]
	fn test_arity() {
		let err = TextConcatWs::new(vec![lit(",")]).unwrap_err();
		assert_eq!(err.message, "function 'CONCAT_WS' expected at least 2 arguments, 1 received");
	}
}
