// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{Result, Row, Type, Value};

use crate::{
	Arity, Context,
	expression::{BoxedExpression, Expression, Function, any_nullable, children_of, write_call},
};

/// `CONCAT(a, ...)`: NULL as soon as any argument is NULL.
#[derive(Debug, Clone)]
pub struct TextConcat {
	args: Vec<BoxedExpression>,
}

impl TextConcat {
	const ARITY: Arity = Arity::AtLeast(1);

	pub fn new(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check("CONCAT", args.len())?;
		Ok(Self {
			args,
		})
	}
}

impl Expression for TextConcat {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let mut concatenated = String::new();
		for arg in &self.args {
			match arg.eval(ctx, row)?.as_text() {
				Some(text) => concatenated.push_str(&text),
				None => return Ok(Value::Null),
			}
		}
		Ok(Value::Utf8(concatenated))
	}

	fn r#type(&self) -> Type {
		Type::Utf8
	}

	fn is_nullable(&self) -> bool {
		any_nullable(&self.args)
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

impl Function for TextConcat {
	fn function_name(&self) -> &'static str {
		"CONCAT"
	}

	fn description(&self) -> &'static str {
		"Concatenates its arguments."
	}
}

impl Display for TextConcat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write_call(f, self.function_name(), &self.args)
	}
}
