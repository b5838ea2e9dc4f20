// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{GetType, Result, Row, Type, Value};

use crate::{
	Arity, Context,
	expression::{BoxedExpression, Expression, Function},
	math::eval_numeric,
};

/// `SIGN(x)`: -1, 0 or 1.
#[derive(Debug, Clone)]
pub struct Sign {
	arg: BoxedExpression,
}

impl Sign {
	const ARITY: Arity = Arity::Exact(1);

	pub fn new(mut args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check("SIGN", args.len())?;
		Ok(Self {
			arg: args.remove(0),
		})
	}
}

impl Expression for Sign {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let Some(v) = eval_numeric(self.function_name(), self.arg.as_ref(), ctx, row)? else {
			return Ok(Value::Null);
		};

		let sign = if v > 0.0 {
			1
		} else if v < 0.0 {
			-1
		} else {
			0
		};
		Ok(Value::Int8(sign))
	}

	fn r#type(&self) -> Type {
		i64::get_type()
	}

	fn is_nullable(&self) -> bool {
		self.arg.is_nullable()
	}

	fn children(&self) -> Vec<&dyn Expression> {
		vec![self.arg.as_ref()]
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Self::ARITY.check_children(self.function_name(), children.len())?;
		Ok(Box::new(Self::new(children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for Sign {
	fn function_name(&self) -> &'static str {
		"SIGN"
	}

	fn description(&self) -> &'static str {
		"Returns the sign of a number."
	}
}

impl Display for Sign {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "SIGN({})", self.arg)
	}
}
