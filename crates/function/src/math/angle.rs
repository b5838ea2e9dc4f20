// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{GetType, Result, Row, Type, Value};

use crate::{
	Arity, Context,
	expression::{BoxedExpression, Expression, Function},
	math::eval_numeric,
};

/// Unit an [`AngleConversion`] converts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
	Degrees,
	Radians,
}

impl AngleUnit {
	fn function_name(self) -> &'static str {
		match self {
			AngleUnit::Degrees => "DEGREES",
			AngleUnit::Radians => "RADIANS",
		}
	}

	fn convert(self, v: f64) -> f64 {
		match self {
			AngleUnit::Degrees => v.to_degrees(),
			AngleUnit::Radians => v.to_radians(),
		}
	}
}

/// `DEGREES(x)` and `RADIANS(x)`
#[derive(Debug, Clone)]
pub struct AngleConversion {
	unit: AngleUnit,
	arg: BoxedExpression,
}

impl AngleConversion {
	const ARITY: Arity = Arity::Exact(1);

	pub fn new(unit: AngleUnit, mut args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check(unit.function_name(), args.len())?;
		Ok(Self {
			unit,
			arg: args.remove(0),
		})
	}

	pub fn degrees(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::new(AngleUnit::Degrees, args)
	}

	pub fn radians(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::new(AngleUnit::Radians, args)
	}
}

impl Expression for AngleConversion {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		Ok(match eval_numeric(self.function_name(), self.arg.as_ref(), ctx, row)? {
			Some(v) => Value::Float8(self.unit.convert(v)),
			None => Value::Null,
		})
	}

	fn r#type(&self) -> Type {
		f64::get_type()
	}

	fn is_nullable(&self) -> bool {
		self.arg.is_nullable()
	}

	fn children(&self) -> Vec<&dyn Expression> {
		vec![self.arg.as_ref()]
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Self::ARITY.check_children(self.function_name(), children.len())?;
		Ok(Box::new(Self::new(self.unit, children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for AngleConversion {
	fn function_name(&self) -> &'static str {
		self.unit.function_name()
	}

	fn description(&self) -> &'static str {
		match self.unit {
			AngleUnit::Degrees => "Converts radians to degrees.",
			AngleUnit::Radians => "Converts degrees to radians.",
		}
	}
}

impl Display for AngleConversion {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}({})", self.function_name(), self.arg)
	}
}
