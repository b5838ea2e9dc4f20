// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Debug, Display, Formatter};

use tessera_type::{Result, Row, Type, Value};

use crate::Context;

mod column;
mod literal;

pub use column::GetField;
pub use literal::Literal;

/// A node of the expression tree, evaluated once per row.
///
/// Nodes are immutable: rewriting a tree goes through [`Expression::with_children`],
/// which always builds a new node. Evaluation never mutates the node; the only
/// side channel is the warning list on the [`Context`].
pub trait Expression: Display + Debug + Send + Sync {
	/// Returns `Value::Null` rather than an error when NULL propagates.
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value>;

	fn r#type(&self) -> Type;

	fn is_nullable(&self) -> bool;

	fn children(&self) -> Vec<&dyn Expression>;

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression>;

	fn clone_boxed(&self) -> BoxedExpression;
}

pub type BoxedExpression = Box<dyn Expression>;

impl Clone for BoxedExpression {
	fn clone(&self) -> Self {
		self.clone_boxed()
	}
}

/// A built-in SQL function node.
pub trait Function: Expression {
	/// Name used in diagnostics, e.g. `ST_PointFromText`.
	fn function_name(&self) -> &'static str;

	fn description(&self) -> &'static str;
}

/// Rebuilds `expr` from copies of its own children.
pub fn rebuild(expr: &dyn Expression) -> Result<BoxedExpression> {
	expr.with_children(expr.children().into_iter().map(|c| c.clone_boxed()).collect())
}

pub(crate) fn any_nullable(children: &[BoxedExpression]) -> bool {
	children.iter().any(|c| c.is_nullable())
}

pub(crate) fn children_of(children: &[BoxedExpression]) -> Vec<&dyn Expression> {
	children.iter().map(|c| c.as_ref()).collect()
}

/// Writes `NAME(arg, arg)` with the name upper-cased.
pub(crate) fn write_call(f: &mut Formatter<'_>, name: &str, args: &[BoxedExpression]) -> std::fmt::Result {
	write!(f, "{}(", name.to_ascii_uppercase())?;
	for (i, arg) in args.iter().enumerate() {
		if i > 0 {
			f.write_str(", ")?;
		}
		Display::fmt(arg, f)?;
	}
	f.write_str(")")
}
