// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::{
	fmt::{Display, Formatter},
	net::{Ipv4Addr, Ipv6Addr},
};

use tessera_type::{Result, Row, Type, Value};

use crate::{
	Arity, Context,
	expression::{BoxedExpression, Expression, Function},
};

/// Address shape tested by an [`IpPredicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpClass {
	/// Dotted quad text.
	V4,
	/// IPv6 text.
	V6,
	/// 16 raw bytes, the first 12 zero.
	V4Compat,
	/// 16 raw bytes: 10 zero bytes then `ff ff`.
	V4Mapped,
}

impl IpClass {
	fn function_name(self) -> &'static str {
		match self {
			IpClass::V4 => "IS_IPV4",
			IpClass::V6 => "IS_IPV6",
			IpClass::V4Compat => "IS_IPV4_COMPAT",
			IpClass::V4Mapped => "IS_IPV4_MAPPED",
		}
	}

	/// Whether `value` is an address of this class. NULL and values of any
	/// other shape are not.
	pub fn matches(self, value: &Value) -> bool {
		match self {
			IpClass::V4 => text(value).is_some_and(|s| s.parse::<Ipv4Addr>().is_ok()),
			IpClass::V6 => text(value).is_some_and(|s| s.parse::<Ipv6Addr>().is_ok()),
			IpClass::V4Compat => address_bytes(value).is_some_and(|b| b[..12].iter().all(|&x| x == 0)),
			IpClass::V4Mapped => {
				address_bytes(value).is_some_and(|b| b[..10].iter().all(|&x| x == 0) && b[10..12] == [0xff, 0xff])
			}
		}
	}
}

fn text(value: &Value) -> Option<&str> {
	match value {
		Value::Utf8(s) => Some(s),
		Value::Blob(b) => std::str::from_utf8(b).ok(),
		_ => None,
	}
}

fn address_bytes(value: &Value) -> Option<&[u8; 16]> {
	let bytes = match value {
		Value::Blob(b) => b.as_slice(),
		Value::Utf8(s) => s.as_bytes(),
		_ => return None,
	};
	bytes.try_into().ok()
}

/// `IS_IPV4`, `IS_IPV6`, `IS_IPV4_COMPAT` and `IS_IPV4_MAPPED`. Never NULL.
#[derive(Debug, Clone)]
pub struct IpPredicate {
	class: IpClass,
	arg: BoxedExpression,
}

impl IpPredicate {
	const ARITY: Arity = Arity::Exact(1);

	pub fn new(class: IpClass, mut args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check(class.function_name(), args.len())?;
		Ok(Self {
			class,
			arg: args.remove(0),
		})
	}
}

impl Expression for IpPredicate {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let value = self.arg.eval(ctx, row)?;
		Ok(Value::Boolean(self.class.matches(&value)))
	}

	fn r#type(&self) -> Type {
		Type::Boolean
	}

	fn is_nullable(&self) -> bool {
		false
	}

	fn children(&self) -> Vec<&dyn Expression> {
		vec![self.arg.as_ref()]
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Self::ARITY.check_children(self.function_name(), children.len())?;
		Ok(Box::new(Self::new(self.class, children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for IpPredicate {
	fn function_name(&self) -> &'static str {
		self.class.function_name()
	}

	fn description(&self) -> &'static str {
		match self.class {
			IpClass::V4 => "Returns whether the argument is a valid IPv4 address.",
			IpClass::V6 => "Returns whether the argument is a valid IPv6 address.",
			IpClass::V4Compat => "Returns whether the argument is an IPv4-compatible IPv6 address.",
			IpClass::V4Mapped => "Returns whether the argument is an IPv4-mapped IPv6 address.",
		}
	}
}

impl Display for IpPredicate {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}({})", self.function_name(), self.arg)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::expression::testing::{eval, lit, null};

	fn check(class: IpClass, arg: BoxedExpression) -> Value {
		eval(&(Box::new(IpPredicate::new(class, vec![arg]).unwrap()) as BoxedExpression))
	}

	fn bytes(b: &[u8]) -> BoxedExpression {
		lit(Value::blob(b.to_vec()))
	}

	#[test]
	fn test_is_ipv4() {
		assert_eq!(check(IpClass::V4, lit("10.0.5.9")), Value::Boolean(true));
		assert_eq!(check(IpClass::V4, lit("10.0.5.256")), Value::Boolean(false));
		assert_eq!(check(IpClass::V4, lit("::1")), Value::Boolean(false));
	}

	#[test]
	fn test_is_ipv6() {
		assert_eq!(check(IpClass::V6, lit("10.0.5.9")), Value::Boolean(false));
		assert_eq!(check(IpClass::V6, lit("::1")), Value::Boolean(true));
		assert_eq!(check(IpClass::V6, lit("fdfe::5a55:caff:fefa:9089")), Value::Boolean(true));
	}

	#[test]
	fn test_is_ipv4_compat() {
		let mut compat = [0u8; 16];
		compat[12..].copy_from_slice(&[10, 0, 5, 9]);
		assert_eq!(check(IpClass::V4Compat, bytes(&compat)), Value::Boolean(true));

		let mut mapped = compat;
		mapped[10] = 0xff;
		mapped[11] = 0xff;
		assert_eq!(check(IpClass::V4Compat, bytes(&mapped)), Value::Boolean(false));
		assert_eq!(check(IpClass::V4Mapped, bytes(&mapped)), Value::Boolean(true));
		assert_eq!(check(IpClass::V4Mapped, bytes(&compat)), Value::Boolean(false));
	}

	#[test]
	fn test_wrong_length_is_false() {
		assert_eq!(check(IpClass::V4Compat, bytes(&[0, 0, 0, 1])), Value::Boolean(false));
	}

	#[test]
	fn test_null_is_false() {
		for class in [IpClass::V4, IpClass::V6, IpClass::V4Compat, IpClass::V4Mapped] {
			let f = IpPredicate::new(class, vec![null()]).unwrap();
			assert_eq!(f.eval(&Context::default(), &Row::empty()).unwrap(), Value::Boolean(false));
			assert!(!f.is_nullable());
		}
	}

	#[test]
	fn test_non_text_is_false() {
		assert_eq!(check(IpClass::V4, lit(167773449i64)), Value::Boolean(false));
	}

	#[test]
	fn test_display() {
		let f = IpPredicate::new(IpClass::V4Mapped, vec![lit("x")]).unwrap();
		assert_eq!(f.to_string(), "IS_IPV4_MAPPED('x')");
	}
}
