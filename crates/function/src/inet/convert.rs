// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::{
	fmt::{Display, Formatter},
	net::{Ipv4Addr, Ipv6Addr},
};

use tessera_type::{Result, Row, Type, Value};

use crate::{
	Arity, Context,
	context::WARN_INCORRECT_STRING_VALUE,
	expression::{BoxedExpression, Expression, Function},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InetConversion {
	/// `INET_ATON`: dotted quad to integer.
	Aton,
	/// `INET_NTOA`: integer to dotted quad.
	Ntoa,
	/// `INET6_ATON`: IPv4 or IPv6 text to 4 or 16 bytes.
	Aton6,
	/// `INET6_NTOA`: 4 or 16 bytes to text.
	Ntoa6,
}

impl InetConversion {
	fn function_name(self) -> &'static str {
		match self {
			InetConversion::Aton => "INET_ATON",
			InetConversion::Ntoa => "INET_NTOA",
			InetConversion::Aton6 => "INET6_ATON",
			InetConversion::Ntoa6 => "INET6_NTOA",
		}
	}

	fn result_type(self) -> Type {
		match self {
			InetConversion::Aton => Type::Uint4,
			InetConversion::Aton6 => Type::Blob,
			InetConversion::Ntoa | InetConversion::Ntoa6 => Type::Utf8,
		}
	}

	/// `None` for input that is not an address of the expected shape.
	fn apply(self, value: &Value) -> Option<Value> {
		match self {
			InetConversion::Aton => {
				let addr = value.as_text()?.parse::<Ipv4Addr>().ok()?;
				Some(Value::Uint4(u32::from(addr)))
			}
			InetConversion::Ntoa => match Type::Uint4.convert(value) {
				Ok(Value::Uint4(n)) => Some(Value::Utf8(Ipv4Addr::from(n).to_string())),
				_ => None,
			},
			InetConversion::Aton6 => {
				let text = value.as_text()?;
				if text.matches(':').count() < 2 {
					let addr = text.parse::<Ipv4Addr>().ok()?;
					Some(Value::Blob(addr.octets().to_vec()))
				} else {
					let addr = text.parse::<Ipv6Addr>().ok()?;
					Some(Value::Blob(addr.octets().to_vec()))
				}
			}
			InetConversion::Ntoa6 => {
				let bytes = match value {
					Value::Blob(b) => b.as_slice(),
					Value::Utf8(s) => s.as_bytes(),
					_ => return None,
				};
				format_address(bytes).map(Value::Utf8)
			}
		}
	}
}

/// 4 bytes print as IPv4. 16 bytes print as IPv6, with the embedded IPv4
/// part dotted for compatible and mapped addresses.
fn format_address(bytes: &[u8]) -> Option<String> {
	if let Ok(v4) = <[u8; 4]>::try_from(bytes) {
		return Some(Ipv4Addr::from(v4).to_string());
	}

	let v6 = <[u8; 16]>::try_from(bytes).ok()?;
	let tail = Ipv4Addr::new(v6[12], v6[13], v6[14], v6[15]);
	if v6[..10].iter().all(|&b| b == 0) {
		if v6[10..12] == [0, 0] && (v6[12] != 0 || v6[13] != 0) {
			return Some(format!("::{}", tail));
		}
		if v6[10..12] == [0xff, 0xff] {
			return Some(format!("::ffff:{}", tail));
		}
	}
	Some(Ipv6Addr::from(v6).to_string())
}

/// `INET_ATON`, `INET_NTOA`, `INET6_ATON` and `INET6_NTOA`. Malformed input
/// raises warning 1411 and yields NULL.
#[derive(Debug, Clone)]
pub struct InetConvert {
	conversion: InetConversion,
	arg: BoxedExpression,
}

impl InetConvert {
	const ARITY: Arity = Arity::Exact(1);

	pub fn new(conversion: InetConversion, mut args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check(conversion.function_name(), args.len())?;
		Ok(Self {
			conversion,
			arg: args.remove(0),
		})
	}
}

impl Expression for InetConvert {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let value = self.arg.eval(ctx, row)?;
		if value.is_null() {
			return Ok(Value::Null);
		}

		match self.conversion.apply(&value) {
			Some(converted) => Ok(converted),
			None => {
				ctx.warn(
					WARN_INCORRECT_STRING_VALUE,
					format!(
						"Incorrect string value: ''{}'' for function {}",
						value,
						self.function_name().to_lowercase()
					),
				);
				Ok(Value::Null)
			}
		}
	}

	fn r#type(&self) -> Type {
		self.conversion.result_type()
	}

	fn is_nullable(&self) -> bool {
		true
	}

	fn children(&self) -> Vec<&dyn Expression> {
		vec![self.arg.as_ref()]
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Self::ARITY.check_children(self.function_name(), children.len())?;
		Ok(Box::new(Self::new(self.conversion, children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for InetConvert {
	fn function_name(&self) -> &'static str {
		self.conversion.function_name()
	}

	fn description(&self) -> &'static str {
		match self.conversion {
			InetConversion::Aton => "Returns the numeric value of an IPv4 address.",
			InetConversion::Ntoa => "Returns the dotted quad text of a numeric IPv4 address.",
			InetConversion::Aton6 => "Returns the binary form of an IPv4 or IPv6 address.",
			InetConversion::Ntoa6 => "Returns the text form of a binary IPv4 or IPv6 address.",
		}
	}
}

impl Display for InetConvert {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}({})", self.function_name(), self.arg)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		context::Warning,
		expression::testing::{lit, null},
	};

	fn run(conversion: InetConversion, arg: BoxedExpression) -> (Value, Vec<Warning>) {
		let ctx = Context::default();
		let f = InetConvert::new(conversion, vec![arg]).unwrap();
		let value = f.eval(&ctx, &Row::empty()).unwrap();
		(value, ctx.warnings())
	}

	#[test]
	fn test_inet_aton() {
		assert_eq!(run(InetConversion::Aton, lit("10.0.5.9")).0, Value::Uint4(167773449));
		assert_eq!(run(InetConversion::Aton, lit("255.255.255.255")).0, Value::Uint4(u32::MAX));
	}

	#[test]
	fn test_inet_aton_invalid_warns() {
		let (value, warnings) = run(InetConversion::Aton, lit("::1"));
		assert_eq!(value, Value::Null);
		assert_eq!(
			warnings,
			vec![Warning {
				code: 1411,
				message: "Incorrect string value: ''::1'' for function inet_aton".to_string(),
			}]
		);
	}

	#[test]
	fn test_inet_ntoa() {
		assert_eq!(run(InetConversion::Ntoa, lit(167773449i64)).0, Value::utf8("10.0.5.9"));
		assert_eq!(run(InetConversion::Ntoa, lit("167773449")).0, Value::utf8("10.0.5.9"));
	}

	#[test]
	fn test_inet_ntoa_out_of_range() {
		let (value, warnings) = run(InetConversion::Ntoa, lit(4294967296i64));
		assert_eq!(value, Value::Null);
		assert_eq!(warnings.len(), 1);
	}

	#[test]
	fn test_inet6_aton() {
		assert_eq!(run(InetConversion::Aton6, lit("10.0.5.9")).0, Value::blob(vec![10, 0, 5, 9]));

		let mut expected = vec![0xfd, 0xfe, 0, 0, 0, 0, 0, 0];
		expected.extend_from_slice(&[0x5a, 0x55, 0xca, 0xff, 0xfe, 0xfa, 0x90, 0x89]);
		assert_eq!(run(InetConversion::Aton6, lit("fdfe::5a55:caff:fefa:9089")).0, Value::blob(expected));
	}

	#[test]
	fn test_inet6_aton_invalid_warns() {
		let (value, warnings) = run(InetConversion::Aton6, lit("not an address"));
		assert_eq!(value, Value::Null);
		assert_eq!(warnings[0].message, "Incorrect string value: ''not an address'' for function inet6_aton");
	}

	#[test]
	fn test_inet6_ntoa() {
		assert_eq!(run(InetConversion::Ntoa6, lit(Value::blob(vec![10, 0, 5, 9]))).0, Value::utf8("10.0.5.9"));

		let mut compat = vec![0u8; 16];
		compat[12..].copy_from_slice(&[10, 0, 5, 9]);
		assert_eq!(run(InetConversion::Ntoa6, lit(Value::blob(compat.clone()))).0, Value::utf8("::10.0.5.9"));

		let mut mapped = compat;
		mapped[10] = 0xff;
		mapped[11] = 0xff;
		assert_eq!(run(InetConversion::Ntoa6, lit(Value::blob(mapped))).0, Value::utf8("::ffff:10.0.5.9"));

		let mut loopback = vec![0u8; 16];
		loopback[15] = 1;
		assert_eq!(run(InetConversion::Ntoa6, lit(Value::blob(loopback))).0, Value::utf8("::1"));
	}

	#[test]
	fn test_inet6_ntoa_wrong_length() {
		let (value, warnings) = run(InetConversion::Ntoa6, lit(Value::blob(vec![1, 2, 3])));
		assert_eq!(value, Value::Null);
		assert_eq!(warnings[0].code, 1411);
	}

	#[test]
	fn test_null_does_not_warn() {
		for conversion in [InetConversion::Aton, InetConversion::Ntoa, InetConversion::Aton6, InetConversion::Ntoa6] {
			let (value, warnings) = run(conversion, null());
			assert_eq!(value, Value::Null);
			assert!(warnings.is_empty());
		}
	}
}
