// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

use num_traits::ToPrimitive;

use crate::{Result, Type, Value, error::diagnostic::cast, return_error};

impl Type {
	/// Converts `value` into this type. NULL converts to NULL for every target.
	pub fn convert(&self, value: &Value) -> Result<Value> {
		if value.is_null() {
			return Ok(Value::Null);
		}

		let converted = match self {
			Type::Null => None,
			Type::Boolean => to_bool(value).map(Value::Boolean),
			Type::Int8 => to_f64_exact(value).and_then(|v| v.round().to_i64()).map(Value::Int8),
			Type::Uint4 => to_f64_exact(value).and_then(|v| v.round().to_u32()).map(Value::Uint4),
			Type::Uint8 => match value {
				// u64 does not survive a trip through f64
				Value::Uint8(v) => Some(Value::Uint8(*v)),
				Value::Int8(v) => v.to_u64().map(Value::Uint8),
				Value::Utf8(s) if s.trim().parse::<u64>().is_ok() => s.trim().parse().ok().map(Value::Uint8),
				_ => to_f64_exact(value).and_then(|v| v.round().to_u64()).map(Value::Uint8),
			},
			Type::Float8 => to_f64_exact(value).map(Value::Float8),
			Type::Utf8 => value.as_text().map(Value::Utf8),
			Type::Blob => match value {
				Value::Blob(b) => Some(Value::Blob(b.clone())),
				other => Some(Value::Blob(other.to_string().into_bytes())),
			},
			Type::Geometry => match value {
				Value::Geometry(g) => Some(Value::Geometry(g.clone())),
				_ => None,
			},
			spatial => match value {
				Value::Geometry(g) if spatial.geometry_kind() == Some(g.kind()) => {
					Some(Value::Geometry(g.clone()))
				}
				_ => None,
			},
		};

		match converted {
			Some(v) => Ok(v),
			None => return_error!(cast::invalid_conversion(&value.to_string(), &self.to_string())),
		}
	}
}

impl Value {
	/// Numeric view of the value using the MySQL leading numeric prefix rule:
	/// `"12abc"` reads as 12 and text without a numeric prefix reads as 0.
	/// Returns `None` only for NULL and geometry values.
	pub fn to_f64_lenient(&self) -> Option<f64> {
		match self {
			Value::Null | Value::Geometry(_) => None,
			Value::Utf8(s) => Some(numeric_prefix(s)),
			Value::Blob(b) => Some(numeric_prefix(&String::from_utf8_lossy(b))),
			other => to_f64_exact(other),
		}
	}
}

fn to_f64_exact(value: &Value) -> Option<f64> {
	match value {
		Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
		Value::Int8(v) => v.to_f64(),
		Value::Uint4(v) => v.to_f64(),
		Value::Uint8(v) => v.to_f64(),
		Value::Float8(v) => Some(*v),
		Value::Utf8(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
		Value::Blob(b) => std::str::from_utf8(b).ok()?.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
		Value::Null | Value::Geometry(_) => None,
	}
}

fn to_bool(value: &Value) -> Option<bool> {
	match value {
		Value::Boolean(b) => Some(*b),
		Value::Utf8(s) => match s.trim().to_ascii_lowercase().as_str() {
			"true" => Some(true),
			"false" => Some(false),
			_ => to_f64_exact(value).map(|v| v != 0.0),
		},
		other => to_f64_exact(other).map(|v| v != 0.0),
	}
}

/// Longest prefix of `s` (after leading whitespace) that reads as a decimal number.
pub(crate) fn numeric_prefix(s: &str) -> f64 {
	let s = s.trim_start();
	let bytes = s.as_bytes();
	let mut end = 0;

	if matches!(bytes.first(), Some(b'+' | b'-')) {
		end += 1;
	}
	let digits_start = end;
	while end < bytes.len() && bytes[end].is_ascii_digit() {
		end += 1;
	}
	if end < bytes.len() && bytes[end] == b'.' {
		end += 1;
		while end < bytes.len() && bytes[end].is_ascii_digit() {
			end += 1;
		}
	}
	if end == digits_start || &s[digits_start..end] == "." {
		return 0.0;
	}

	// exponent only counts when followed by at least one digit
	if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
		let mut exp_end = end + 1;
		if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
			exp_end += 1;
		}
		let exp_digits = exp_end;
		while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
			exp_end += 1;
		}
		if exp_end > exp_digits {
			end = exp_end;
		}
	}

	s[..end].parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::geometry::{LineString, Point};

	#[test]
	fn test_convert_null_is_null() {
		assert_eq!(Type::Uint4.convert(&Value::Null).unwrap(), Value::Null);
		assert_eq!(Type::Point.convert(&Value::Null).unwrap(), Value::Null);
	}

	#[test]
	fn test_convert_to_uint4() {
		assert_eq!(Type::Uint4.convert(&Value::Int8(4326)).unwrap(), Value::Uint4(4326));
		assert_eq!(Type::Uint4.convert(&Value::utf8(" 3857 ")).unwrap(), Value::Uint4(3857));
		assert_eq!(Type::Uint4.convert(&Value::Float8(1.6)).unwrap(), Value::Uint4(2));
	}

	#[test]
	fn test_convert_to_uint4_fails() {
		let err = Type::Uint4.convert(&Value::utf8("abc")).unwrap_err();
		assert_eq!(err.code(), "CAST_001");
		assert_eq!(err.message, "Cannot convert 'abc' to UINT4");

		assert!(Type::Uint4.convert(&Value::Int8(-1)).is_err());
		assert!(Type::Uint4.convert(&Value::Uint8(u64::MAX)).is_err());
	}

	#[test]
	fn test_convert_uint8_keeps_precision() {
		assert_eq!(Type::Uint8.convert(&Value::Uint8(u64::MAX)).unwrap(), Value::Uint8(u64::MAX));
		assert_eq!(
			Type::Uint8.convert(&Value::utf8("18446744073709551615")).unwrap(),
			Value::Uint8(u64::MAX)
		);
	}

	#[test]
	fn test_convert_to_float8() {
		assert_eq!(Type::Float8.convert(&Value::utf8("1.25")).unwrap(), Value::Float8(1.25));
		assert_eq!(Type::Float8.convert(&Value::Boolean(true)).unwrap(), Value::Float8(1.0));
		assert!(Type::Float8.convert(&Value::utf8("NaN")).is_err());
	}

	#[test]
	fn test_convert_to_boolean() {
		assert_eq!(Type::Boolean.convert(&Value::utf8("TRUE")).unwrap(), Value::Boolean(true));
		assert_eq!(Type::Boolean.convert(&Value::Int8(0)).unwrap(), Value::Boolean(false));
	}

	#[test]
	fn test_convert_geometry() {
		let point = Value::geometry(Point::new(0, 1.0, 2.0));
		assert_eq!(Type::Geometry.convert(&point).unwrap(), point);
		assert_eq!(Type::Point.convert(&point).unwrap(), point);

		let line = Value::geometry(LineString::new(0, vec![Point::new(0, 0.0, 0.0), Point::new(0, 1.0, 1.0)]));
		assert!(Type::Point.convert(&line).is_err());
		assert!(Type::Geometry.convert(&Value::utf8("POINT(1 2)")).is_err());
	}

	#[test]
	fn test_convert_to_text() {
		assert_eq!(Type::Utf8.convert(&Value::Float8(0.5)).unwrap(), Value::utf8("0.5"));
		assert_eq!(Type::Blob.convert(&Value::utf8("ab")).unwrap(), Value::blob(b"ab".to_vec()));
	}

	#[test]
	fn test_numeric_prefix() {
		assert_eq!(numeric_prefix("12abc"), 12.0);
		assert_eq!(numeric_prefix("  -3.5e2xyz"), -350.0);
		assert_eq!(numeric_prefix("1e"), 1.0);
		assert_eq!(numeric_prefix(".5"), 0.5);
		assert_eq!(numeric_prefix("abc"), 0.0);
		assert_eq!(numeric_prefix("-"), 0.0);
		assert_eq!(numeric_prefix("."), 0.0);
		assert_eq!(numeric_prefix(""), 0.0);
	}

	#[test]
	fn test_to_f64_lenient() {
		assert_eq!(Value::utf8("7 apples").to_f64_lenient(), Some(7.0));
		assert_eq!(Value::Int8(-2).to_f64_lenient(), Some(-2.0));
		assert_eq!(Value::Null.to_f64_lenient(), None);
	}
}
