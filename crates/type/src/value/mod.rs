// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

mod convert;
pub mod geometry;
mod r#type;

pub use r#type::{GetType, Type};

use crate::value::geometry::Geometry;

/// A SQL value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// SQL NULL
	Null,
	/// A boolean: true or false.
	Boolean(bool),
	/// An 8-byte signed integer
	Int8(i64),
	/// A 4-byte unsigned integer
	Uint4(u32),
	/// An 8-byte unsigned integer
	Uint8(u64),
	/// An 8-byte floating point
	Float8(f64),
	/// A UTF-8 encoded text
	Utf8(String),
	/// Raw bytes
	Blob(Vec<u8>),
	/// A spatial value
	Geometry(Geometry),
}

impl Value {
	pub fn utf8(s: impl Into<String>) -> Self {
		Value::Utf8(s.into())
	}

	pub fn blob(bytes: impl Into<Vec<u8>>) -> Self {
		Value::Blob(bytes.into())
	}

	pub fn geometry(g: impl Into<Geometry>) -> Self {
		Value::Geometry(g.into())
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn get_type(&self) -> Type {
		match self {
			Value::Null => Type::Null,
			Value::Boolean(_) => Type::Boolean,
			Value::Int8(_) => Type::Int8,
			Value::Uint4(_) => Type::Uint4,
			Value::Uint8(_) => Type::Uint8,
			Value::Float8(_) => Type::Float8,
			Value::Utf8(_) => Type::Utf8,
			Value::Blob(_) => Type::Blob,
			Value::Geometry(g) => Type::from(g.kind()),
		}
	}

	/// Text view of the value for string functions; blobs are decoded lossily.
	pub fn as_text(&self) -> Option<String> {
		match self {
			Value::Null => None,
			Value::Utf8(s) => Some(s.clone()),
			Value::Blob(b) => Some(String::from_utf8_lossy(b).into_owned()),
			other => Some(other.to_string()),
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("NULL"),
			Value::Boolean(b) => Display::fmt(b, f),
			Value::Int8(v) => Display::fmt(v, f),
			Value::Uint4(v) => Display::fmt(v, f),
			Value::Uint8(v) => Display::fmt(v, f),
			Value::Float8(v) => Display::fmt(v, f),
			Value::Utf8(s) => f.write_str(s),
			Value::Blob(bytes) => {
				f.write_str("0x")?;
				for b in bytes {
					write!(f, "{:02x}", b)?;
				}
				Ok(())
			}
			Value::Geometry(g) => Display::fmt(g, f),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int8(v)
	}
}

impl From<u32> for Value {
	fn from(v: u32) -> Self {
		Value::Uint4(v)
	}
}

impl From<u64> for Value {
	fn from(v: u64) -> Self {
		Value::Uint8(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float8(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Utf8(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Utf8(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(Value::Null)
	}
}
