// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::value::geometry::{GeometryKind, LineString, Point};

/// All possible SQL data types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	/// The type of a NULL literal
	Null,
	/// A boolean: true or false.
	Boolean,
	/// An 8-byte signed integer
	Int8,
	/// A 4-byte unsigned integer
	Uint4,
	/// An 8-byte unsigned integer
	Uint8,
	/// An 8-byte floating point
	Float8,
	/// A UTF-8 encoded text
	Utf8,
	/// Raw bytes
	Blob,
	/// Any spatial value
	Geometry,
	Point,
	LineString,
	Polygon,
	MultiPoint,
	MultiLineString,
	MultiPolygon,
	GeometryCollection,
}

impl Type {
	pub fn is_number(&self) -> bool {
		matches!(self, Type::Int8 | Type::Uint4 | Type::Uint8 | Type::Float8)
	}

	pub fn is_text(&self) -> bool {
		matches!(self, Type::Utf8 | Type::Blob)
	}

	pub fn is_geometry(&self) -> bool {
		self.geometry_kind().is_some() || *self == Type::Geometry
	}

	/// The concrete geometry kind, `None` for [`Type::Geometry`] and non spatial types.
	pub fn geometry_kind(&self) -> Option<GeometryKind> {
		match self {
			Type::Point => Some(GeometryKind::Point),
			Type::LineString => Some(GeometryKind::LineString),
			Type::Polygon => Some(GeometryKind::Polygon),
			Type::MultiPoint => Some(GeometryKind::MultiPoint),
			Type::MultiLineString => Some(GeometryKind::MultiLineString),
			Type::MultiPolygon => Some(GeometryKind::MultiPolygon),
			Type::GeometryCollection => Some(GeometryKind::GeometryCollection),
			_ => None,
		}
	}
}

impl From<GeometryKind> for Type {
	fn from(kind: GeometryKind) -> Self {
		match kind {
			GeometryKind::Point => Type::Point,
			GeometryKind::LineString => Type::LineString,
			GeometryKind::Polygon => Type::Polygon,
			GeometryKind::MultiPoint => Type::MultiPoint,
			GeometryKind::MultiLineString => Type::MultiLineString,
			GeometryKind::MultiPolygon => Type::MultiPolygon,
			GeometryKind::GeometryCollection => Type::GeometryCollection,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Null => f.write_str("NULL"),
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Int8 => f.write_str("INT8"),
			Type::Uint4 => f.write_str("UINT4"),
			Type::Uint8 => f.write_str("UINT8"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Utf8 => f.write_str("UTF8"),
			Type::Blob => f.write_str("BLOB"),
			Type::Geometry => f.write_str("GEOMETRY"),
			Type::Point => f.write_str("POINT"),
			Type::LineString => f.write_str("LINESTRING"),
			Type::Polygon => f.write_str("POLYGON"),
			Type::MultiPoint => f.write_str("MULTIPOINT"),
			Type::MultiLineString => f.write_str("MULTILINESTRING"),
			Type::MultiPolygon => f.write_str("MULTIPOLYGON"),
			Type::GeometryCollection => f.write_str("GEOMETRYCOLLECTION"),
		}
	}
}

pub trait GetType {
	fn get_type() -> Type;
}

impl GetType for bool {
	fn get_type() -> Type {
		Type::Boolean
	}
}

impl GetType for i64 {
	fn get_type() -> Type {
		Type::Int8
	}
}

impl GetType for u32 {
	fn get_type() -> Type {
		Type::Uint4
	}
}

impl GetType for u64 {
	fn get_type() -> Type {
		Type::Uint8
	}
}

impl GetType for f64 {
	fn get_type() -> Type {
		Type::Float8
	}
}

impl GetType for String {
	fn get_type() -> Type {
		Type::Utf8
	}
}

impl GetType for Vec<u8> {
	fn get_type() -> Type {
		Type::Blob
	}
}

impl GetType for Point {
	fn get_type() -> Type {
		Type::Point
	}
}

impl GetType for LineString {
	fn get_type() -> Type {
		Type::LineString
	}
}
