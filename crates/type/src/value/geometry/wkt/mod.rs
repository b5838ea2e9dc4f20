// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

//! Well-Known Text codec.
//!
//! Parsing is split in two steps: [`parse_header`] extracts the lower-case
//! tag and the body between the outer parentheses, then the tag selects a
//! body parser from [`PARSERS`]. Body parsers take the SRID to stamp on every
//! member and whether to exchange the axes while reading.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::instrument;

mod encode;
mod error;
mod parse;

pub use encode::{
	geometry_collection_to_wkt, line_string_to_wkt, multi_line_string_to_wkt, multi_point_to_wkt, multi_polygon_to_wkt, point_to_wkt,
	polygon_to_wkt, to_wkt,
};
pub use error::WktError;
pub use parse::{
	parse_geometry_collection, parse_header, parse_line_string, parse_multi_line_string, parse_multi_point, parse_multi_polygon, parse_point,
	parse_polygon,
};

use crate::value::geometry::{Geometry, GeometryKind};

pub type ParseFn = fn(&str, u32, bool) -> Result<Geometry, WktError>;

pub static PARSERS: Lazy<IndexMap<&'static str, (GeometryKind, ParseFn)>> = Lazy::new(|| {
	let entries: [(GeometryKind, ParseFn); 7] = [
		(GeometryKind::Point, point),
		(GeometryKind::LineString, line_string),
		(GeometryKind::Polygon, polygon),
		(GeometryKind::MultiPoint, multi_point),
		(GeometryKind::MultiLineString, multi_line_string),
		(GeometryKind::MultiPolygon, multi_polygon),
		(GeometryKind::GeometryCollection, geometry_collection),
	];
	entries.into_iter().map(|(kind, f)| (kind.tag(), (kind, f))).collect()
});

fn point(body: &str, srid: u32, swap: bool) -> Result<Geometry, WktError> {
	parse_point(body, srid, swap).map(Geometry::from)
}

fn line_string(body: &str, srid: u32, swap: bool) -> Result<Geometry, WktError> {
	parse_line_string(body, srid, swap).map(Geometry::from)
}

fn polygon(body: &str, srid: u32, swap: bool) -> Result<Geometry, WktError> {
	parse_polygon(body, srid, swap).map(Geometry::from)
}

fn multi_point(body: &str, srid: u32, swap: bool) -> Result<Geometry, WktError> {
	parse_multi_point(body, srid, swap).map(Geometry::from)
}

fn multi_line_string(body: &str, srid: u32, swap: bool) -> Result<Geometry, WktError> {
	parse_multi_line_string(body, srid, swap).map(Geometry::from)
}

fn multi_polygon(body: &str, srid: u32, swap: bool) -> Result<Geometry, WktError> {
	parse_multi_polygon(body, srid, swap).map(Geometry::from)
}

fn geometry_collection(body: &str, srid: u32, swap: bool) -> Result<Geometry, WktError> {
	parse_geometry_collection(body, srid, swap).map(Geometry::from)
}

/// Parses any supported geometry.
#[instrument(name = "wkt::parse", level = "trace", skip_all)]
pub fn parse(text: &str, srid: u32, swap: bool) -> Result<Geometry, WktError> {
	parse_kind(text, None, srid, swap)
}

/// Parses `text`, failing with [`WktError::KindMismatch`] when `expected` is
/// given and the tag names a different kind.
#[instrument(name = "wkt::parse_kind", level = "trace", skip(text))]
pub fn parse_kind(text: &str, expected: Option<GeometryKind>, srid: u32, swap: bool) -> Result<Geometry, WktError> {
	let (tag, body) = parse_header(text)?;
	let Some((kind, parse_body)) = PARSERS.get(tag.as_str()) else {
		return Err(WktError::UnknownType(tag));
	};

	if let Some(expected) = expected {
		if expected != *kind {
			return Err(WktError::KindMismatch {
				expected,
				actual: *kind,
			});
		}
	}

	parse_body(body, srid, swap)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::geometry::{LineString, Point};

	#[test]
	fn test_dispatch_covers_every_kind() {
		for kind in GeometryKind::ALL {
			assert_eq!(PARSERS.get(kind.tag()).map(|(k, _)| *k), Some(kind));
		}
	}

	#[test]
	fn test_parse_point() {
		assert_eq!(parse("POINT(1 2)", 0, false).unwrap(), Geometry::from(Point::new(0, 1.0, 2.0)));
	}

	#[test]
	fn test_parse_case_insensitive_tag() {
		assert_eq!(parse("pOiNt (1 2)", 0, false).unwrap(), parse("POINT(1 2)", 0, false).unwrap());
	}

	#[test]
	fn test_parse_unknown_type() {
		assert_eq!(parse("badtype(1 2)", 0, false), Err(WktError::UnknownType("badtype".to_string())));
		assert_eq!(parse("(1 2)", 0, false), Err(WktError::UnknownType(String::new())));
	}

	#[test]
	fn test_parse_kind_mismatch() {
		assert_eq!(
			parse_kind("LINESTRING(1 2, 3 4)", Some(GeometryKind::Point), 0, false),
			Err(WktError::KindMismatch {
				expected: GeometryKind::Point,
				actual: GeometryKind::LineString
			})
		);
	}

	#[test]
	fn test_parse_stamps_srid() {
		let g = parse("LINESTRING(1 2, 3 4)", 4326, true).unwrap();
		assert_eq!(
			g,
			Geometry::from(LineString::new(
				4326,
				vec![Point::new(4326, 2.0, 1.0), Point::new(4326, 4.0, 3.0)]
			))
		);
	}

	#[test]
	fn test_roundtrip() {
		for text in [
			"POINT(1 2)",
			"POINT(-1.5 0.125)",
			"LINESTRING(1 2,3 4,5 6)",
			"POLYGON((0 0,0 10,10 10,10 0,0 0),(1 1,1 2,2 2,1 1))",
			"MULTIPOINT(1 2,3 4)",
			"MULTILINESTRING((1 2,3 4),(5 6,7 8))",
			"MULTIPOLYGON(((0 0,0 1,1 1,0 0)),((5 5,5 6,6 6,5 5)))",
			"GEOMETRYCOLLECTION()",
			"GEOMETRYCOLLECTION(POINT(1 2),MULTIPOINT(1 2,1 2),GEOMETRYCOLLECTION())",
			"POINT(1e300 1e-7)",
		] {
			let g = parse(text, 0, false).unwrap();
			assert_eq!(to_wkt(&g, false), text);
			assert_eq!(parse(&to_wkt(&g, false), 0, false).unwrap(), g);
		}
	}

	#[test]
	fn test_roundtrip_swapped() {
		let g = parse("POLYGON((1 2,3 4,5 6,1 2))", 4326, true).unwrap();
		assert_eq!(to_wkt(&g, true), "POLYGON((1 2,3 4,5 6,1 2))");
		assert_eq!(to_wkt(&g, false), "POLYGON((2 1,4 3,6 5,2 1))");
	}
}
