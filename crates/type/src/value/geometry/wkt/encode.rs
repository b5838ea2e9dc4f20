// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

use crate::value::geometry::{Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

pub fn point_to_wkt(p: &Point, swap: bool) -> String {
	format!("POINT({})", point_body(p, swap))
}

pub fn line_string_to_wkt(l: &LineString, swap: bool) -> String {
	format!("LINESTRING({})", line_body(l, swap))
}

pub fn polygon_to_wkt(p: &Polygon, swap: bool) -> String {
	format!("POLYGON({})", polygon_body(p, swap))
}

pub fn multi_point_to_wkt(m: &MultiPoint, swap: bool) -> String {
	format!("MULTIPOINT({})", join(m.points.iter().map(|p| point_body(p, swap))))
}

pub fn multi_line_string_to_wkt(m: &MultiLineString, swap: bool) -> String {
	format!("MULTILINESTRING({})", join(m.lines.iter().map(|l| format!("({})", line_body(l, swap)))))
}

pub fn multi_polygon_to_wkt(m: &MultiPolygon, swap: bool) -> String {
	format!("MULTIPOLYGON({})", join(m.polygons.iter().map(|p| format!("({})", polygon_body(p, swap)))))
}

pub fn geometry_collection_to_wkt(c: &GeometryCollection, swap: bool) -> String {
	format!("GEOMETRYCOLLECTION({})", join(c.geometries.iter().map(|g| to_wkt(g, swap))))
}

/// Renders any geometry; `swap` writes y before x.
pub fn to_wkt(g: &Geometry, swap: bool) -> String {
	match g {
		Geometry::Point(p) => point_to_wkt(p, swap),
		Geometry::LineString(l) => line_string_to_wkt(l, swap),
		Geometry::Polygon(p) => polygon_to_wkt(p, swap),
		Geometry::MultiPoint(m) => multi_point_to_wkt(m, swap),
		Geometry::MultiLineString(m) => multi_line_string_to_wkt(m, swap),
		Geometry::MultiPolygon(m) => multi_polygon_to_wkt(m, swap),
		Geometry::GeometryCollection(c) => geometry_collection_to_wkt(c, swap),
	}
}

fn point_body(p: &Point, swap: bool) -> String {
	let (first, second) = if swap {
		(p.y, p.x)
	} else {
		(p.x, p.y)
	};
	format!("{} {}", format_coordinate(first), format_coordinate(second))
}

/// Shortest round-tripping digits; exponent form below 1e-4 and from 1e21.
fn format_coordinate(v: f64) -> String {
	let scientific = format!("{:e}", v);
	let exponent = scientific.rsplit_once('e').and_then(|(_, e)| e.parse::<i32>().ok()).unwrap_or(0);
	if v != 0.0 && (exponent < -4 || exponent >= 21) {
		scientific
	} else {
		format!("{}", v)
	}
}

fn line_body(l: &LineString, swap: bool) -> String {
	join(l.points.iter().map(|p| point_body(p, swap)))
}

fn polygon_body(p: &Polygon, swap: bool) -> String {
	join(p.lines.iter().map(|l| format!("({})", line_body(l, swap))))
}

fn join(parts: impl Iterator<Item = String>) -> String {
	parts.collect::<Vec<_>>().join(",")
}
