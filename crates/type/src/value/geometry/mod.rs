// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub mod wkt;

/// Planar coordinates, no axis swapping.
pub const CARTESIAN_SRID: u32 = 0;
/// WGS 84, read and written latitude first.
pub const GEOSPATIAL_SRID: u32 = 4326;
/// WGS 84 / Pseudo-Mercator.
pub const WEB_MERCATOR_SRID: u32 = 3857;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub srid: u32,
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(srid: u32, x: f64, y: f64) -> Self {
		Self {
			srid,
			x,
			y,
		}
	}

	pub fn with_srid(self, srid: u32) -> Self {
		Self {
			srid,
			..self
		}
	}

	pub fn swap_axes(self) -> Self {
		Self {
			srid: self.srid,
			x: self.y,
			y: self.x,
		}
	}

	fn same_position(&self, other: &Point) -> bool {
		self.x == other.x && self.y == other.y
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineString {
	pub srid: u32,
	pub points: Vec<Point>,
}

impl LineString {
	pub fn new(srid: u32, points: Vec<Point>) -> Self {
		Self {
			srid,
			points,
		}
	}

	pub fn start_point(&self) -> Option<&Point> {
		self.points.first()
	}

	pub fn end_point(&self) -> Option<&Point> {
		self.points.last()
	}

	/// First and last point coincide.
	pub fn is_closed(&self) -> bool {
		match (self.points.first(), self.points.last()) {
			(Some(first), Some(last)) => self.points.len() > 1 && first.same_position(last),
			_ => false,
		}
	}

	/// Closed and made of at least four points, the shape of a polygon ring.
	pub fn is_linear_ring(&self) -> bool {
		self.points.len() >= 4 && self.is_closed()
	}

	pub fn with_srid(self, srid: u32) -> Self {
		Self {
			srid,
			points: self.points.into_iter().map(|p| p.with_srid(srid)).collect(),
		}
	}

	pub fn swap_axes(self) -> Self {
		Self {
			srid: self.srid,
			points: self.points.into_iter().map(Point::swap_axes).collect(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
	pub srid: u32,
	pub lines: Vec<LineString>,
}

impl Polygon {
	pub fn new(srid: u32, lines: Vec<LineString>) -> Self {
		Self {
			srid,
			lines,
		}
	}

	pub fn with_srid(self, srid: u32) -> Self {
		Self {
			srid,
			lines: self.lines.into_iter().map(|l| l.with_srid(srid)).collect(),
		}
	}

	pub fn swap_axes(self) -> Self {
		Self {
			srid: self.srid,
			lines: self.lines.into_iter().map(LineString::swap_axes).collect(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiPoint {
	pub srid: u32,
	pub points: Vec<Point>,
}

impl MultiPoint {
	pub fn new(srid: u32, points: Vec<Point>) -> Self {
		Self {
			srid,
			points,
		}
	}

	pub fn with_srid(self, srid: u32) -> Self {
		Self {
			srid,
			points: self.points.into_iter().map(|p| p.with_srid(srid)).collect(),
		}
	}

	pub fn swap_axes(self) -> Self {
		Self {
			srid: self.srid,
			points: self.points.into_iter().map(Point::swap_axes).collect(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiLineString {
	pub srid: u32,
	pub lines: Vec<LineString>,
}

impl MultiLineString {
	pub fn new(srid: u32, lines: Vec<LineString>) -> Self {
		Self {
			srid,
			lines,
		}
	}

	pub fn with_srid(self, srid: u32) -> Self {
		Self {
			srid,
			lines: self.lines.into_iter().map(|l| l.with_srid(srid)).collect(),
		}
	}

	pub fn swap_axes(self) -> Self {
		Self {
			srid: self.srid,
			lines: self.lines.into_iter().map(LineString::swap_axes).collect(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
	pub srid: u32,
	pub polygons: Vec<Polygon>,
}

impl MultiPolygon {
	pub fn new(srid: u32, polygons: Vec<Polygon>) -> Self {
		Self {
			srid,
			polygons,
		}
	}

	pub fn with_srid(self, srid: u32) -> Self {
		Self {
			srid,
			polygons: self.polygons.into_iter().map(|p| p.with_srid(srid)).collect(),
		}
	}

	pub fn swap_axes(self) -> Self {
		Self {
			srid: self.srid,
			polygons: self.polygons.into_iter().map(Polygon::swap_axes).collect(),
		}
	}
}

/// Heterogeneous members, possibly nested collections, sharing one SRID.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
	pub srid: u32,
	pub geometries: Vec<Geometry>,
}

impl GeometryCollection {
	pub fn new(srid: u32, geometries: Vec<Geometry>) -> Self {
		Self {
			srid,
			geometries,
		}
	}

	pub fn with_srid(self, srid: u32) -> Self {
		Self {
			srid,
			geometries: self.geometries.into_iter().map(|g| g.with_srid(srid)).collect(),
		}
	}

	pub fn swap_axes(self) -> Self {
		Self {
			srid: self.srid,
			geometries: self.geometries.into_iter().map(Geometry::swap_axes).collect(),
		}
	}
}

/// Discriminator of [`Geometry`], carrying the lower-case WKT tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
	Point,
	LineString,
	Polygon,
	MultiPoint,
	MultiLineString,
	MultiPolygon,
	GeometryCollection,
}

impl GeometryKind {
	pub const ALL: [GeometryKind; 7] = [
		GeometryKind::Point,
		GeometryKind::LineString,
		GeometryKind::Polygon,
		GeometryKind::MultiPoint,
		GeometryKind::MultiLineString,
		GeometryKind::MultiPolygon,
		GeometryKind::GeometryCollection,
	];

	pub fn tag(&self) -> &'static str {
		match self {
			GeometryKind::Point => "point",
			GeometryKind::LineString => "linestring",
			GeometryKind::Polygon => "polygon",
			GeometryKind::MultiPoint => "multipoint",
			GeometryKind::MultiLineString => "multilinestring",
			GeometryKind::MultiPolygon => "multipolygon",
			GeometryKind::GeometryCollection => "geometrycollection",
		}
	}
}

impl Display for GeometryKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.tag().to_ascii_uppercase())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
	Point(Point),
	LineString(LineString),
	Polygon(Polygon),
	MultiPoint(MultiPoint),
	MultiLineString(MultiLineString),
	MultiPolygon(MultiPolygon),
	GeometryCollection(GeometryCollection),
}

impl Geometry {
	pub fn kind(&self) -> GeometryKind {
		match self {
			Geometry::Point(_) => GeometryKind::Point,
			Geometry::LineString(_) => GeometryKind::LineString,
			Geometry::Polygon(_) => GeometryKind::Polygon,
			Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
			Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
			Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
			Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
		}
	}

	pub fn srid(&self) -> u32 {
		match self {
			Geometry::Point(g) => g.srid,
			Geometry::LineString(g) => g.srid,
			Geometry::Polygon(g) => g.srid,
			Geometry::MultiPoint(g) => g.srid,
			Geometry::MultiLineString(g) => g.srid,
			Geometry::MultiPolygon(g) => g.srid,
			Geometry::GeometryCollection(g) => g.srid,
		}
	}

	/// Returns a copy where the geometry and every member carry `srid`.
	pub fn with_srid(self, srid: u32) -> Self {
		match self {
			Geometry::Point(g) => Geometry::Point(g.with_srid(srid)),
			Geometry::LineString(g) => Geometry::LineString(g.with_srid(srid)),
			Geometry::Polygon(g) => Geometry::Polygon(g.with_srid(srid)),
			Geometry::MultiPoint(g) => Geometry::MultiPoint(g.with_srid(srid)),
			Geometry::MultiLineString(g) => Geometry::MultiLineString(g.with_srid(srid)),
			Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.with_srid(srid)),
			Geometry::GeometryCollection(g) => Geometry::GeometryCollection(g.with_srid(srid)),
		}
	}

	/// Exchanges x and y of every coordinate.
	pub fn swap_axes(self) -> Self {
		match self {
			Geometry::Point(g) => Geometry::Point(g.swap_axes()),
			Geometry::LineString(g) => Geometry::LineString(g.swap_axes()),
			Geometry::Polygon(g) => Geometry::Polygon(g.swap_axes()),
			Geometry::MultiPoint(g) => Geometry::MultiPoint(g.swap_axes()),
			Geometry::MultiLineString(g) => Geometry::MultiLineString(g.swap_axes()),
			Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.swap_axes()),
			Geometry::GeometryCollection(g) => Geometry::GeometryCollection(g.swap_axes()),
		}
	}

	/// Parses cartesian WKT, see [`wkt::parse`] for SRID and axis handling.
	pub fn from_wkt(text: &str) -> Result<Self, wkt::WktError> {
		wkt::parse(text, CARTESIAN_SRID, false)
	}

	/// WKT in stored axis order.
	pub fn to_wkt(&self) -> String {
		wkt::to_wkt(self, false)
	}
}

impl Display for Geometry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.to_wkt())
	}
}

macro_rules! impl_from_geometry {
	($($variant:ident),*) => {
		$(
			impl From<$variant> for Geometry {
				fn from(g: $variant) -> Self {
					Geometry::$variant(g)
				}
			}
		)*
	};
}

impl_from_geometry!(Point, LineString, Polygon, MultiPoint, MultiLineString, MultiPolygon, GeometryCollection);
