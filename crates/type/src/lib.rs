// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

pub mod error;
mod row;
pub mod value;

pub use error::{Diagnostic, Error, IntoDiagnostic, Result};
pub use row::Row;
pub use value::{
	GetType, Type, Value,
	geometry::{
		CARTESIAN_SRID, GEOSPATIAL_SRID, Geometry, GeometryCollection, GeometryKind, LineString, MultiLineString,
		MultiPoint, MultiPolygon, Point, Polygon, WEB_MERCATOR_SRID,
	},
};
