// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use tessera_type::{Geometry, Result, Row, Value};

use crate::{Context, Expression, FunctionError};

pub mod accessor;
pub mod as_text;
pub mod constructor;
pub mod from_text;
pub mod srid;

pub use accessor::{
	Endpoint, GeodeticAxis, GeodeticCoordinate, IsClosed, LineEnd, PointAxis, PointCoordinate, StSrid,
};
pub use as_text::AsWkt;
pub use constructor::{
	LineStringConstructor, MultiLineStringConstructor, MultiPointConstructor, PointConstructor, PolygonConstructor,
};
pub use from_text::{
	GeomCollFromText, GeomFromText, LineFromText, MLineFromText, MPointFromText, MPolyFromText, PointFromText, PolyFromText,
};
pub use srid::AxisOrder;

/// Evaluates an argument that must hold a geometry. NULL yields `None`, any
/// other non spatial value is invalid GIS data for `function`.
pub(crate) fn eval_geometry(function: &str, expr: &dyn Expression, ctx: &Context, row: &Row) -> Result<Option<Geometry>> {
	match expr.eval(ctx, row)? {
		Value::Null => Ok(None),
		Value::Geometry(g) => Ok(Some(g)),
		_ => Err(FunctionError::invalid_gis_data(function).into()),
	}
}
