// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{
	CARTESIAN_SRID, Error, GeometryKind, Result, Row, Type, Value, value::geometry::wkt,
};

use crate::{
	Arity, Context, FunctionError,
	expression::{BoxedExpression, Expression, Function, any_nullable, children_of, write_call},
	spatial::srid::{AxisOrder, eval_axis_order, eval_srid},
};

const ARITY: Arity = Arity::Range(1, 3);

/// Shared body of the `ST_*FromText` family: `(wkt [, srid [, axis-order]])`.
///
/// The text is parsed before the optional arguments are looked at, so a
/// malformed geometry wins over a bad SRID. `kind` restricts the accepted
/// geometry type; `None` accepts any.
fn eval_from_text(
	function: &'static str,
	kind: Option<GeometryKind>,
	args: &[BoxedExpression],
	ctx: &Context,
	row: &Row,
) -> Result<Value> {
	let text = match args[0].eval(ctx, row)? {
		Value::Null => return Ok(Value::Null),
		Value::Utf8(s) => s,
		Value::Blob(b) => String::from_utf8(b).map_err(|_| Error::from(FunctionError::invalid_gis_data(function)))?,
		_ => return Err(FunctionError::invalid_gis_data(function).into()),
	};

	let geometry = wkt::parse_kind(&text, kind, CARTESIAN_SRID, false).map_err(|cause| {
		Error::from(FunctionError::InvalidGisData {
			function: function.to_string(),
			cause: Some(cause),
		})
	})?;

	let srid = match args.get(1) {
		Some(arg) => match eval_srid(arg.as_ref(), ctx, row)? {
			Some(srid) => srid,
			None => return Ok(Value::Null),
		},
		None => CARTESIAN_SRID,
	};

	let order = match args.get(2) {
		Some(arg) => match eval_axis_order(function, arg.as_ref(), ctx, row)? {
			Some(order) => order,
			None => return Ok(Value::Null),
		},
		None => AxisOrder::SridDefined,
	};

	let geometry = geometry.with_srid(srid);
	if order.swaps(ctx.config().spatial.is_geographic(srid)) {
		Ok(Value::Geometry(geometry.swap_axes()))
	} else {
		Ok(Value::Geometry(geometry))
	}
}

macro_rules! from_text_function {
	($(#[$doc:meta])* $name:ident, $function:literal, $kind:expr, $ty:expr, $description:literal) => {
		$(#[$doc])*
		#[derive(Debug, Clone)]
		pub struct $name {
			args: Vec<BoxedExpression>,
		}

		impl $name {
			pub fn new(args: Vec<BoxedExpression>) -> Result<Self> {
				ARITY.check($function, args.len())?;
				Ok(Self {
					args,
				})
			}
		}

		impl Expression for $name {
			fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
				eval_from_text(self.function_name(), $kind, &self.args, ctx, row)
			}

			fn r#type(&self) -> Type {
				$ty
			}

			fn is_nullable(&self) -> bool {
				any_nullable(&self.args)
			}

			fn children(&self) -> Vec<&dyn Expression> {
				children_of(&self.args)
			}

			fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
				Ok(Box::new(Self::new(children)?))
			}

			fn clone_boxed(&self) -> BoxedExpression {
				Box::new(self.clone())
			}
		}

		impl Function for $name {
			fn function_name(&self) -> &'static str {
				$function
			}

			fn description(&self) -> &'static str {
				$description
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				write_call(f, self.function_name(), &self.args)
			}
		}
	};
}

from_text_function!(
	/// `ST_GEOMFROMTEXT`, alias `ST_GEOMETRYFROMTEXT`: any geometry.
	GeomFromText,
	"ST_GeomFromText",
	None,
	Type::Geometry,
	"Returns a geometry from its WKT representation."
);

from_text_function!(
	PointFromText,
	"ST_PointFromText",
	Some(GeometryKind::Point),
	Type::Point,
	"Returns a point from its WKT representation."
);

from_text_function!(
	LineFromText,
	"ST_LineFromText",
	Some(GeometryKind::LineString),
	Type::LineString,
	"Returns a linestring from its WKT representation."
);

from_text_function!(
	PolyFromText,
	"ST_PolyFromText",
	Some(GeometryKind::Polygon),
	Type::Polygon,
	"Returns a polygon from its WKT representation."
);

from_text_function!(
	MPointFromText,
	"ST_MPointFromText",
	Some(GeometryKind::MultiPoint),
	Type::MultiPoint,
	"Returns a multipoint from its WKT representation."
);

from_text_function!(
	MLineFromText,
	"ST_MLineFromText",
	Some(GeometryKind::MultiLineString),
	Type::MultiLineString,
	"Returns a multilinestring from its WKT representation."
);

from_text_function!(
	MPolyFromText,
	"ST_MPolyFromText",
	Some(GeometryKind::MultiPolygon),
	Type::MultiPolygon,
	"Returns a multipolygon from its WKT representation."
);

from_text_function!(
	GeomCollFromText,
	"ST_GeomCollFromText",
	Some(GeometryKind::GeometryCollection),
	Type::GeometryCollection,
	"Returns a geometry collection from its WKT representation."
);
