// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{Result, Row, Type, Value, value::geometry::wkt};

use crate::{
	Arity, Context,
	expression::{BoxedExpression, Expression, Function, any_nullable, children_of, write_call},
	spatial::{
		eval_geometry,
		srid::{AxisOrder, eval_axis_order},
	},
};

const ARITY: Arity = Arity::Range(1, 2);

/// `ST_ASWKT(g [, axis-order])`, also registered as `ST_ASTEXT`.
///
/// Geographic geometries are written in their SRID's axis order unless an
/// explicit `axis-order=long-lat` is given.
#[derive(Debug, Clone)]
pub struct AsWkt {
	name: &'static str,
	args: Vec<BoxedExpression>,
}

impl AsWkt {
	pub fn new(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::named("ST_AsWKT", args)
	}

	pub fn as_text(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::named("ST_AsText", args)
	}

	fn named(name: &'static str, args: Vec<BoxedExpression>) -> Result<Self> {
		ARITY.check(name, args.len())?;
		Ok(Self {
			name,
			args,
		})
	}
}

impl Expression for AsWkt {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let Some(geometry) = eval_geometry(self.name, self.args[0].as_ref(), ctx, row)? else {
			return Ok(Value::Null);
		};

		let order = match self.args.get(1) {
			Some(arg) => match eval_axis_order(self.name, arg.as_ref(), ctx, row)? {
				Some(order) => order,
				None => return Ok(Value::Null),
			},
			None => AxisOrder::SridDefined,
		};

		let swap = order.swaps(ctx.config().spatial.is_geographic(geometry.srid()));
		Ok(Value::Utf8(wkt::to_wkt(&geometry, swap)))
	}

	fn r#type(&self) -> Type {
		Type::Utf8
	}

	fn is_nullable(&self) -> bool {
		any_nullable(&self.args)
	}

	fn children(&self) -> Vec<&dyn Expression> {
		children_of(&self.args)
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Ok(Box::new(Self::named(self.name, children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for AsWkt {
	fn function_name(&self) -> &'static str {
		self.name
	}

	fn description(&self) -> &'static str {
		"Returns the WKT representation of a geometry."
	}
}

impl Display for AsWkt {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write_call(f, self.name, &self.args)
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::{LineString, MultiPolygon, Point, Polygon};

	use super::*;
	use crate::{
		expression::{
			rebuild,
			testing::{eval, lit, null},
		},
		spatial::PointFromText,
	};

	fn as_wkt(args: Vec<BoxedExpression>) -> BoxedExpression {
		Box::new(AsWkt::new(args).unwrap())
	}

	#[test]
	fn test_point() {
		assert_eq!(eval(&as_wkt(vec![lit(Value::geometry(Point::new(0, 1.0, 2.0)))])), Value::utf8("POINT(1 2)"));
	}

	#[test]
	fn test_line_string() {
		let line = LineString::new(0, vec![Point::new(0, 1.0, 2.0), Point::new(0, 3.0, 4.0)]);
		assert_eq!(eval(&as_wkt(vec![lit(Value::geometry(line))])), Value::utf8("LINESTRING(1 2,3 4)"));
	}

	#[test]
	fn test_multi_polygon() {
		let ring = LineString::new(
			0,
			vec![Point::new(0, 0.0, 0.0), Point::new(0, 0.0, 1.0), Point::new(0, 1.0, 1.0), Point::new(0, 0.0, 0.0)],
		);
		let multi = MultiPolygon::new(0, vec![Polygon::new(0, vec![ring.clone()]), Polygon::new(0, vec![ring])]);
		assert_eq!(
			eval(&as_wkt(vec![lit(Value::geometry(multi))])),
			Value::utf8("MULTIPOLYGON(((0 0,0 1,1 1,0 0)),((0 0,0 1,1 1,0 0)))")
		);
	}

	#[test]
	fn test_geographic_roundtrip() {
		let parsed: BoxedExpression =
			Box::new(PointFromText::new(vec![lit("POINT(1 2)"), lit(4326i64)]).unwrap());
		assert_eq!(eval(&as_wkt(vec![parsed.clone()])), Value::utf8("POINT(1 2)"));
		assert_eq!(eval(&as_wkt(vec![parsed, lit("axis-order=long-lat")])), Value::utf8("POINT(2 1)"));
	}

	#[test]
	fn test_null() {
		assert_eq!(eval(&as_wkt(vec![null()])), Value::Null);
		assert_eq!(eval(&as_wkt(vec![lit(Value::geometry(Point::new(0, 1.0, 2.0))), null()])), Value::Null);
	}

	#[test]
	fn test_non_geometry() {
		let f = AsWkt::new(vec![lit("POINT(1 2)")]).unwrap();
		let err = f.eval(&Context::default(), &Row::empty()).unwrap_err();
		assert_eq!(err.message, "invalid GIS data provided to function ST_AsWKT");
	}

	#[test]
	fn test_alias_display() {
		let f = AsWkt::as_text(vec![lit(Value::geometry(Point::new(0, 1.0, 2.0)))]).unwrap();
		assert_eq!(f.to_string(), "ST_ASTEXT(POINT(1 2))");
		assert_eq!(rebuild(&f).unwrap().to_string(), f.to_string());
	}

	#[test]
	fn test_arity() {
		assert_eq!(AsWkt::new(vec![]).unwrap_err().code(), "FUNCTION_002");
		assert!(AsWkt::new(vec![lit(1i64), lit(2i64), lit(3i64)]).is_err());
	}
}
