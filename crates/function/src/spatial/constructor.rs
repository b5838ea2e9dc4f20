// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{
	CARTESIAN_SRID, Geometry, LineString, MultiLineString, MultiPoint, Point, Polygon, Result, Row, Type, Value,
};

use crate::{
	Arity, Context, FunctionError,
	expression::{BoxedExpression, Expression, Function, any_nullable, children_of, write_call},
};

/// `POINT(x, y)`
#[derive(Debug, Clone)]
pub struct PointConstructor {
	args: Vec<BoxedExpression>,
}

impl PointConstructor {
	const ARITY: Arity = Arity::Exact(2);

	pub fn new(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check("POINT", args.len())?;
		Ok(Self {
			args,
		})
	}
}

impl Expression for PointConstructor {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let x = Type::Float8.convert(&self.args[0].eval(ctx, row)?)?;
		let y = Type::Float8.convert(&self.args[1].eval(ctx, row)?)?;

		match (x, y) {
			(Value::Float8(x), Value::Float8(y)) => Ok(Value::geometry(Point::new(CARTESIAN_SRID, x, y))),
			_ => Ok(Value::Null),
		}
	}

	fn r#type(&self) -> Type {
		Type::Point
	}

	fn is_nullable(&self) -> bool {
		any_nullable(&self.args)
	}

	fn children(&self) -> Vec<&dyn Expression> {
		children_of(&self.args)
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Self::ARITY.check_children(self.function_name(), children.len())?;
		Ok(Box::new(Self::new(children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for PointConstructor {
	fn function_name(&self) -> &'static str {
		"POINT"
	}

	fn description(&self) -> &'static str {
		"Constructs a point from its coordinates."
	}
}

impl Display for PointConstructor {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write_call(f, self.function_name(), &self.args)
	}
}

/// Evaluates every argument, NULL short circuits to `Ok(None)`. Each value
/// must be a geometry accepted by `member`, all of them sharing one SRID.
fn eval_members<T>(
	function: &str,
	args: &[BoxedExpression],
	ctx: &Context,
	row: &Row,
	member: impl Fn(Geometry) -> Option<T>,
	srid_of: impl Fn(&T) -> u32,
) -> Result<Option<(u32, Vec<T>)>> {
	let mut members = Vec::with_capacity(args.len());
	for arg in args {
		let value = match arg.eval(ctx, row)? {
			Value::Null => return Ok(None),
			Value::Geometry(g) => member(g),
			_ => None,
		};
		match value {
			Some(m) => members.push(m),
			None => return Err(FunctionError::invalid_argument(function).into()),
		}
	}

	let srid = members.first().map(&srid_of).unwrap_or(CARTESIAN_SRID);
	if members.iter().any(|m| srid_of(m) != srid) {
		return Err(FunctionError::invalid_argument(function).into());
	}

	Ok(Some((srid, members)))
}

macro_rules! collection_constructor {
	($(#[$doc:meta])* $name:ident, $function:literal, $min:literal, $ty:expr, $description:literal, $eval:expr) => {
		$(#[$doc])*
		#[derive(Debug, Clone)]
		pub struct $name {
			args: Vec<BoxedExpression>,
		}

		impl $name {
			const ARITY: Arity = Arity::AtLeast($min);

			pub fn new(args: Vec<BoxedExpression>) -> Result<Self> {
				Self::ARITY.check($function, args.len())?;
				Ok(Self {
					args,
				})
			}
		}

		impl Expression for $name {
			fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
				let eval: fn(&str, &[BoxedExpression], &Context, &Row) -> Result<Value> = $eval;
				eval(self.function_name(), &self.args, ctx, row)
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

fn point_member(g: Geometry) -> Option<Point> {
	match g {
		Geometry::Point(p) => Some(p),
		_ => None,
	}
}

fn line_member(g: Geometry) -> Option<LineString> {
	match g {
		Geometry::LineString(l) => Some(l),
		_ => None,
	}
}

collection_constructor!(
	/// `LINESTRING(p, p, ...)`
	LineStringConstructor,
	"LINESTRING",
	2,
	Type::LineString,
	"Constructs a linestring from points.",
	|function, args, ctx, row| {
		Ok(match eval_members(function, args, ctx, row, point_member, |p: &Point| p.srid)? {
			Some((srid, points)) => Value::geometry(LineString::new(srid, points)),
			None => Value::Null,
		})
	}
);

collection_constructor!(
	/// `POLYGON(ring, ...)`, every ring must be a closed linear ring.
	PolygonConstructor,
	"POLYGON",
	1,
	Type::Polygon,
	"Constructs a polygon from linestring rings.",
	|function, args, ctx, row| {
		let ring_member = |g: Geometry| line_member(g).filter(LineString::is_linear_ring);
		Ok(match eval_members(function, args, ctx, row, ring_member, |l: &LineString| l.srid)? {
			Some((srid, lines)) => Value::geometry(Polygon::new(srid, lines)),
			None => Value::Null,
		})
	}
);

collection_constructor!(
	/// `MULTIPOINT(p, ...)`
	MultiPointConstructor,
	"MULTIPOINT",
	1,
	Type::MultiPoint,
	"Constructs a multipoint from points.",
	|function, args, ctx, row| {
		Ok(match eval_members(function, args, ctx, row, point_member, |p: &Point| p.srid)? {
			Some((srid, points)) => Value::geometry(MultiPoint::new(srid, points)),
			None => Value::Null,
		})
	}
);

collection_constructor!(
	/// `MULTILINESTRING(l, ...)`
	MultiLineStringConstructor,
	"MULTILINESTRING",
	1,
	Type::MultiLineString,
	"Constructs a multilinestring from linestrings.",
	|function, args, ctx, row| {
		Ok(match eval_members(function, args, ctx, row, line_member, |l: &LineString| l.srid)? {
			Some((srid, lines)) => Value::geometry(MultiLineString::new(srid, lines)),
			None => Value::Null,
		})
	}
);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::expression::{
		rebuild,
		testing::{eval, lit, null},
	};

	fn point(x: f64, y: f64) -> BoxedExpression {
		lit(Value::geometry(Point::new(0, x, y)))
	}

	fn line(coords: &[(f64, f64)]) -> BoxedExpression {
		lit(Value::geometry(LineString::new(0, coords.iter().map(|&(x, y)| Point::new(0, x, y)).collect())))
	}

	#[test]
	fn test_point() {
		let f: BoxedExpression = Box::new(PointConstructor::new(vec![lit(1i64), lit("2.5")]).unwrap());
		assert_eq!(eval(&f), Value::geometry(Point::new(0, 1.0, 2.5)));
	}

	#[test]
	fn test_point_null() {
		let f: BoxedExpression = Box::new(PointConstructor::new(vec![lit(1i64), null()]).unwrap());
		assert_eq!(eval(&f), Value::Null);
		assert!(f.is_nullable());
	}

	#[test]
	fn test_point_arity() {
		let err = PointConstructor::new(vec![lit(1i64)]).unwrap_err();
		assert_eq!(err.message, "function 'POINT' expected 2 arguments, 1 received");
	}

	#[test]
	fn test_point_with_children_fixed_arity() {
		let f = PointConstructor::new(vec![lit(1i64), lit(2i64)]).unwrap();
		let err = f.with_children(vec![lit(1i64)]).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_003");
		assert_eq!(err.message, "POINT: invalid children number, got 1, expected 2");
		assert_eq!(rebuild(&f).unwrap().to_string(), "POINT(1, 2)");
	}

	#[test]
	fn test_line_string() {
		let f: BoxedExpression = Box::new(LineStringConstructor::new(vec![point(1.0, 2.0), point(3.0, 4.0)]).unwrap());
		assert_eq!(
			eval(&f),
			Value::geometry(LineString::new(0, vec![Point::new(0, 1.0, 2.0), Point::new(0, 3.0, 4.0)]))
		);
	}

	#[test]
	fn test_line_string_requires_two_points() {
		let err = LineStringConstructor::new(vec![point(1.0, 2.0)]).unwrap_err();
		assert_eq!(err.message, "function 'LINESTRING' expected at least 2 arguments, 1 received");
	}

	#[test]
	fn test_line_string_rejects_non_points() {
		let f = LineStringConstructor::new(vec![point(1.0, 2.0), lit("POINT(3 4)")]).unwrap();
		let err = f.eval(&Context::default(), &Row::empty()).unwrap_err();
		assert_eq!(err.message, "Incorrect arguments to LINESTRING");
	}

	#[test]
	fn test_mixed_srid_rejected() {
		let f = MultiPointConstructor::new(vec![point(1.0, 2.0), lit(Value::geometry(Point::new(4326, 1.0, 2.0)))])
			.unwrap();
		assert_eq!(f.eval(&Context::default(), &Row::empty()).unwrap_err().code(), "FUNCTION_005");
	}

	#[test]
	fn test_polygon() {
		let f: BoxedExpression = Box::new(
			PolygonConstructor::new(vec![line(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)])]).unwrap(),
		);
		assert!(matches!(eval(&f), Value::Geometry(Geometry::Polygon(_))));
	}

	#[test]
	fn test_polygon_rejects_open_ring() {
		let f = PolygonConstructor::new(vec![line(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0)])]).unwrap();
		assert_eq!(f.eval(&Context::default(), &Row::empty()).unwrap_err().code(), "FUNCTION_005");
	}

	#[test]
	fn test_multi_line_string() {
		let f: BoxedExpression = Box::new(
			MultiLineStringConstructor::new(vec![line(&[(1.0, 2.0), (3.0, 4.0)]), line(&[(5.0, 6.0), (7.0, 8.0)])])
				.unwrap(),
		);
		assert_eq!(eval(&f).to_string(), "MULTILINESTRING((1 2,3 4),(5 6,7 8))");
	}

	#[test]
	fn test_collection_null() {
		let f: BoxedExpression = Box::new(MultiPointConstructor::new(vec![point(1.0, 2.0), null()]).unwrap());
		assert_eq!(eval(&f), Value::Null);
	}

	#[test]
	fn test_collection_with_children_reruns_constructor() {
		let f = MultiPointConstructor::new(vec![point(1.0, 2.0)]).unwrap();
		assert_eq!(f.with_children(vec![]).unwrap_err().code(), "FUNCTION_002");
		assert_eq!(f.description(), "Constructs a multipoint from points.");
	}
}
