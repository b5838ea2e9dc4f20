// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{Geometry, Result, Row, Type, Value};

use crate::{
	Arity, Context, FunctionError,
	expression::{BoxedExpression, Expression, Function, any_nullable, children_of, write_call},
	spatial::{eval_geometry, srid::eval_srid},
};

/// `ST_SRID(g)` reads the SRID, `ST_SRID(g, srid)` returns a copy of `g`
/// carrying `srid`. Coordinates are never touched.
#[derive(Debug, Clone)]
pub struct StSrid {
	args: Vec<BoxedExpression>,
}

impl StSrid {
	const ARITY: Arity = Arity::Range(1, 2);

	pub fn new(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check("ST_SRID", args.len())?;
		Ok(Self {
			args,
		})
	}
}

impl Expression for StSrid {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let Some(geometry) = eval_geometry(self.function_name(), self.args[0].as_ref(), ctx, row)? else {
			return Ok(Value::Null);
		};

		let Some(arg) = self.args.get(1) else {
			return Ok(Value::Uint4(geometry.srid()));
		};

		match eval_srid(arg.as_ref(), ctx, row)? {
			Some(srid) => Ok(Value::Geometry(geometry.with_srid(srid))),
			None => Ok(Value::Null),
		}
	}

	fn r#type(&self) -> Type {
		if self.args.len() == 2 {
			self.args[0].r#type()
		} else {
			Type::Uint4
		}
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

impl Function for StSrid {
	fn function_name(&self) -> &'static str {
		"ST_SRID"
	}

	fn description(&self) -> &'static str {
		"Returns or sets the spatial reference system identifier of a geometry."
	}
}

impl Display for StSrid {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write_call(f, self.function_name(), &self.args)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointAxis {
	X,
	Y,
}

impl PointAxis {
	fn function_name(self) -> &'static str {
		match self {
			PointAxis::X => "ST_X",
			PointAxis::Y => "ST_Y",
		}
	}

	/// X is the first coordinate in the SRID's axis order. Geographic points
	/// are stored longitude first but ordered latitude first, so the stored
	/// field flips for them.
	fn reads_stored_x(self, geographic: bool) -> bool {
		(self == PointAxis::X) != geographic
	}
}

/// `ST_X(p [, v])` and `ST_Y(p [, v])`: read a coordinate, or return a copy
/// of the point with that coordinate replaced.
#[derive(Debug, Clone)]
pub struct PointCoordinate {
	axis: PointAxis,
	args: Vec<BoxedExpression>,
}

impl PointCoordinate {
	const ARITY: Arity = Arity::Range(1, 2);

	pub fn new(axis: PointAxis, args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check(axis.function_name(), args.len())?;
		Ok(Self {
			axis,
			args,
		})
	}

	pub fn x(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::new(PointAxis::X, args)
	}

	pub fn y(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::new(PointAxis::Y, args)
	}
}

impl Expression for PointCoordinate {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let function = self.function_name();
		let point = match eval_geometry(function, self.args[0].as_ref(), ctx, row)? {
			None => return Ok(Value::Null),
			Some(Geometry::Point(p)) => p,
			Some(_) => return Err(FunctionError::invalid_argument(function).into()),
		};
		let stored_x = self.axis.reads_stored_x(ctx.config().spatial.is_geographic(point.srid));

		let Some(arg) = self.args.get(1) else {
			return Ok(Value::Float8(if stored_x {
				point.x
			} else {
				point.y
			}));
		};

		match Type::Float8.convert(&arg.eval(ctx, row)?)? {
			Value::Float8(v) => {
				let mut point = point;
				if stored_x {
					point.x = v;
				} else {
					point.y = v;
				}
				Ok(Value::geometry(point))
			}
			_ => Ok(Value::Null),
		}
	}

	fn r#type(&self) -> Type {
		if self.args.len() == 2 {
			Type::Point
		} else {
			Type::Float8
		}
	}

	fn is_nullable(&self) -> bool {
		any_nullable(&self.args)
	}

	fn children(&self) -> Vec<&dyn Expression> {
		children_of(&self.args)
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Ok(Box::new(Self::new(self.axis, children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for PointCoordinate {
	fn function_name(&self) -> &'static str {
		self.axis.function_name()
	}

	fn description(&self) -> &'static str {
		match self.axis {
			PointAxis::X => "Returns or sets the first coordinate of a point.",
			PointAxis::Y => "Returns or sets the second coordinate of a point.",
		}
	}
}

impl Display for PointCoordinate {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write_call(f, self.function_name(), &self.args)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeodeticAxis {
	Latitude,
	Longitude,
}

impl GeodeticAxis {
	fn function_name(self) -> &'static str {
		match self {
			GeodeticAxis::Latitude => "ST_LATITUDE",
			GeodeticAxis::Longitude => "ST_LONGITUDE",
		}
	}

	fn label(self) -> &'static str {
		match self {
			GeodeticAxis::Latitude => "Latitude",
			GeodeticAxis::Longitude => "Longitude",
		}
	}

	/// Latitude is closed at both poles, longitude excludes -180.
	fn check(self, value: f64) -> std::result::Result<f64, FunctionError> {
		let (min, max) = match self {
			GeodeticAxis::Latitude => (-90.0, 90.0),
			GeodeticAxis::Longitude => (-180.0, 180.0),
		};
		let in_range = match self {
			GeodeticAxis::Latitude => (min..=max).contains(&value),
			GeodeticAxis::Longitude => value > min && value <= max,
		};
		if in_range {
			Ok(value)
		} else {
			Err(FunctionError::CoordinateOutOfRange {
				function: self.function_name().to_string(),
				axis: self.label(),
				value,
				min,
				max,
			})
		}
	}
}

/// `ST_LATITUDE(p [, v])` and `ST_LONGITUDE(p [, v])` on a point with a
/// geographic SRID. Storage keeps longitude in x, so the axis order of the
/// SRID never matters here.
#[derive(Debug, Clone)]
pub struct GeodeticCoordinate {
	axis: GeodeticAxis,
	args: Vec<BoxedExpression>,
}

impl GeodeticCoordinate {
	const ARITY: Arity = Arity::Range(1, 2);

	pub fn new(axis: GeodeticAxis, args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check(axis.function_name(), args.len())?;
		Ok(Self {
			axis,
			args,
		})
	}

	pub fn latitude(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::new(GeodeticAxis::Latitude, args)
	}

	pub fn longitude(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::new(GeodeticAxis::Longitude, args)
	}
}

impl Expression for GeodeticCoordinate {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let function = self.function_name();
		let point = match eval_geometry(function, self.args[0].as_ref(), ctx, row)? {
			None => return Ok(Value::Null),
			Some(Geometry::Point(p)) => p,
			Some(_) => return Err(FunctionError::invalid_argument(function).into()),
		};
		if !ctx.config().spatial.is_geographic(point.srid) {
			return Err(FunctionError::NotGeographic {
				function: function.to_string(),
				srid: point.srid,
			}
			.into());
		}

		let Some(arg) = self.args.get(1) else {
			return Ok(Value::Float8(match self.axis {
				GeodeticAxis::Latitude => point.y,
				GeodeticAxis::Longitude => point.x,
			}));
		};

		match Type::Float8.convert(&arg.eval(ctx, row)?)? {
			Value::Float8(v) => {
				let v = self.axis.check(v)?;
				let mut point = point;
				match self.axis {
					GeodeticAxis::Latitude => point.y = v,
					GeodeticAxis::Longitude => point.x = v,
				}
				Ok(Value::geometry(point))
			}
			_ => Ok(Value::Null),
		}
	}

	fn r#type(&self) -> Type {
		if self.args.len() == 2 {
			Type::Point
		} else {
			Type::Float8
		}
	}

	fn is_nullable(&self) -> bool {
		any_nullable(&self.args)
	}

	fn children(&self) -> Vec<&dyn Expression> {
		children_of(&self.args)
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Ok(Box::new(Self::new(self.axis, children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for GeodeticCoordinate {
	fn function_name(&self) -> &'static str {
		self.axis.function_name()
	}

	fn description(&self) -> &'static str {
		match self.axis {
			GeodeticAxis::Latitude => "Returns or sets the latitude of a geographic point.",
			GeodeticAxis::Longitude => "Returns or sets the longitude of a geographic point.",
		}
	}
}

impl Display for GeodeticCoordinate {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write_call(f, self.function_name(), &self.args)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
	Start,
	End,
}

/// `ST_STARTPOINT(l)` / `ST_ENDPOINT(l)`. Geometries other than linestrings
/// yield NULL.
#[derive(Debug, Clone)]
pub struct Endpoint {
	end: LineEnd,
	arg: BoxedExpression,
}

impl Endpoint {
	const ARITY: Arity = Arity::Exact(1);

	pub fn new(end: LineEnd, mut args: Vec<BoxedExpression>) -> Result<Self> {
		let name = match end {
			LineEnd::Start => "ST_StartPoint",
			LineEnd::End => "ST_EndPoint",
		};
		Self::ARITY.check(name, args.len())?;
		Ok(Self {
			end,
			arg: args.remove(0),
		})
	}

	pub fn start(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::new(LineEnd::Start, args)
	}

	pub fn end(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::new(LineEnd::End, args)
	}
}

impl Expression for Endpoint {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let line = match eval_geometry(self.function_name(), self.arg.as_ref(), ctx, row)? {
			Some(Geometry::LineString(line)) => line,
			_ => return Ok(Value::Null),
		};

		let point = match self.end {
			LineEnd::Start => line.start_point(),
			LineEnd::End => line.end_point(),
		};
		Ok(point.map(|p| Value::geometry(*p)).unwrap_or(Value::Null))
	}

	fn r#type(&self) -> Type {
		Type::Point
	}

	fn is_nullable(&self) -> bool {
		true
	}

	fn children(&self) -> Vec<&dyn Expression> {
		vec![self.arg.as_ref()]
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Self::ARITY.check_children(self.function_name(), children.len())?;
		Ok(Box::new(Self::new(self.end, children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for Endpoint {
	fn function_name(&self) -> &'static str {
		match self.end {
			LineEnd::Start => "ST_StartPoint",
			LineEnd::End => "ST_EndPoint",
		}
	}

	fn description(&self) -> &'static str {
		match self.end {
			LineEnd::Start => "Returns the first point of a linestring.",
			LineEnd::End => "Returns the last point of a linestring.",
		}
	}
}

impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}({})", self.function_name().to_ascii_uppercase(), self.arg)
	}
}

/// `ST_ISCLOSED(l)`: a linestring is closed when its ends coincide, a
/// multilinestring when every member is. Other geometries yield NULL.
#[derive(Debug, Clone)]
pub struct IsClosed {
	arg: BoxedExpression,
}

impl IsClosed {
	const ARITY: Arity = Arity::Exact(1);

	pub fn new(mut args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check("ST_IsClosed", args.len())?;
		Ok(Self {
			arg: args.remove(0),
		})
	}
}

impl Expression for IsClosed {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		match eval_geometry(self.function_name(), self.arg.as_ref(), ctx, row)? {
			Some(Geometry::LineString(line)) => Ok(Value::Boolean(line.is_closed())),
			Some(Geometry::MultiLineString(multi)) => {
				Ok(Value::Boolean(!multi.lines.is_empty() && multi.lines.iter().all(|l| l.is_closed())))
			}
			_ => Ok(Value::Null),
		}
	}

	fn r#type(&self) -> Type {
		Type::Boolean
	}

	fn is_nullable(&self) -> bool {
		true
	}

	fn children(&self) -> Vec<&dyn Expression> {
		vec![self.arg.as_ref()]
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Self::ARITY.check_children(self.function_name(), children.len())?;
		Ok(Box::new(Self::new(children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for IsClosed {
	fn function_name(&self) -> &'static str {
		"ST_IsClosed"
	}

	fn description(&self) -> &'static str {
		"Returns whether a linestring or every member of a multilinestring is closed."
	}
}

impl Display for IsClosed {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ST_ISCLOSED({})", self.arg)
	}
}
