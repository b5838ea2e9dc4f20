// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tessera_type::Result;
use tracing::debug;

use crate::{
	BoxedExpression, Expression, FunctionError,
	datetime::{DatePart, DateUnit},
	inet::{InetConversion, InetConvert, IpClass, IpPredicate},
	math::{AngleConversion, Sign},
	spatial::{
		AsWkt, Endpoint, GeodeticCoordinate, GeomCollFromText, GeomFromText, IsClosed, LineFromText,
		LineStringConstructor, MLineFromText, MPointFromText, MPolyFromText, MultiLineStringConstructor,
		MultiPointConstructor, PointConstructor, PointCoordinate, PointFromText, PolyFromText, PolygonConstructor,
		StSrid,
	},
	text::{TextConcat, TextConcatWs},
};

type Builder = Box<dyn Fn(Vec<BoxedExpression>) -> Result<BoxedExpression> + Send + Sync>;

static BUILTIN: Lazy<Functions> = Lazy::new(Functions::builtin);

/// Maps lower-case SQL function names to node constructors.
pub struct Functions {
	scalars: IndexMap<String, Builder>,
}

impl Functions {
	pub fn new() -> Self {
		Self {
			scalars: IndexMap::new(),
		}
	}

	/// Shared registry of every built-in function.
	pub fn global() -> &'static Functions {
		&BUILTIN
	}

	pub fn builtin() -> Self {
		let mut functions = Self::new();

		functions.register_scalar("st_geomfromtext", GeomFromText::new);
		functions.register_scalar("st_geometryfromtext", GeomFromText::new);
		functions.register_scalar("st_pointfromtext", PointFromText::new);
		functions.register_scalar("st_linefromtext", LineFromText::new);
		functions.register_scalar("st_linestringfromtext", LineFromText::new);
		functions.register_scalar("st_polyfromtext", PolyFromText::new);
		functions.register_scalar("st_polygonfromtext", PolyFromText::new);
		functions.register_scalar("st_mpointfromtext", MPointFromText::new);
		functions.register_scalar("st_multipointfromtext", MPointFromText::new);
		functions.register_scalar("st_mlinefromtext", MLineFromText::new);
		functions.register_scalar("st_multilinestringfromtext", MLineFromText::new);
		functions.register_scalar("st_mpolyfromtext", MPolyFromText::new);
		functions.register_scalar("st_multipolygonfromtext", MPolyFromText::new);
		functions.register_scalar("st_geomcollfromtext", GeomCollFromText::new);
		functions.register_scalar("st_geometrycollectionfromtext", GeomCollFromText::new);
		functions.register_scalar("st_geomcollfromtxt", GeomCollFromText::new);
		functions.register_scalar("st_aswkt", AsWkt::new);
		functions.register_scalar("st_astext", AsWkt::as_text);

		functions.register_scalar("point", PointConstructor::new);
		functions.register_scalar("linestring", LineStringConstructor::new);
		functions.register_scalar("polygon", PolygonConstructor::new);
		functions.register_scalar("multipoint", MultiPointConstructor::new);
		functions.register_scalar("multilinestring", MultiLineStringConstructor::new);

		functions.register_scalar("st_srid", StSrid::new);
		functions.register_scalar("st_x", PointCoordinate::x);
		functions.register_scalar("st_y", PointCoordinate::y);
		functions.register_scalar("st_latitude", GeodeticCoordinate::latitude);
		functions.register_scalar("st_longitude", GeodeticCoordinate::longitude);
		functions.register_scalar("st_startpoint", Endpoint::start);
		functions.register_scalar("st_endpoint", Endpoint::end);
		functions.register_scalar("st_isclosed", IsClosed::new);

		functions.register_scalar("concat", TextConcat::new);
		functions.register_scalar("concat_ws", TextConcatWs::new);

		functions.register_scalar("sign", Sign::new);
		functions.register_scalar("degrees", AngleConversion::degrees);
		functions.register_scalar("radians", AngleConversion::radians);

		functions.register_scalar("is_ipv4", |args| IpPredicate::new(IpClass::V4, args));
		functions.register_scalar("is_ipv6", |args| IpPredicate::new(IpClass::V6, args));
		functions.register_scalar("is_ipv4_compat", |args| IpPredicate::new(IpClass::V4Compat, args));
		functions.register_scalar("is_ipv4_mapped", |args| IpPredicate::new(IpClass::V4Mapped, args));
		functions.register_scalar("inet_aton", |args| InetConvert::new(InetConversion::Aton, args));
		functions.register_scalar("inet_ntoa", |args| InetConvert::new(InetConversion::Ntoa, args));
		functions.register_scalar("inet6_aton", |args| InetConvert::new(InetConversion::Aton6, args));
		functions.register_scalar("inet6_ntoa", |args| InetConvert::new(InetConversion::Ntoa6, args));

		functions.register_scalar("year", |args| DatePart::new(DateUnit::Year, args));
		functions.register_scalar("month", |args| DatePart::new(DateUnit::Month, args));
		functions.register_scalar("day", |args| DatePart::new(DateUnit::Day, args));
		functions.register_scalar("dayofmonth", DatePart::day_of_month);
		functions.register_scalar("hour", |args| DatePart::new(DateUnit::Hour, args));
		functions.register_scalar("minute", |args| DatePart::new(DateUnit::Minute, args));
		functions.register_scalar("second", |args| DatePart::new(DateUnit::Second, args));

		debug!(count = functions.scalars.len(), "registered builtin functions");
		functions
	}

	pub fn register_scalar<F, E>(&mut self, name: &str, init: F)
	where
		F: Fn(Vec<BoxedExpression>) -> Result<E> + Send + Sync + 'static,
		E: Expression + 'static,
	{
		self.scalars.insert(
			name.to_lowercase(),
			Box::new(move |args| init(args).map(|e| Box::new(e) as BoxedExpression)),
		);
	}

	pub fn contains(&self, name: &str) -> bool {
		self.scalars.contains_key(&name.to_lowercase())
	}

	/// Registered names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.scalars.keys().map(String::as_str)
	}

	/// Builds the node for `name`, matched case-insensitively.
	pub fn build(&self, name: &str, args: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		let Some(init) = self.scalars.get(&name.to_lowercase()) else {
			return Err(FunctionError::UnknownFunction {
				name: name.to_string(),
			}
			.into());
		};

		debug!(function = name, arguments = args.len(), "building function");
		init(args)
	}
}

impl Default for Functions {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::{Point, Row, Value};

	use super::*;
	use crate::{
		Context,
		expression::{rebuild, testing::lit},
	};

	fn build(name: &str, args: Vec<BoxedExpression>) -> BoxedExpression {
		Functions::global().build(name, args).unwrap()
	}

	fn eval(expr: &BoxedExpression) -> Value {
		expr.eval(&Context::default(), &Row::empty()).unwrap()
	}

	#[test]
	fn test_case_insensitive_lookup() {
		let f = build("St_PointFromText", vec![lit("POINT(1 2)")]);
		assert_eq!(eval(&f), Value::geometry(Point::new(0, 1.0, 2.0)));
		assert_eq!(f.to_string(), "ST_POINTFROMTEXT('POINT(1 2)')");
	}

	#[test]
	fn test_aliases() {
		let f = build("ST_GEOMETRYFROMTEXT", vec![lit("POINT(1 2)")]);
		assert_eq!(f.to_string(), "ST_GEOMFROMTEXT('POINT(1 2)')");

		let f = build("st_astext", vec![lit(Value::geometry(Point::new(0, 1.0, 2.0)))]);
		assert_eq!(eval(&f), Value::utf8("POINT(1 2)"));
		assert_eq!(f.to_string(), "ST_ASTEXT(POINT(1 2))");

		let f = build("st_geometrycollectionfromtext", vec![lit("GEOMETRYCOLLECTION()")]);
		assert_eq!(f.to_string(), "ST_GEOMCOLLFROMTEXT('GEOMETRYCOLLECTION()')");

		let f = build("dayofmonth", vec![lit("2020-01-31")]);
		assert_eq!(eval(&f), Value::Int8(31));
	}

	#[test]
	fn test_unknown_function() {
		let err = Functions::global().build("st_nope", vec![]).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_001");
		assert_eq!(err.message, "Unknown function: st_nope");
	}

	#[test]
	fn test_arity_error_surfaces() {
		let err = Functions::global().build("concat_ws", vec![lit(",")]).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_002");
	}

	#[test]
	fn test_every_function_rebuilds_identically() {
		let cases: Vec<(&str, Vec<BoxedExpression>)> = vec![
			("st_mpolyfromtext", vec![lit("MULTIPOLYGON(((0 0,0 1,1 1,0 0)))"), lit(4326i64)]),
			("st_srid", vec![lit(Value::geometry(Point::new(0, 1.0, 2.0))), lit(4326i64)]),
			("st_x", vec![lit(Value::geometry(Point::new(0, 1.0, 2.0)))]),
			("st_latitude", vec![lit(Value::geometry(Point::new(4326, 1.0, 2.0))), lit(45i64)]),
			("st_geomcollfromtxt", vec![lit("GEOMETRYCOLLECTION(POINT(1 2))"), lit(4326i64)]),
			("point", vec![lit(1i64), lit(2i64)]),
			("concat", vec![lit("a"), lit("b")]),
			("is_ipv6", vec![lit("::1")]),
			("inet6_ntoa", vec![lit(Value::blob(vec![1, 2, 3, 4]))]),
			("second", vec![lit("2020-01-01 00:00:09")]),
			("degrees", vec![lit(1i64)]),
		];

		for (name, args) in cases {
			let f = build(name, args);
			let rebuilt = rebuild(f.as_ref()).unwrap();
			assert_eq!(rebuilt.to_string(), f.to_string(), "{}", name);
			assert_eq!(eval(&rebuilt), eval(&f), "{}", name);
		}
	}

	#[test]
	fn test_register_custom() {
		let mut functions = Functions::new();
		functions.register_scalar("MyConcat", TextConcat::new);
		assert!(functions.contains("myconcat"));
		assert_eq!(functions.names().collect::<Vec<_>>(), vec!["myconcat"]);
	}

	#[test]
	fn test_builtin_names_are_lowercase() {
		let functions = Functions::builtin();
		assert!(functions.names().all(|n| n == n.to_lowercase()));
		assert!(functions.contains("ST_ISCLOSED"));
	}
}
