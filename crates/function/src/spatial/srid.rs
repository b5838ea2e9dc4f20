// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{Result, Row, Type, Value};

use crate::{Context, Expression, FunctionError, SpatialConfig};

/// Coordinate order of WKT text, given as `axis-order=<order>` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
	LongLat,
	LatLong,
	/// Whatever the SRID prescribes: lat-long for geographic SRIDs.
	SridDefined,
}

impl AxisOrder {
	/// Parses `axis-order=long-lat|lat-long|srid-defined`, ignoring case and
	/// surrounding whitespace.
	pub fn parse(function: &str, text: &str) -> Result<Self> {
		let normalized = text.trim().to_lowercase();
		let order = match normalized.strip_prefix("axis-order=") {
			Some("long-lat") => AxisOrder::LongLat,
			Some("lat-long") => AxisOrder::LatLong,
			Some("srid-defined") => AxisOrder::SridDefined,
			_ => return Err(FunctionError::invalid_argument(function).into()),
		};
		Ok(order)
	}

	/// Whether text in this order must be swapped to reach storage order for
	/// an SRID. Storage is always x = longitude, so only lat-long text on a
	/// geographic SRID swaps.
	pub fn swaps(self, geographic: bool) -> bool {
		geographic && self != AxisOrder::LongLat
	}
}

impl Display for AxisOrder {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			AxisOrder::LongLat => f.write_str("axis-order=long-lat"),
			AxisOrder::LatLong => f.write_str("axis-order=lat-long"),
			AxisOrder::SridDefined => f.write_str("axis-order=srid-defined"),
		}
	}
}

pub fn validate_srid(config: &SpatialConfig, srid: u32) -> Result<u32> {
	if config.is_supported(srid) {
		Ok(srid)
	} else {
		Err(FunctionError::InvalidSrid {
			srid,
		}
		.into())
	}
}

/// Evaluates an SRID argument; `None` when it is NULL.
pub(crate) fn eval_srid(expr: &dyn Expression, ctx: &Context, row: &Row) -> Result<Option<u32>> {
	match Type::Uint4.convert(&expr.eval(ctx, row)?)? {
		Value::Uint4(srid) => validate_srid(&ctx.config().spatial, srid).map(Some),
		_ => Ok(None),
	}
}

/// Evaluates an axis order argument; `None` when it is NULL.
pub(crate) fn eval_axis_order(
	function: &str,
	expr: &dyn Expression,
	ctx: &Context,
	row: &Row,
) -> Result<Option<AxisOrder>> {
	match expr.eval(ctx, row)?.as_text() {
		Some(text) => AxisOrder::parse(function, &text).map(Some),
		None => Ok(None),
	}
}
