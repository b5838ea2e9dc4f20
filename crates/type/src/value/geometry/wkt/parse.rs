// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

use super::{WktError, parse_kind};
use crate::value::geometry::{
	GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

type Result<T> = std::result::Result<T, WktError>;

/// Splits `POINT (1 2)` into the lower-case tag `point` and the body `1 2`
/// with the outer parentheses and surrounding whitespace removed.
pub fn parse_header(s: &str) -> Result<(String, &str)> {
	let Some(open) = s.find('(') else {
		return Err(WktError::MissingParenthesis);
	};

	let tag = s[..open].trim().to_lowercase();
	let rest = s[open..].trim();
	if !rest.ends_with(')') {
		return Err(WktError::Unbalanced);
	}

	Ok((tag, rest[1..rest.len() - 1].trim()))
}

pub fn parse_point(body: &str, srid: u32, swap: bool) -> Result<Point> {
	let tokens: Vec<&str> = body.split_whitespace().collect();
	if tokens.len() != 2 {
		return Err(WktError::TokenCount(tokens.len()));
	}

	let x = parse_coordinate(tokens[0])?;
	let y = parse_coordinate(tokens[1])?;
	let point = Point::new(srid, x, y);

	Ok(if swap {
		point.swap_axes()
	} else {
		point
	})
}

pub fn parse_line_string(body: &str, srid: u32, swap: bool) -> Result<LineString> {
	if body.trim().is_empty() {
		return Err(WktError::Empty);
	}

	let points = body.split(',').map(|p| parse_point(p, srid, swap)).collect::<Result<Vec<_>>>()?;
	if points.len() < 2 {
		return Err(WktError::TooFewPoints {
			what: "linestring",
			min: 2,
		});
	}

	Ok(LineString::new(srid, points))
}

pub fn parse_polygon(body: &str, srid: u32, swap: bool) -> Result<Polygon> {
	let mut lines = Vec::new();
	for group in split_groups(body)? {
		let line = parse_line_string(group, srid, swap)?;
		if !line.is_closed() {
			return Err(WktError::OpenRing);
		}
		if !line.is_linear_ring() {
			return Err(WktError::TooFewPoints {
				what: "polygon ring",
				min: 4,
			});
		}
		lines.push(line);
	}

	Ok(Polygon::new(srid, lines))
}

/// Members may be bare (`1 2, 3 4`) or parenthesized (`(1 2), (3 4)`).
pub fn parse_multi_point(body: &str, srid: u32, swap: bool) -> Result<MultiPoint> {
	if body.trim().is_empty() {
		return Err(WktError::Empty);
	}

	let mut points = Vec::new();
	for member in body.split(',') {
		let member = member.trim();
		let member = match (member.starts_with('('), member.ends_with(')')) {
			(true, true) => &member[1..member.len() - 1],
			(false, false) => member,
			_ => return Err(WktError::Unbalanced),
		};
		points.push(parse_point(member, srid, swap)?);
	}

	Ok(MultiPoint::new(srid, points))
}

pub fn parse_multi_line_string(body: &str, srid: u32, swap: bool) -> Result<MultiLineString> {
	let lines =
		split_groups(body)?.into_iter().map(|g| parse_line_string(g, srid, swap)).collect::<Result<Vec<_>>>()?;

	Ok(MultiLineString::new(srid, lines))
}

pub fn parse_multi_polygon(body: &str, srid: u32, swap: bool) -> Result<MultiPolygon> {
	let polygons =
		split_groups(body)?.into_iter().map(|g| parse_polygon(g, srid, swap)).collect::<Result<Vec<_>>>()?;

	Ok(MultiPolygon::new(srid, polygons))
}

/// Members are complete WKT items, nested collections included. An empty
/// body is an empty collection.
pub fn parse_geometry_collection(body: &str, srid: u32, swap: bool) -> Result<GeometryCollection> {
	if body.trim().is_empty() {
		return Ok(GeometryCollection::new(srid, Vec::new()));
	}

	let geometries = split_members(body)?
		.into_iter()
		.map(|member| parse_kind(member, None, srid, swap))
		.collect::<Result<Vec<_>>>()?;

	Ok(GeometryCollection::new(srid, geometries))
}

fn parse_coordinate(token: &str) -> Result<f64> {
	match token.parse::<f64>() {
		Ok(v) if v.is_finite() => Ok(v),
		_ => Err(WktError::InvalidCoordinate(token.to_string())),
	}
}

/// Splits `(a), (b), (c)` into the inner texts `a`, `b` and `c`.
fn split_groups(body: &str) -> Result<Vec<&str>> {
	let mut rest = body.trim();
	if rest.is_empty() {
		return Err(WktError::Empty);
	}

	let mut groups = Vec::new();
	loop {
		if !rest.starts_with('(') {
			return Err(WktError::MissingParenthesis);
		}

		let (inner, after) = next_group(rest)?;
		groups.push(inner.trim());

		let after = after.trim_start();
		if after.is_empty() {
			return Ok(groups);
		}

		let Some(next) = after.strip_prefix(',') else {
			return Err(WktError::UnexpectedToken(after.chars().take(16).collect()));
		};
		rest = next.trim_start();
	}
}

/// Splits at the commas outside any parentheses.
fn split_members(body: &str) -> Result<Vec<&str>> {
	let mut members = Vec::new();
	let mut depth = 0usize;
	let mut start = 0;
	for (i, b) in body.bytes().enumerate() {
		match b {
			b'(' => depth += 1,
			b')' => depth = depth.checked_sub(1).ok_or(WktError::Unbalanced)?,
			b',' if depth == 0 => {
				members.push(body[start..i].trim());
				start = i + 1;
			}
			_ => {}
		}
	}
	if depth != 0 {
		return Err(WktError::Unbalanced);
	}
	members.push(body[start..].trim());

	if members.iter().any(|m| m.is_empty()) {
		return Err(WktError::Empty);
	}
	Ok(members)
}

/// `s` starts with `(`; returns the text up to the matching `)` and what follows it.
fn next_group(s: &str) -> Result<(&str, &str)> {
	let mut depth = 0usize;
	for (i, b) in s.bytes().enumerate() {
		match b {
			b'(' => depth += 1,
			b')' => {
				depth = depth.checked_sub(1).ok_or(WktError::Unbalanced)?;
				if depth == 0 {
					return Ok((&s[1..i], &s[i + 1..]));
				}
			}
			_ => {}
		}
	}

	Err(WktError::Unbalanced)
}
