// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use tessera_type::{Result, Row, Type, Value};

use crate::{
	Arity, Context,
	context::WARN_TRUNCATED_WRONG_VALUE,
	expression::{BoxedExpression, Expression, Function},
};

/// Component extracted by a [`DatePart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
	Year,
	Month,
	Day,
	Hour,
	Minute,
	Second,
}

impl DateUnit {
	fn function_name(self) -> &'static str {
		match self {
			DateUnit::Year => "YEAR",
			DateUnit::Month => "MONTH",
			DateUnit::Day => "DAY",
			DateUnit::Hour => "HOUR",
			DateUnit::Minute => "MINUTE",
			DateUnit::Second => "SECOND",
		}
	}

	fn extract(self, dt: &DateTimeParts) -> i64 {
		match self {
			DateUnit::Year => dt.year,
			DateUnit::Month => dt.month,
			DateUnit::Day => dt.day,
			DateUnit::Hour => dt.hour,
			DateUnit::Minute => dt.minute,
			DateUnit::Second => dt.second,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateTimeParts {
	year: i64,
	month: i64,
	day: i64,
	hour: i64,
	minute: i64,
	second: i64,
}

/// Parses `YYYY-MM-DD[( |T)HH:MM:SS[.ffffff]]`.
fn parse_datetime(text: &str) -> Option<DateTimeParts> {
	let text = text.trim();
	let (date, time) = match text.find([' ', 'T']) {
		Some(i) => (&text[..i], Some(text[i + 1..].trim_start())),
		None => (text, None),
	};

	let [year, month, day] = fields::<3>(date, '-')?;
	if year.len != 4 || !(1..=12).contains(&month.value) {
		return None;
	}
	if day.value < 1 || day.value > days_in_month(year.value, month.value) {
		return None;
	}

	let (hour, minute, second) = match time {
		None => (0, 0, 0),
		Some(time) => {
			let (hms, fraction) = match time.split_once('.') {
				Some((hms, fraction)) => (hms, Some(fraction)),
				None => (time, None),
			};
			if let Some(fraction) = fraction {
				if fraction.is_empty() || fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
					return None;
				}
			}
			let [h, m, s] = fields::<3>(hms, ':')?;
			if h.value > 23 || m.value > 59 || s.value > 59 {
				return None;
			}
			(h.value, m.value, s.value)
		}
	};

	Some(DateTimeParts {
		year: year.value,
		month: month.value,
		day: day.value,
		hour,
		minute,
		second,
	})
}

struct Field {
	value: i64,
	len: usize,
}

fn fields<const N: usize>(text: &str, separator: char) -> Option<[Field; N]> {
	let parts: Vec<Field> = text
		.split(separator)
		.map(|part| {
			if part.is_empty() || part.len() > 4 || !part.bytes().all(|b| b.is_ascii_digit()) {
				return None;
			}
			Some(Field {
				value: part.parse().ok()?,
				len: part.len(),
			})
		})
		.collect::<Option<_>>()?;
	parts.try_into().ok()
}

fn days_in_month(year: i64, month: i64) -> i64 {
	match month {
		2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
		2 => 28,
		4 | 6 | 9 | 11 => 30,
		_ => 31,
	}
}

/// `YEAR`, `MONTH`, `DAY` (`DAYOFMONTH`), `HOUR`, `MINUTE` and `SECOND` over
/// datetime text. Unparseable input raises warning 1292 and yields NULL.
#[derive(Debug, Clone)]
pub struct DatePart {
	unit: DateUnit,
	name: &'static str,
	arg: BoxedExpression,
}

impl DatePart {
	const ARITY: Arity = Arity::Exact(1);

	pub fn new(unit: DateUnit, args: Vec<BoxedExpression>) -> Result<Self> {
		Self::named(unit, unit.function_name(), args)
	}

	/// `DAYOFMONTH`, identical to `DAY` apart from its name.
	pub fn day_of_month(args: Vec<BoxedExpression>) -> Result<Self> {
		Self::named(DateUnit::Day, "DAYOFMONTH", args)
	}

	fn named(unit: DateUnit, name: &'static str, mut args: Vec<BoxedExpression>) -> Result<Self> {
		Self::ARITY.check(name, args.len())?;
		Ok(Self {
			unit,
			name,
			arg: args.remove(0),
		})
	}
}

impl Expression for DatePart {
	fn eval(&self, ctx: &Context, row: &Row) -> Result<Value> {
		let Some(text) = self.arg.eval(ctx, row)?.as_text() else {
			return Ok(Value::Null);
		};

		match parse_datetime(&text) {
			Some(dt) => Ok(Value::Int8(self.unit.extract(&dt))),
			None => {
				ctx.warn(WARN_TRUNCATED_WRONG_VALUE, format!("Truncated incorrect datetime value: '{}'", text));
				Ok(Value::Null)
			}
		}
	}

	fn r#type(&self) -> Type {
		Type::Int8
	}

	fn is_nullable(&self) -> bool {
		true
	}

	fn children(&self) -> Vec<&dyn Expression> {
		vec![self.arg.as_ref()]
	}

	fn with_children(&self, children: Vec<BoxedExpression>) -> Result<BoxedExpression> {
		Self::ARITY.check_children(self.name, children.len())?;
		Ok(Box::new(Self::named(self.unit, self.name, children)?))
	}

	fn clone_boxed(&self) -> BoxedExpression {
		Box::new(self.clone())
	}
}

impl Function for DatePart {
	fn function_name(&self) -> &'static str {
		self.name
	}

	fn description(&self) -> &'static str {
		match self.unit {
			DateUnit::Year => "Returns the year of a date.",
			DateUnit::Month => "Returns the month of a date, 1 to 12.",
			DateUnit::Day => "Returns the day of the month, 1 to 31.",
			DateUnit::Hour => "Returns the hour of a datetime.",
			DateUnit::Minute => "Returns the minute of a datetime.",
			DateUnit::Second => "Returns the second of a datetime.",
		}
	}
}

impl Display for DatePart {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}({})", self.name, self.arg)
	}
}
