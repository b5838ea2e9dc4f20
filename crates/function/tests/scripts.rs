// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::{collections::HashMap, error::Error, fmt::Write as _, path::Path};

use tessera_function::{BoxedExpression, Context, FunctionConfig, Functions, Literal};
use tessera_testing::testscript::{self, Command};
use tessera_type::{
	GeometryKind, IntoDiagnostic, Row, Value,
	value::geometry::wkt::{self, WktError},
};
use test_each_file::test_each_path;

/// Drives the WKT codec and the function registry from golden scripts.
///
/// * `parse [srid=N] [swap=true] [kind=K] WKT` prints kind, SRID and the
///   re-encoded text in storage order.
/// * `header WKT` prints the tag and body.
/// * `config json=...` replaces the evaluation context.
/// * `call [as=NAME] FUNCTION ARG...` evaluates a function. Arguments are
///   `text=`, `int=`, `uint=`, `float=`, `geom=` (WKT, SRID 0), `blob=`
///   (hex), `var=` (an earlier `as=` result) or a bare `null`. Warnings are
///   printed after the value.
struct Runner {
	ctx: Context,
	vars: HashMap<String, Value>,
}

impl Runner {
	fn new() -> Self {
		Self {
			ctx: Context::default(),
			vars: HashMap::new(),
		}
	}

	fn parse(&self, command: &Command) -> Result<String, Box<dyn Error>> {
		command.reject_unknown(&["srid", "swap", "kind"])?;
		let text = single_positional(command)?;
		let srid = command.get("srid").map(|a| a.parse::<u32>()).transpose()?.unwrap_or(0);
		let swap = command.get("swap").map(|a| a.parse::<bool>()).transpose()?.unwrap_or(false);
		let kind = match command.get("kind") {
			Some(arg) => Some(
				GeometryKind::ALL
					.into_iter()
					.find(|k| k.tag() == arg.value)
					.ok_or_else(|| format!("unknown kind {}", arg.value))?,
			),
			None => None,
		};

		let geometry = wkt::parse_kind(text, kind, srid, swap).map_err(diagnostic)?;
		Ok(format!("{} srid={} {}", geometry.kind(), geometry.srid(), geometry))
	}

	fn header(&self, command: &Command) -> Result<String, Box<dyn Error>> {
		command.reject_unknown(&[])?;
		let (tag, body) = wkt::parse_header(single_positional(command)?).map_err(diagnostic)?;
		Ok(format!("{}: {}", tag, body))
	}

	fn call(&mut self, command: &Command) -> Result<String, Box<dyn Error>> {
		let mut name = None;
		let mut target = None;
		let mut args: Vec<BoxedExpression> = Vec::new();

		for arg in &command.args {
			let value = match (arg.key.as_deref(), arg.value.as_str()) {
				(None, "null") if name.is_some() => Value::Null,
				(None, function) if name.is_none() => {
					name = Some(function);
					continue;
				}
				(Some("as"), var) => {
					target = Some(var.to_string());
					continue;
				}
				(Some("text"), text) => Value::utf8(text),
				(Some("int"), _) => Value::Int8(arg.parse()?),
				(Some("uint"), _) => Value::Uint8(arg.parse()?),
				(Some("float"), _) => Value::Float8(arg.parse()?),
				(Some("geom"), text) => Value::Geometry(wkt::parse(text, 0, false).map_err(diagnostic)?),
				(Some("blob"), hex) => Value::Blob(decode_hex(hex)?),
				(Some("var"), var) => self.vars.get(var).cloned().ok_or_else(|| format!("unknown variable {}", var))?,
				(key, value) => return Err(format!("invalid argument {:?}={}", key, value).into()),
			};
			args.push(Box::new(Literal::new(value)));
		}

		let name = name.ok_or("missing function name")?;
		let function = Functions::global().build(name, args)?;
		let value = function.eval(&self.ctx, &Row::empty())?;

		let mut output = value.to_string();
		for warning in self.ctx.take_warnings() {
			write!(output, "\nwarning {}: {}", warning.code, warning.message)?;
		}
		if let Some(target) = target {
			self.vars.insert(target, value);
		}
		Ok(output)
	}

	fn config(&mut self, command: &Command) -> Result<String, Box<dyn Error>> {
		command.reject_unknown(&["json"])?;
		let json = command.get("json").ok_or("missing json")?;
		self.ctx = Context::new(FunctionConfig::from_json(&json.value)?);
		Ok(String::new())
	}
}

impl testscript::Runner for Runner {
	fn run(&mut self, command: &Command) -> Result<String, Box<dyn Error>> {
		match command.name.as_str() {
			"parse" => self.parse(command),
			"header" => self.header(command),
			"call" => self.call(command),
			"config" => self.config(command),
			name => Err(format!("invalid command {name}").into()),
		}
	}

	fn start_script(&mut self) -> Result<(), Box<dyn Error>> {
		tessera_testing::init_tracing();
		Ok(())
	}
}

fn single_positional(command: &Command) -> Result<&str, Box<dyn Error>> {
	let mut positional = command.positional();
	match (positional.next(), positional.next()) {
		(Some(arg), None) => Ok(arg.value.as_str()),
		_ => Err(format!("{} takes exactly one positional argument", command.name).into()),
	}
}

fn diagnostic(err: WktError) -> tessera_type::Error {
	tessera_type::Error(err.into_diagnostic())
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, Box<dyn Error>> {
	if hex.len() % 2 != 0 {
		return Err(format!("odd length hex '{}'", hex).into());
	}
	let bytes = (0..hex.len()).step_by(2).map(|i| u8::from_str_radix(&hex[i..i + 2], 16)).collect::<Result<Vec<u8>, _>>()?;
	Ok(bytes)
}

test_each_path! { in "crates/function/tests/scripts/wkt" as wkt_scripts => test_script }
test_each_path! { in "crates/function/tests/scripts/call" as call_scripts => test_script }

fn test_script(path: &Path) {
	testscript::run_path(&mut Runner::new(), path).expect("test failed")
}
