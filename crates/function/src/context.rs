// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use parking_lot::Mutex;
use tracing::debug;

use crate::FunctionConfig;

/// `Incorrect string value` raised by the INET conversions.
pub const WARN_INCORRECT_STRING_VALUE: u16 = 1411;
/// `Truncated incorrect value` raised by the date part extractors.
pub const WARN_TRUNCATED_WRONG_VALUE: u16 = 1292;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
	pub code: u16,
	pub message: String,
}

/// Per query evaluation state. Only the warning list is mutable.
#[derive(Debug, Default)]
pub struct Context {
	config: FunctionConfig,
	warnings: Mutex<Vec<Warning>>,
}

impl Context {
	pub fn new(config: FunctionConfig) -> Self {
		Self {
			config,
			warnings: Mutex::new(Vec::new()),
		}
	}

	pub fn config(&self) -> &FunctionConfig {
		&self.config
	}

	pub fn warn(&self, code: u16, message: impl Into<String>) {
		let message = message.into();
		debug!(code, message = %message, "function warning");
		self.warnings.lock().push(Warning {
			code,
			message,
		});
	}

	pub fn warnings(&self) -> Vec<Warning> {
		self.warnings.lock().clone()
	}

	pub fn take_warnings(&self) -> Vec<Warning> {
		std::mem::take(&mut *self.warnings.lock())
	}
}
