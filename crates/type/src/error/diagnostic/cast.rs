// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

use crate::error::Diagnostic;

/// Value cannot be converted to the requested type
pub fn invalid_conversion(value: &str, target: &str) -> Diagnostic {
	Diagnostic {
		code: "CAST_001".to_string(),
		message: format!("Cannot convert '{}' to {}", value, target),
		label: Some("invalid conversion".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}
