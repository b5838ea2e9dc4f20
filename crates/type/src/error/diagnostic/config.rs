// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

use crate::error::Diagnostic;

/// Configuration document could not be deserialized
pub fn invalid_config(reason: String) -> Diagnostic {
	Diagnostic {
		code: "CONFIG_001".to_string(),
		message: format!("Invalid configuration: {}", reason),
		label: None,
		help: Some("Check the configuration document against the documented fields".to_string()),
		notes: vec![],
		cause: None,
	}
}
