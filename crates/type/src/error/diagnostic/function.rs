// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

use crate::{error::Diagnostic, value::Type};

/// Function is not recognized or does not exist
pub fn unknown_function(name: &str) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_001".to_string(),
		message: format!("Unknown function: {}", name),
		label: Some("unknown function".to_string()),
		help: Some("Check the function name and available functions".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// Function constructed with a wrong number of arguments
pub fn invalid_argument_number(function: &str, expected: &str, actual: usize) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_002".to_string(),
		message: format!("function '{}' expected {} arguments, {} received", function, expected, actual),
		label: Some("wrong number of arguments".to_string()),
		help: Some(format!("Provide {} arguments to function {}", expected, function)),
		notes: vec![],
		cause: None,
	}
}

/// Expression tree rewrite supplied a wrong number of children
pub fn invalid_children_number(node: &str, actual: usize, expected: usize) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_003".to_string(),
		message: format!("{}: invalid children number, got {}, expected {}", node, actual, expected),
		label: Some("wrong number of children".to_string()),
		help: None,
		notes: vec!["The expression node was rebuilt with a different number of children".to_string()],
		cause: None,
	}
}

/// Argument has invalid type for function
pub fn invalid_argument_type(function: &str, index: usize, expected_one_of: &[Type], actual: Type) -> Diagnostic {
	let expected_types = expected_one_of.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ");

	Diagnostic {
		code: "FUNCTION_004".to_string(),
		message: format!(
			"Function {} argument {} has invalid type: expected one of [{}], got {}",
			function,
			index + 1,
			expected_types,
			actual
		),
		label: Some("invalid argument type".to_string()),
		help: Some(format!("Provide an argument of type: {}", expected_types)),
		notes: vec![],
		cause: None,
	}
}

/// Argument value is not acceptable for the function
pub fn invalid_argument(function: &str) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_005".to_string(),
		message: format!("Incorrect arguments to {}", function),
		label: Some("invalid argument".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// Column reference points past the end of the row
pub fn field_out_of_range(name: &str, index: usize, width: usize) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_006".to_string(),
		message: format!("field {} at index {} is out of range for a row of {} values", name, index, width),
		label: Some("field out of range".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}
