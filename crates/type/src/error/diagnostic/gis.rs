// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

use crate::error::Diagnostic;

/// Geometry text or value could not be interpreted by a spatial function
pub fn invalid_gis_data(function: &str) -> Diagnostic {
	Diagnostic {
		code: "GIS_001".to_string(),
		message: format!("invalid GIS data provided to function {}", function),
		label: Some("invalid geometry".to_string()),
		help: Some("Check that the geometry is well formed, e.g. POINT(1 2) or POLYGON((0 0, 1 1, 1 0, 0 0))"
			.to_string()),
		notes: vec![],
		cause: None,
	}
}

/// SRID is not one of the supported spatial reference systems
pub fn invalid_srid(srid: u32) -> Diagnostic {
	Diagnostic {
		code: "GIS_002".to_string(),
		message: format!("There's no spatial reference system with SRID {}.", srid),
		label: Some("unsupported SRID".to_string()),
		help: Some("Use SRID 0 for cartesian coordinates or 4326 for WGS 84".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// Low level WKT parse failure, attached as cause of [`invalid_gis_data`]
pub fn malformed_wkt(reason: String) -> Diagnostic {
	Diagnostic {
		code: "GIS_003".to_string(),
		message: format!("malformed WKT: {}", reason),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// Geographic coordinate outside the range its axis allows
pub fn coordinate_out_of_range(axis: &str, value: f64, function: &str, min: f64, max: f64) -> Diagnostic {
	Diagnostic {
		code: "GIS_004".to_string(),
		message: format!(
			"{} {:.6} is out of range in function {}. It must be within [{:.6}, {:.6}].",
			axis, value, function, min, max
		),
		label: Some("coordinate out of range".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// Function only defined for geographic spatial reference systems
pub fn not_geographic(function: &str, srid: u32) -> Diagnostic {
	Diagnostic {
		code: "GIS_005".to_string(),
		message: format!(
			"Function {} is only defined for geographic spatial reference systems, but SRID {} is not.",
			function, srid
		),
		label: Some("cartesian SRID".to_string()),
		help: Some("Set a geographic SRID such as 4326 with ST_SRID first".to_string()),
		notes: vec![],
		cause: None,
	}
}
