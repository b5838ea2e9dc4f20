// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use serde::{Deserialize, Serialize};
use tessera_type::{
	CARTESIAN_SRID, Error, GEOSPATIAL_SRID, Result, WEB_MERCATOR_SRID, error::diagnostic::config,
};

/// Settings read by function evaluation, carried by the [`Context`](crate::Context).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionConfig {
	pub spatial: SpatialConfig,
}

impl FunctionConfig {
	pub fn from_json(json: &str) -> Result<Self> {
		serde_json::from_str(json).map_err(|e| Error(config::invalid_config(e.to_string())))
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
	/// SRIDs accepted by SRID arguments.
	pub supported_srids: Vec<u32>,
	/// SRIDs whose WKT is written latitude first.
	pub geographic_srids: Vec<u32>,
}

impl SpatialConfig {
	pub fn is_supported(&self, srid: u32) -> bool {
		self.supported_srids.contains(&srid)
	}

	pub fn is_geographic(&self, srid: u32) -> bool {
		self.geographic_srids.contains(&srid)
	}
}

impl Default for SpatialConfig {
	fn default() -> Self {
		Self {
			supported_srids: vec![CARTESIAN_SRID, WEB_MERCATOR_SRID, GEOSPATIAL_SRID],
			geographic_srids: vec![GEOSPATIAL_SRID],
		}
	}
}
