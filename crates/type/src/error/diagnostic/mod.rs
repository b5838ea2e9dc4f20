// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera

pub mod cast;
pub mod config;
pub mod function;
pub mod gis;
