// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

pub mod classify;
pub mod convert;

pub use classify::{IpClass, IpPredicate};
pub use convert::{InetConversion, InetConvert};
