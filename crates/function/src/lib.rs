// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

pub mod arity;
pub mod config;
pub mod context;
pub mod datetime;
pub mod error;
pub mod expression;
pub mod inet;
pub mod math;
pub mod registry;
pub mod spatial;
pub mod text;

pub use arity::Arity;
pub use config::{FunctionConfig, SpatialConfig};
pub use context::{Context, Warning};
pub use error::FunctionError;
pub use expression::{BoxedExpression, Expression, Function, GetField, Literal};
pub use registry::Functions;
