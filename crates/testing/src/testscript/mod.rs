// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

//! Golden scripts: blocks of commands followed by `---` and the output they
//! produced. Running a script regenerates every output section and compares
//! the file with its checked-in version.
//!
//! ```text
//! # comments are kept verbatim
//! parse "POINT(1 2)"
//! !parse "POINT(1)"
//! ---
//! Point srid=0 POINT(1 2)
//! Error: GIS_003: malformed WKT: expected 2 coordinates, found 1
//! ```
//!
//! A command prefixed with `!` is expected to fail; its error becomes the
//! output. Set `UPDATE_GOLDENFILES=1` to rewrite the files in place.

mod command;
mod parser;
mod runner;

pub use command::{Argument, Block, Command};
pub use parser::ParseError;
pub use runner::{Runner, generate, run_path};
