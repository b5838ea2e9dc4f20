// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

pub mod concat;
pub mod concat_ws;

pub use concat::TextConcat;
pub use concat_ws::TextConcatWs;
