// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod dialect;
pub mod error;
mod expression;
mod render;
mod token;

pub use bach_type::{Error, Result};
pub use dialect::{Dialect, DialectFamily};
pub use error::{DialectError, ExpressionError};
pub use expression::{Expression, ExpressionKind};
pub use token::Token;
