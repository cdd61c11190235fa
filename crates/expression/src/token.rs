// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::Expression;

/// A single fragment of an [`Expression`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
	/// SQL text taken verbatim from a template
	Raw(String),
	/// A field of the base node, rendered as a quoted identifier
	ColumnReference(String),
	/// Any other identifier, rendered quoted
	Identifier(String),
	/// A string literal, rendered quoted and escaped
	StringValue(String),
	Expression(Expression),
}

impl Token {
	pub fn is_constant(&self) -> bool {
		match self {
			Token::Raw(_) | Token::StringValue(_) => true,
			Token::ColumnReference(_) | Token::Identifier(_) => false,
			Token::Expression(expression) => expression.is_constant(),
		}
	}

	pub fn has_aggregate_function(&self) -> bool {
		match self {
			Token::Expression(expression) => expression.has_aggregate_function(),
			_ => false,
		}
	}

	pub fn has_windowed_aggregate_function(&self) -> bool {
		match self {
			Token::Expression(expression) => expression.has_windowed_aggregate_function(),
			_ => false,
		}
	}
}
