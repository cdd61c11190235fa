// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_type::Result;

use crate::{error::ExpressionError, token::Token};

const PLACEHOLDER: &str = "{}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpressionKind {
	#[default]
	Regular,
	/// Evaluates to the same value for every row
	Constant,
	/// Collapses the rows of a group into one value
	AggregateFunction,
	/// Computes over a window without collapsing rows
	WindowFunction,
}

/// An immutable fragment of SQL.
///
/// Two expressions are equal when their fragments and kind are equal, not when
/// they happen to render to the same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Expression {
	tokens: Vec<Token>,
	kind: ExpressionKind,
}

impl Expression {
	pub fn new(tokens: Vec<Token>) -> Self {
		Self {
			tokens,
			kind: ExpressionKind::Regular,
		}
	}

	pub fn empty() -> Self {
		Self::default()
	}

	/// Builds an expression by substituting each `{}` in `template` with the
	/// next expression of `args`. The template text is kept verbatim, the
	/// arguments are embedded as sub-trees and never re-read as template.
	pub fn construct<I>(template: &str, args: I) -> Result<Self>
	where
		I: IntoIterator<Item = Expression>,
	{
		Self::construct_with_kind(ExpressionKind::Regular, template, args)
	}

	pub fn construct_aggregate<I>(template: &str, args: I) -> Result<Self>
	where
		I: IntoIterator<Item = Expression>,
	{
		Self::construct_with_kind(ExpressionKind::AggregateFunction, template, args)
	}

	pub fn construct_window<I>(template: &str, args: I) -> Result<Self>
	where
		I: IntoIterator<Item = Expression>,
	{
		Self::construct_with_kind(ExpressionKind::WindowFunction, template, args)
	}

	fn construct_with_kind<I>(kind: ExpressionKind, template: &str, args: I) -> Result<Self>
	where
		I: IntoIterator<Item = Expression>,
	{
		let args: Vec<Expression> = args.into_iter().collect();
		let parts: Vec<&str> = template.split(PLACEHOLDER).collect();
		let expected = parts.len() - 1;
		if expected != args.len() {
			return Err(ExpressionError::PlaceholderMismatch {
				template: template.to_string(),
				expected,
				actual: args.len(),
			}
			.into());
		}

		let mut tokens = Vec::with_capacity(parts.len() + args.len());
		let mut args = args.into_iter();
		for (idx, part) in parts.iter().enumerate() {
			if !part.is_empty() {
				tokens.push(Token::Raw(part.to_string()));
			}
			if idx < expected {
				if let Some(arg) = args.next() {
					tokens.push(Token::Expression(arg));
				}
			}
		}

		Ok(Self {
			tokens,
			kind,
		})
	}

	/// Raw SQL without placeholders.
	pub fn raw(sql: impl Into<String>) -> Self {
		Self::new(vec![Token::Raw(sql.into())])
	}

	/// Raw SQL that evaluates to the same value for every row, e.g. a number literal.
	pub fn constant(sql: impl Into<String>) -> Self {
		Self {
			tokens: vec![Token::Raw(sql.into())],
			kind: ExpressionKind::Constant,
		}
	}

	pub fn string_value(value: impl Into<String>) -> Self {
		Self {
			tokens: vec![Token::StringValue(value.into())],
			kind: ExpressionKind::Constant,
		}
	}

	pub fn identifier(name: impl Into<String>) -> Self {
		Self::new(vec![Token::Identifier(name.into())])
	}

	pub fn column_reference(name: impl Into<String>) -> Self {
		Self::new(vec![Token::ColumnReference(name.into())])
	}

	/// `{expression} as "name"`
	pub fn construct_expr_as_name(expression: Expression, name: &str) -> Result<Self> {
		Self::construct("{} as {}", [expression, Self::identifier(name)])
	}

	/// Joins `expressions` with `separator`, e.g. `a, b, c`.
	pub fn join<I>(expressions: I, separator: &str) -> Result<Self>
	where
		I: IntoIterator<Item = Expression>,
	{
		let expressions: Vec<Expression> = expressions.into_iter().collect();
		let template = vec![PLACEHOLDER; expressions.len()].join(separator);
		Self::construct(&template, expressions)
	}

	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	pub fn kind(&self) -> ExpressionKind {
		self.kind
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	pub fn is_constant(&self) -> bool {
		match self.kind {
			ExpressionKind::Constant => true,
			ExpressionKind::AggregateFunction | ExpressionKind::WindowFunction => false,
			ExpressionKind::Regular => {
				!self.tokens.is_empty() && self.tokens.iter().all(Token::is_constant)
			}
		}
	}

	pub fn has_aggregate_function(&self) -> bool {
		match self.kind {
			ExpressionKind::AggregateFunction => true,
			// a windowed aggregate keeps every row, it does not aggregate
			ExpressionKind::WindowFunction => false,
			_ => self.tokens.iter().any(Token::has_aggregate_function),
		}
	}

	pub fn has_windowed_aggregate_function(&self) -> bool {
		self.kind == ExpressionKind::WindowFunction
			|| self.tokens.iter().any(Token::has_windowed_aggregate_function)
	}

	/// Names of all column references in this tree, in order of appearance.
	pub fn column_references(&self) -> Vec<&str> {
		let mut result = Vec::new();
		self.collect_column_references(&mut result);
		result
	}

	fn collect_column_references<'a>(&'a self, result: &mut Vec<&'a str>) {
		for token in &self.tokens {
			match token {
				Token::ColumnReference(name) => result.push(name),
				Token::Expression(expression) => expression.collect_column_references(result),
				_ => {}
			}
		}
	}
}
