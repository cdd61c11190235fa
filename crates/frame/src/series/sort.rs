// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_expression::Expression;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortColumn {
	pub expression: Expression,
	pub asc: bool,
}

impl SortColumn {
	pub fn new(expression: Expression, asc: bool) -> Self {
		Self {
			expression,
			asc,
		}
	}

	pub fn asc(expression: Expression) -> Self {
		Self::new(expression, true)
	}

	pub fn desc(expression: Expression) -> Self {
		Self::new(expression, false)
	}

	pub(crate) fn template(&self) -> &'static str {
		if self.asc { "{} asc" } else { "{} desc" }
	}
}
