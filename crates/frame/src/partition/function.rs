// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use bach_expression::{Dialect, DialectFamily, Expression};
use bach_type::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowFunctionFamily {
	/// Looks at specific other rows of the frame
	Navigation,
	/// Depends on the position of the row only
	Numbering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowFunction {
	FirstValue,
	LastValue,
	NthValue,
	Lead,
	Lag,
	Rank,
	DenseRank,
	PercentRank,
	CumeDist,
	Ntile,
	RowNumber,
}

impl WindowFunction {
	pub const ALL: [WindowFunction; 11] = [
		WindowFunction::FirstValue,
		WindowFunction::LastValue,
		WindowFunction::NthValue,
		WindowFunction::Lead,
		WindowFunction::Lag,
		WindowFunction::Rank,
		WindowFunction::DenseRank,
		WindowFunction::PercentRank,
		WindowFunction::CumeDist,
		WindowFunction::Ntile,
		WindowFunction::RowNumber,
	];

	pub fn name(&self) -> &'static str {
		match self {
			WindowFunction::FirstValue => "first_value",
			WindowFunction::LastValue => "last_value",
			WindowFunction::NthValue => "nth_value",
			WindowFunction::Lead => "lead",
			WindowFunction::Lag => "lag",
			WindowFunction::Rank => "rank",
			WindowFunction::DenseRank => "dense_rank",
			WindowFunction::PercentRank => "percent_rank",
			WindowFunction::CumeDist => "cume_dist",
			WindowFunction::Ntile => "ntile",
			WindowFunction::RowNumber => "row_number",
		}
	}

	pub fn family(&self) -> WindowFunctionFamily {
		match self {
			WindowFunction::FirstValue
			| WindowFunction::LastValue
			| WindowFunction::NthValue
			| WindowFunction::Lead
			| WindowFunction::Lag => WindowFunctionFamily::Navigation,
			WindowFunction::Rank
			| WindowFunction::DenseRank
			| WindowFunction::PercentRank
			| WindowFunction::CumeDist
			| WindowFunction::Ntile
			| WindowFunction::RowNumber => WindowFunctionFamily::Numbering,
		}
	}

	/// Whether `dialect` accepts a frame clause in the OVER clause of this
	/// function. Columnar engines reject frames on numbering functions.
	pub fn supports_window_frame_clause(&self, dialect: &Dialect) -> Result<bool> {
		Ok(match dialect.family()? {
			DialectFamily::RowStore => true,
			DialectFamily::ColumnarAnalytics => self.family() == WindowFunctionFamily::Navigation,
		})
	}

	/// `name(args...)`, ready to be wrapped in an OVER clause.
	pub fn expression<I>(&self, args: I) -> Result<Expression>
	where
		I: IntoIterator<Item = Expression>,
	{
		let args: Vec<Expression> = args.into_iter().collect();
		let template = format!("{}({})", self.name(), vec!["{}"; args.len()].join(", "));
		Expression::construct(&template, args)
	}
}

impl Display for WindowFunction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_family() {
		let numbering: Vec<_> = WindowFunction::ALL
			.iter()
			.filter(|f| f.family() == WindowFunctionFamily::Numbering)
			.map(|f| f.name())
			.collect();
		assert_eq!(numbering, vec!["rank", "dense_rank", "percent_rank", "cume_dist", "ntile", "row_number"]);
	}

	#[test]
	fn test_supports_window_frame_clause() {
		for function in WindowFunction::ALL {
			assert!(function.supports_window_frame_clause(&Dialect::Postgres).unwrap());
			assert_eq!(
				function.supports_window_frame_clause(&Dialect::BigQuery).unwrap(),
				function.family() == WindowFunctionFamily::Navigation
			);
		}
	}

	#[test]
	fn test_supports_window_frame_clause_unknown_dialect() {
		let err = WindowFunction::Rank.supports_window_frame_clause(&Dialect::from("snowflake")).unwrap_err();
		assert_eq!(err.code(), "DIALECT_001");
	}

	#[test]
	fn test_expression() {
		let args = [Expression::column_reference("x"), Expression::constant("2")];
		let expr = WindowFunction::Lag.expression(args).unwrap();
		assert_eq!(expr.to_sql(&Dialect::Postgres, None).unwrap(), "lag(\"x\", 2)");

		let expr = WindowFunction::RowNumber.expression(Vec::<Expression>::new()).unwrap();
		assert_eq!(expr.to_sql(&Dialect::Postgres, None).unwrap(), "row_number()");
	}
}
