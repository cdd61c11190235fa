// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Deref;

use bach_expression::Expression;
use bach_type::Result;

use crate::{BaseNode, GroupBy, Series, error::GroupingError};

/// Groups on every combination of its columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
	group_by: GroupBy,
}

impl Cube {
	pub fn new(columns: Vec<Series>) -> Result<Self> {
		let group_by = GroupBy::new(columns)?;
		if group_by.is_empty() {
			return Err(GroupingError::EmptyCube.into());
		}
		Ok(Self {
			group_by,
		})
	}

	pub fn get_group_by_column_expression(&self) -> Result<Option<Expression>> {
		wrap("cube ({})", self.group_by.get_group_by_column_expression()?)
	}

	pub fn copy_override_base_node(&self, base_node: &BaseNode) -> Result<Self> {
		Self::new(self.group_by.copy_override_base_node(base_node)?.columns().cloned().collect())
	}
}

impl Deref for Cube {
	type Target = GroupBy;

	fn deref(&self) -> &Self::Target {
		&self.group_by
	}
}

/// Groups on each prefix of its columns, from all of them down to none.
#[derive(Debug, Clone, PartialEq)]
pub struct Rollup {
	group_by: GroupBy,
}

impl Rollup {
	pub fn new(columns: Vec<Series>) -> Result<Self> {
		let group_by = GroupBy::new(columns)?;
		if group_by.is_empty() {
			return Err(GroupingError::EmptyRollup.into());
		}
		Ok(Self {
			group_by,
		})
	}

	pub fn get_group_by_column_expression(&self) -> Result<Option<Expression>> {
		wrap("rollup ({})", self.group_by.get_group_by_column_expression()?)
	}

	pub fn copy_override_base_node(&self, base_node: &BaseNode) -> Result<Self> {
		Self::new(self.group_by.copy_override_base_node(base_node)?.columns().cloned().collect())
	}
}

impl Deref for Rollup {
	type Target = GroupBy;

	fn deref(&self) -> &Self::Target {
		&self.group_by
	}
}

fn wrap(template: &str, inner: Option<Expression>) -> Result<Option<Expression>> {
	inner.map(|inner| Expression::construct(template, [inner])).transpose()
}

#[cfg(test)]
mod tests {
	use bach_expression::Dialect;

	use super::*;
	use crate::testing;

	#[test]
	fn test_cube() {
		let df = testing::dataframe(&[], &["a", "b"]);
		let cube = Cube::new(vec![df.column("a").unwrap(), df.column("b").unwrap()]).unwrap();
		let sql = cube.get_group_by_column_expression().unwrap().unwrap().to_sql(&Dialect::Postgres, None).unwrap();
		assert_eq!(sql, "cube (\"a\", \"b\")");
		assert_eq!(cube.len(), 2);
	}

	#[test]
	fn test_rollup() {
		let df = testing::dataframe(&[], &["a", "b"]);
		let rollup = Rollup::new(vec![df.column("b").unwrap(), df.column("a").unwrap()]).unwrap();
		let sql = rollup.get_group_by_column_expression().unwrap().unwrap().to_sql(&Dialect::BigQuery, None).unwrap();
		assert_eq!(sql, "rollup (`b`, `a`)");
	}

	#[test]
	fn test_empty() {
		assert_eq!(Cube::new(vec![]).unwrap_err().code(), "GROUP_005");
		assert_eq!(Rollup::new(vec![]).unwrap_err().code(), "GROUP_006");
	}

	#[test]
	fn test_validation_runs_before_emptiness() {
		let df = testing::dataframe(&[], &["a"]);
		let summed = df.column("a").unwrap().sum(None).unwrap();
		assert_eq!(Cube::new(vec![summed]).unwrap_err().code(), "GROUP_004");
	}
}
