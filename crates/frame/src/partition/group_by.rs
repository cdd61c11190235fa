// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_expression::Expression;
use bach_type::Result;
use indexmap::IndexMap;
use tracing::instrument;

use crate::{BaseNode, Series, error::GroupingError, series::ordered_eq};

/// Partitions rows into groups of equal values of one or more series.
///
/// The columns are kept in the order given. A later series with the name of an
/// earlier one replaces it in place.
#[derive(Debug, Clone, Default)]
pub struct GroupBy {
	index: IndexMap<String, Series>,
}

impl GroupBy {
	#[instrument(name = "partition::group_by::new", level = "trace", skip_all, fields(columns = columns.len()))]
	pub fn new(columns: Vec<Series>) -> Result<Self> {
		let mut index = IndexMap::with_capacity(columns.len());
		for column in columns {
			validate_column(&column)?;
			index.insert(column.name().to_string(), column.as_index_column());
		}
		Ok(Self {
			index,
		})
	}

	/// Copy of the grouping columns by name.
	pub fn index(&self) -> IndexMap<String, Series> {
		self.index.clone()
	}

	pub fn columns(&self) -> impl Iterator<Item = &Series> {
		self.index.values()
	}

	pub fn len(&self) -> usize {
		self.index.len()
	}

	pub fn is_empty(&self) -> bool {
		self.index.is_empty()
	}

	/// The base node of the first grouping column, if any.
	pub fn base_node(&self) -> Option<&BaseNode> {
		self.index.values().next().map(Series::base_node)
	}

	/// Aliased column expressions for a SELECT list. Multi-level columns are
	/// expanded to one column per level unless `construct_multi_levels` is set.
	pub fn get_index_column_expressions(&self, construct_multi_levels: bool) -> Result<Vec<Expression>> {
		let mut result = Vec::with_capacity(self.index.len());
		for column in self.index.values() {
			if column.is_multi_level() && !construct_multi_levels {
				result.extend(column.get_all_level_column_expression()?);
			} else {
				result.push(column.get_column_expression()?);
			}
		}
		Ok(result)
	}

	pub fn get_index_expressions(&self) -> Vec<Expression> {
		let mut result = Vec::with_capacity(self.index.len());
		for column in self.index.values() {
			if column.is_multi_level() {
				result.extend(column.level_expressions());
			} else {
				result.push(column.expression().clone());
			}
		}
		result
	}

	/// The GROUP BY clause body, `None` without grouping columns.
	pub fn get_group_by_column_expression(&self) -> Result<Option<Expression>> {
		if self.index.is_empty() {
			return Ok(None);
		}
		Expression::join(self.get_index_expressions(), ", ").map(Some)
	}

	pub fn copy_override_base_node(&self, base_node: &BaseNode) -> Result<Self> {
		GroupBy::new(self.index.values().map(|column| column.with_base_node(base_node)).collect())
	}
}

impl PartialEq for GroupBy {
	fn eq(&self, other: &Self) -> bool {
		ordered_eq(&self.index, &other.index)
	}
}

fn validate_column(column: &Series) -> Result<()> {
	for (level_name, level) in column.levels() {
		if level.is_constant() {
			return Err(GroupingError::ConstantLevel {
				series: column.name().to_string(),
				level: level_name.clone(),
			}
			.into());
		}
	}

	if column.is_constant() {
		return Err(GroupingError::ConstantExpression {
			series: column.name().to_string(),
		}
		.into());
	}

	if column.has_windowed_aggregate_function() {
		return Err(GroupingError::WindowFunction {
			series: column.name().to_string(),
		}
		.into());
	}

	if column.has_aggregate_function() {
		return Err(GroupingError::AggregateFunction {
			series: column.name().to_string(),
		}
		.into());
	}

	Ok(())
}
