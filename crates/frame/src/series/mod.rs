// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_expression::Expression;
use bach_type::{DataType, Result};
use indexmap::IndexMap;

use crate::{BaseNode, partition::Partitioning};

mod aggregate;
mod compare;
mod sort;
mod window;

pub use compare::{ComparisonOperator, Literal};
pub use sort::SortColumn;

/// A lazily evaluated column.
///
/// A series never holds data. It knows the relation it reads from, the SQL
/// expression that computes it, the index it is aligned on and the
/// partitioning (if any) its expression is evaluated under.
#[derive(Debug, Clone)]
pub struct Series {
	name: String,
	dtype: DataType,
	expression: Expression,
	base_node: BaseNode,
	index: IndexMap<String, Series>,
	group_by: Option<Partitioning>,
	index_sorting: Vec<bool>,
	sorted_ascending: Option<bool>,
	levels: IndexMap<String, Series>,
}

impl Series {
	pub fn new(base_node: BaseNode, name: impl Into<String>, dtype: DataType, expression: Expression) -> Self {
		Self {
			name: name.into(),
			dtype,
			expression,
			base_node,
			index: IndexMap::new(),
			group_by: None,
			index_sorting: Vec::new(),
			sorted_ascending: None,
			levels: IndexMap::new(),
		}
	}

	/// A series that reads field `name` of `base_node` as is.
	pub fn from_column(base_node: BaseNode, name: impl Into<String>, dtype: DataType) -> Self {
		let name = name.into();
		let expression = Expression::column_reference(name.clone());
		Self::new(base_node, name, dtype, expression)
	}

	/// A composite series made of several levels, e.g. an interval of lower
	/// bound, upper bound and bounds flags.
	pub fn multi_level(
		base_node: BaseNode,
		name: impl Into<String>,
		dtype: DataType,
		levels: Vec<Series>,
	) -> Result<Self> {
		let expression = Expression::construct(
			&format!("({})", vec!["{}"; levels.len()].join(", ")),
			levels.iter().map(|level| level.expression.clone()),
		)?;
		let mut result = Self::new(base_node, name, dtype, expression);
		result.levels = levels.into_iter().map(|level| (level.name.clone(), level)).collect();
		Ok(result)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn dtype(&self) -> DataType {
		self.dtype
	}

	pub fn expression(&self) -> &Expression {
		&self.expression
	}

	pub fn base_node(&self) -> &BaseNode {
		&self.base_node
	}

	pub fn index(&self) -> &IndexMap<String, Series> {
		&self.index
	}

	pub fn group_by(&self) -> Option<&Partitioning> {
		self.group_by.as_ref()
	}

	pub fn index_sorting(&self) -> &[bool] {
		&self.index_sorting
	}

	pub fn sorted_ascending(&self) -> Option<bool> {
		self.sorted_ascending
	}

	/// Constituent levels; empty for a single-level series.
	pub fn levels(&self) -> &IndexMap<String, Series> {
		&self.levels
	}

	pub fn is_multi_level(&self) -> bool {
		!self.levels.is_empty()
	}

	pub fn is_constant(&self) -> bool {
		self.expression.is_constant()
	}

	pub fn has_aggregate_function(&self) -> bool {
		self.expression.has_aggregate_function()
	}

	pub fn has_windowed_aggregate_function(&self) -> bool {
		self.expression.has_windowed_aggregate_function()
	}

	pub fn with_name(&self, name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..self.clone()
		}
	}

	pub fn with_dtype(&self, dtype: DataType) -> Self {
		Self {
			dtype,
			..self.clone()
		}
	}

	pub fn with_expression(&self, expression: Expression) -> Self {
		Self {
			expression,
			..self.clone()
		}
	}

	pub fn with_index(&self, index: IndexMap<String, Series>) -> Self {
		Self {
			index,
			..self.clone()
		}
	}

	pub fn with_group_by(&self, group_by: Option<Partitioning>) -> Self {
		Self {
			group_by,
			..self.clone()
		}
	}

	pub fn with_index_sorting(&self, index_sorting: Vec<bool>) -> Self {
		Self {
			index_sorting,
			..self.clone()
		}
	}

	pub fn with_sorted_ascending(&self, sorted_ascending: Option<bool>) -> Self {
		Self {
			sorted_ascending,
			..self.clone()
		}
	}

	/// Rebinds this series, its levels and its index to another relation.
	pub fn with_base_node(&self, base_node: &BaseNode) -> Self {
		Self {
			base_node: base_node.clone(),
			index: self.index.iter().map(|(name, s)| (name.clone(), s.with_base_node(base_node))).collect(),
			levels: self.levels.iter().map(|(name, s)| (name.clone(), s.with_base_node(base_node))).collect(),
			..self.clone()
		}
	}

	/// This series as an index column: without index, grouping or sorting of its own.
	pub(crate) fn as_index_column(&self) -> Self {
		Self {
			index: IndexMap::new(),
			group_by: None,
			index_sorting: Vec::new(),
			..self.clone()
		}
	}

	/// The expression aliased to this series' name, or the bare reference when
	/// the expression already is the column of that name.
	pub fn get_column_expression(&self) -> Result<Expression> {
		if self.expression == Expression::column_reference(self.name.clone()) {
			return Ok(self.expression.clone());
		}
		Expression::construct_expr_as_name(self.expression.clone(), &self.name)
	}

	/// One column expression per level, named `{series}__{level}`.
	pub fn get_all_level_column_expression(&self) -> Result<Vec<Expression>> {
		self.levels
			.iter()
			.map(|(level_name, level)| {
				Expression::construct_expr_as_name(
					level.expression.clone(),
					&format!("{}__{}", self.name, level_name),
				)
			})
			.collect()
	}

	pub fn level_expressions(&self) -> Vec<Expression> {
		self.levels.values().map(|level| level.expression.clone()).collect()
	}

	/// Structural equality: same name, dtype, expression, relation, index (in
	/// order), partitioning and sorting.
	pub fn equals(&self, other: &Series) -> bool {
		self == other
	}
}

impl PartialEq for Series {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
			&& self.dtype == other.dtype
			&& self.expression == other.expression
			&& self.base_node == other.base_node
			&& ordered_eq(&self.index, &other.index)
			&& self.group_by == other.group_by
			&& self.index_sorting == other.index_sorting
			&& self.sorted_ascending == other.sorted_ascending
			&& ordered_eq(&self.levels, &other.levels)
	}
}

/// `IndexMap` equality ignores order; series maps are only equal in the same order.
pub(crate) fn ordered_eq(left: &IndexMap<String, Series>, right: &IndexMap<String, Series>) -> bool {
	left.len() == right.len() && left.iter().zip(right.iter()).all(|((ln, ls), (rn, rs))| ln == rn && ls == rs)
}
