// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Deref;

use bach_expression::Expression;
use bach_type::Result;
use indexmap::IndexMap;

use crate::{BaseNode, GroupBy, error::GroupingError, partition::Partitioning};

/// Several groupings at once, e.g. `GROUP BY (a, b), cube (c, d)`.
///
/// The combined columns are the union of all children's columns, the first
/// child naming a column decides which series it is.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingList {
	group_by: GroupBy,
	children: Vec<Partitioning>,
}

impl GroupingList {
	pub fn new(children: Vec<Partitioning>) -> Result<Self> {
		let mut columns = IndexMap::new();
		for child in &children {
			if child.is_window() {
				return Err(GroupingError::NotGroupingLike {
					kind: child.kind().to_string(),
				}
				.into());
			}
			for (name, series) in child.group_by().index() {
				columns.entry(name).or_insert(series);
			}
		}

		Ok(Self {
			group_by: GroupBy::new(columns.into_values().collect())?,
			children,
		})
	}

	pub fn children(&self) -> &[Partitioning] {
		&self.children
	}

	/// `(a, b), (cube (c)), ()`
	pub fn get_group_by_column_expression(&self) -> Result<Option<Expression>> {
		if self.children.is_empty() {
			return Ok(None);
		}
		let mut clauses = Vec::with_capacity(self.children.len());
		for child in &self.children {
			clauses.push(child.get_group_by_column_expression()?.unwrap_or_default());
		}
		let template = vec!["({})"; clauses.len()].join(", ");
		Expression::construct(&template, clauses).map(Some)
	}

	pub fn copy_override_base_node(&self, base_node: &BaseNode) -> Result<Self> {
		Self::new(
			self.children
				.iter()
				.map(|child| child.copy_override_base_node(base_node))
				.collect::<Result<Vec<_>>>()?,
		)
	}
}

impl Deref for GroupingList {
	type Target = GroupBy;

	fn deref(&self) -> &Self::Target {
		&self.group_by
	}
}

/// `GROUP BY GROUPING SETS ((a, b), (a), ())`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingSet {
	list: GroupingList,
}

impl GroupingSet {
	pub fn new(children: Vec<Partitioning>) -> Result<Self> {
		Ok(Self {
			list: GroupingList::new(children)?,
		})
	}

	pub fn get_group_by_column_expression(&self) -> Result<Option<Expression>> {
		self.list
			.get_group_by_column_expression()?
			.map(|inner| Expression::construct("grouping sets ({})", [inner]))
			.transpose()
	}

	pub fn copy_override_base_node(&self, base_node: &BaseNode) -> Result<Self> {
		Ok(Self {
			list: self.list.copy_override_base_node(base_node)?,
		})
	}
}

impl Deref for GroupingSet {
	type Target = GroupingList;

	fn deref(&self) -> &Self::Target {
		&self.list
	}
}
