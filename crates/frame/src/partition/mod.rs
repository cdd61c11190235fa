// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! How rows are partitioned before an aggregate or window function is applied.

use bach_expression::Expression;
use bach_type::Result;
use indexmap::IndexMap;

use crate::{BaseNode, Series};

mod cube;
mod frame;
mod function;
mod group_by;
mod grouping;
mod window;

pub use cube::{Cube, Rollup};
pub use frame::{FrameBound, WindowFrame, WindowFrameBoundary, WindowFrameMode};
pub use function::{WindowFunction, WindowFunctionFamily};
pub use group_by::GroupBy;
pub use grouping::{GroupingList, GroupingSet};
pub use window::Window;

/// The partition currently applied to a series or dataframe.
///
/// Two partitionings are only equal when they are the same kind of partition
/// over equal columns; a cube is never equal to a plain group by on the same
/// columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Partitioning {
	GroupBy(GroupBy),
	Cube(Cube),
	Rollup(Rollup),
	GroupingList(GroupingList),
	GroupingSet(GroupingSet),
	Window(Window),
}

impl Partitioning {
	pub fn kind(&self) -> &'static str {
		match self {
			Partitioning::GroupBy(_) => "group by",
			Partitioning::Cube(_) => "cube",
			Partitioning::Rollup(_) => "rollup",
			Partitioning::GroupingList(_) => "grouping list",
			Partitioning::GroupingSet(_) => "grouping set",
			Partitioning::Window(_) => "window",
		}
	}

	/// The combined grouping columns of this partition.
	pub fn group_by(&self) -> &GroupBy {
		match self {
			Partitioning::GroupBy(group_by) => group_by,
			Partitioning::Cube(cube) => cube,
			Partitioning::Rollup(rollup) => rollup,
			Partitioning::GroupingList(list) => list,
			Partitioning::GroupingSet(set) => set,
			Partitioning::Window(window) => window,
		}
	}

	pub fn index(&self) -> IndexMap<String, Series> {
		self.group_by().index()
	}

	pub fn base_node(&self) -> Option<&BaseNode> {
		self.group_by().base_node()
	}

	pub fn get_group_by_column_expression(&self) -> Result<Option<Expression>> {
		match self {
			Partitioning::GroupBy(group_by) => group_by.get_group_by_column_expression(),
			Partitioning::Cube(cube) => cube.get_group_by_column_expression(),
			Partitioning::Rollup(rollup) => rollup.get_group_by_column_expression(),
			Partitioning::GroupingList(list) => list.get_group_by_column_expression(),
			Partitioning::GroupingSet(set) => set.get_group_by_column_expression(),
			Partitioning::Window(window) => window.get_group_by_column_expression(),
		}
	}

	pub fn get_index_column_expressions(&self, construct_multi_levels: bool) -> Result<Vec<Expression>> {
		self.group_by().get_index_column_expressions(construct_multi_levels)
	}

	pub fn get_index_expressions(&self) -> Vec<Expression> {
		self.group_by().get_index_expressions()
	}

	pub fn copy_override_base_node(&self, base_node: &BaseNode) -> Result<Self> {
		Ok(match self {
			Partitioning::GroupBy(group_by) => Partitioning::GroupBy(group_by.copy_override_base_node(base_node)?),
			Partitioning::Cube(cube) => Partitioning::Cube(cube.copy_override_base_node(base_node)?),
			Partitioning::Rollup(rollup) => Partitioning::Rollup(rollup.copy_override_base_node(base_node)?),
			Partitioning::GroupingList(list) => {
				Partitioning::GroupingList(list.copy_override_base_node(base_node)?)
			}
			Partitioning::GroupingSet(set) => Partitioning::GroupingSet(set.copy_override_base_node(base_node)?),
			Partitioning::Window(window) => Partitioning::Window(window.copy_override_base_node(base_node)?),
		})
	}

	pub fn is_window(&self) -> bool {
		matches!(self, Partitioning::Window(_))
	}

	pub fn as_window(&self) -> Option<&Window> {
		match self {
			Partitioning::Window(window) => Some(window),
			_ => None,
		}
	}
}

impl From<GroupBy> for Partitioning {
	fn from(group_by: GroupBy) -> Self {
		Partitioning::GroupBy(group_by)
	}
}

impl From<Cube> for Partitioning {
	fn from(cube: Cube) -> Self {
		Partitioning::Cube(cube)
	}
}

impl From<Rollup> for Partitioning {
	fn from(rollup: Rollup) -> Self {
		Partitioning::Rollup(rollup)
	}
}

impl From<GroupingList> for Partitioning {
	fn from(list: GroupingList) -> Self {
		Partitioning::GroupingList(list)
	}
}

impl From<GroupingSet> for Partitioning {
	fn from(set: GroupingSet) -> Self {
		Partitioning::GroupingSet(set)
	}
}

impl From<Window> for Partitioning {
	fn from(window: Window) -> Self {
		Partitioning::Window(window)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing;

	#[test]
	fn test_equality_requires_same_kind() {
		let df = testing::dataframe(&[], &["a"]);
		let a = df.column("a").unwrap();
		let group_by = Partitioning::from(GroupBy::new(vec![a.clone()]).unwrap());
		let cube = Partitioning::from(Cube::new(vec![a.clone()]).unwrap());
		let rollup = Partitioning::from(Rollup::new(vec![a.clone()]).unwrap());

		assert_eq!(group_by, Partitioning::from(GroupBy::new(vec![a.clone()]).unwrap()));
		assert_ne!(group_by, cube);
		assert_ne!(cube, rollup);
		assert_eq!(group_by.group_by(), cube.group_by());
	}

	#[test]
	fn test_as_window() {
		let df = testing::dataframe(&[], &["a"]);
		let window = Window::new(vec![df.column("a").unwrap()], vec![], WindowFrame::default(), None).unwrap();
		let partition = Partitioning::from(window.clone());
		assert!(partition.is_window());
		assert_eq!(partition.as_window(), Some(&window));
		assert!(partition.get_group_by_column_expression().unwrap().is_none());
		assert_eq!(partition.kind(), "window");
	}

	#[test]
	fn test_copy_override_base_node_keeps_kind() {
		let df = testing::dataframe(&[], &["a"]);
		let other = df.base_node().derive();
		let cube = Partitioning::from(Cube::new(vec![df.column("a").unwrap()]).unwrap());
		let copy = cube.copy_override_base_node(&other).unwrap();
		assert_eq!(copy.kind(), "cube");
		assert_eq!(copy.base_node(), Some(&other));
	}
}
