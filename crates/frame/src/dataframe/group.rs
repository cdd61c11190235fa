// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_type::Result;
use tracing::{debug, instrument};

use crate::{
	Cube, DataFrame, FrameBound, GroupBy, GroupKey, GroupingList, GroupingSet, Rollup, Series, Window, WindowFrame,
	error::{FrameError, WindowError},
	partition::Partitioning,
};

impl DataFrame {
	pub fn groupby(&self, by: Vec<GroupKey>) -> Result<DataFrame> {
		let group_by = GroupBy::new(self.resolve_keys(by)?)?;
		self.apply_partition(group_by.into())
	}

	pub fn cube(&self, by: Vec<GroupKey>) -> Result<DataFrame> {
		let cube = Cube::new(self.resolve_keys(by)?)?;
		self.apply_partition(cube.into())
	}

	pub fn rollup(&self, by: Vec<GroupKey>) -> Result<DataFrame> {
		let rollup = Rollup::new(self.resolve_keys(by)?)?;
		self.apply_partition(rollup.into())
	}

	/// `GROUP BY GROUPING SETS (...)` with one set per entry of `sets`.
	pub fn grouping_sets(&self, sets: Vec<Vec<GroupKey>>) -> Result<DataFrame> {
		let set = GroupingSet::new(self.resolve_key_lists(sets)?)?;
		self.apply_partition(set.into())
	}

	pub fn grouping_list(&self, lists: Vec<Vec<GroupKey>>) -> Result<DataFrame> {
		let list = GroupingList::new(self.resolve_key_lists(lists)?)?;
		self.apply_partition(list.into())
	}

	/// Partitions by `by` and orders by the current sort order of the frame.
	/// Without `frame` the frame from the settings applies.
	pub fn window(&self, by: Vec<GroupKey>, frame: Option<WindowFrame>, min_values: Option<u32>) -> Result<DataFrame> {
		let frame = frame.unwrap_or(self.settings.window);
		let window = Window::new(self.resolve_keys(by)?, self.order_by.clone(), frame, min_values)?;
		self.apply_partition(window.into())
	}

	/// A frame of `window` rows ending at the current row, or centred on it.
	/// Until `min_periods` rows (default: `window`) are in the frame the
	/// result is NULL.
	pub fn rolling(&self, window: u32, min_periods: Option<u32>, center: bool) -> Result<DataFrame> {
		if window == 0 {
			return Err(WindowError::EmptyRollingWindow.into());
		}

		let (preceding, following) = if center {
			let following = (window - 1) / 2;
			(window - 1 - following, following)
		} else {
			(window - 1, 0)
		};

		let end = if following == 0 {
			FrameBound::current_row()
		} else {
			FrameBound::following(i64::from(following))
		};
		let frame = WindowFrame::rows(FrameBound::preceding(i64::from(preceding)), end);
		self.window(vec![], Some(frame), Some(min_periods.unwrap_or(window)))
	}

	/// A frame from the first row of the partition to the current row.
	pub fn expanding(&self, min_periods: Option<u32>) -> Result<DataFrame> {
		let frame = WindowFrame::rows(FrameBound::unbounded_preceding(), FrameBound::current_row());
		self.window(vec![], Some(frame), min_periods)
	}

	fn resolve_keys(&self, keys: Vec<GroupKey>) -> Result<Vec<Series>> {
		keys.into_iter()
			.map(|key| match key {
				GroupKey::Label(label) => self.column(&label),
				GroupKey::Series(series) if series.base_node() != &self.base_node => {
					Err(FrameError::ForeignSeries {
						name: series.name().to_string(),
					}
					.into())
				}
				GroupKey::Series(series) => Ok(series),
			})
			.collect()
	}

	fn resolve_key_lists(&self, lists: Vec<Vec<GroupKey>>) -> Result<Vec<Partitioning>> {
		lists
			.into_iter()
			.map(|keys| -> Result<Partitioning> { Ok(GroupBy::new(self.resolve_keys(keys)?)?.into()) })
			.collect()
	}

	/// Windows keep the rows, so index and data stay as they are. Any other
	/// partition becomes the new index and the remaining data columns are
	/// aggregated per group.
	#[instrument(name = "dataframe::partition", level = "debug", skip_all, fields(kind = partition.kind()))]
	fn apply_partition(&self, partition: Partitioning) -> Result<DataFrame> {
		if let Some(current) = &self.group_by {
			return Err(FrameError::AlreadyGrouped {
				partition: current.kind().to_string(),
			}
			.into());
		}

		if partition.is_window() {
			let data = self
				.data
				.iter()
				.map(|(name, series)| (name.clone(), series.with_group_by(Some(partition.clone()))))
				.collect();
			return Ok(Self {
				data,
				group_by: Some(partition),
				..self.clone()
			});
		}

		let index = partition.index();
		let data = self
			.data
			.iter()
			.filter(|(name, _)| !index.contains_key(*name))
			.map(|(name, series)| {
				let series = series.with_index(index.clone()).with_group_by(Some(partition.clone()));
				(name.clone(), series)
			})
			.collect();
		debug!(index = index.len(), "grouped dataframe");

		Ok(Self {
			index,
			data,
			order_by: Vec::new(),
			group_by: Some(partition),
			..self.clone()
		})
	}
}

#[cfg(test)]
mod tests {
	use crate::{
		BaseNode, GroupKey, WindowFrame, WindowFrameMode,
		testing::{self, sql},
	};

	#[test]
	fn test_groupby() {
		let df = testing::dataframe(&["a"], &["b", "c", "d"]);
		let grouped = df.groupby(vec!["c".into()]).unwrap();

		assert_eq!(grouped.index().keys().collect::<Vec<_>>(), vec!["c"]);
		assert_eq!(grouped.data_columns(), vec!["b", "d"]);
		assert_eq!(sql(&grouped.get_group_by_column_expression().unwrap().unwrap()), "\"c\"");

		let b = grouped.column("b").unwrap();
		assert_eq!(b.group_by(), grouped.group_by());
		assert_eq!(b.index().keys().collect::<Vec<_>>(), vec!["c"]);
	}

	#[test]
	fn test_groupby_series_key() {
		let df = testing::dataframe(&[], &["b", "c"]);
		let grouped = df.groupby(vec![df.column("c").unwrap().into()]).unwrap();
		assert_eq!(grouped.index().keys().collect::<Vec<_>>(), vec!["c"]);
	}

	#[test]
	fn test_groupby_foreign_series() {
		let df = testing::dataframe(&[], &["b", "c"]);
		let foreign = df.column("c").unwrap().with_base_node(&BaseNode::new("other"));
		let err = df.groupby(vec![GroupKey::Series(foreign)]).unwrap_err();
		assert_eq!(err.code(), "FRAME_004");
	}

	#[test]
	fn test_already_grouped() {
		let df = testing::dataframe(&[], &["b", "c"]);
		let grouped = df.groupby(vec!["b".into()]).unwrap();
		let err = grouped.cube(vec!["c".into()]).unwrap_err();
		assert_eq!(err.code(), "FRAME_005");
		assert!(err.message().contains("group by"));
	}

	#[test]
	fn test_cube_and_rollup() {
		let df = testing::dataframe(&[], &["b", "c", "d"]);
		let cube = df.cube(vec!["b".into(), "c".into()]).unwrap();
		assert_eq!(sql(&cube.get_group_by_column_expression().unwrap().unwrap()), "cube (\"b\", \"c\")");

		let rollup = df.rollup(vec!["c".into()]).unwrap();
		assert_eq!(sql(&rollup.get_group_by_column_expression().unwrap().unwrap()), "rollup (\"c\")");
		assert_eq!(df.rollup(vec![]).unwrap_err().code(), "GROUP_006");
	}

	#[test]
	fn test_grouping_sets() {
		let df = testing::dataframe(&[], &["b", "c", "d"]);
		let grouped = df.grouping_sets(vec![vec!["b".into(), "c".into()], vec!["c".into()], vec![]]).unwrap();
		assert_eq!(
			sql(&grouped.get_group_by_column_expression().unwrap().unwrap()),
			"grouping sets ((\"b\", \"c\"), (\"c\"), ())"
		);
		assert_eq!(grouped.index().keys().collect::<Vec<_>>(), vec!["b", "c"]);
		assert_eq!(grouped.data_columns(), vec!["d"]);
	}

	#[test]
	fn test_grouping_list() {
		let df = testing::dataframe(&[], &["b", "c", "d"]);
		let grouped = df.grouping_list(vec![vec!["b".into()], vec!["d".into()]]).unwrap();
		assert_eq!(sql(&grouped.get_group_by_column_expression().unwrap().unwrap()), "(\"b\"), (\"d\")");
	}

	#[test]
	fn test_window_uses_order_and_settings() {
		let df = testing::dataframe(&["a"], &["b", "c"]).sort_values(&["c"], &[true]).unwrap();
		let windowed = df.window(vec!["b".into()], None, None).unwrap();

		let window = windowed.group_by().unwrap().as_window().unwrap();
		assert_eq!(window.order_by(), df.order_by());
		assert_eq!(window.frame_clause(), "RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW");
		// rows are kept
		assert_eq!(windowed.index().keys().collect::<Vec<_>>(), vec!["a"]);
		assert_eq!(windowed.data_columns(), vec!["b", "c"]);
		assert!(windowed.get_group_by_column_expression().unwrap().is_none());
	}

	#[test]
	fn test_window_with_frame() {
		let df = testing::dataframe(&[], &["b"]);
		let windowed = df.window(vec![], Some(WindowFrame::unframed(WindowFrameMode::Rows)), Some(2)).unwrap();
		let window = windowed.group_by().unwrap().as_window().unwrap();
		assert_eq!(window.frame_clause(), "");
		assert_eq!(window.min_values(), 2);
	}

	#[test]
	fn test_rolling() {
		let df = testing::dataframe(&[], &["b"]);
		let rolled = df.rolling(3, None, false).unwrap();
		let window = rolled.group_by().unwrap().as_window().unwrap();
		assert_eq!(window.frame_clause(), "ROWS BETWEEN 2 PRECEDING AND CURRENT ROW");
		assert_eq!(window.min_values(), 3);

		let centred = df.rolling(4, Some(1), true).unwrap();
		let window = centred.group_by().unwrap().as_window().unwrap();
		assert_eq!(window.frame_clause(), "ROWS BETWEEN 2 PRECEDING AND 1 FOLLOWING");
		assert_eq!(window.min_values(), 1);

		assert_eq!(df.rolling(0, None, false).unwrap_err().code(), "WINDOW_009");
	}

	#[test]
	fn test_expanding() {
		let df = testing::dataframe(&[], &["b"]);
		let expanded = df.expanding(None).unwrap();
		let window = expanded.group_by().unwrap().as_window().unwrap();
		assert_eq!(window.frame_clause(), "ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW");
		assert_eq!(window.min_values(), 0);
	}
}
