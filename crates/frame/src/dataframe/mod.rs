// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_expression::Expression;
use bach_type::{DataType, Result, return_error};
use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::{BaseNode, Series, Settings, SortColumn, error::FrameError, partition::Partitioning};

mod group;
mod key;

pub use key::{GroupKey, Key, Selection};

/// A lazily evaluated table over one upstream relation.
///
/// The frame holds no rows. Every operation returns a new frame whose series
/// describe how to compute their values in SQL.
#[derive(Debug, Clone)]
pub struct DataFrame {
	base_node: BaseNode,
	settings: Settings,
	index: IndexMap<String, Series>,
	data: IndexMap<String, Series>,
	order_by: Vec<SortColumn>,
	group_by: Option<Partitioning>,
}

impl DataFrame {
	/// A frame reading the given index and data fields of `base_node` as is.
	pub fn new(
		base_node: BaseNode,
		settings: Settings,
		index: &[(&str, DataType)],
		data: &[(&str, DataType)],
	) -> Self {
		let index: IndexMap<String, Series> = index
			.iter()
			.map(|(name, dtype)| (name.to_string(), Series::from_column(base_node.clone(), *name, *dtype)))
			.collect();
		let data = data
			.iter()
			.map(|(name, dtype)| {
				let series = Series::from_column(base_node.clone(), *name, *dtype).with_index(index.clone());
				(name.to_string(), series)
			})
			.collect();

		Self {
			base_node,
			settings,
			index,
			data,
			order_by: Vec::new(),
			group_by: None,
		}
	}

	pub fn base_node(&self) -> &BaseNode {
		&self.base_node
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn index(&self) -> &IndexMap<String, Series> {
		&self.index
	}

	pub fn data(&self) -> &IndexMap<String, Series> {
		&self.data
	}

	pub fn data_columns(&self) -> Vec<&str> {
		self.data.keys().map(String::as_str).collect()
	}

	pub fn order_by(&self) -> &[SortColumn] {
		&self.order_by
	}

	pub fn group_by(&self) -> Option<&Partitioning> {
		self.group_by.as_ref()
	}

	/// The data or index series named `name`.
	pub fn column(&self, name: &str) -> Result<Series> {
		self.data.get(name).or_else(|| self.index.get(name)).cloned().ok_or_else(|| {
			FrameError::ColumnNotFound {
				name: name.to_string(),
			}
			.into()
		})
	}

	#[instrument(name = "dataframe::get", level = "trace", skip_all)]
	pub fn get(&self, key: impl Into<Key>) -> Result<Selection> {
		match key.into() {
			Key::Label(label) => self.column(&label).map(Selection::Series),
			Key::Labels(labels) => {
				let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
				self.select(&labels).map(Selection::Frame)
			}
			key @ Key::Slice {
				..
			} => Err(FrameError::UnsupportedKey {
				key: key.to_string(),
			}
			.into()),
		}
	}

	/// A frame with the same index and only the data columns in `labels`, in
	/// that order.
	pub fn select(&self, labels: &[&str]) -> Result<DataFrame> {
		let mut data = IndexMap::with_capacity(labels.len());
		for label in labels {
			let series = self.data.get(*label).ok_or_else(|| FrameError::ColumnNotFound {
				name: label.to_string(),
			})?;
			data.insert(label.to_string(), series.clone());
		}
		Ok(Self {
			data,
			..self.clone()
		})
	}

	/// Orders the frame by the given columns. A single `ascending` flag
	/// applies to every column.
	pub fn sort_values(&self, by: &[&str], ascending: &[bool]) -> Result<DataFrame> {
		if ascending.len() != 1 && ascending.len() != by.len() {
			return_error!(FrameError::SortLengthMismatch {
				by: by.len(),
				ascending: ascending.len(),
			});
		}

		let mut order_by = Vec::with_capacity(by.len());
		for (idx, name) in by.iter().enumerate() {
			let series = self.column(name)?;
			let asc = if ascending.len() == 1 { ascending[0] } else { ascending[idx] };
			order_by.push(SortColumn::new(series.expression().clone(), asc));
		}
		debug!(columns = by.len(), "sorting dataframe");

		Ok(Self {
			order_by,
			..self.clone()
		})
	}

	/// Aliased expressions of all index and data columns, the SELECT list of
	/// this frame.
	pub fn get_column_expressions(&self) -> Result<Vec<Expression>> {
		let mut result = Vec::with_capacity(self.index.len() + self.data.len());
		for series in self.index.values().chain(self.data.values()) {
			if series.is_multi_level() {
				result.extend(series.get_all_level_column_expression()?);
			} else {
				result.push(series.get_column_expression()?);
			}
		}
		Ok(result)
	}

	/// The GROUP BY clause body of this frame, if it is grouped.
	pub fn get_group_by_column_expression(&self) -> Result<Option<Expression>> {
		match &self.group_by {
			Some(partition) => partition.get_group_by_column_expression(),
			None => Ok(None),
		}
	}

	/// `order by` body of this frame, if it is sorted.
	pub fn get_order_by_expression(&self) -> Result<Option<Expression>> {
		if self.order_by.is_empty() {
			return Ok(None);
		}
		let template = self.order_by.iter().map(SortColumn::template).collect::<Vec<_>>().join(", ");
		Expression::construct(&template, self.order_by.iter().map(|column| column.expression.clone())).map(Some)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{self, sql};

	#[test]
	fn test_new() {
		let df = testing::dataframe(&["a"], &["b", "c"]);
		assert_eq!(df.data_columns(), vec!["b", "c"]);
		assert_eq!(df.column("b").unwrap().index().keys().collect::<Vec<_>>(), vec!["a"]);
		assert!(df.column("a").unwrap().index().is_empty());
		assert!(df.group_by().is_none());
	}

	#[test]
	fn test_column_not_found() {
		let df = testing::dataframe(&["a"], &["b"]);
		assert_eq!(df.column("x").unwrap_err().code(), "FRAME_001");
	}

	#[test]
	fn test_get() {
		let df = testing::dataframe(&["a"], &["b", "c", "d"]);

		let series = df.get("c").unwrap().into_series().unwrap();
		assert_eq!(series.name(), "c");

		let frame = df.get(vec!["d", "b"]).unwrap().into_frame().unwrap();
		assert_eq!(frame.data_columns(), vec!["d", "b"]);
		assert_eq!(frame.index().keys().collect::<Vec<_>>(), vec!["a"]);

		assert_eq!(df.get(vec!["b", "x"]).unwrap_err().code(), "FRAME_001");
	}

	#[test]
	fn test_get_slice_not_supported() {
		let df = testing::dataframe(&["a"], &["b"]);
		let err = df
			.get(Key::Slice {
				start: Some(1),
				stop: None,
			})
			.unwrap_err();
		assert_eq!(err.code(), "FRAME_002");
		assert_eq!(err.message(), "Unsupported key: 1:");
	}

	#[test]
	fn test_sort_values() {
		let df = testing::dataframe(&["a"], &["b", "c"]);
		let sorted = df.sort_values(&["c", "b"], &[false, true]).unwrap();
		assert_eq!(sql(&sorted.get_order_by_expression().unwrap().unwrap()), "\"c\" desc, \"b\" asc");

		let sorted = df.sort_values(&["c", "b"], &[false]).unwrap();
		assert!(sorted.order_by().iter().all(|column| !column.asc));
		assert!(df.get_order_by_expression().unwrap().is_none());
	}

	#[test]
	fn test_sort_values_length_mismatch() {
		let df = testing::dataframe(&["a"], &["b", "c", "d"]);
		let err = df.sort_values(&["b", "c", "d"], &[true, false]).unwrap_err();
		assert_eq!(err.code(), "FRAME_003");
	}

	#[test]
	fn test_column_expressions() {
		let df = testing::dataframe(&["a"], &["b"]);
		let renamed = df.get("b").unwrap().into_series().unwrap().with_name("x");
		assert_eq!(sql(&renamed.get_column_expression().unwrap()), "\"b\" as \"x\"");

		let expressions: Vec<String> = df.get_column_expressions().unwrap().iter().map(sql).collect();
		assert_eq!(expressions, vec!["\"a\"", "\"b\""]);
	}
}
