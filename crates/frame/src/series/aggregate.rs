// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_expression::Expression;
use bach_type::{DataType, Result, TypeError, return_error};
use tracing::instrument;

use crate::{
	GroupBy, Series,
	error::SeriesError,
	partition::Partitioning,
};

impl Series {
	pub fn sum(&self, partition: Option<&Partitioning>) -> Result<Series> {
		self.require_numeric("sum")?;
		self.derived_agg_func(partition, "sum", "sum({})", self.dtype)
	}

	pub fn mean(&self, partition: Option<&Partitioning>) -> Result<Series> {
		self.require_numeric("mean")?;
		self.derived_agg_func(partition, "mean", "avg({})", DataType::Float64)
	}

	pub fn min(&self, partition: Option<&Partitioning>) -> Result<Series> {
		self.require_comparable("min")?;
		self.derived_agg_func(partition, "min", "min({})", self.dtype)
	}

	pub fn max(&self, partition: Option<&Partitioning>) -> Result<Series> {
		self.require_comparable("max")?;
		self.derived_agg_func(partition, "max", "max({})", self.dtype)
	}

	pub fn count(&self, partition: Option<&Partitioning>) -> Result<Series> {
		self.derived_agg_func(partition, "count", "count({})", DataType::Int64)
	}

	pub fn nunique(&self, partition: Option<&Partitioning>) -> Result<Series> {
		self.derived_agg_func(partition, "nunique", "count(distinct {})", DataType::Int64)
	}

	/// Applies the aggregate `template` to this series under `partition`.
	///
	/// Under a window the rows are kept and the aggregate becomes a window
	/// expression. Under any other partition, or none at all, the series is
	/// collapsed to one row per group and takes the partition's index.
	#[instrument(
		name = "series::aggregate",
		level = "trace",
		skip_all,
		fields(series = %self.name, operation = operation)
	)]
	fn derived_agg_func(
		&self,
		partition: Option<&Partitioning>,
		operation: &str,
		template: &str,
		dtype: DataType,
	) -> Result<Series> {
		if self.has_aggregate_function() {
			return Err(SeriesError::AlreadyAggregated {
				series: self.name.clone(),
				operation: operation.to_string(),
			}
			.into());
		}

		if self.has_windowed_aggregate_function() {
			return Err(SeriesError::AlreadyWindowed {
				series: self.name.clone(),
				operation: operation.to_string(),
			}
			.into());
		}

		let partition = match partition {
			Some(partition) => partition.clone(),
			None => Partitioning::GroupBy(GroupBy::new(vec![])?),
		};
		self.check_partition_base_node(&partition)?;

		let aggregate = Expression::construct_aggregate(template, [self.expression.clone()])?;

		if let Some(window) = partition.as_window() {
			let expression = window.get_window_expression(&aggregate)?;
			return Ok(self.with_expression(expression).with_dtype(dtype));
		}

		let mut result = self.with_expression(aggregate).with_dtype(dtype).with_index(partition.index());
		result.group_by = Some(partition);
		Ok(result)
	}

	pub(crate) fn check_partition_base_node(&self, partition: &Partitioning) -> Result<()> {
		match partition.base_node() {
			Some(base_node) if base_node != &self.base_node => Err(SeriesError::BaseNodeMismatch {
				series: self.name.clone(),
			}
			.into()),
			_ => Ok(()),
		}
	}

	fn require_numeric(&self, operation: &str) -> Result<()> {
		if !self.dtype.is_numeric() {
			return_error!(TypeError::UnsupportedOperation {
				dtype: self.dtype,
				operation: operation.to_string(),
			});
		}
		Ok(())
	}

	fn require_comparable(&self, operation: &str) -> Result<()> {
		if !self.dtype.is_comparable_with(&self.dtype) {
			return_error!(TypeError::UnsupportedOperation {
				dtype: self.dtype,
				operation: operation.to_string(),
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use bach_expression::Dialect;
	use bach_type::ErrorCategory;

	use crate::{
		BaseNode, GroupBy, Series, SortColumn, Window, WindowFrame,
		partition::Partitioning,
		testing::{self, sql},
	};

	#[test]
	fn test_sum_without_partition_groups_to_single_row() {
		let df = testing::dataframe(&["a"], &["b"]);
		let result = df.column("b").unwrap().sum(None).unwrap();
		assert_eq!(sql(result.expression()), "sum(\"b\")");
		assert!(result.index().is_empty());
		assert_eq!(result.group_by(), Some(&Partitioning::GroupBy(GroupBy::new(vec![]).unwrap())));
		assert!(result.has_aggregate_function());
	}

	#[test]
	fn test_sum_with_group_by_takes_index() {
		let df = testing::dataframe(&["a"], &["b", "c"]);
		let partition = Partitioning::GroupBy(GroupBy::new(vec![df.column("c").unwrap()]).unwrap());
		let result = df.column("b").unwrap().sum(Some(&partition)).unwrap();
		assert_eq!(result.index().keys().collect::<Vec<_>>(), vec!["c"]);
		assert_eq!(result.group_by(), Some(&partition));
	}

	#[test]
	fn test_sum_with_window_keeps_rows() {
		let df = testing::dataframe(&["a"], &["b", "c"]);
		let window = Window::new(
			vec![df.column("c").unwrap()],
			vec![SortColumn::asc(df.column("b").unwrap().expression().clone())],
			WindowFrame::default(),
			None,
		)
		.unwrap();
		let result = df.column("b").unwrap().sum(Some(&Partitioning::Window(window))).unwrap();
		assert_eq!(
			sql(result.expression()),
			"sum(\"b\") over (partition by \"c\" order by \"b\" asc RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
		);
		assert!(result.has_windowed_aggregate_function());
		assert!(!result.has_aggregate_function());
		assert_eq!(result.index().keys().collect::<Vec<_>>(), vec!["a"]);
		assert!(result.group_by().is_none());
	}

	#[test]
	fn test_mean_is_float() {
		let df = testing::dataframe(&[], &["b"]);
		let result = df.column("b").unwrap().mean(None).unwrap();
		assert_eq!(result.dtype(), crate::DataType::Float64);
		assert_eq!(sql(result.expression()), "avg(\"b\")");
	}

	#[test]
	fn test_nunique() {
		let df = testing::dataframe(&[], &["b"]);
		let result = df.column("b").unwrap().nunique(None).unwrap();
		assert_eq!(sql(result.expression()), "count(distinct \"b\")");
	}

	#[test]
	fn test_aggregate_twice_fails() {
		let df = testing::dataframe(&[], &["b"]);
		let once = df.column("b").unwrap().sum(None).unwrap();
		let err = once.sum(None).unwrap_err();
		assert_eq!(err.code(), "SERIES_002");
	}

	#[test]
	fn test_aggregate_of_window_function_fails() {
		let df = testing::dataframe(&["a"], &["b"]);
		let window = Window::new(
			vec![df.column("a").unwrap()],
			vec![SortColumn::asc(df.column("b").unwrap().expression().clone())],
			WindowFrame::default(),
			None,
		)
		.unwrap();
		let lagged = df.column("b").unwrap().window_lag(&window, 1, None, &Dialect::Postgres).unwrap();

		assert_eq!(lagged.sum(None).unwrap_err().code(), "SERIES_004");

		let partition = Partitioning::Window(window);
		assert_eq!(lagged.max(Some(&partition)).unwrap_err().code(), "SERIES_004");
	}

	#[test]
	fn test_sum_on_text_fails() {
		let node = BaseNode::new("test");
		let text = Series::from_column(node, "city", crate::DataType::String);
		let err = text.sum(None).unwrap_err();
		assert_eq!(err.category(), ErrorCategory::Type);
		assert!(text.min(None).is_ok());
	}

	#[test]
	fn test_partition_from_other_base_node_fails() {
		let df = testing::dataframe(&[], &["b", "c"]);
		let foreign = df.column("c").unwrap().with_base_node(&BaseNode::new("other"));
		let partition = Partitioning::GroupBy(GroupBy::new(vec![foreign]).unwrap());
		let err = df.column("b").unwrap().count(Some(&partition)).unwrap_err();
		assert_eq!(err.code(), "SERIES_003");
	}

	#[test]
	fn test_count_renders_for_bigquery() {
		let df = testing::dataframe(&[], &["b"]);
		let result = df.column("b").unwrap().count(None).unwrap();
		assert_eq!(result.expression().to_sql(&Dialect::BigQuery, None).unwrap(), "count(`b`)");
	}
}
