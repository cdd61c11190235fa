// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_expression::{Dialect, Expression};
use bach_type::{DataType, Result};
use tracing::instrument;

use crate::{
	Literal, Series, Window, WindowFunction,
	partition::{Partitioning, WindowFunctionFamily},
};

impl Series {
	/// Applies `function` over `window`. Numbering functions on a dialect that
	/// rejects frames for them are rendered without the frame.
	#[instrument(
		name = "series::window_function",
		level = "trace",
		skip_all,
		fields(series = %self.name, function = %function)
	)]
	pub fn window_function(
		&self,
		window: &Window,
		function: WindowFunction,
		args: Vec<Expression>,
		dtype: DataType,
		dialect: &Dialect,
	) -> Result<Series> {
		self.check_partition_base_node(&Partitioning::Window(window.clone()))?;

		let expression = if function.family() == WindowFunctionFamily::Numbering
			&& !function.supports_window_frame_clause(dialect)?
		{
			window.without_frame().get_window_expression_for(function, args, dialect)?
		} else {
			window.get_window_expression_for(function, args, dialect)?
		};

		Ok(self.with_expression(expression).with_dtype(dtype))
	}

	pub fn window_first_value(&self, window: &Window, dialect: &Dialect) -> Result<Series> {
		self.window_function(window, WindowFunction::FirstValue, vec![self.expression.clone()], self.dtype, dialect)
	}

	pub fn window_last_value(&self, window: &Window, dialect: &Dialect) -> Result<Series> {
		self.window_function(window, WindowFunction::LastValue, vec![self.expression.clone()], self.dtype, dialect)
	}

	/// The value of the `n`th row of the frame, counting from 1.
	pub fn window_nth_value(&self, window: &Window, n: u32, dialect: &Dialect) -> Result<Series> {
		let args = vec![self.expression.clone(), Expression::constant(n.to_string())];
		self.window_function(window, WindowFunction::NthValue, args, self.dtype, dialect)
	}

	/// The value `offset` rows after the current row, or `default` past the end
	/// of the partition.
	pub fn window_lead(
		&self,
		window: &Window,
		offset: u32,
		default: Option<Literal>,
		dialect: &Dialect,
	) -> Result<Series> {
		let args = self.offset_args(offset, default)?;
		self.window_function(window, WindowFunction::Lead, args, self.dtype, dialect)
	}

	/// The value `offset` rows before the current row, or `default` before the
	/// start of the partition.
	pub fn window_lag(
		&self,
		window: &Window,
		offset: u32,
		default: Option<Literal>,
		dialect: &Dialect,
	) -> Result<Series> {
		let args = self.offset_args(offset, default)?;
		self.window_function(window, WindowFunction::Lag, args, self.dtype, dialect)
	}

	pub fn window_row_number(&self, window: &Window, dialect: &Dialect) -> Result<Series> {
		self.window_function(window, WindowFunction::RowNumber, vec![], DataType::Int64, dialect)
	}

	pub fn window_rank(&self, window: &Window, dialect: &Dialect) -> Result<Series> {
		self.window_function(window, WindowFunction::Rank, vec![], DataType::Int64, dialect)
	}

	pub fn window_dense_rank(&self, window: &Window, dialect: &Dialect) -> Result<Series> {
		self.window_function(window, WindowFunction::DenseRank, vec![], DataType::Int64, dialect)
	}

	pub fn window_percent_rank(&self, window: &Window, dialect: &Dialect) -> Result<Series> {
		self.window_function(window, WindowFunction::PercentRank, vec![], DataType::Float64, dialect)
	}

	pub fn window_cume_dist(&self, window: &Window, dialect: &Dialect) -> Result<Series> {
		self.window_function(window, WindowFunction::CumeDist, vec![], DataType::Float64, dialect)
	}

	pub fn window_ntile(&self, window: &Window, num_buckets: u32, dialect: &Dialect) -> Result<Series> {
		let args = vec![Expression::constant(num_buckets.to_string())];
		self.window_function(window, WindowFunction::Ntile, args, DataType::Int64, dialect)
	}

	fn offset_args(&self, offset: u32, default: Option<Literal>) -> Result<Vec<Expression>> {
		let mut args = vec![self.expression.clone(), Expression::constant(offset.to_string())];
		if let Some(default) = default {
			args.push(default.expression()?);
		}
		Ok(args)
	}
}
