// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Deref;

use bach_expression::{Dialect, DialectError, Expression};
use bach_type::Result;
use tracing::instrument;

use crate::{
	BaseNode, GroupBy, Series, SortColumn,
	error::WindowError,
	partition::{FrameBound, WindowFrame, WindowFrameBoundary, WindowFrameMode, WindowFunction},
};

/// A partitioned, sorted view on the rows with a frame around each row.
///
/// Frames follow `{ RANGE | ROWS } BETWEEN frame_start AND frame_end`, with an
/// optional end that defaults to the current row in the engine. Offsets are
/// row counts and only valid in ROWS mode.
///
/// With `min_values` set, a window function only yields a value once the frame
/// holds at least that many rows (NULLs included), NULL otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
	group_by: GroupBy,
	order_by: Vec<SortColumn>,
	mode: WindowFrameMode,
	start: Option<FrameBound>,
	end: Option<FrameBound>,
	min_values: u32,
	frame_clause: String,
}

impl Window {
	#[instrument(name = "partition::window::new", level = "trace", skip_all)]
	pub fn new(
		columns: Vec<Series>,
		order_by: Vec<SortColumn>,
		frame: WindowFrame,
		min_values: Option<u32>,
	) -> Result<Self> {
		let group_by = GroupBy::new(columns)?;
		let (mode, frame_clause) = validate_frame(&frame)?;

		Ok(Self {
			group_by,
			order_by,
			mode,
			start: frame.start,
			end: frame.end,
			min_values: min_values.unwrap_or(0),
			frame_clause,
		})
	}

	/// This window with another frame. The minimum number of values is reset.
	pub fn set_frame_clause(&self, frame: WindowFrame) -> Result<Self> {
		Self::new(self.group_by.columns().cloned().collect(), self.order_by.clone(), frame, None)
	}

	pub fn with_min_values(&self, min_values: u32) -> Self {
		Self {
			min_values,
			..self.clone()
		}
	}

	/// This window without frame boundaries, for functions that compute over
	/// the whole partition.
	pub fn without_frame(&self) -> Self {
		Self {
			start: None,
			end: None,
			frame_clause: String::new(),
			..self.clone()
		}
	}

	pub fn order_by(&self) -> &[SortColumn] {
		&self.order_by
	}

	pub fn frame_clause(&self) -> &str {
		&self.frame_clause
	}

	pub fn min_values(&self) -> u32 {
		self.min_values
	}

	pub fn mode(&self) -> WindowFrameMode {
		self.mode
	}

	pub fn start(&self) -> Option<FrameBound> {
		self.start
	}

	pub fn end(&self) -> Option<FrameBound> {
		self.end
	}

	pub fn frame(&self) -> WindowFrame {
		WindowFrame::new(self.mode, self.start, self.end)
	}

	/// `{window_func} over (partition by ... order by ... frame_clause)`
	#[instrument(name = "partition::window::expression", level = "trace", skip_all)]
	pub fn get_window_expression(&self, window_func: &Expression) -> Result<Expression> {
		let over = self.get_over_expression()?;

		if self.min_values == 0 {
			return Expression::construct_window("{} {}", [window_func.clone(), over]);
		}

		Expression::construct_window(
			&format!("case when (count(1) {{}}) >= {} then {{}} {{}} else NULL end", self.min_values),
			[over.clone(), window_func.clone(), over],
		)
	}

	/// Applies `function` to `args` over this window, failing when `dialect`
	/// can not combine the function with this window's frame.
	pub fn get_window_expression_for<I>(
		&self,
		function: WindowFunction,
		args: I,
		dialect: &Dialect,
	) -> Result<Expression>
	where
		I: IntoIterator<Item = Expression>,
	{
		if !self.frame_clause.is_empty() && !function.supports_window_frame_clause(dialect)? {
			return Err(DialectError::WindowFrameNotSupported {
				function: function.name().to_string(),
				dialect: dialect.name().to_string(),
				frame_clause: self.frame_clause.clone(),
			}
			.into());
		}
		self.get_window_expression(&function.expression(args)?)
	}

	/// A window never adds a GROUP BY clause.
	pub fn get_group_by_column_expression(&self) -> Result<Option<Expression>> {
		Ok(None)
	}

	pub fn copy_override_base_node(&self, base_node: &BaseNode) -> Result<Self> {
		Ok(Self {
			group_by: self.group_by.copy_override_base_node(base_node)?,
			..self.clone()
		})
	}

	fn get_over_expression(&self) -> Result<Expression> {
		let mut parts = Vec::with_capacity(3);

		if !self.group_by.is_empty() {
			let index = self.group_by.get_index_expressions();
			let template = format!("partition by {}", vec!["{}"; index.len()].join(", "));
			parts.push(Expression::construct(&template, index)?);
		}

		if !self.order_by.is_empty() {
			let template = self.order_by.iter().map(SortColumn::template).collect::<Vec<_>>().join(", ");
			parts.push(Expression::construct(
				&format!("order by {}", template),
				self.order_by.iter().map(|column| column.expression.clone()),
			)?);
		}

		if !self.frame_clause.is_empty() {
			parts.push(Expression::raw(self.frame_clause.clone()));
		}

		Expression::construct("over ({})", [Expression::join(parts, " ")?])
	}
}

impl Deref for Window {
	type Target = GroupBy;

	fn deref(&self) -> &Self::Target {
		&self.group_by
	}
}

fn validate_frame(frame: &WindowFrame) -> Result<(WindowFrameMode, String)> {
	let Some(mode) = frame.mode else {
		return Err(WindowError::MissingMode.into());
	};

	if frame.start.is_none() && frame.end.is_some() {
		return Err(WindowError::MissingStartBoundary.into());
	}

	if let Some(start) = frame.start {
		if start.boundary == WindowFrameBoundary::Following && start.value.is_none() {
			return Err(WindowError::UnboundedFollowingStart.into());
		}
	}

	if let Some(end) = frame.end {
		if end.boundary == WindowFrameBoundary::Preceding && end.value.is_none() {
			return Err(WindowError::UnboundedPrecedingEnd.into());
		}
	}

	let start_value = frame.start.and_then(|bound| bound.value);
	let end_value = frame.end.and_then(|bound| bound.value);

	for value in [start_value, end_value].into_iter().flatten() {
		if value < 0 {
			return Err(WindowError::NegativeOffset {
				value,
			}
			.into());
		}
	}

	if mode == WindowFrameMode::Range && (start_value.is_some() || end_value.is_some()) {
		return Err(WindowError::OffsetInRangeMode.into());
	}

	if let (Some(start), Some(end)) = (frame.start, frame.end) {
		let inverted = match (start.boundary, end.boundary, start.value, end.value) {
			(s, e, _, _) if s > e => true,
			(WindowFrameBoundary::Preceding, WindowFrameBoundary::Preceding, Some(s), Some(e)) => s < e,
			(WindowFrameBoundary::Following, WindowFrameBoundary::Following, Some(s), Some(e)) => s > e,
			_ => false,
		};
		if inverted {
			return Err(WindowError::InvertedFrame {
				start: start.frame_clause()?,
				end: end.frame_clause()?,
			}
			.into());
		}
	}

	let frame_clause = match (frame.start, frame.end) {
		(Some(start), None) => format!("{} {}", mode, start.frame_clause()?),
		(Some(start), Some(end)) => {
			format!("{} BETWEEN {} AND {}", mode, start.frame_clause()?, end.frame_clause()?)
		}
		_ => String::new(),
	};

	Ok((mode, frame_clause))
}
