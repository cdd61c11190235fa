// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_type::{Diagnostic, Error, ErrorCategory, IntoDiagnostic};

#[derive(Debug, thiserror::Error)]
pub enum GroupingError {
	#[error("Level '{level}' of multi-level series '{series}' has a constant expression")]
	ConstantLevel {
		series: String,
		level: String,
	},

	#[error("Grouping on series '{series}' whose expression is a constant is not supported")]
	ConstantExpression {
		series: String,
	},

	#[error("Window functions can not be used to group")]
	WindowFunction {
		series: String,
	},

	#[error("Aggregate functions can not be used to group")]
	AggregateFunction {
		series: String,
	},

	#[error("Can not create a cube without group by columns")]
	EmptyCube,

	#[error("Can not create a rollup without group by columns")]
	EmptyRollup,

	#[error("Only grouping partitions are supported, got {kind}")]
	NotGroupingLike {
		kind: String,
	},
}

impl IntoDiagnostic for GroupingError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			GroupingError::ConstantLevel {
				series,
				level,
			} => Diagnostic {
				code: "GROUP_001".to_string(),
				category: ErrorCategory::Validation,
				message: format!(
					"Level '{}' in multi-level series '{}' has a constant expression",
					level, series
				),
				label: Some("constant level".to_string()),
				help: Some("Materialize the series first".to_string()),
				notes: vec![],
			},

			GroupingError::ConstantExpression {
				series,
			} => Diagnostic {
				code: "GROUP_002".to_string(),
				category: ErrorCategory::Validation,
				message: format!(
					"Grouping on series '{}' whose expression is a constant is not supported",
					series
				),
				label: Some("constant expression".to_string()),
				help: Some("Name the columns to group on explicitly".to_string()),
				notes: vec![
					"Grouping by a number literal would group by the column at that position".to_string(),
				],
			},

			GroupingError::WindowFunction {
				series,
			} => Diagnostic {
				code: "GROUP_003".to_string(),
				category: ErrorCategory::Validation,
				message: format!("Series '{}' contains a window function and can not be used to group", series),
				label: Some("window function".to_string()),
				help: Some("Materialize the series first".to_string()),
				notes: vec![],
			},

			GroupingError::AggregateFunction {
				series,
			} => Diagnostic {
				code: "GROUP_004".to_string(),
				category: ErrorCategory::Validation,
				message: format!(
					"Series '{}' contains an aggregate function and can not be used to group",
					series
				),
				label: Some("aggregate function".to_string()),
				help: Some("Materialize the series first".to_string()),
				notes: vec![],
			},

			GroupingError::EmptyCube => Diagnostic {
				code: "GROUP_005".to_string(),
				category: ErrorCategory::Validation,
				message: "Can not create a cube without group by columns".to_string(),
				label: None,
				help: Some("Pass at least one column to cube over".to_string()),
				notes: vec![],
			},

			GroupingError::EmptyRollup => Diagnostic {
				code: "GROUP_006".to_string(),
				category: ErrorCategory::Validation,
				message: "Can not create a rollup without group by columns".to_string(),
				label: None,
				help: Some("Pass at least one column to roll up".to_string()),
				notes: vec![],
			},

			GroupingError::NotGroupingLike {
				kind,
			} => Diagnostic {
				code: "GROUP_007".to_string(),
				category: ErrorCategory::Validation,
				message: format!("Only grouping partitions are supported, got {}", kind),
				label: Some("not a grouping".to_string()),
				help: Some("Use group by, cube, rollup or nested grouping lists".to_string()),
				notes: vec!["A window never contributes a GROUP BY clause".to_string()],
			},
		}
	}
}

impl From<GroupingError> for Error {
	fn from(err: GroupingError) -> Self {
		Error(Box::new(err.into_diagnostic()))
	}
}

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
	#[error("Mode needs to be defined")]
	MissingMode,

	#[error("start boundary needs to be defined if end boundary is present")]
	MissingStartBoundary,

	#[error("Start of frame can not be unbounded following")]
	UnboundedFollowingStart,

	#[error("End of frame can not be unbounded preceding")]
	UnboundedPrecedingEnd,

	#[error("Frame offsets must be greater than or equal to zero, got {value}")]
	NegativeOffset {
		value: i64,
	},

	#[error("Frame offsets are only supported in ROWS mode")]
	OffsetInRangeMode,

	#[error("Frame boundaries defined in wrong order")]
	InvertedFrame {
		start: String,
		end: String,
	},

	#[error("Value not supported with CURRENT ROW")]
	CurrentRowWithValue {
		value: i64,
	},

	#[error("Rolling window size must be greater than zero")]
	EmptyRollingWindow,
}

impl IntoDiagnostic for WindowError {
	fn into_diagnostic(self) -> Diagnostic {
		let (code, message, help) = match &self {
			WindowError::MissingMode => ("WINDOW_001", self.to_string(), "Specify ROWS or RANGE"),
			WindowError::MissingStartBoundary => (
				"WINDOW_002",
				self.to_string(),
				"Give a start boundary, the end boundary alone is not a valid frame",
			),
			WindowError::UnboundedFollowingStart => {
				("WINDOW_003", self.to_string(), "Give the FOLLOWING start boundary an offset")
			}
			WindowError::UnboundedPrecedingEnd => {
				("WINDOW_004", self.to_string(), "Give the PRECEDING end boundary an offset")
			}
			WindowError::NegativeOffset {
				..
			} => ("WINDOW_005", self.to_string(), "Use zero to select the current row itself"),
			WindowError::OffsetInRangeMode => (
				"WINDOW_006",
				self.to_string(),
				"Use ROWS mode, or drop the offsets to frame on peers",
			),
			WindowError::InvertedFrame {
				start,
				end,
			} => (
				"WINDOW_007",
				format!("Frame boundaries defined in wrong order: {} comes after {}", start, end),
				"The frame start must not lie after the frame end",
			),
			WindowError::CurrentRowWithValue {
				..
			} => ("WINDOW_008", self.to_string(), "Drop the offset from the CURRENT ROW boundary"),
			WindowError::EmptyRollingWindow => {
				("WINDOW_009", self.to_string(), "Use a window of at least one row")
			}
		};

		Diagnostic {
			code: code.to_string(),
			category: ErrorCategory::Validation,
			message,
			label: Some("invalid window frame".to_string()),
			help: Some(help.to_string()),
			notes: vec!["Frames are written as { RANGE | ROWS } BETWEEN frame_start AND frame_end".to_string()],
		}
	}
}

impl From<WindowError> for Error {
	fn from(err: WindowError) -> Self {
		Error(Box::new(err.into_diagnostic()))
	}
}

#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
	#[error("rhs has a different base_node or group_by")]
	PartitionMismatch {
		left: String,
		right: String,
	},

	#[error("Series '{series}' is already aggregated")]
	AlreadyAggregated {
		series: String,
		operation: String,
	},

	#[error("Partition is defined on a different base node than series '{series}'")]
	BaseNodeMismatch {
		series: String,
	},

	#[error("Series '{series}' holds a window function")]
	AlreadyWindowed {
		series: String,
		operation: String,
	},

	#[error("Float literal {value} is not a finite number")]
	NonFiniteLiteral {
		value: String,
	},
}

impl IntoDiagnostic for SeriesError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			SeriesError::PartitionMismatch {
				left,
				right,
			} => Diagnostic {
				code: "SERIES_001".to_string(),
				category: ErrorCategory::Validation,
				message: format!("rhs '{}' has a different base_node or group_by than '{}'", right, left),
				label: Some("operands from different relations".to_string()),
				help: Some("Combine series of the same dataframe and grouping, or materialize first".to_string()),
				notes: vec![],
			},

			SeriesError::AlreadyAggregated {
				series,
				operation,
			} => Diagnostic {
				code: "SERIES_002".to_string(),
				category: ErrorCategory::Validation,
				message: format!("Can not apply {} to series '{}', it is already aggregated", operation, series),
				label: Some("nested aggregation".to_string()),
				help: Some("Materialize the aggregated series first".to_string()),
				notes: vec![],
			},

			SeriesError::BaseNodeMismatch {
				series,
			} => Diagnostic {
				code: "SERIES_003".to_string(),
				category: ErrorCategory::Validation,
				message: format!("Partition is defined on a different base node than series '{}'", series),
				label: Some("foreign partition".to_string()),
				help: Some("Build the partition from columns of the same dataframe".to_string()),
				notes: vec![],
			},

			SeriesError::AlreadyWindowed {
				series,
				operation,
			} => Diagnostic {
				code: "SERIES_004".to_string(),
				category: ErrorCategory::Validation,
				message: format!("Can not apply {} to series '{}', it holds a window function", operation, series),
				label: Some("nested window function".to_string()),
				help: Some("Materialize the windowed series first".to_string()),
				notes: vec!["Aggregate and window function calls can not contain window function calls".to_string()],
			},

			SeriesError::NonFiniteLiteral {
				value,
			} => Diagnostic {
				code: "SERIES_005".to_string(),
				category: ErrorCategory::Validation,
				message: format!("Float literal {} is not a finite number", value),
				label: Some("non-finite literal".to_string()),
				help: Some("Compare against a finite value, or filter NaN and infinity in the source".to_string()),
				notes: vec![],
			},
		}
	}
}

impl From<SeriesError> for Error {
	fn from(err: SeriesError) -> Self {
		Error(Box::new(err.into_diagnostic()))
	}
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
	#[error("column '{name}' not found")]
	ColumnNotFound {
		name: String,
	},

	#[error("Unsupported key: {key}")]
	UnsupportedKey {
		key: String,
	},

	#[error("Length of ascending ({ascending}) does not match length of by ({by})")]
	SortLengthMismatch {
		by: usize,
		ascending: usize,
	},

	#[error("Series '{name}' belongs to another dataframe")]
	ForeignSeries {
		name: String,
	},

	#[error("DataFrame is already grouped")]
	AlreadyGrouped {
		partition: String,
	},

	#[error("Invalid settings: {reason}")]
	InvalidSettings {
		reason: String,
	},
}

impl IntoDiagnostic for FrameError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			FrameError::ColumnNotFound {
				name,
			} => Diagnostic {
				code: "FRAME_001".to_string(),
				category: ErrorCategory::Validation,
				message: format!("column '{}' not found", name),
				label: Some("this column does not exist in the dataframe".to_string()),
				help: Some("check for typos or ensure the column is part of the data or index".to_string()),
				notes: vec![],
			},

			FrameError::UnsupportedKey {
				key,
			} => Diagnostic {
				code: "FRAME_002".to_string(),
				category: ErrorCategory::Validation,
				message: format!("Unsupported key: {}", key),
				label: Some("unsupported key type".to_string()),
				help: Some("Select columns by label, or a list of labels".to_string()),
				notes: vec!["Row positions are not known before the query is executed".to_string()],
			},

			FrameError::SortLengthMismatch {
				by,
				ascending,
			} => Diagnostic {
				code: "FRAME_003".to_string(),
				category: ErrorCategory::Validation,
				message: format!("Length of ascending ({}) does not match length of by ({})", ascending, by),
				label: None,
				help: Some("Pass one ascending flag, or one per sort column".to_string()),
				notes: vec![],
			},

			FrameError::ForeignSeries {
				name,
			} => Diagnostic {
				code: "FRAME_004".to_string(),
				category: ErrorCategory::Validation,
				message: format!("Series '{}' belongs to another dataframe", name),
				label: Some("different base node".to_string()),
				help: Some("Group on series of this dataframe".to_string()),
				notes: vec![],
			},

			FrameError::AlreadyGrouped {
				partition,
			} => Diagnostic {
				code: "FRAME_005".to_string(),
				category: ErrorCategory::Validation,
				message: format!("DataFrame is already grouped by a {}", partition),
				label: None,
				help: Some("Aggregate and materialize before grouping again".to_string()),
				notes: vec![],
			},

			FrameError::InvalidSettings {
				reason,
			} => Diagnostic {
				code: "FRAME_006".to_string(),
				category: ErrorCategory::Validation,
				message: format!("Invalid settings: {}", reason),
				label: None,
				help: None,
				notes: vec![],
			},
		}
	}
}

impl From<FrameError> for Error {
	fn from(err: FrameError) -> Self {
		Error(Box::new(err.into_diagnostic()))
	}
}
