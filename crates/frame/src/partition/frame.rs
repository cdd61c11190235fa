// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use bach_type::Result;
use serde::{Deserialize, Serialize};

use crate::error::WindowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowFrameMode {
	Rows,
	Range,
}

impl Display for WindowFrameMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			WindowFrameMode::Rows => f.write_str("ROWS"),
			WindowFrameMode::Range => f.write_str("RANGE"),
		}
	}
}

/// Where a frame starts or ends relative to the current row. Variants are
/// ordered the way they appear in a valid frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowFrameBoundary {
	Preceding,
	CurrentRow,
	Following,
}

impl WindowFrameBoundary {
	/// `UNBOUNDED PRECEDING`, `3 FOLLOWING`, `CURRENT ROW`, ...
	pub fn frame_clause(&self, value: Option<i64>) -> Result<String> {
		match (self, value) {
			(WindowFrameBoundary::CurrentRow, Some(value)) => {
				Err(WindowError::CurrentRowWithValue {
					value,
				}
				.into())
			}
			(WindowFrameBoundary::CurrentRow, None) => Ok("CURRENT ROW".to_string()),
			(boundary, None) => Ok(format!("UNBOUNDED {}", boundary)),
			(boundary, Some(value)) => Ok(format!("{} {}", value, boundary)),
		}
	}
}

impl Display for WindowFrameBoundary {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			WindowFrameBoundary::Preceding => f.write_str("PRECEDING"),
			WindowFrameBoundary::CurrentRow => f.write_str("CURRENT ROW"),
			WindowFrameBoundary::Following => f.write_str("FOLLOWING"),
		}
	}
}

/// One end of a frame. Without a value a preceding or following bound is
/// unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameBound {
	pub boundary: WindowFrameBoundary,
	#[serde(default)]
	pub value: Option<i64>,
}

impl FrameBound {
	pub fn new(boundary: WindowFrameBoundary, value: Option<i64>) -> Self {
		Self {
			boundary,
			value,
		}
	}

	pub fn unbounded_preceding() -> Self {
		Self::new(WindowFrameBoundary::Preceding, None)
	}

	pub fn preceding(value: i64) -> Self {
		Self::new(WindowFrameBoundary::Preceding, Some(value))
	}

	pub fn current_row() -> Self {
		Self::new(WindowFrameBoundary::CurrentRow, None)
	}

	pub fn following(value: i64) -> Self {
		Self::new(WindowFrameBoundary::Following, Some(value))
	}

	pub fn unbounded_following() -> Self {
		Self::new(WindowFrameBoundary::Following, None)
	}

	pub fn frame_clause(&self) -> Result<String> {
		self.boundary.frame_clause(self.value)
	}
}

/// The unvalidated parameters of a window frame. `Window::new` checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowFrame {
	pub mode: Option<WindowFrameMode>,
	pub start: Option<FrameBound>,
	pub end: Option<FrameBound>,
}

impl Default for WindowFrame {
	/// `RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW`
	fn default() -> Self {
		Self {
			mode: Some(WindowFrameMode::Range),
			start: Some(FrameBound::unbounded_preceding()),
			end: Some(FrameBound::current_row()),
		}
	}
}

impl WindowFrame {
	pub fn new(mode: WindowFrameMode, start: Option<FrameBound>, end: Option<FrameBound>) -> Self {
		Self {
			mode: Some(mode),
			start,
			end,
		}
	}

	pub fn rows(start: FrameBound, end: FrameBound) -> Self {
		Self::new(WindowFrameMode::Rows, Some(start), Some(end))
	}

	pub fn range(start: FrameBound, end: FrameBound) -> Self {
		Self::new(WindowFrameMode::Range, Some(start), Some(end))
	}

	/// A frame without boundaries: the engine's default frame applies.
	pub fn unframed(mode: WindowFrameMode) -> Self {
		Self::new(mode, None, None)
	}

	pub fn with_mode(self, mode: Option<WindowFrameMode>) -> Self {
		Self {
			mode,
			..self
		}
	}

	pub fn with_start(self, start: Option<FrameBound>) -> Self {
		Self {
			start,
			..self
		}
	}

	pub fn with_end(self, end: Option<FrameBound>) -> Self {
		Self {
			end,
			..self
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_boundary_order() {
		assert!(WindowFrameBoundary::Preceding < WindowFrameBoundary::CurrentRow);
		assert!(WindowFrameBoundary::CurrentRow < WindowFrameBoundary::Following);
	}

	#[test]
	fn test_frame_clause() {
		assert_eq!(FrameBound::unbounded_preceding().frame_clause().unwrap(), "UNBOUNDED PRECEDING");
		assert_eq!(FrameBound::preceding(3).frame_clause().unwrap(), "3 PRECEDING");
		assert_eq!(FrameBound::current_row().frame_clause().unwrap(), "CURRENT ROW");
		assert_eq!(FrameBound::following(0).frame_clause().unwrap(), "0 FOLLOWING");
		assert_eq!(FrameBound::unbounded_following().frame_clause().unwrap(), "UNBOUNDED FOLLOWING");
	}

	#[test]
	fn test_current_row_with_value() {
		let err = WindowFrameBoundary::CurrentRow.frame_clause(Some(1)).unwrap_err();
		assert_eq!(err.code(), "WINDOW_008");
	}

	#[test]
	fn test_default_frame() {
		let frame = WindowFrame::default();
		assert_eq!(frame.mode, Some(WindowFrameMode::Range));
		assert_eq!(frame.start, Some(FrameBound::unbounded_preceding()));
		assert_eq!(frame.end, Some(FrameBound::current_row()));
	}

	#[test]
	fn test_deserialize_partial_frame() {
		let frame: WindowFrame =
			serde_json::from_str(r#"{"mode": "rows", "start": {"boundary": "preceding", "value": 2}}"#)
				.unwrap();
		assert_eq!(frame.mode, Some(WindowFrameMode::Rows));
		assert_eq!(frame.start, Some(FrameBound::preceding(2)));
		assert_eq!(frame.end, Some(FrameBound::current_row()));
	}
}
