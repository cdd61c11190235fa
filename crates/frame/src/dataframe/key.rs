// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use crate::{DataFrame, Series};

/// What `DataFrame::get` selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
	Label(String),
	Labels(Vec<String>),
	/// Positional rows; positions are unknown until the query runs
	Slice {
		start: Option<i64>,
		stop: Option<i64>,
	},
}

impl Display for Key {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Key::Label(label) => write!(f, "'{}'", label),
			Key::Labels(labels) => write!(f, "[{}]", labels.join(", ")),
			Key::Slice {
				start,
				stop,
			} => {
				let bound = |b: &Option<i64>| b.map(|b| b.to_string()).unwrap_or_default();
				write!(f, "{}:{}", bound(start), bound(stop))
			}
		}
	}
}

impl From<&str> for Key {
	fn from(label: &str) -> Self {
		Key::Label(label.to_string())
	}
}

impl From<String> for Key {
	fn from(label: String) -> Self {
		Key::Label(label)
	}
}

impl From<Vec<&str>> for Key {
	fn from(labels: Vec<&str>) -> Self {
		Key::Labels(labels.into_iter().map(str::to_string).collect())
	}
}

impl From<Vec<String>> for Key {
	fn from(labels: Vec<String>) -> Self {
		Key::Labels(labels)
	}
}

/// The result of `DataFrame::get`.
#[derive(Debug, Clone)]
pub enum Selection {
	Series(Series),
	Frame(DataFrame),
}

impl Selection {
	pub fn into_series(self) -> Option<Series> {
		match self {
			Selection::Series(series) => Some(series),
			Selection::Frame(_) => None,
		}
	}

	pub fn into_frame(self) -> Option<DataFrame> {
		match self {
			Selection::Frame(frame) => Some(frame),
			Selection::Series(_) => None,
		}
	}
}

/// A column to group or partition on.
#[derive(Debug, Clone)]
pub enum GroupKey {
	Label(String),
	Series(Series),
}

impl From<&str> for GroupKey {
	fn from(label: &str) -> Self {
		GroupKey::Label(label.to_string())
	}
}

impl From<String> for GroupKey {
	fn from(label: String) -> Self {
		GroupKey::Label(label)
	}
}

impl From<Series> for GroupKey {
	fn from(series: Series) -> Self {
		GroupKey::Series(series)
	}
}
