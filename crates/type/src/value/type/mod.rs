// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

mod category;

pub use category::TypeCategory;

/// The dtype of a series, as it is known before any SQL is executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
	Int64,
	Float64,
	Bool,
	String,
	Date,
	Time,
	Timestamp,
	Timedelta,
	Uuid,
	Json,
	/// Composite of lower bound, upper bound and bounds flags
	NumericInterval,
}

impl DataType {
	pub const ALL: [DataType; 11] = [
		DataType::Int64,
		DataType::Float64,
		DataType::Bool,
		DataType::String,
		DataType::Date,
		DataType::Time,
		DataType::Timestamp,
		DataType::Timedelta,
		DataType::Uuid,
		DataType::Json,
		DataType::NumericInterval,
	];

	pub fn name(&self) -> &'static str {
		match self {
			DataType::Int64 => "int64",
			DataType::Float64 => "float64",
			DataType::Bool => "bool",
			DataType::String => "string",
			DataType::Date => "date",
			DataType::Time => "time",
			DataType::Timestamp => "timestamp",
			DataType::Timedelta => "timedelta",
			DataType::Uuid => "uuid",
			DataType::Json => "json",
			DataType::NumericInterval => "numeric_interval",
		}
	}

	pub fn category(&self) -> TypeCategory {
		match self {
			DataType::Int64 | DataType::Float64 => TypeCategory::Numeric,
			DataType::Bool => TypeCategory::Boolean,
			DataType::String => TypeCategory::Text,
			DataType::Date => TypeCategory::Date,
			DataType::Time => TypeCategory::Time,
			DataType::Timestamp => TypeCategory::Timestamp,
			DataType::Timedelta => TypeCategory::Interval,
			DataType::Uuid => TypeCategory::Uuid,
			DataType::Json => TypeCategory::Json,
			DataType::NumericInterval => TypeCategory::Composite,
		}
	}

	pub fn is_numeric(&self) -> bool {
		self.category() == TypeCategory::Numeric
	}

	/// Whether values of `self` may be compared against values of `other`.
	pub fn is_comparable_with(&self, other: &DataType) -> bool {
		let (left, right) = (self.category(), other.category());
		left == right && left.is_comparable()
	}
}

impl Display for DataType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for DataType {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		DataType::ALL
			.iter()
			.find(|dtype| dtype.name().eq_ignore_ascii_case(s))
			.copied()
			.ok_or_else(|| format!("unknown dtype '{}'", s))
	}
}
