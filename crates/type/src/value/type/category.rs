// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
	Numeric,
	Boolean,
	Text,
	Date,
	Time,
	Timestamp,
	Interval,
	Uuid,
	Json,
	Composite,
}

impl TypeCategory {
	pub fn is_comparable(&self) -> bool {
		!matches!(self, TypeCategory::Json | TypeCategory::Composite)
	}
}

impl Display for TypeCategory {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			TypeCategory::Numeric => f.write_str("numeric"),
			TypeCategory::Boolean => f.write_str("boolean"),
			TypeCategory::Text => f.write_str("text"),
			TypeCategory::Date => f.write_str("date"),
			TypeCategory::Time => f.write_str("time"),
			TypeCategory::Timestamp => f.write_str("timestamp"),
			TypeCategory::Interval => f.write_str("interval"),
			TypeCategory::Uuid => f.write_str("uuid"),
			TypeCategory::Json => f.write_str("json"),
			TypeCategory::Composite => f.write_str("composite"),
		}
	}
}
