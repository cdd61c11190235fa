// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixtures for tests of this crate and its dependents.

use bach_type::DataType;

use crate::{BaseNode, DataFrame, Series, Settings};

pub fn base_node() -> BaseNode {
	BaseNode::new("test")
}

/// An `Int64` column of `base_node`.
pub fn series(base_node: &BaseNode, name: &str) -> Series {
	Series::from_column(base_node.clone(), name, DataType::Int64)
}

/// A frame over `base_node()` with `Int64` index and data columns.
pub fn dataframe(index: &[&str], data: &[&str]) -> DataFrame {
	let index: Vec<(&str, DataType)> = index.iter().map(|name| (*name, DataType::Int64)).collect();
	let data: Vec<(&str, DataType)> = data.iter().map(|name| (*name, DataType::Int64)).collect();
	DataFrame::new(base_node(), Settings::default(), &index, &data)
}

#[cfg(test)]
pub(crate) fn sql(expression: &bach_expression::Expression) -> String {
	expression.to_sql(&bach_expression::Dialect::Postgres, None).unwrap()
}
