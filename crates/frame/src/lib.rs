// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod base_node;
pub mod config;
pub mod dataframe;
pub mod error;
pub mod partition;
pub mod series;
pub mod testing;

pub use base_node::BaseNode;
pub use bach_expression::{Dialect, Expression};
pub use bach_type::{DataType, Error, ErrorCategory, Result};
pub use config::Settings;
pub use dataframe::{DataFrame, GroupKey, Key, Selection};
pub use partition::{
	Cube, FrameBound, GroupBy, GroupingList, GroupingSet, Partitioning, Rollup, Window, WindowFrame,
	WindowFrameBoundary, WindowFrameMode, WindowFunction, WindowFunctionFamily,
};
pub use series::{ComparisonOperator, Literal, Series, SortColumn};
