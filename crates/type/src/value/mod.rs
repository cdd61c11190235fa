// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

mod r#type;

pub use r#type::{DataType, TypeCategory};
