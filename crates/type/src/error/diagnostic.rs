// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, ErrorCategory, IntoDiagnostic, TypeError};

impl IntoDiagnostic for TypeError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			TypeError::IncomparableTypes {
				left,
				right,
				operator,
			} => Diagnostic {
				code: "TYPE_001".to_string(),
				category: ErrorCategory::Type,
				message: format!("Cannot compare {} with {} using '{}'", left, right, operator),
				label: Some(format!("{} and {} values", left.category(), right.category())),
				help: Some("Cast one side so both operands have a comparable type".to_string()),
				notes: vec![
					"Numbers compare with numbers, text with text, temporal values with the same temporal type"
						.to_string(),
				],
			},

			TypeError::UnsupportedOperation {
				dtype,
				operation,
			} => Diagnostic {
				code: "TYPE_002".to_string(),
				category: ErrorCategory::Type,
				message: format!("Operation {} is not supported for {}", operation, dtype),
				label: Some(format!("{} column", dtype)),
				help: None,
				notes: vec![],
			},
		}
	}
}
