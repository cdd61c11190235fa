// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_type::{Diagnostic, Error, ErrorCategory, IntoDiagnostic};

#[derive(Debug, thiserror::Error)]
pub enum ExpressionError {
	#[error("Template has {expected} placeholders but {actual} arguments were given")]
	PlaceholderMismatch {
		template: String,
		expected: usize,
		actual: usize,
	},
}

impl IntoDiagnostic for ExpressionError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			ExpressionError::PlaceholderMismatch {
				template,
				expected,
				actual,
			} => Diagnostic {
				code: "EXPRESSION_001".to_string(),
				category: ErrorCategory::Validation,
				message: format!(
					"Template '{}' has {} placeholders but {} arguments were given",
					template, expected, actual
				),
				label: Some("placeholder count mismatch".to_string()),
				help: Some("Pass exactly one sub-expression per '{}' slot in the template".to_string()),
				notes: vec![],
			},
		}
	}
}

impl From<ExpressionError> for Error {
	fn from(err: ExpressionError) -> Self {
		Error(Box::new(err.into_diagnostic()))
	}
}

#[derive(Debug, thiserror::Error)]
pub enum DialectError {
	#[error("Database dialect '{name}' is not supported")]
	NotSupported {
		name: String,
	},

	#[error("{function} does not support a window frame clause on {dialect}")]
	WindowFrameNotSupported {
		function: String,
		dialect: String,
		frame_clause: String,
	},
}

impl IntoDiagnostic for DialectError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			DialectError::NotSupported {
				name,
			} => Diagnostic {
				code: "DIALECT_001".to_string(),
				category: ErrorCategory::Capability,
				message: format!("Database dialect '{}' is not supported", name),
				label: Some("unknown dialect".to_string()),
				help: Some("Use one of the supported dialects: postgresql, bigquery".to_string()),
				notes: vec![],
			},

			DialectError::WindowFrameNotSupported {
				function,
				dialect,
				frame_clause,
			} => Diagnostic {
				code: "DIALECT_002".to_string(),
				category: ErrorCategory::Capability,
				message: format!("{} does not support a window frame clause on {}", function, dialect),
				label: Some(format!("frame clause '{}'", frame_clause)),
				help: Some("Remove the frame clause from the window before applying this function".to_string()),
				notes: vec![
					"Numbering functions such as rank and row_number compute over the whole partition"
						.to_string(),
				],
			},
		}
	}
}

impl From<DialectError> for Error {
	fn from(err: DialectError) -> Self {
		Error(Box::new(err.into_diagnostic()))
	}
}
