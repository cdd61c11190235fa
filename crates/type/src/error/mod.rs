// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::value::DataType;

mod diagnostic;

/// Broad class of a failure. Every diagnostic belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
	/// The caller built something invalid: a bad grouping column, an inverted frame, an unknown key.
	Validation,
	/// The target database cannot express what was asked for.
	Capability,
	/// Operands of incompatible types were combined.
	Type,
}

impl Display for ErrorCategory {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ErrorCategory::Validation => f.write_str("validation"),
			ErrorCategory::Capability => f.write_str("capability"),
			ErrorCategory::Type => f.write_str("type"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub category: ErrorCategory,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.code, self.message)?;
		if let Some(label) = &self.label {
			write!(f, " ({})", label)?;
		}
		if let Some(help) = &self.help {
			write!(f, "\n  help: {}", help)?;
		}
		for note in &self.notes {
			write!(f, "\n  note: {}", note)?;
		}
		Ok(())
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Box<Diagnostic>);

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		*self.0
	}

	pub fn code(&self) -> &str {
		&self.0.code
	}

	pub fn category(&self) -> ErrorCategory {
		self.0.category
	}

	pub fn message(&self) -> &str {
		&self.0.message
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl std::error::Error for Error {}

impl From<Diagnostic> for Error {
	fn from(diagnostic: Diagnostic) -> Self {
		Error(Box::new(diagnostic))
	}
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns early with the given domain error converted into an [`Error`].
#[macro_export]
macro_rules! return_error {
	($err:expr) => {
		return Err($crate::error::Error::from($err))
	};
}

#[derive(Debug, thiserror::Error)]
pub enum TypeError {
	#[error("Cannot compare {left} with {right}")]
	IncomparableTypes {
		left: DataType,
		right: DataType,
		operator: String,
	},

	#[error("Operation {operation} is not supported for {dtype}")]
	UnsupportedOperation {
		dtype: DataType,
		operation: String,
	},
}

impl From<TypeError> for Error {
	fn from(err: TypeError) -> Self {
		Error(Box::new(err.into_diagnostic()))
	}
}
