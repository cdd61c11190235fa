// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	convert::Infallible,
	fmt::{Display, Formatter},
	str::FromStr,
};

use bach_type::Result;
use serde::{Deserialize, Serialize};

use crate::error::DialectError;

/// The SQL dialect generated fragments are rendered for.
///
/// `Other` carries the name of a dialect reported by a collaborator that this
/// crate does not know how to target. Constructing it never fails; using it
/// for rendering or capability checks does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Dialect {
	#[default]
	Postgres,
	BigQuery,
	Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectFamily {
	/// Classic row-store engines, e.g. PostgreSQL
	RowStore,
	/// Columnar analytics engines, e.g. BigQuery
	ColumnarAnalytics,
}

impl Dialect {
	pub fn name(&self) -> &str {
		match self {
			Dialect::Postgres => "postgresql",
			Dialect::BigQuery => "bigquery",
			Dialect::Other(name) => name,
		}
	}

	pub fn family(&self) -> Result<DialectFamily> {
		match self {
			Dialect::Postgres => Ok(DialectFamily::RowStore),
			Dialect::BigQuery => Ok(DialectFamily::ColumnarAnalytics),
			Dialect::Other(name) => Err(DialectError::NotSupported {
				name: name.clone(),
			}
			.into()),
		}
	}

	pub fn is_postgres(&self) -> bool {
		matches!(self, Dialect::Postgres)
	}

	pub fn is_bigquery(&self) -> bool {
		matches!(self, Dialect::BigQuery)
	}

	/// Quotes `name` so it is always read as a single identifier.
	pub fn quote_identifier(&self, name: &str) -> Result<String> {
		match self.family()? {
			DialectFamily::RowStore => Ok(format!("\"{}\"", name.replace('"', "\"\""))),
			DialectFamily::ColumnarAnalytics => {
				Ok(format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`")))
			}
		}
	}

	/// Quotes `value` as a string literal.
	pub fn quote_string(&self, value: &str) -> Result<String> {
		match self.family()? {
			DialectFamily::RowStore => Ok(format!("'{}'", value.replace('\'', "''"))),
			// BigQuery does not accept doubled quotes inside a quoted string
			DialectFamily::ColumnarAnalytics => {
				Ok(format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'")))
			}
		}
	}
}

impl Display for Dialect {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl From<&str> for Dialect {
	fn from(name: &str) -> Self {
		match name.to_ascii_lowercase().as_str() {
			"postgres" | "postgresql" => Dialect::Postgres,
			"bigquery" => Dialect::BigQuery,
			_ => Dialect::Other(name.to_string()),
		}
	}
}

impl FromStr for Dialect {
	type Err = Infallible;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Ok(Dialect::from(s))
	}
}

impl From<String> for Dialect {
	fn from(name: String) -> Self {
		Dialect::from(name.as_str())
	}
}

impl From<Dialect> for String {
	fn from(dialect: Dialect) -> Self {
		dialect.name().to_string()
	}
}
