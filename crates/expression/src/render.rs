// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_type::Result;
use tracing::instrument;

use crate::{Dialect, Expression, Token};

impl Expression {
	/// Renders this expression as SQL text for `dialect`.
	///
	/// Column references are qualified with `table_alias` when one is given.
	/// Rendering has no side effects; the same expression always renders to
	/// the same text.
	#[instrument(name = "expression::to_sql", level = "trace", skip_all, fields(dialect = %dialect))]
	pub fn to_sql(&self, dialect: &Dialect, table_alias: Option<&str>) -> Result<String> {
		dialect.family()?;
		let mut out = String::new();
		self.render_into(&mut out, dialect, table_alias)?;
		Ok(out)
	}

	fn render_into(&self, out: &mut String, dialect: &Dialect, table_alias: Option<&str>) -> Result<()> {
		for token in self.tokens() {
			match token {
				Token::Raw(sql) => out.push_str(sql),
				Token::ColumnReference(name) => {
					if let Some(alias) = table_alias {
						out.push_str(&dialect.quote_identifier(alias)?);
						out.push('.');
					}
					out.push_str(&dialect.quote_identifier(name)?);
				}
				Token::Identifier(name) => out.push_str(&dialect.quote_identifier(name)?),
				Token::StringValue(value) => out.push_str(&dialect.quote_string(value)?),
				Token::Expression(expression) => expression.render_into(out, dialect, table_alias)?,
			}
		}
		Ok(())
	}
}
