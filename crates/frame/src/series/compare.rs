// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use bach_expression::Expression;
use bach_type::{DataType, Result, TypeError};

use crate::{Series, error::SeriesError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
	Equal,
	NotEqual,
	LessThan,
	LessThanEqual,
	GreaterThan,
	GreaterThanEqual,
}

impl ComparisonOperator {
	pub fn symbol(&self) -> &'static str {
		match self {
			ComparisonOperator::Equal => "=",
			ComparisonOperator::NotEqual => "<>",
			ComparisonOperator::LessThan => "<",
			ComparisonOperator::LessThanEqual => "<=",
			ComparisonOperator::GreaterThan => ">",
			ComparisonOperator::GreaterThanEqual => ">=",
		}
	}
}

impl Display for ComparisonOperator {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.symbol())
	}
}

/// A value to compare a series against.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Int(i64),
	Float(f64),
	String(String),
	Bool(bool),
}

impl Literal {
	pub fn dtype(&self) -> DataType {
		match self {
			Literal::Int(_) => DataType::Int64,
			Literal::Float(_) => DataType::Float64,
			Literal::String(_) => DataType::String,
			Literal::Bool(_) => DataType::Bool,
		}
	}

	/// Fails with `SERIES_005` for NaN and infinite floats, which have no
	/// portable SQL literal.
	pub fn expression(&self) -> Result<Expression> {
		Ok(match self {
			Literal::Int(value) => Expression::constant(value.to_string()),
			Literal::Float(value) => {
				if !value.is_finite() {
					return Err(SeriesError::NonFiniteLiteral {
						value: value.to_string(),
					}
					.into());
				}
				Expression::constant(format!("{:?}", value))
			}
			Literal::String(value) => Expression::string_value(value.clone()),
			Literal::Bool(value) => Expression::constant(value.to_string()),
		})
	}
}

impl From<i64> for Literal {
	fn from(value: i64) -> Self {
		Literal::Int(value)
	}
}

impl From<f64> for Literal {
	fn from(value: f64) -> Self {
		Literal::Float(value)
	}
}

impl From<&str> for Literal {
	fn from(value: &str) -> Self {
		Literal::String(value.to_string())
	}
}

impl From<bool> for Literal {
	fn from(value: bool) -> Self {
		Literal::Bool(value)
	}
}

impl Series {
	/// `(self) op (other)` as a boolean series aligned with `self`.
	pub fn compare(&self, operator: ComparisonOperator, other: &Series) -> Result<Series> {
		check_comparable(self.dtype, other.dtype, operator)?;

		if self.base_node != other.base_node || self.group_by != other.group_by {
			return Err(SeriesError::PartitionMismatch {
				left: self.name.clone(),
				right: other.name.clone(),
			}
			.into());
		}

		self.comparison(operator, other.expression.clone())
	}

	pub fn compare_value(&self, operator: ComparisonOperator, value: impl Into<Literal>) -> Result<Series> {
		let value = value.into();
		check_comparable(self.dtype, value.dtype(), operator)?;
		self.comparison(operator, value.expression()?)
	}

	fn comparison(&self, operator: ComparisonOperator, other: Expression) -> Result<Series> {
		let expression =
			Expression::construct(&format!("({{}}) {} ({{}})", operator.symbol()), [self.expression.clone(), other])?;
		Ok(self.with_expression(expression).with_dtype(DataType::Bool))
	}
}

fn check_comparable(left: DataType, right: DataType, operator: ComparisonOperator) -> Result<()> {
	if left.is_comparable_with(&right) {
		return Ok(());
	}
	Err(TypeError::IncomparableTypes {
		left,
		right,
		operator: operator.symbol().to_string(),
	}
	.into())
}
