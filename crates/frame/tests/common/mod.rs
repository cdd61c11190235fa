// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use bach_frame::{Dialect, Expression};

/// Logs to the test writer, filtered by `RUST_LOG` (default: `info`).
pub fn setup_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.with_test_writer()
		.try_init();
}

pub fn postgres(expression: &Expression) -> String {
	expression.to_sql(&Dialect::Postgres, None).unwrap()
}

pub fn bigquery(expression: &Expression) -> String {
	expression.to_sql(&Dialect::BigQuery, None).unwrap()
}
