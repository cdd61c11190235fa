// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use bach_frame::{
	BaseNode, DataFrame, DataType, Dialect, FrameBound, Settings, WindowFrame, WindowFrameMode,
};
use common::{bigquery, postgres, setup_logging};

fn events(settings: Settings) -> DataFrame {
	DataFrame::new(
		BaseNode::new("events"),
		settings,
		&[("event_id", DataType::Int64)],
		&[("user_id", DataType::Int64), ("moment", DataType::Timestamp), ("value", DataType::Float64)],
	)
}

#[test]
fn test_running_total_per_user() {
	setup_logging();
	let df = events(Settings::default()).sort_values(&["moment"], &[true]).unwrap();
	let windowed = df.window(vec!["user_id".into()], None, None).unwrap();

	let value = windowed.column("value").unwrap();
	let total = value.sum(value.group_by()).unwrap();

	assert_eq!(
		postgres(total.expression()),
		"sum(\"value\") over (partition by \"user_id\" order by \"moment\" asc \
		 RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
	);
	assert!(total.has_windowed_aggregate_function());
	assert!(!total.has_aggregate_function());
	// a window keeps every row
	assert_eq!(total.index().keys().collect::<Vec<_>>(), vec!["event_id"]);
}

#[test]
fn test_rolling_mean_with_min_periods() {
	let df = events(Settings::default()).sort_values(&["moment"], &[true]).unwrap();
	let rolled = df.rolling(3, Some(2), false).unwrap();

	let value = rolled.column("value").unwrap();
	let mean = value.mean(value.group_by()).unwrap();

	let over = "over (order by \"moment\" asc ROWS BETWEEN 2 PRECEDING AND CURRENT ROW)";
	assert_eq!(
		postgres(mean.expression()),
		format!("case when (count(1) {over}) >= 2 then avg(\"value\") {over} else NULL end")
	);
}

#[test]
fn test_settings_frame_is_default_for_window() {
	let settings = Settings::new().window(WindowFrame::rows(FrameBound::preceding(1), FrameBound::following(1)));
	let df = events(settings).sort_values(&["event_id"], &[false]).unwrap();
	let windowed = df.window(vec![], None, None).unwrap();

	let value = windowed.column("value").unwrap();
	let max = value.max(value.group_by()).unwrap();
	assert_eq!(
		postgres(max.expression()),
		"max(\"value\") over (order by \"event_id\" desc ROWS BETWEEN 1 PRECEDING AND 1 FOLLOWING)"
	);
}

#[test]
fn test_rank_on_bigquery_drops_frame() {
	let settings = Settings::new().dialect(Dialect::BigQuery);
	let df = events(settings.clone()).sort_values(&["moment"], &[true]).unwrap();
	let windowed = df.window(vec!["user_id".into()], None, None).unwrap();
	let window = windowed.group_by().unwrap().as_window().unwrap();

	let value = windowed.column("value").unwrap();
	let rank = value.window_rank(window, &settings.dialect).unwrap();
	assert_eq!(bigquery(rank.expression()), "rank() over (partition by `user_id` order by `moment` asc)");
	assert_eq!(rank.dtype(), DataType::Int64);

	let lag = value.window_lag(window, 1, None, &settings.dialect).unwrap();
	assert_eq!(
		bigquery(lag.expression()),
		"lag(`value`, 1) over (partition by `user_id` order by `moment` asc \
		 RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
	);
}

#[test]
fn test_frame_without_rows_mode_offsets_fails() {
	let df = events(Settings::default());
	let frame = WindowFrame::new(WindowFrameMode::Range, Some(FrameBound::preceding(2)), None);
	let err = df.window(vec![], Some(frame), None).unwrap_err();
	assert_eq!(err.code(), "WINDOW_006");
}

#[test]
fn test_window_then_group_fails() {
	let df = events(Settings::default());
	let windowed = df.expanding(Some(1)).unwrap();
	let err = windowed.groupby(vec!["user_id".into()]).unwrap_err();
	assert_eq!(err.code(), "FRAME_005");
}

#[test]
fn test_compare_windowed_series() {
	let df = events(Settings::default()).sort_values(&["moment"], &[true]).unwrap();
	let windowed = df.expanding(None).unwrap();
	let value = windowed.column("value").unwrap();
	let running_max = value.max(value.group_by()).unwrap();

	let is_peak = value.compare(bach_frame::ComparisonOperator::Equal, &running_max).unwrap();
	assert_eq!(is_peak.dtype(), DataType::Bool);
	assert!(is_peak.has_windowed_aggregate_function());

	// ungrouped series of the same frame have another partition
	let plain = df.column("value").unwrap();
	assert_eq!(plain.compare(bach_frame::ComparisonOperator::Equal, &running_max).unwrap_err().code(), "SERIES_001");
}
