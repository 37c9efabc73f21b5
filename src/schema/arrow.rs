// src/schema/arrow.rs

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int32Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field as ArrowField, Schema as ArrowSchema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use super::types::Observation;

/// Long-format layout:
/// - date     → Date32
/// - month    → Utf8 (locale-mapped name)
/// - day      → UInt32
/// - year     → Int32
/// - province → Utf8
/// - price    → Float64, nullable (absent price)
pub fn observation_schema() -> Arc<ArrowSchema> {
    Arc::new(ArrowSchema::new(vec![
        ArrowField::new("date", DataType::Date32, false),
        ArrowField::new("month", DataType::Utf8, false),
        ArrowField::new("day", DataType::UInt32, false),
        ArrowField::new("year", DataType::Int32, false),
        ArrowField::new("province", DataType::Utf8, false),
        ArrowField::new("price", DataType::Float64, /* nullable = */ true),
    ]))
}

/// Days from 0001-01-01 (CE) to 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// Build a single RecordBatch holding every observation, in order.
pub fn build_observation_batch(rows: &[Observation]) -> Result<RecordBatch, ArrowError> {
    let dates: Date32Array = rows.iter().map(|o| Some(days_since_epoch(o.date))).collect();
    let months: StringArray = rows.iter().map(|o| Some(o.month.as_str())).collect();
    let days: UInt32Array = rows.iter().map(|o| Some(o.day)).collect();
    let years: Int32Array = rows.iter().map(|o| Some(o.year)).collect();
    let provinces: StringArray = rows.iter().map(|o| Some(o.province.as_str())).collect();
    let prices: Float64Array = rows.iter().map(|o| o.price).collect();

    let cols: Vec<ArrayRef> = vec![
        Arc::new(dates),
        Arc::new(months),
        Arc::new(days),
        Arc::new(years),
        Arc::new(provinces),
        Arc::new(prices),
    ];
    RecordBatch::try_new(observation_schema(), cols)
}
