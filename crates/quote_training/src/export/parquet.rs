use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::evaluation::PredictionRecord;

pub(crate) fn export_predictions_impl(
    predictions: &[PredictionRecord],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch = build_record_batch(predictions)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

fn build_record_batch(
    predictions: &[PredictionRecord],
) -> Result<RecordBatch, arrow::error::ArrowError> {
    let schema = Arc::new(parquet_schema());
    let arrays = build_arrays(predictions);

    RecordBatch::try_new(schema, arrays)
}

fn parquet_schema() -> Schema {
    Schema::new(vec![
        Field::new("row_index", DataType::UInt64, false),
        Field::new("hour_of_day", DataType::UInt8, false),
        Field::new("vehicle_type", DataType::Utf8, false),
        Field::new("trip_distance", DataType::Float64, false),
        Field::new("actual_min", DataType::Float64, false),
        Field::new("predicted_min", DataType::Float64, false),
        Field::new("error_min", DataType::Float64, false),
    ])
}

fn build_arrays(predictions: &[PredictionRecord]) -> Vec<ArrayRef> {
    vec![
        Arc::new(UInt64Array::from(
            predictions
                .iter()
                .map(|p| p.row_index as u64)
                .collect::<Vec<_>>(),
        )),
        Arc::new(UInt8Array::from(
            predictions.iter().map(|p| p.hour_of_day).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            predictions
                .iter()
                .map(|p| p.vehicle_type.name())
                .collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            predictions
                .iter()
                .map(|p| p.trip_distance)
                .collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            predictions.iter().map(|p| p.actual_min).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            predictions
                .iter()
                .map(|p| p.predicted_min)
                .collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            predictions.iter().map(|p| p.error_min()).collect::<Vec<_>>(),
        )),
    ]
}
