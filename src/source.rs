//! Record source: maps tabular input onto the fixed record schema.
//!
//! Rows arrive as Arrow record batches (or a Parquet file of them) whose
//! column headers must match the schema's feature names exactly
//! (case-sensitive). Extra columns are ignored; a missing required column
//! is a schema error. Nulls and non-finite values become missing feature
//! values for the imputation stage.

use std::fs::File;
use std::path::Path;

use arrow::array::{Array, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use tracing::debug;

use crate::schema::{ExoplanetRecord, Feature};
use crate::{Error, Result};

/// Convert one record batch into records.
///
/// # Errors
///
/// - [`Error::Schema`] if a required feature column is absent
/// - [`Error::Arrow`] if a column cannot be cast to `Float64`
pub fn records_from_batch(batch: &RecordBatch) -> Result<Vec<ExoplanetRecord>> {
    let schema = batch.schema();
    let mut columns: Vec<Float64Array> = Vec::with_capacity(Feature::ALL.len());
    for feature in Feature::ALL {
        let index = schema
            .fields()
            .iter()
            .position(|field| field.name() == feature.name())
            .ok_or_else(|| {
                Error::Schema(format!(
                    "required column '{}' not found (column names are case-sensitive)",
                    feature.name()
                ))
            })?;
        let column = cast(batch.column(index), &DataType::Float64)?;
        let column = column
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| {
                Error::Storage(format!(
                    "column '{}' did not cast to Float64",
                    feature.name()
                ))
            })?
            .clone();
        columns.push(column);
    }

    let records = (0..batch.num_rows())
        .map(|row| {
            let mut record = ExoplanetRecord::default();
            for (feature, column) in Feature::ALL.iter().zip(&columns) {
                if !column.is_null(row) {
                    let value = column.value(row);
                    if value.is_finite() {
                        record.set(*feature, Some(value));
                    }
                }
            }
            record
        })
        .collect();
    Ok(records)
}

/// Load records from a Parquet file.
///
/// # Errors
///
/// Returns [`Error::Storage`] if the file cannot be read or parsed, plus
/// the conditions of [`records_from_batch`].
pub fn load_parquet<P: AsRef<Path>>(path: P) -> Result<Vec<ExoplanetRecord>> {
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    let file = File::open(path.as_ref())
        .map_err(|e| Error::Storage(format!("failed to open Parquet file: {e}")))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::Storage(format!("failed to parse Parquet file: {e}")))?;
    let reader = builder
        .build()
        .map_err(|e| Error::Storage(format!("failed to create Parquet reader: {e}")))?;

    let mut records = Vec::new();
    for batch in reader {
        let batch =
            batch.map_err(|e| Error::Storage(format!("failed to read record batch: {e}")))?;
        records.extend(records_from_batch(&batch)?);
    }
    debug!(
        rows = records.len(),
        path = %path.as_ref().display(),
        "records loaded"
    );
    Ok(records)
}
