// src/export.rs

use csv::WriterBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::{
    ffi::OsString,
    fs,
    fs::File,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::dataset::Dataset;
use crate::error::{PriceError, Result};
use crate::schema::{build_observation_batch, observation_schema};

/// `out.parquet` → `out.parquet.tmp`, next to the final file.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the long table as a single-row-group Parquet file.
/// Goes to `<path>.tmp` first and is renamed into place once closed;
/// the temp file is removed again if any step fails.
#[tracing::instrument(level = "info", skip(dataset, path), fields(path = %path.as_ref().display()))]
pub fn write_parquet<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<usize> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path);

    let batch = build_observation_batch(dataset.observations())
        .map_err(|e| PriceError::export(path, e))?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .set_dictionary_enabled(true)
        .build();

    let file = File::create(&temp_path).map_err(|e| PriceError::export(&temp_path, e))?;
    let written = ArrowWriter::try_new(file, observation_schema(), Some(props))
        .and_then(|mut writer| {
            writer.write(&batch)?;
            writer.close()
        })
        .map_err(|e| PriceError::export(path, e))
        .and_then(|_| fs::rename(&temp_path, path).map_err(|e| PriceError::export(path, e)));

    if let Err(e) = written {
        if let Err(rm) = fs::remove_file(&temp_path) {
            warn!(temp = %temp_path.display(), "failed to remove temp file: {}", rm);
        }
        return Err(e);
    }

    info!(rows = batch.num_rows(), "wrote parquet");
    Ok(batch.num_rows())
}

/// Write the long table as `;`-separated text, dates as `DD/MM/YYYY`.
#[tracing::instrument(level = "info", skip(dataset, path), fields(path = %path.as_ref().display()))]
pub fn write_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<usize> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .map_err(|e| PriceError::export(path, e))?;

    wtr.write_record(["date", "month", "day", "year", "province", "price"])
        .map_err(|e| PriceError::export(path, e))?;
    for o in dataset.observations() {
        let price = o.price.map(|p| p.to_string()).unwrap_or_default();
        wtr.write_record([
            o.date.format("%d/%m/%Y").to_string(),
            o.month.clone(),
            o.day.to_string(),
            o.year.to_string(),
            o.province.clone(),
            price,
        ])
        .map_err(|e| PriceError::export(path, e))?;
    }
    wtr.flush().map_err(|e| PriceError::export(path, e))?;

    info!(rows = dataset.len(), "wrote csv");
    Ok(dataset.len())
}
