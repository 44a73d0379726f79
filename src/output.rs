use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;

use crate::error::ExtractError;
use crate::merge::merge_raw_tables;
use crate::model::{MergedOutput, PageRecord};

/// Pretty-printed JSON, newline terminated.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExtractError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn write_merged<W: Write>(
    writer: W,
    merged: &MergedOutput,
    delimiter: u8,
) -> Result<W, ExtractError> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_writer(writer);
    writer.write_record(&merged.headers)?;
    for row in &merged.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|error| ExtractError::Csv(error.into_error().into()))
}

/// Writes every raw grid of `pages` to one CSV file; returns the merged sheet.
pub fn write_raw_tables_csv(
    path: &Path,
    pages: &[PageRecord],
    delimiter: u8,
) -> Result<MergedOutput, ExtractError> {
    let merged = merge_raw_tables(pages);
    write_merged(BufWriter::new(File::create(path)?), &merged, delimiter)?;
    Ok(merged)
}

pub fn raw_tables_to_csv_string(
    pages: &[PageRecord],
    delimiter: u8,
) -> Result<String, ExtractError> {
    let merged = merge_raw_tables(pages);
    let bytes = write_merged(Vec::<u8>::new(), &merged, delimiter)?;
    String::from_utf8(bytes)
        .map_err(|error| ExtractError::InvalidOption(format!("invalid utf-8 csv output: {error}")))
}
