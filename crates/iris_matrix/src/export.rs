use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use thiserror::Error;

use crate::{
    cell::{Cell, format_duration},
    matrix_params::DurationFormat,
    travel_matrix::TravelMatrix,
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Text of one cell in the exported table.
///
/// Only routed cells carry a value, the diagonal and unresolved pairs are `0`.
pub fn cell_text(cell: &Cell, format: DurationFormat) -> String {
    if !cell.is_routed() {
        return "0".to_string();
    }

    match format {
        DurationFormat::Raw => format!("{:.2}", cell.duration),
        DurationFormat::Readable => cell
            .display
            .clone()
            .unwrap_or_else(|| format_duration(cell.duration)),
    }
}

/// Writes the duration matrix as CSV: a header of city names preceded by an
/// empty field, then one record per source city.
pub fn write_csv<W: Write>(
    writer: W,
    matrix: &TravelMatrix,
    format: DurationFormat,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    let header = std::iter::once("").chain(matrix.cities().iter().map(String::as_str));
    csv_writer.write_record(header)?;

    for (city, row) in matrix.cities().iter().zip(matrix.rows()) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(city.clone());
        record.extend(row.iter().map(|cell| cell_text(cell, format)));

        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;

    Ok(())
}

pub fn save_csv(
    path: &Path,
    matrix: &TravelMatrix,
    format: DurationFormat,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::with_capacity(64 * 1024, file);
    write_csv(writer, matrix, format)
}
