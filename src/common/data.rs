//! Readers for the three source-file formats.

use std::{fs::File, io::Cursor, path::Path};

use anyhow::{Context, Result};
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use shapefile::{dbase::Record, Reader, Shape};

/// Reads a `;`-separated file with a single header row into a DataFrame.
pub(crate) fn read_semicolon_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open results file: {}", path.display()))?;
    read_semicolon_reader(file, true)
        .with_context(|| format!("Failed to read results from {}", path.display()))
}

/// Reads a `;`-separated table from bytes (for tests and in-memory hosts).
pub(crate) fn read_semicolon_csv_bytes(bytes: &[u8]) -> Result<DataFrame> {
    read_semicolon_reader(Cursor::new(bytes.to_vec()), true)
        .context("Failed to read results from bytes")
}

/// Reads a headerless `;`-separated body; callers attach the column names.
pub(crate) fn read_semicolon_body(bytes: &[u8]) -> Result<DataFrame> {
    read_semicolon_reader(Cursor::new(bytes.to_vec()), false)
        .context("Failed to read result body from bytes")
}

fn read_semicolon_reader<R: MmapBytesReader + 'static>(reader: R, has_header: bool) -> Result<DataFrame> {
    Ok(CsvReadOptions::default()
        .with_has_header(has_header)
        .map_parse_options(|po| po.with_separator(b';'))
        .into_reader_with_file_handle(reader)
        .finish()?)
}

/// Reads all shapes + attribute records from a given `.shp` file path.
pub(crate) fn read_shapefile(path: &Path) -> Result<Vec<(Shape, Record)>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let mut items = Vec::with_capacity(reader.shape_count()?);
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result.context("Error reading shape+record")?;
        items.push((shape, record));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semicolon_header_and_body() {
        let df = read_semicolon_csv_bytes(b"a;b\n1;x\n2;y\n").unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names()[0].as_str(), "a");
    }

    #[test]
    fn headerless_body() {
        let df = read_semicolon_body(b"1;x\n2;y\n").unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
    }
}
