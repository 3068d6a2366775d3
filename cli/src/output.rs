use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use municourt::{MunicipalityRecord, RowData};

/// Write records as a pretty-printed JSON array.
pub fn write_json(path: &Path, records: &[MunicipalityRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("serializing JSON")?;
    fs::write(path, json).with_context(|| format!("writing JSON to {}", path.display()))
}

pub fn write_csv_file(path: &Path, records: &[MunicipalityRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, records).with_context(|| format!("writing CSV to {}", path.display()))
}

/// CSV header: the header fields, then `<row>_<column>` for every row of
/// the table.
pub fn csv_header() -> Vec<String> {
    let mut header: Vec<String> = ["County", "Municipality", "DateRange"]
        .map(String::from)
        .into();
    for (row, _) in MunicipalityRecord::default().rows() {
        header.extend(
            RowData::COLUMNS
                .iter()
                .map(|column| format!("{}_{}", row, column)),
        );
    }
    header
}

/// One record per CSV row, flattened in table order.
pub fn write_csv<W: Write>(writer: W, records: &[MunicipalityRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(csv_header())
        .context("writing header")?;

    for record in records {
        let mut row = vec![
            record.county.as_str(),
            record.municipality.as_str(),
            record.date_range.as_str(),
        ];
        for (_, data) in record.rows() {
            row.extend(data.values());
        }
        csv_writer.write_record(&row).context("writing record")?;
    }

    csv_writer.flush().context("flushing CSV")?;
    Ok(())
}
