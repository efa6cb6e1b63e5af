//! CSV import of punch sheets.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::config::ColumnConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::PunchRecord;

fn column_index(headers: &StringRecord, name: &str) -> EngineResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| EngineError::MissingColumn {
            column: name.to_string(),
        })
}

/// Reads punch rows from CSV with a header line.
///
/// Columns are located by the configured header names, so extra columns
/// and any column order are accepted. Cell values are trimmed; date and
/// time text is left unparsed for the day filter.
///
/// # Example
///
/// ```
/// use shift_hours::config::ColumnConfig;
/// use shift_hours::spreadsheet::read_punch_csv;
///
/// let data = "Name,Date,Punch Time,I/O Type\nAlice,15/01/2024,09:00:00,IN\n";
/// let records = read_punch_csv(data.as_bytes(), &ColumnConfig::default()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].io_type, "IN");
/// ```
pub fn read_punch_csv<R: Read>(reader: R, columns: &ColumnConfig) -> EngineResult<Vec<PunchRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let person = column_index(&headers, &columns.person)?;
    let date = column_index(&headers, &columns.date)?;
    let punch_time = column_index(&headers, &columns.punch_time)?;
    let direction = column_index(&headers, &columns.direction)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |i: usize| row.get(i).unwrap_or_default().to_string();
        records.push(PunchRecord {
            name: cell(person),
            date: cell(date),
            punch_time: cell(punch_time),
            io_type: cell(direction),
        });
    }

    Ok(records)
}
