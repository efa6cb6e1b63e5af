//! XLSX import of punch workbooks.

use std::io::Cursor;

use calamine::{Data, DataType, Range, Reader, Xlsx};
use chrono::Duration;
use tracing::debug;

use crate::calculation::{DATE_FORMAT, TIME_FORMAT};
use crate::config::ColumnConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{PunchRecord, Sheet, Workbook};

/// Renders a cell as the text the day filter expects.
///
/// Date and time cells are formatted with `datetime_format` when one is
/// given; text is trimmed.
fn cell_text(cell: Option<&Data>, datetime_format: Option<&str>) -> String {
    let Some(cell) = cell else {
        return String::new();
    };
    match (cell, datetime_format) {
        (Data::Empty, _) => String::new(),
        (Data::String(text), _) => text.trim().to_string(),
        // Excel stores times as fractions of a day; round to the second
        (Data::DateTime(_) | Data::DateTimeIso(_), Some(format)) => cell
            .as_datetime()
            .map(|dt| (dt + Duration::milliseconds(500)).format(format).to_string())
            .unwrap_or_else(|| cell.to_string()),
        _ => cell.to_string(),
    }
}

fn column_index(headers: &[String], name: &str) -> EngineResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| EngineError::MissingColumn {
            column: name.to_string(),
        })
}

fn read_sheet(
    name: String,
    range: &Range<Data>,
    columns: &ColumnConfig,
) -> EngineResult<Sheet> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Sheet { name, rows: vec![] });
    };
    let headers: Vec<String> = header.iter().map(|c| cell_text(Some(c), None)).collect();

    let person = column_index(&headers, &columns.person)?;
    let date = column_index(&headers, &columns.date)?;
    let punch_time = column_index(&headers, &columns.punch_time)?;
    let direction = column_index(&headers, &columns.direction)?;

    let records: Vec<PunchRecord> = rows
        .map(|row| PunchRecord {
            name: cell_text(row.get(person), None),
            date: cell_text(row.get(date), Some(DATE_FORMAT)),
            punch_time: cell_text(row.get(punch_time), Some(TIME_FORMAT)),
            io_type: cell_text(row.get(direction), None),
        })
        .filter(|r| {
            !(r.name.is_empty()
                && r.date.is_empty()
                && r.punch_time.is_empty()
                && r.io_type.is_empty())
        })
        .collect();

    debug!(sheet = %name, rows = records.len(), "Read worksheet");
    Ok(Sheet { name, rows: records })
}

/// Reads every worksheet of an XLSX punch workbook, in workbook order.
///
/// The first row of each worksheet holds the headers; columns are found
/// by the configured names, as for CSV. Date and time cells typed as
/// such in Excel are rendered as `DD/MM/YYYY` and `HH:MM:SS`. Blank rows
/// are skipped and an empty worksheet yields a sheet without rows.
///
/// # Errors
///
/// `WorkbookError` when the bytes are not a readable XLSX file and
/// `MissingColumn` when a non-empty worksheet lacks a configured header.
pub fn read_punch_workbook(data: &[u8], columns: &ColumnConfig) -> EngineResult<Workbook> {
    let mut excel: Xlsx<_> = Xlsx::new(Cursor::new(data))?;

    let mut sheets = Vec::new();
    for name in excel.sheet_names() {
        let range = excel.worksheet_range(&name)?;
        sheets.push(read_sheet(name, &range, columns)?);
    }

    Ok(Workbook { sheets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::summarize_workbook;
    use crate::config::EngineConfig;
    use rust_xlsxwriter::{ExcelDateTime, Format};

    const HEADER: [&str; 4] = ["Name", "Date", "Punch Time", "I/O Type"];

    fn punch_workbook(sheets: &[(&str, Vec<[&str; 4]>)]) -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        for (name, rows) in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(*name).unwrap();
            for (r, cells) in rows.iter().enumerate() {
                for (c, value) in cells.iter().enumerate() {
                    worksheet.write(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_reads_sheets_in_workbook_order() {
        let bytes = punch_workbook(&[
            (
                "January",
                vec![
                    HEADER,
                    ["Alice", "15/01/2024", "09:00:00", "IN"],
                    ["Alice", "15/01/2024", "17:00:00", "OUT"],
                ],
            ),
            (
                "February",
                vec![HEADER, ["Bob", "01/02/2024", "08:00:00", "IN"]],
            ),
        ]);

        let workbook = read_punch_workbook(&bytes, &ColumnConfig::default()).unwrap();
        assert_eq!(workbook.sheets.len(), 2);
        assert_eq!(workbook.sheets[0].name, "January");
        assert_eq!(workbook.sheets[0].rows.len(), 2);
        assert_eq!(workbook.sheets[0].rows[1].io_type, "OUT");
        assert_eq!(workbook.sheets[1].name, "February");
        assert_eq!(workbook.sheets[1].rows[0].name, "Bob");
    }

    #[test]
    fn test_workbook_is_summarised_per_sheet() {
        let bytes = punch_workbook(&[
            (
                "Day Shift",
                vec![
                    HEADER,
                    ["Alice", "15/01/2024", "09:00:00", "IN"],
                    ["Alice", "15/01/2024", "12:00:00", "OUT"],
                    ["Alice", "15/01/2024", "13:00:00", "IN"],
                    ["Alice", "15/01/2024", "17:00:00", "OUT"],
                ],
            ),
            (
                "Broken",
                vec![HEADER, ["Bob", "2024-01-15", "09:00:00", "IN"]],
            ),
        ]);

        let workbook = read_punch_workbook(&bytes, &ColumnConfig::default()).unwrap();
        let results = summarize_workbook(&workbook, &EngineConfig::default());

        let summary = &results[0].summaries()[0];
        assert_eq!(summary.gross_duration, Duration::hours(8));
        assert_eq!(summary.break_duration, Duration::hours(1));
        assert_eq!(summary.net_duration, Duration::hours(7));
        assert!(matches!(
            results[1].error(),
            Some(EngineError::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_typed_date_and_time_cells_are_formatted() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let date_format = Format::new().set_num_format("dd/mm/yyyy");
        let time_format = Format::new().set_num_format("hh:mm:ss");
        let worksheet = workbook.add_worksheet();
        for (c, header) in HEADER.iter().enumerate() {
            worksheet.write(0, c as u16, *header).unwrap();
        }
        worksheet.write(1, 0, "Alice").unwrap();
        let date = ExcelDateTime::from_ymd(2024, 1, 15).unwrap();
        let time = ExcelDateTime::from_hms(9, 30, 0).unwrap();
        worksheet
            .write_datetime_with_format(1, 1, &date, &date_format)
            .unwrap();
        worksheet
            .write_datetime_with_format(1, 2, &time, &time_format)
            .unwrap();
        worksheet.write(1, 3, "IN").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let workbook = read_punch_workbook(&bytes, &ColumnConfig::default()).unwrap();
        let record = &workbook.sheets[0].rows[0];
        assert_eq!(record.date, "15/01/2024");
        assert_eq!(record.punch_time, "09:30:00");
    }

    #[test]
    fn test_blank_rows_and_empty_sheets() {
        let bytes = punch_workbook(&[
            (
                "Gaps",
                vec![
                    HEADER,
                    ["Alice", "15/01/2024", "09:00:00", "IN"],
                    ["", "", "", ""],
                    ["Alice", "15/01/2024", "17:00:00", "OUT"],
                ],
            ),
            ("Empty", vec![]),
        ]);

        let workbook = read_punch_workbook(&bytes, &ColumnConfig::default()).unwrap();
        assert_eq!(workbook.sheets[0].rows.len(), 2);
        assert!(workbook.sheets[1].rows.is_empty());
    }

    #[test]
    fn test_missing_column_is_error() {
        let bytes = punch_workbook(&[(
            "Sheet1",
            vec![
                ["Name", "Date", "Time", "I/O Type"],
                ["Alice", "15/01/2024", "09:00:00", "IN"],
            ],
        )]);

        match read_punch_workbook(&bytes, &ColumnConfig::default()) {
            Err(EngineError::MissingColumn { column }) => assert_eq!(column, "Punch Time"),
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_not_a_workbook_is_error() {
        let result = read_punch_workbook(b"Name,Date\n", &ColumnConfig::default());
        assert!(matches!(result, Err(EngineError::WorkbookError { .. })));
    }
}
