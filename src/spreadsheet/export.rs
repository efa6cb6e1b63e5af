//! Export of shift summaries to XLSX and CSV.

use csv::Writer;
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use tracing::info;

use crate::calculation::{DATE_FORMAT, format_duration};
use crate::error::{EngineError, EngineResult};
use crate::models::{SheetSummaries, ShiftSummary};

/// Column headers of a results sheet.
pub const SUMMARY_HEADERS: [&str; 5] = [
    "Date",
    "Name",
    "Total Time from Login to Logout (including breaks)",
    "Break Time",
    "Total Hours Worked (excluding breaks)",
];

const MAX_SHEET_NAME_CHARS: usize = 31;
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Renders one summary as the cells of a results row.
pub fn summary_row(summary: &ShiftSummary) -> [String; 5] {
    [
        summary.date.format(DATE_FORMAT).to_string(),
        summary.person.clone(),
        format_duration(summary.gross_duration),
        format_duration(summary.break_duration),
        format_duration(summary.net_duration),
    ]
}

/// Builds a valid, unique worksheet name `Results_{sheet}`.
///
/// Characters Excel forbids are replaced, the name is cut to 31
/// characters and a numeric suffix is added when it is already taken.
fn results_sheet_name(sheet: &str, taken: &[String]) -> String {
    let cleaned: String = sheet
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let truncated: String = format!("Results_{}", cleaned)
        .chars()
        .take(MAX_SHEET_NAME_CHARS)
        .collect();
    // Excel rejects a trailing apostrophe
    let base = truncated.trim_end_matches('\'').to_string();

    // Excel compares worksheet names case-insensitively, beyond ASCII too
    let lowered: Vec<String> = taken.iter().map(|t| t.to_lowercase()).collect();
    let is_taken = |name: &str| lowered.contains(&name.to_lowercase());
    if !is_taken(&base) {
        return base;
    }

    let mut n = 2;
    loop {
        let suffix = format!("_{}", n);
        let keep = MAX_SHEET_NAME_CHARS - suffix.chars().count();
        let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn write_results_sheet(worksheet: &mut Worksheet, summaries: &[ShiftSummary]) -> EngineResult<()> {
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new().set_border(FormatBorder::Thin);

    let mut widths: Vec<usize> = SUMMARY_HEADERS.iter().map(|h| h.chars().count()).collect();

    for (col, header) in SUMMARY_HEADERS.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (i, summary) in summaries.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in summary_row(summary).iter().enumerate() {
            worksheet.write_with_format(row, col as u16, value.as_str(), &cell_format)?;
            widths[col] = widths[col].max(value.chars().count());
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width as f64 + 2.0)?;
    }

    Ok(())
}

/// Writes the summaries of every completed sheet into one XLSX workbook.
///
/// Each sheet with at least one summary becomes a worksheet named
/// `Results_{sheet}`. Failed and empty sheets are skipped; when nothing is
/// left the workbook holds a single "No data available" sheet.
pub fn summaries_to_xlsx(sheets: &[SheetSummaries]) -> EngineResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let mut names: Vec<String> = Vec::new();

    for sheet in sheets.iter().filter(|s| !s.summaries().is_empty()) {
        let name = results_sheet_name(&sheet.name, &names);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&name)?;
        write_results_sheet(worksheet, sheet.summaries())?;
        names.push(name);
    }

    if names.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Results")?;
        worksheet.write(0, 0, "No data available")?;
    }

    let buffer = workbook.save_to_buffer()?;
    info!(worksheets = names.len(), bytes = buffer.len(), "Exported XLSX");
    Ok(buffer)
}

/// Writes the summaries of every completed sheet as one CSV table.
///
/// The first column holds the source sheet name.
///
/// # Example
///
/// ```
/// use shift_hours::spreadsheet::summaries_to_csv;
///
/// let csv = summaries_to_csv(&[]).unwrap();
/// assert!(csv.starts_with("Sheet,Date,Name,"));
/// ```
pub fn summaries_to_csv(sheets: &[SheetSummaries]) -> EngineResult<String> {
    let mut writer = Writer::from_writer(Vec::new());

    let mut header = vec!["Sheet"];
    header.extend(SUMMARY_HEADERS);
    writer.write_record(&header)?;

    for sheet in sheets {
        for summary in sheet.summaries() {
            let cells = summary_row(summary);
            let record = std::iter::once(sheet.name.as_str())
                .chain(cells.iter().map(String::as_str));
            writer.write_record(record)?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}
