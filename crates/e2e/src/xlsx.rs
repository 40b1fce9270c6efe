//! Rendering a report sheet to an .xlsx workbook

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

use mindgames_common::{Cell, Result, RowStyle};

use crate::report::ReportSheet;

const HEADER_FILL: u32 = 0x4F81BD;
const PASS_FILL: u32 = 0xC6EFCE;
const FAIL_FILL: u32 = 0xFFC7CE;

fn format_for(style: Option<RowStyle>) -> Format {
    match style {
        None => Format::new(),
        Some(RowStyle::Header) => Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter),
        Some(RowStyle::Pass) => result_format(PASS_FILL),
        Some(RowStyle::Fail) => result_format(FAIL_FILL),
        Some(RowStyle::BoldSummary) => Format::new().set_bold(),
    }
}

fn result_format(fill: u32) -> Format {
    Format::new()
        .set_background_color(Color::RGB(fill))
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
        .set_align(FormatAlign::Top)
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell, format: &Format) -> Result<()> {
    match cell {
        Cell::Blank => {}
        Cell::Text(text) => {
            sheet.write_string_with_format(row, col, text, format)?;
        }
        Cell::Number(n) => {
            sheet.write_number_with_format(row, col, *n as f64, format)?;
        }
    }
    Ok(())
}

/// Non-blank cells of a row with their column index
fn written_cells(cells: &[Cell]) -> impl Iterator<Item = (u16, &Cell)> + '_ {
    cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| !matches!(cell, Cell::Blank))
        .map(|(col, cell)| (col as u16, cell))
}

/// Column widths to apply, empty until the sheet has been fitted
fn column_settings(report: &ReportSheet) -> Vec<(u16, f64)> {
    report
        .column_widths()
        .map(|widths| {
            widths
                .iter()
                .enumerate()
                .map(|(col, width)| (col as u16, *width))
                .collect()
        })
        .unwrap_or_default()
}

/// Write `report` as a single-sheet workbook at `path`
pub fn write_sheet(report: &ReportSheet, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(report.name())?;

    for (row_idx, row) in report.all_rows().iter().enumerate() {
        let format = format_for(row.style);
        for (col_idx, cell) in written_cells(&row.cells) {
            write_cell(sheet, row_idx as u32, col_idx, cell, &format)?;
        }
    }

    for (col_idx, width) in column_settings(report) {
        sheet.set_column_width(col_idx, width)?;
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{append_summary, ReportSink, ResultLogger};
    use mindgames_common::{ReportRow, Status, TestResult};
    use std::io::Read;

    fn filled(rgb: u32) -> Format {
        Format::new()
            .set_background_color(Color::RGB(rgb))
            .set_border(FormatBorder::Thin)
            .set_text_wrap()
            .set_align(FormatAlign::Top)
    }

    #[test]
    fn test_header_format() {
        let expected = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x4F81BD))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        assert_eq!(format_for(Some(RowStyle::Header)), expected);
    }

    #[test]
    fn test_result_formats_fill_by_status() {
        assert_eq!(format_for(Some(RowStyle::Pass)), filled(0xC6EFCE));
        assert_eq!(format_for(Some(RowStyle::Fail)), filled(0xFFC7CE));
        assert_ne!(format_for(Some(RowStyle::Pass)), format_for(Some(RowStyle::Fail)));
    }

    #[test]
    fn test_summary_and_unstyled_formats() {
        assert_eq!(format_for(Some(RowStyle::BoldSummary)), Format::new().set_bold());
        assert_eq!(format_for(None), Format::new());
    }

    #[test]
    fn test_blank_cells_are_not_written() {
        let row = ReportRow::summary("Passed:", 7);
        let written: Vec<(u16, &Cell)> = written_cells(&row.cells).collect();
        assert_eq!(
            written,
            vec![(4, &Cell::text("Passed:")), (5, &Cell::Number(7))]
        );
    }

    #[test]
    fn test_column_widths_applied_once_fitted() {
        let mut sheet = ReportSheet::default();
        assert!(column_settings(&sheet).is_empty());

        sheet.auto_fit_columns();
        let settings = column_settings(&sheet);
        assert_eq!(settings.len(), 6);
        // "Test Case ID" is the longest cell in the first column
        assert_eq!(settings[0], (0, 16.0));
        assert_eq!(settings[5], (5, 10.0));
    }

    #[test]
    fn test_written_file_is_zip_package() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        let mut sheet = ReportSheet::default();
        ResultLogger::new(&mut sheet)
            .log(&TestResult {
                id: "TC01".into(),
                name: "Verify Homepage Loaded".into(),
                description: "Check if homepage loads successfully".into(),
                expected: "Page title should contain 'Mind Games for Seniors'".into(),
                actual: "Title: Mind Games for Seniors".into(),
                status: Status::Pass,
            })
            .unwrap();
        append_summary(&mut sheet).unwrap();
        sheet.auto_fit_columns();

        write_sheet(&sheet, &path).unwrap();

        let mut magic = [0u8; 2];
        std::fs::File::open(&path)
            .unwrap()
            .read_exact(&mut magic)
            .unwrap();
        assert_eq!(&magic, b"PK");
    }
}
