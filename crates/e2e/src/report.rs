//! Report sheet, result logging and summary aggregation

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use mindgames_common::{
    Cell, Error, ReportRow, Result, RowStyle, Summary, TestResult, COLUMN_COUNT, HEADER,
};

use crate::xlsx;

/// Extra width added to the longest cell of each column
pub const COLUMN_PADDING: usize = 4;

/// Worksheet title
pub const SHEET_NAME: &str = "Test Report";

/// Append-only tabular report
///
/// Row 0 is the header; indices passed to [`style_row`](Self::style_row) are
/// absolute sheet rows.
pub trait ReportSink {
    /// Append a row and return its index
    fn append_row(&mut self, cells: [Cell; COLUMN_COUNT]) -> usize;

    fn style_row(&mut self, index: usize, style: RowStyle) -> Result<()>;

    /// All rows after the header
    fn rows(&self) -> &[ReportRow];

    fn auto_fit_columns(&mut self);

    /// Write the report to `path`
    fn persist(&self, path: &Path) -> Result<PathBuf>;
}

/// In-memory sheet rendered to xlsx on persist
#[derive(Debug, Clone)]
pub struct ReportSheet {
    name: String,
    rows: Vec<ReportRow>,
    widths: Option<[f64; COLUMN_COUNT]>,
}

impl ReportSheet {
    /// Create a sheet holding only the styled header row
    pub fn new(name: impl Into<String>) -> Self {
        let mut sheet = Self {
            name: name.into(),
            rows: Vec::new(),
            widths: None,
        };
        let written = write_header(&mut sheet);
        debug_assert!(written.is_ok());
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every row, header included
    pub fn all_rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Column widths, once fitted
    pub fn column_widths(&self) -> Option<&[f64; COLUMN_COUNT]> {
        self.widths.as_ref()
    }
}

impl Default for ReportSheet {
    fn default() -> Self {
        Self::new(SHEET_NAME)
    }
}

impl ReportSink for ReportSheet {
    fn append_row(&mut self, cells: [Cell; COLUMN_COUNT]) -> usize {
        self.rows.push(ReportRow::new(cells));
        self.rows.len() - 1
    }

    fn style_row(&mut self, index: usize, style: RowStyle) -> Result<()> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(Error::RowOutOfRange { index, len })?;
        row.style = Some(style);
        Ok(())
    }

    fn rows(&self) -> &[ReportRow] {
        self.rows.get(1..).unwrap_or(&[])
    }

    fn auto_fit_columns(&mut self) {
        let mut widths = [0.0; COLUMN_COUNT];
        for (col, width) in widths.iter_mut().enumerate() {
            let longest = self
                .rows
                .iter()
                .map(|row| row.cells[col].display_len())
                .max()
                .unwrap_or(0);
            *width = (longest + COLUMN_PADDING) as f64;
        }
        self.widths = Some(widths);
    }

    fn persist(&self, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        xlsx::write_sheet(self, path)?;
        debug!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(path.to_path_buf())
    }
}

/// Append the column titles and give them the header style
pub fn write_header<S: ReportSink + ?Sized>(sink: &mut S) -> Result<usize> {
    let index = sink.append_row(HEADER.map(Cell::text));
    sink.style_row(index, RowStyle::Header)?;
    Ok(index)
}

/// Streams test results into a sink, one styled row per result
pub struct ResultLogger<'a, S: ReportSink + ?Sized> {
    sink: &'a mut S,
}

impl<'a, S: ReportSink + ?Sized> ResultLogger<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self { sink }
    }

    pub fn log(&mut self, result: &TestResult) -> Result<usize> {
        let index = self.sink.append_row(result.cells());
        self.sink.style_row(index, result.status.row_style())?;
        Ok(index)
    }
}

/// Count logged results and append the bold summary block
///
/// Must run once, after every case has been logged.
pub fn append_summary<S: ReportSink + ?Sized>(sink: &mut S) -> Result<Summary> {
    let summary = Summary::from_rows(sink.rows());
    for (label, value) in summary.lines() {
        let index = sink.append_row(ReportRow::summary(label, value).cells);
        sink.style_row(index, RowStyle::BoldSummary)?;
    }
    info!("Test Results: {}", summary);
    Ok(summary)
}

/// Report file name for a run started at `at`
pub fn artifact_name(at: DateTime<Local>) -> String {
    format!("Test_Report_{}.xlsx", at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Fit columns and persist the sheet under a timestamped name in `dir`
pub fn finalize<S: ReportSink + ?Sized>(sink: &mut S, dir: &Path) -> Result<PathBuf> {
    sink.auto_fit_columns();
    let path = sink.persist(&dir.join(artifact_name(Local::now())))?;
    info!("Excel test report generated: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mindgames_common::Status;

    fn result(id: &str, status: Status, actual: &str) -> TestResult {
        TestResult {
            id: id.to_string(),
            name: format!("{} name", id),
            description: "desc".to_string(),
            expected: "expected".to_string(),
            actual: actual.to_string(),
            status,
        }
    }

    #[test]
    fn test_new_sheet_has_styled_header_only() {
        let sheet = ReportSheet::default();
        assert_eq!(sheet.name(), SHEET_NAME);
        assert_eq!(sheet.all_rows().len(), 1);
        assert_eq!(sheet.all_rows()[0].style, Some(RowStyle::Header));
        assert_eq!(sheet.all_rows()[0].cells[0], Cell::text("Test Case ID"));
        assert!(sheet.rows().is_empty());
    }

    #[test]
    fn test_header_styled_through_sink() {
        let mut sheet = ReportSheet::new("Scratch");
        let index = write_header(&mut sheet).unwrap();
        assert_eq!(index, 1);
        let rows = sheet.all_rows();
        assert_eq!(rows[1].style, Some(RowStyle::Header));
        assert_eq!(rows[1].cells, HEADER.map(Cell::text));
    }

    #[test]
    fn test_logger_styles_by_status() {
        let mut sheet = ReportSheet::default();
        let mut logger = ResultLogger::new(&mut sheet);
        assert_eq!(logger.log(&result("TC01", Status::Pass, "ok")).unwrap(), 1);
        assert_eq!(logger.log(&result("TC02", Status::Fail, "boom")).unwrap(), 2);

        let rows = sheet.rows();
        assert_eq!(rows[0].style, Some(RowStyle::Pass));
        assert_eq!(rows[1].style, Some(RowStyle::Fail));
        assert_eq!(rows[1].cells[4], Cell::text("boom"));
    }

    #[test]
    fn test_style_row_out_of_range() {
        let mut sheet = ReportSheet::default();
        let err = sheet.style_row(5, RowStyle::Pass).unwrap_err();
        assert!(matches!(err, Error::RowOutOfRange { index: 5, len: 1 }));
    }

    #[test]
    fn test_summary_block_appended_after_results() {
        let mut sheet = ReportSheet::default();
        {
            let mut logger = ResultLogger::new(&mut sheet);
            logger.log(&result("TC01", Status::Pass, "ok")).unwrap();
            logger.log(&result("TC02", Status::Fail, "boom")).unwrap();
            logger.log(&result("TC03", Status::Pass, "ok")).unwrap();
        }

        let summary = append_summary(&mut sheet).unwrap();
        assert_eq!(summary, Summary { total: 3, passed: 2, failed: 1 });

        let rows = sheet.all_rows();
        assert_eq!(rows.len(), 1 + 3 + 3);
        let tail = &rows[4..];
        assert_eq!(tail[0].cells[4], Cell::text("Total Tests:"));
        assert_eq!(tail[0].cells[5], Cell::Number(3));
        assert_eq!(tail[1].cells[5], Cell::Number(2));
        assert_eq!(tail[2].cells[4], Cell::text("Failed:"));
        assert_eq!(tail[2].cells[5], Cell::Number(1));
        for row in tail {
            assert_eq!(row.style, Some(RowStyle::BoldSummary));
            assert!(row.cells[..4].iter().all(|c| *c == Cell::Blank));
        }
    }

    #[test]
    fn test_auto_fit_uses_longest_cell_plus_padding() {
        let mut sheet = ReportSheet::default();
        ResultLogger::new(&mut sheet)
            .log(&result("TC01", Status::Pass, "Title: Mind Games for Seniors"))
            .unwrap();
        sheet.auto_fit_columns();

        let widths = sheet.column_widths().unwrap();
        // "Test Case ID" header is longer than "TC01"
        assert_eq!(widths[0], (12 + COLUMN_PADDING) as f64);
        assert_eq!(widths[4], (29 + COLUMN_PADDING) as f64);
        // "Status" header beats "PASS"
        assert_eq!(widths[5], (6 + COLUMN_PADDING) as f64);
    }

    #[test]
    fn test_artifact_name_has_second_granularity() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        assert_eq!(artifact_name(at), "Test_Report_2024-03-09_07-05-02.xlsx");
    }

    #[test]
    fn test_finalize_writes_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sheet = ReportSheet::default();
        ResultLogger::new(&mut sheet)
            .log(&result("TC01", Status::Pass, "ok"))
            .unwrap();
        append_summary(&mut sheet).unwrap();

        let path = finalize(&mut sheet, dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("Test_Report_"));
        assert!(name.ends_with(".xlsx"));
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        assert!(sheet.column_widths().is_some());
    }
}
