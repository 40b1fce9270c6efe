//! Core types for acceptance runs

use serde::{Deserialize, Serialize};

/// Column titles of the report, in sheet order
pub const HEADER: [&str; COLUMN_COUNT] = [
    "Test Case ID",
    "Test Case Name",
    "Description",
    "Expected Result",
    "Actual Result",
    "Status",
];

/// Number of columns in every report row
pub const COLUMN_COUNT: usize = 6;

/// Index of the status column
pub const STATUS_COLUMN: usize = COLUMN_COUNT - 1;

/// Outcome of a single test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
        }
    }

    /// Parse the text written to the status column
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "PASS" => Some(Status::Pass),
            "FAIL" => Some(Status::Fail),
            _ => None,
        }
    }

    /// Row style a result with this status is logged with
    pub fn row_style(&self) -> RowStyle {
        match self {
            Status::Pass => RowStyle::Pass,
            Status::Fail => RowStyle::Fail,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded outcome of executing one test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub expected: String,
    /// Success detail, or the failure message
    pub actual: String,
    pub status: Status,
}

impl TestResult {
    /// Cells of the report row for this result
    pub fn cells(&self) -> [Cell; COLUMN_COUNT] {
        [
            Cell::text(&self.id),
            Cell::text(&self.name),
            Cell::text(&self.description),
            Cell::text(&self.expected),
            Cell::text(&self.actual),
            Cell::text(self.status.as_str()),
        ]
    }
}

/// A single report cell
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Blank,
    Text(String),
    Number(u64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Length of the cell's stringified value, in characters
    pub fn display_len(&self) -> usize {
        match self {
            Cell::Blank => 0,
            Cell::Text(s) => s.chars().count(),
            Cell::Number(n) => n.to_string().len(),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Blank => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Styling directive applied to a whole row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStyle {
    Header,
    Pass,
    Fail,
    BoldSummary,
}

/// One row of the report sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub cells: [Cell; COLUMN_COUNT],
    pub style: Option<RowStyle>,
}

impl ReportRow {
    pub fn new(cells: [Cell; COLUMN_COUNT]) -> Self {
        Self { cells, style: None }
    }

    /// Summary line: four blank cells, then label and value
    pub fn summary(label: &str, value: usize) -> Self {
        Self::new([
            Cell::Blank,
            Cell::Blank,
            Cell::Blank,
            Cell::Blank,
            Cell::text(label),
            Cell::Number(value as u64),
        ])
    }

    /// Status recorded in the last column, if this is a result row
    pub fn status(&self) -> Option<Status> {
        self.cells[STATUS_COLUMN].as_text().and_then(Status::parse)
    }
}

/// Aggregate counts over all result rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl Summary {
    /// Count PASS and FAIL rows; rows without a status are ignored
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a ReportRow>) -> Self {
        let mut summary = Self::default();
        for status in rows.into_iter().filter_map(ReportRow::status) {
            match status {
                Status::Pass => summary.passed += 1,
                Status::Fail => summary.failed += 1,
            }
        }
        summary.total = summary.passed + summary.failed;
        summary
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Label/value pairs of the trailing summary block
    pub fn lines(&self) -> [(&'static str, usize); 3] {
        [
            ("Total Tests:", self.total),
            ("Passed:", self.passed),
            ("Failed:", self.failed),
        ]
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} passed, {} failed ({} total)",
            self.passed, self.failed, self.total
        )
    }
}
