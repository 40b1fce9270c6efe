//! Output formatting for CLI

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use mindgames_common::{ReportRow, Status, Summary, HEADER, STATUS_COLUMN, VERSION};

/// Start-of-run banner
pub fn banner() -> String {
    format!("🧠 AUTOMATED TESTING: Mind Games for Seniors (v{})", VERSION)
}

/// Render result rows as a console table; summary rows are skipped
pub fn results_table(rows: &[ReportRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(HEADER.to_vec());

    for row in rows {
        let Some(status) = row.status() else {
            continue;
        };
        let color = match status {
            Status::Pass => Color::Green,
            Status::Fail => Color::Red,
        };
        let mut cells: Vec<Cell> = row.cells[..STATUS_COLUMN]
            .iter()
            .map(|c| Cell::new(c.to_string()))
            .collect();
        cells.push(Cell::new(status.as_str()).fg(color));
        table.add_row(cells);
    }
    table
}

pub fn print_results(rows: &[ReportRow]) {
    if rows.iter().all(|row| row.status().is_none()) {
        println!("No results recorded.");
        return;
    }
    println!("{}", results_table(rows));
}

pub fn print_summary(summary: &Summary) {
    let line = format!("{}", summary);
    if summary.all_passed() {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.red().bold());
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}
