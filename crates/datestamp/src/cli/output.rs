//! Output formatting for the end-of-run report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use datestamp::stamp::{FileOutcome, WalkReport};
use std::io::{self, Write};

/// Print the skipped-files report: one line per ledgered path, in the order
/// the walk recorded them, then a per-outcome count table. Entries the walk
/// could not read get their own row.
pub fn print_report(report: &WalkReport, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Files that were skipped:")?;
    for (path, outcome) in report.ledger.iter() {
        writeln!(out, "{}", outcome.describe(path))?;
    }

    if report.ledger.is_empty() && report.stats.unreadable == 0 {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "{}", summary_table(report))?;
    Ok(())
}

/// Build the per-outcome count table
fn summary_table(report: &WalkReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let headers = ["Outcome", "Code", "Files"];
    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for outcome in FileOutcome::ALL {
        let count = report.ledger.count(outcome);
        if count == 0 {
            continue;
        }
        table.add_row(vec![
            Cell::new(outcome.as_str()).fg(color_for_outcome(outcome)),
            Cell::new(outcome.code()),
            Cell::new(count),
        ]);
    }

    if report.stats.unreadable > 0 {
        table.add_row(vec![
            Cell::new("unreadable").fg(Color::Red),
            Cell::new("-"),
            Cell::new(report.stats.unreadable),
        ]);
    }

    table.add_row(vec![
        Cell::new("stamped"),
        Cell::new("-"),
        Cell::new(report.stats.stamped),
    ]);

    table
}

/// Color for outcome indicators
pub fn color_for_outcome(outcome: FileOutcome) -> Color {
    match outcome {
        FileOutcome::WriteFailed => Color::Red,
        FileOutcome::FutureDated => Color::Yellow,
        FileOutcome::UserSkippedUndated | FileOutcome::SkippedUndated => Color::Grey,
    }
}
