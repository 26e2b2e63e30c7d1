use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use swerve_archive::ARCHIVE_MANIFEST;
use swerve_core::{ImportReport, ImportStatus};
use swerve_form::VerifyReport;

pub fn print_documents() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Document"), header_cell("Archive path")]);
    apply_table_style(&mut table);
    for entry in &ARCHIVE_MANIFEST {
        table.add_row(vec![
            Cell::new(entry.document.as_str()),
            Cell::new(entry.path),
        ]);
    }
    println!("{table}");
}

pub fn print_import_report(report: &ImportReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Document"),
        header_cell("Path"),
        header_cell("Status"),
        header_cell("Written"),
        header_cell("Unmatched"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for doc in &report.documents {
        let (status, written, unmatched) = match &doc.status {
            ImportStatus::Applied(summary) => (
                Cell::new("imported").fg(Color::Green),
                summary.written.to_string(),
                summary.missing.len().to_string(),
            ),
            ImportStatus::Missing => (
                Cell::new("not in archive").fg(Color::DarkGrey),
                "-".to_string(),
                "-".to_string(),
            ),
            ImportStatus::Malformed(reason) => (
                Cell::new(format!("malformed: {reason}")).fg(Color::Red),
                "-".to_string(),
                "-".to_string(),
            ),
        };
        table.add_row(vec![
            Cell::new(doc.document.as_str()),
            Cell::new(doc.path),
            status,
            Cell::new(written),
            Cell::new(unmatched),
        ]);
    }
    println!("{table}");
    println!(
        "Imported {} of {} documents",
        report.applied(),
        report.documents.len()
    );
}

pub fn print_verify_reports(reports: &[VerifyReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Document"),
        header_cell("Passed"),
        header_cell("Failed"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut total_passed = 0usize;
    let mut total_failed = 0usize;
    for report in reports {
        total_passed += report.passed();
        total_failed += report.failed();
        table.add_row(vec![
            Cell::new(&report.form),
            Cell::new(report.passed()),
            count_cell(report.failed()),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(total_passed).add_attribute(Attribute::Bold),
        count_cell(total_failed).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    for report in reports {
        for check in report.failures() {
            println!("  {}.{}: {}", report.form, check.field, check.outcome);
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    let cell = Cell::new(count);
    if count > 0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}
