use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mc_cli::types::{ExpandResult, FolderStatus, NormalizeResult, TableSummary};

pub fn print_normalize_summary(result: &NormalizeResult) {
    println!("Input: {}", result.input_root.display());
    match &result.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Kind"),
        header_cell("Files"),
        header_cell("Rows"),
        header_cell("Written"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    let mut total_rows = 0usize;
    for summary in &result.tables {
        total_rows += summary.rows;
        table.add_row(vec![
            name_cell(summary),
            kind_cell(summary.derived),
            if summary.derived {
                dim_cell("-")
            } else {
                count_cell(summary.source_files)
            },
            count_cell(summary.rows),
            output_cell(summary.output.is_some()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_expand_summary(result: &ExpandResult) {
    println!("Root: {}", result.root.display());
    if result.folders.is_empty() {
        println!("No Period_map.csv found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Folder"),
        header_cell("Status"),
        header_cell("Hours"),
        header_cell("Variability"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);

    let mut failures = Vec::new();
    for summary in &result.folders {
        let folder = summary
            .folder
            .strip_prefix(&result.root)
            .unwrap_or(&summary.folder)
            .display()
            .to_string();
        let row = match &summary.status {
            FolderStatus::Converted { hours, variability } => vec![
                Cell::new(&folder),
                Cell::new("converted").fg(Color::Green),
                Cell::new(hours),
                output_cell(*variability),
            ],
            FolderStatus::Skipped => vec![
                Cell::new(&folder),
                dim_cell("skipped"),
                dim_cell("-"),
                dim_cell("-"),
            ],
            FolderStatus::Failed(error) => {
                failures.push((folder.clone(), error.clone()));
                vec![
                    Cell::new(&folder),
                    Cell::new("FAILED")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                    dim_cell("-"),
                    dim_cell("-"),
                ]
            }
        };
        table.add_row(row);
    }
    println!("{table}");
    if !failures.is_empty() {
        eprintln!("Errors:");
        for (folder, error) in failures {
            eprintln!("- {folder}: {error}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
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

fn name_cell(summary: &TableSummary) -> Cell {
    if summary.derived {
        Cell::new(format!("  -> {}", summary.name)).fg(Color::DarkGrey)
    } else {
        Cell::new(&summary.name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    }
}

fn kind_cell(derived: bool) -> Cell {
    if derived {
        dim_cell("derived")
    } else {
        Cell::new("source")
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn output_cell(written: bool) -> Cell {
    if written {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
