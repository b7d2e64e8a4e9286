use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use examgen_cli::types::{DocumentSummary, GenerateResult};

pub fn print_summary(result: &GenerateResult) {
    println!("Input: {}", result.input.display());
    println!("Seed: {}", result.seed);
    for document in &result.documents {
        print_document(document);
    }
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn print_document(document: &DocumentSummary) {
    println!();
    let title = document.title.as_deref().unwrap_or("Untitled examination");
    match &document.output_dir {
        Some(dir) => println!("Document {}: {title} -> {}", document.index, dir.display()),
        None => println!("Document {}: {title} (dry run)", document.index),
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Questions"),
        header_cell("Points"),
        header_cell("Notation"),
        header_cell("Examination"),
        header_cell("Solutions"),
        header_cell("PDF"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);
    align_column(&mut table, 6, CellAlignment::Right);

    let mut total_files = 0usize;
    for variant in &document.variants {
        for output in &variant.outputs {
            total_files += usize::from(output.examination.is_some())
                + usize::from(output.solutions.is_some())
                + output.pdfs.len();
            table.add_row(vec![
                section_cell(&variant.section),
                Cell::new(variant.question_count),
                Cell::new(variant.points),
                Cell::new(output.notation.slug()),
                output_cell(output.examination.as_ref()),
                output_cell(output.solutions.as_ref()),
                count_cell(output.pdfs.len()),
            ]);
        }
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} sections", document.variants.len()))
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!("{total_files} files")).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn output_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(_) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Green)
    } else {
        dim_cell("-")
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

fn section_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
