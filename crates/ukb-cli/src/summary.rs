use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use ukb_model::Category;

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    println!("Baseline: {}", result.baseline);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Subjects"),
        header_cell("Share"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (category, subjects) in &result.categories {
        table.add_row(vec![
            category_cell(*category),
            count_cell(*subjects),
            dim_cell(share(*subjects, result.subjects)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.subjects).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    print_rule_table(result);
    print_incidence_table(result);
}

fn print_rule_table(result: &RunResult) {
    if result.rules.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rule"),
        header_cell("Outcome"),
        header_cell("Assigned"),
        header_cell("Remaining"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for count in &result.rules {
        let rule = if count.is_default {
            dim_cell(format!("{} (default)", count.rule))
        } else {
            Cell::new(count.rule)
        };
        table.add_row(vec![
            Cell::new(count.stage),
            rule,
            category_cell(count.outcome),
            count_cell(count.assigned),
            dim_cell(count.remaining),
        ]);
    }
    println!("{table}");
}

fn print_incidence_table(result: &RunResult) {
    if result.incidence.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Subtype"),
        header_cell("Events"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (subtype, events) in &result.incidence {
        table.add_row(vec![
            Cell::new(subtype.column_name()),
            Cell::new(subtype),
            count_cell(*events),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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

fn share(count: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    #[allow(clippy::cast_precision_loss)]
    let percent = count as f64 * 100.0 / total as f64;
    format!("{percent:.1}%")
}

fn category_cell(category: Category) -> Cell {
    let color = match category {
        Category::Negative => Color::DarkGrey,
        Category::ProbableType1 | Category::ProbableType2 => Color::Red,
        Category::PossibleType1 | Category::PossibleType2 => Color::Yellow,
        Category::PossibleGestational => Color::Blue,
    };
    Cell::new(category).fg(color)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share() {
        assert_eq!(share(1, 8), "12.5%");
        assert_eq!(share(0, 0), "-");
    }
}
