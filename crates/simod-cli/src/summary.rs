use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use simod_filter::{FilterSession, Page, paginate};
use simod_map::ValidatedMapping;
use simod_model::{AttributeConstraint, EventLog, FilterStage, FilterStatus};

use crate::types::FilterOutcome;

/// Values listed per categorical attribute before eliding the rest.
const MAX_LISTED_VALUES: usize = 8;

pub fn print_mapping(mapping: &ValidatedMapping) {
    let columns = mapping.mapping();
    let dual = columns.dual_classified();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Classification")]);
    apply_table_style(&mut table);
    for column in &columns.original_columns {
        let mut labels = Vec::new();
        for (role, claimed) in [
            ("case id", &columns.case_id),
            ("activity", &columns.activity),
            ("resource", &columns.resource),
            ("role", &columns.role),
        ] {
            if claimed.as_deref() == Some(column.as_str()) {
                labels.push(role.to_string());
            }
        }
        if columns.is_time_column(column) {
            if column == mapping.primary_time_column() {
                labels.push("timestamp (primary)".to_string());
            } else {
                labels.push("timestamp".to_string());
            }
        }
        if labels.is_empty() {
            labels.push("attribute".to_string());
        }
        let label = labels.join(" + ");
        let cell = if dual.contains(&column.as_str()) {
            Cell::new(label).fg(Color::Yellow).add_attribute(Attribute::Bold)
        } else if label == "attribute" {
            dim_cell(label)
        } else {
            Cell::new(label).fg(Color::Blue)
        };
        table.add_row(vec![Cell::new(column), cell]);
    }
    println!("{table}");
}

pub fn print_metadata(session: &FilterSession) {
    let metadata = session.metadata();
    println!("Rows: {}", session.log().len());
    println!("Cases: {}", metadata.case_count());
    match (metadata.min_timestamp, metadata.max_timestamp) {
        (Some(min), Some(max)) => println!("Time span: {min} .. {max}"),
        _ => println!("Time span: -"),
    }

    let mut activities = Table::new();
    activities.set_header(vec![
        header_cell("Activity"),
        header_cell("Cases"),
        header_cell("Coverage"),
        header_cell("Essential"),
    ]);
    apply_summary_table_style(&mut activities);
    align_column(&mut activities, 1, CellAlignment::Right);
    align_column(&mut activities, 2, CellAlignment::Right);
    align_column(&mut activities, 3, CellAlignment::Center);
    for activity in &metadata.all_activities {
        let essential = if metadata.is_essential(activity) {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        activities.add_row(vec![
            Cell::new(activity),
            Cell::new(metadata.coverage(activity)),
            Cell::new(format!("{:.0}%", metadata.coverage_ratio(activity) * 100.0)),
            essential,
        ]);
    }
    println!("{activities}");

    let criteria = session.default_criteria();
    if criteria.attribute_filters.is_empty() {
        return;
    }
    let mut attributes = Table::new();
    attributes.set_header(vec![
        header_cell("Attribute"),
        header_cell("Kind"),
        header_cell("Values"),
    ]);
    apply_summary_table_style(&mut attributes);
    for filter in &criteria.attribute_filters {
        let (kind, values) = match &filter.constraint {
            AttributeConstraint::Numeric { min, max } => ("numeric", format!("{min} .. {max}")),
            AttributeConstraint::Categorical { allowed } => {
                let mut listed: Vec<&str> = allowed
                    .iter()
                    .take(MAX_LISTED_VALUES)
                    .map(String::as_str)
                    .collect();
                let more = allowed.len().saturating_sub(MAX_LISTED_VALUES);
                let suffix = format!("(+{more} more)");
                if more > 0 {
                    listed.push(&suffix);
                }
                ("categorical", listed.join(", "))
            }
        };
        attributes.add_row(vec![Cell::new(&filter.column), dim_cell(kind), Cell::new(values)]);
    }
    println!();
    println!("{attributes}");
}

pub fn print_summary(outcome: &FilterOutcome) {
    let result = &outcome.result;
    println!("Log: {}", outcome.source.display());
    if let Some(path) = &outcome.output {
        println!("Output: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Filter"),
        header_cell("Removed"),
        header_cell("Remaining"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut remaining = result.source_rows;
    for stage in FilterStage::ORDER {
        let removed = result.impact.removed_by(stage);
        remaining -= removed;
        table.add_row(vec![
            Cell::new(stage.label()),
            count_cell(removed, Color::Red),
            Cell::new(remaining),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(result.impact.total(), Color::Red).add_attribute(Attribute::Bold),
        Cell::new(result.rows.len()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    match result.status() {
        FilterStatus::EmptyLog => println!("The log has no rows."),
        FilterStatus::NoMatches => println!("No rows match the filters."),
        FilterStatus::Matched(count) => {
            println!("{count} of {} rows kept.", result.source_rows);
        }
    }

    if let Some(page) = outcome.page {
        print_rows(&result.rows, page);
    }
}

fn print_rows(log: &EventLog, page: Page) {
    let rows = paginate(&log.records, page);
    let pages = Page::page_count(log.len(), page.size);
    println!();
    println!("Page {} of {pages}", page.number);
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(log.columns.iter().map(|column| header_cell(column)));
    apply_table_style(&mut table);
    for record in rows {
        table.add_row(log.columns.iter().map(|column| match record.value(column) {
            Some(value) => Cell::new(value.to_text()),
            None => dim_cell("-"),
        }));
    }
    println!("{table}");
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
