use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use placematch_match::{MatchConfig, MatchStage, MatchTrace};
use placematch_model::MatchStatus;

use crate::types::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    println!(
        "Registry: {} records, {} distinct names",
        summary.registry_records, summary.registry_keys
    );
    println!("Output: {}", summary.output_path.display());
    if let Some(path) = &summary.stats_path {
        println!("Stats: {}", path.display());
    }

    let stats = &summary.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Status"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        status_cell(MatchStatus::Found),
        count_cell(stats.total_found, Color::Green),
    ]);
    table.add_row(vec![
        status_cell(MatchStatus::NotFound),
        count_cell(stats.total_not_found, Color::Yellow),
    ]);
    table.add_row(vec![
        status_cell(MatchStatus::InternalError),
        count_cell(stats.total_internal_error, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.total_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !stats.mean_population_by_region.is_empty() {
        let mut regions = Table::new();
        regions.set_header(vec![header_cell("Region"), header_cell("Mean population")]);
        apply_table_style(&mut regions);
        align_column(&mut regions, 1, CellAlignment::Right);
        for (region, mean) in &stats.mean_population_by_region {
            regions.add_row(vec![Cell::new(region), Cell::new(format!("{mean:.2}"))]);
        }
        println!();
        println!("Population found: {}", stats.population_found);
        println!("{regions}");
    }
    println!("Finished in {} ms", summary.elapsed.as_millis());
}

pub fn print_trace(config: &MatchConfig, trace: &MatchTrace) {
    println!("Key: {:?}", trace.key.as_str());
    println!(
        "Stage: {} (cutoff {}, up to {} candidates)",
        trace.stage.as_str(),
        config.similarity_cutoff,
        config.max_candidates
    );

    if !trace.candidates.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("#"),
            header_cell("Candidate"),
            header_cell("Score"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        align_column(&mut table, 2, CellAlignment::Right);
        for (rank, (key, score)) in trace.candidates.iter().enumerate() {
            let key_cell = if rank == 0 {
                Cell::new(key).add_attribute(Attribute::Bold)
            } else {
                Cell::new(key)
            };
            table.add_row(vec![
                dim_cell(rank + 1),
                key_cell,
                Cell::new(format!("{score:.4}")),
            ]);
        }
        println!("{table}");
    }

    let mut result = Table::new();
    result.set_header(vec![
        header_cell("Status"),
        header_cell("Official name"),
        header_cell("Subdivision"),
        header_cell("Region"),
        header_cell("Id"),
    ]);
    apply_table_style(&mut result);
    let row = match &trace.result.record {
        Some(record) => vec![
            status_cell(trace.result.status),
            Cell::new(&record.name),
            text_cell(record.subdivision_code()),
            text_cell(record.region_name()),
            text_cell(&record.id_string()),
        ],
        None => vec![
            status_cell(trace.result.status),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ],
    };
    result.add_row(row);
    if trace.stage == MatchStage::AmbiguousApproximate {
        println!(
            "Best candidate is shared by {} records; not resolved.",
            trace.group_size
        );
    } else if trace.group_size > 1 {
        println!(
            "{} records share this name; chosen by region preference {:?}.",
            trace.group_size, config.preferred_region
        );
    }
    println!("{result}");
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
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: MatchStatus) -> Cell {
    let color = match status {
        MatchStatus::Found => Color::Green,
        MatchStatus::NotFound => Color::Yellow,
        MatchStatus::InternalError => Color::Red,
    };
    Cell::new(status.as_str())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
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
