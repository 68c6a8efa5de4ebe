/// Search and Sort Example
///
/// This example demonstrates:
/// - Free-text filtering (any column, case-insensitive)
/// - The sort toggle cycle (ascending, then descending)
/// - Incremental adds re-applying the active filter

use gridview::{CellValue, GridConfig, GridEngine, RawRecord};

fn record(name: &str, team: &str, score: f64) -> RawRecord {
    let mut raw = RawRecord::new();
    raw.insert("name".to_string(), CellValue::from(name));
    raw.insert("team".to_string(), CellValue::from(team));
    raw.insert("score".to_string(), CellValue::from(score));
    raw
}

fn print_view(grid: &GridEngine, heading: &str) {
    let view = grid.view();
    println!("{} ({})", heading, view.results_label);
    for row in &view.rows {
        println!(
            "  {:8} {:8} {}",
            row.get("name").map(|v| v.display()).unwrap_or_default(),
            row.get("team").map(|v| v.display()).unwrap_or_default(),
            row.get("score").map(|v| v.display()).unwrap_or_default(),
        );
    }
    println!();
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    println!("=== GridView Search & Sort Example ===\n");

    let columns = vec!["name".to_string(), "team".to_string(), "score".to_string()];
    let mut grid = GridEngine::new(GridConfig::new(columns.clone())).expect("valid configuration");

    grid.load(
        vec![
            record("Rosa", "red", 88.0),
            record("Ben", "blue", 92.0),
            record("Rex", "red", 75.0),
            record("Blair", "blue", 75.0),
            record("Remy", "red", 95.0),
        ],
        columns,
    );

    print_view(&grid, "Initial view");

    grid.set_filter("red");
    print_view(&grid, "Filtered to 'red'");

    grid.set_sort("score").expect("score is a column");
    print_view(&grid, "Sorted by score (ascending)");

    grid.set_sort("score").expect("score is a column");
    print_view(&grid, "Sorted by score (descending)");

    // A new blue-team record stays hidden while the filter is active
    grid.add_records(vec![record("Bea", "blue", 99.0)]);
    print_view(&grid, "After adding Bea (blue)");

    grid.set_filter("");
    print_view(&grid, "Filter cleared");
}
