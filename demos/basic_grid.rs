/// Basic Grid Example
///
/// This example demonstrates:
/// - Creating an engine with a configuration
/// - Loading records from JSON
/// - Paging through the view and reading the results label
/// - Looking up a record by its stable id

use gridview::{GridConfig, GridEngine};

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    println!("=== GridView Basic Example ===\n");

    // 1. Create the engine
    let columns = vec!["name".to_string(), "city".to_string(), "age".to_string()];
    let mut config = GridConfig::new(columns.clone());
    config.page_sizes = vec![3, 5, 10];
    let mut grid = GridEngine::new(config).expect("valid configuration");

    // 2. Load records from JSON
    let json = r#"[
        {"name": "Alice",   "city": "London",   "age": 30},
        {"name": "Bob",     "city": "Paris",    "age": 25},
        {"name": "Charlie", "city": "Berlin",   "age": 35},
        {"name": "Diana",   "city": "Madrid",   "age": 28},
        {"name": "Evan",    "city": "Lisbon",   "age": null},
        {"name": "Fay",     "city": "Oslo",     "age": 41},
        {"name": "Gus",     "city": "Helsinki", "age": 33}
    ]"#;
    let count = grid.load_json(json, columns.clone()).expect("valid JSON");
    println!("Loaded {} records\n", count);

    // 3. Page through the view
    let total = grid.view().window.total_pages;
    for page in 1..=total {
        grid.set_page(page).expect("page >= 1");
        let view = grid.view();
        println!("Page {}/{} ({})", page, total, view.results_label);
        for row in &view.rows {
            println!(
                "  [{}] {:10} {:10} {}",
                row.id,
                row.get("name").map(|v| v.display()).unwrap_or_default(),
                row.get("city").map(|v| v.display()).unwrap_or_default(),
                row.get("age").map(|v| v.display()).unwrap_or_default(),
            );
        }
    }

    // 4. Resolve a record by id (as a row-click handler would)
    let id = grid.view().rows[0].id.clone();
    let fields = grid.record_by_id(&id).expect("id came from the view");
    println!(
        "\nRecord {} is {}",
        id,
        fields.get("name").map(|v| v.display()).unwrap_or_default()
    );
}
