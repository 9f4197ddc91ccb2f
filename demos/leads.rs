/// Lead List Example
///
/// This example demonstrates:
/// - Loading a table configuration from JSON
/// - Materializing rows fetched from a document store
/// - Searching, filtering and sorting through `TableState`
/// - Rendering pages and page-navigation windows

use gridline::{FilterValue, OwnerScope, RowSet, TableConfig, TableEngine, TableState, TableView};
use serde_json::json;

const CONFIG: &str = r#"{
    "columns": [
        {"id": "company", "label": "Company", "filterType": "text"},
        {"id": "contact", "label": "Contact"},
        {"id": "status", "label": "Status", "filterType": "select",
         "filterOptions": [
            {"value": "New", "label": "New"},
            {"value": "Qualified", "label": "Qualified"},
            {"value": "Negotiation", "label": "Negotiation"}
         ]},
        {"id": "amount", "label": "Funding", "filterType": "range"},
        {"id": "lastContact", "label": "Last contact"}
    ],
    "defaultPageSize": 5,
    "pageSizeOptions": [5, 10, 25],
    "emptyMessage": "No leads match your filters"
}"#;

fn print_view(engine: &TableEngine, view: &TableView<'_>) {
    if view.is_empty() {
        println!("   {}", engine.empty_message());
        return;
    }
    for row in &view.page_rows {
        let cell = |field: &str| row.get(field).map(|v| v.to_string()).unwrap_or_default();
        println!(
            "   {:<18} {:<12} {:>8}  {}",
            cell("company"),
            cell("status"),
            cell("amount"),
            cell("lastContact")
        );
    }
    println!(
        "   page {} of {} ({} leads) pages {:?}\n",
        view.current_page,
        view.total_pages,
        view.result_count,
        view.page_window()
    );
}

fn main() -> gridline::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    println!("=== Gridline Lead List Example ===\n");

    // 1. Configure the table
    let mut engine = TableEngine::new(TableConfig::from_json(CONFIG)?)?;
    let mut state = TableState::new(&engine);

    // 2. Rows as they come back from the document store
    let companies = ["Acme Corp", "Globex", "Initech", "Acme Labs", "Umbrella", "Hooli", "Acme Foods"];
    let statuses = ["New", "Qualified", "Negotiation"];
    let docs: Vec<_> = (0..24)
        .map(|i| {
            json!({
                "id": format!("lead-{}", i),
                "company": companies[i % companies.len()],
                "contact": format!("Contact {}", i),
                "status": statuses[i % statuses.len()],
                "amount": (i + 1) * 2500,
                "assignedTo": if i % 4 == 0 { "u-1" } else { "u-2" },
                "lastContact": {"seconds": 1_704_067_200 + i * 86_400, "nanoseconds": 0}
            })
        })
        .collect();
    let rows = RowSet::from_json(&json!(docs))?;
    println!("1. Loaded {} leads\n", rows.len());

    // 3. First page, input order
    println!("2. All leads:");
    let view = engine.run(&rows, state.query())?;
    print_view(&engine, &view);

    // 4. Search + status filter + newest first
    println!("3. Qualified Acme leads, most recent contact first:");
    state.set_search("acme");
    state.set_filter("status", FilterValue::select(["Qualified"]));
    state.toggle_sort("lastContact", engine.columns())?;
    state.toggle_sort("lastContact", engine.columns())?;
    let view = engine.run(&rows, state.query())?;
    print_view(&engine, &view);

    // 5. My leads with funding of at least 20k
    println!("4. My leads above 20k:");
    state.clear_filters();
    state.set_search("");
    state.set_scope(Some(OwnerScope::new("assignedTo", "u-1")));
    state.set_filter("amount", FilterValue::range(Some(20_000.0), None));
    let view = engine.run(&rows, state.query())?;
    print_view(&engine, &view);

    // 6. Status counts for the filter bar
    println!("5. Status counts:");
    for facet in engine.facet_counts(&rows, "status")? {
        println!("   {:<12} {}", facet.option.label, facet.count);
    }

    // 7. Nothing matches
    println!("\n6. Searching for a company that does not exist:");
    state.set_search("wayne enterprises");
    let view = engine.run(&rows, state.query())?;
    print_view(&engine, &view);

    Ok(())
}
