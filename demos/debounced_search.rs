/// Debounced Search Example
///
/// Simulates a user typing into the search box. Each keystroke reschedules
/// the recomputation; only the final term is applied once typing pauses.

use gridline::{Debouncer, Row, RowSet, TableConfig, TableEngine, TableState, ColumnDescriptor};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> gridline::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    println!("=== Gridline Debounced Search Example ===\n");

    let engine = TableEngine::new(TableConfig::new(vec![
        ColumnDescriptor::new("company").text_filter(),
        ColumnDescriptor::new("city"),
    ]))?;
    let state = TableState::new(&engine);
    let rows = RowSet::new(
        [("Acme Corp", "Oslo"), ("Globex", "Bergen"), ("Acme Labs", "Oslo"), ("Initech", "Trondheim")]
            .into_iter()
            .map(|(company, city)| Row::new().with("company", company).with("city", city))
            .collect(),
    );

    let shared = Arc::new(Mutex::new((engine, state, rows)));
    let mut debouncer = Debouncer::default();

    let keystrokes = ["a", "ac", "acm", "acme"];
    for (i, term) in keystrokes.iter().enumerate() {
        println!("typed {:?}", term);
        let shared = shared.clone();
        let term = term.to_string();
        debouncer.call(move || {
            let mut guard = match shared.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let (engine, state, rows) = &mut *guard;
            state.set_search(term.clone());
            match engine.run(rows, state.query()) {
                Ok(view) => println!("search {:?} -> {} matches", term, view.result_count),
                Err(err) => eprintln!("search failed: {}", err),
            }
        });
        if i + 1 < keystrokes.len() {
            tokio::time::sleep(Duration::from_millis(120)).await;
        }
    }

    tokio::time::sleep(debouncer.delay() + Duration::from_millis(50)).await;
    Ok(())
}
