mod render;

use std::fs::File;

use joist::prelude::*;
use log::info;
use serde_json::Value;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::render::{render_grid, render_input};

const USERS: &str = r#"[
    {"id": 1, "name": "Alice", "email": "alice@example.com", "age": 24},
    {"id": 2, "name": "Bob", "email": "bob@example.com", "age": 29},
    {"id": 3, "name": "Charlie", "email": "charlie@example.com", "age": 22},
    {"id": 4, "name": "Deepak", "email": "deepak@example.com", "age": 32}
]"#;

fn user_columns() -> Vec<Column<Value>> {
    vec![
        Column::field("ID", "id").sortable().width(4),
        Column::field("Name", "name").sortable(),
        Column::computed("Email", |user: &Value| {
            format!("mailto:{}", user["email"].as_str().unwrap_or_default())
        }),
        Column::field("Age", "age").sortable(),
    ]
}

fn step(title: &str, body: String) {
    println!("== {} ==", title);
    println!("{}", body);
}

fn names(rows: &[Value]) -> Vec<&str> {
    rows.iter().filter_map(|row| row["name"].as_str()).collect()
}

fn run_grid() -> JoistResult<()> {
    let users = records_from_json(USERS)?;
    let config = GridConfig::new()
        .selectable(true)
        .selection_mode(SelectionMode::Multiple);
    let grid = DataGrid::try_new(user_columns(), users.clone(), config)?
        .on_selection_change(|rows| info!("Selection changed: {:?}", names(rows)));

    step("Users", render_grid(&grid));

    grid.activate(GridTarget::Header(3));
    step("Sorted by age", render_grid(&grid));

    grid.on_key(GridTarget::Header(3), &KeyCombo::key(Key::Enter));
    step("Age descending (Enter)", render_grid(&grid));

    grid.activate(GridTarget::Row(0));
    grid.on_key(GridTarget::Row(2), &KeyCombo::key(Key::Space));
    step("Two rows selected", render_grid(&grid));

    grid.activate(GridTarget::SelectAll);
    step("Select all", render_grid(&grid));

    grid.set_records(users.into_iter().filter(|u| u["id"] != 4).collect());
    step("Deepak removed", render_grid(&grid));

    grid.set_loading(true);
    step("Loading", render_grid(&grid));
    grid.set_loading(false);

    grid.set_records(Vec::new());
    step("Empty", render_grid(&grid));

    Ok(())
}

fn run_input() {
    let username = TextInput::new()
        .label("Username")
        .placeholder("Enter username")
        .helper_text("This is helper text")
        .clearable(true)
        .on_change(|value| info!("Username: {:?}", value));

    step("Username", render_input(&username));
    for c in "ada".chars() {
        username.on_key(&KeyCombo::key(Key::Char(c)));
    }
    step("Typed", render_input(&username));
    username.set_error_message(Some("Username is taken".to_string()));
    step("Rejected", render_input(&username));
    username.clear();
    username.set_error_message(None);
    step("Cleared", render_input(&username));

    let password = TextInput::with_value("hunter2")
        .label("Password")
        .kind(InputKind::Password);
    step("Password", render_input(&password));
    password.toggle_password_visibility();
    step("Password revealed", render_input(&password));
}

fn main() {
    match File::create("joist-demo.log") {
        Ok(log_file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file: {}", e),
    }

    if let Err(e) = run_grid() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    run_input();
}
