//! `llmp models`: list the configured models.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

pub fn list_models(state: &AppState, json: bool) {
    let config = &state.config;

    if json {
        let models: Vec<serde_json::Value> = config
            .models
            .iter()
            .map(|m| serde_json::json!({"id": m, "default": *m == config.default_model}))
            .collect();
        println!(
            "{}",
            serde_json::json!({"base_url": config.base_url, "max_tokens": config.max_tokens, "models": models})
        );
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Model").fg(Color::White),
        Cell::new("Default").fg(Color::White),
    ]);

    for (i, model) in config.models.iter().enumerate() {
        let is_default = *model == config.default_model;
        table.add_row(vec![
            Cell::new(i + 1).fg(Color::DarkGrey),
            Cell::new(model).fg(Color::Cyan),
            Cell::new(if is_default { "✓" } else { "" }).fg(Color::Green),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} {}",
        style("Endpoint:").bold(),
        style(&config.base_url).dim()
    );
    println!();
}
