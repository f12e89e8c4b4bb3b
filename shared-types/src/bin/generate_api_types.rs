use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for the catalog front-end
    let mut types = Vec::new();

    // Dataset types
    types.push(clean_type(Project::export_to_string()?));
    types.push(clean_type(Supervisor::export_to_string()?));
    types.push(clean_type(Metadata::export_to_string()?));
    types.push(clean_type(ProjectData::export_to_string()?));

    // Filter types
    types.push(clean_type(FilterState::export_to_string()?));
    types.push(clean_type(Facet::export_to_string()?));

    // Navigation state
    types.push(clean_type(ScrollPosition::export_to_string()?));
    types.push(clean_type(HandoffKind::export_to_string()?));
    types.push(clean_type(SearchHandoff::export_to_string()?));
    types.push(clean_type(Suggestion::export_to_string()?));

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../web/src/api-types"));
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Everything lands in one file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
