use reseda::{ResourceSet, TableOptions, TreeReadOptions, formats::CsvFormat, read_tree};
use std::path::Path;

use crate::validation::{validate_dir_path, validate_file_path};

/// Where the `debug` command reads from.
pub enum DebugSource {
    Csv(String),
    Res(String),
}

/// Read either side of a conversion into resource sets.
pub fn read_sets(
    source: &DebugSource,
    locales: Vec<String>,
    delimiter: u8,
) -> Result<Vec<ResourceSet>, String> {
    match source {
        DebugSource::Csv(path) => {
            validate_file_path(path)?;
            // The untranslated gate is irrelevant for inspection.
            let options = TableOptions::new()
                .with_locales(locales)
                .with_delimiter(delimiter)
                .with_force_untranslated(true);
            CsvFormat::read_from(path, delimiter)
                .and_then(|table| table.into_resource_sets(&options))
                .map_err(|e| format!("Error reading {}: {}", path, e))
        }
        DebugSource::Res(path) => {
            validate_dir_path(path)?;
            let options = TreeReadOptions::new().with_locales(locales);
            read_tree(Path::new(path), &options)
                .map_err(|e| format!("Error reading {}: {}", path, e))
        }
    }
}

/// Render resource sets as pretty JSON.
pub fn to_json(sets: &[ResourceSet]) -> Result<String, String> {
    serde_json::to_string_pretty(sets).map_err(|e| format!("Error serializing to JSON: {}", e))
}

/// Run the debug command: read a table or resource tree and output it as JSON.
pub fn run_debug_command(
    source: DebugSource,
    locales: Vec<String>,
    delimiter: u8,
    output: Option<String>,
) -> Result<(), String> {
    let sets = read_sets(&source, locales, delimiter)?;
    let json = to_json(&sets)?;

    // Output to file or stdout
    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json.as_bytes())
                .map_err(|e| format!("Error writing to {}: {}", output_path, e))?;
            eprintln!("✅ Debug output written to: {}", output_path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
