use reseda::{Config, ConversionReport, Direction};

use crate::validation::{parse_indent, parse_locales, parse_separator, resolve_direction};

/// Raw `convert` arguments as received from the command line.
#[derive(Debug, Default, Clone)]
pub struct ConvertArgs {
    pub in_csv: Option<String>,
    pub out_res: Option<String>,
    pub in_res: Option<String>,
    pub out_csv: Option<String>,
    pub locales: Option<String>,
    pub separator: String,
    pub indent: String,
    pub keep_empty_rows: bool,
    pub force_untranslated: bool,
}

impl ConvertArgs {
    /// Validate every argument and build the run configuration.
    pub fn into_config(self) -> Result<Config, String> {
        let direction = resolve_direction(self.in_csv, self.out_res, self.in_res, self.out_csv)?;
        let locales = match self.locales {
            Some(list) => parse_locales(&list)?,
            None => Vec::new(),
        };
        let config = match direction {
            Direction::CsvToTree {
                input_csv,
                output_res,
            } => Config::csv_to_tree(input_csv, output_res),
            Direction::TreeToCsv {
                input_res,
                output_csv,
            } => Config::tree_to_csv(input_res, output_csv),
        };
        Ok(config
            .with_locales(locales)
            .with_delimiter(parse_separator(&self.separator)?)
            .with_indent(parse_indent(&self.indent)?)
            .with_keep_empty_rows(self.keep_empty_rows)
            .with_force_untranslated(self.force_untranslated))
    }
}

/// Run the convert command and print one line per locale.
pub fn run_convert_command(args: ConvertArgs) -> Result<(), String> {
    let config = args.into_config()?;
    let report = reseda::convert(&config).map_err(|e| e.to_string())?;
    print_report(&config, &report);
    Ok(())
}

fn print_report(config: &Config, report: &ConversionReport) {
    let verb = match config.direction {
        Direction::CsvToTree { .. } => "Wrote",
        Direction::TreeToCsv { .. } => "Read",
    };
    for locale in &report.locales {
        println!(
            "✅ {} `{}`: {} strings, {} arrays",
            verb,
            locale.locale_name(),
            locale.strings,
            locale.arrays
        );
    }
    match &config.direction {
        Direction::CsvToTree { output_res, .. } => {
            println!("✅ Resources written to: {}", output_res.display())
        }
        Direction::TreeToCsv { output_csv, .. } => {
            println!("✅ Table written to: {}", output_csv.display())
        }
    }
}
