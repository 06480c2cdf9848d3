//! The conversion driver.
//!
//! [`convert`] runs one full batch conversion in the direction named by the
//! [`Config`]: read everything, then write everything. Nothing is written when
//! reading fails.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::{
    config::{Config, Direction},
    error::Error,
    formats::CsvFormat,
    tree::{read_tree, write_tree},
    types::{LocaleSummary, ResourceSet},
};

/// What a conversion wrote, one entry per locale in output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ConversionReport {
    pub locales: Vec<LocaleSummary>,
}

impl ConversionReport {
    pub fn total_strings(&self) -> usize {
        self.locales.iter().map(|l| l.strings).sum()
    }

    pub fn total_arrays(&self) -> usize {
        self.locales.iter().map(|l| l.arrays).sum()
    }
}

/// Run the conversion described by `config`.
///
/// # Example
///
/// ```rust,no_run
/// use reseda::{Config, convert};
///
/// let report = convert(&Config::tree_to_csv("app/src/main/res", "strings.csv"))?;
/// println!("{} locales", report.locales.len());
/// # Ok::<(), reseda::Error>(())
/// ```
pub fn convert(config: &Config) -> Result<ConversionReport, Error> {
    match &config.direction {
        Direction::CsvToTree {
            input_csv,
            output_res,
        } => csv_to_tree(input_csv, output_res, config),
        Direction::TreeToCsv {
            input_res,
            output_csv,
        } => tree_to_csv(input_res, output_csv, config),
    }
}

fn csv_to_tree(input: &Path, output: &Path, config: &Config) -> Result<ConversionReport, Error> {
    info!("Reading table `{}`", input.display());
    let sets = read_table(input, config)?;

    info!("Writing resources to `{}`", output.display());
    let locales = write_tree(output, &sets, &config.tree_write_options())?;
    Ok(ConversionReport { locales })
}

fn tree_to_csv(input: &Path, output: &Path, config: &Config) -> Result<ConversionReport, Error> {
    info!("Reading resources from `{}`", input.display());
    let sets = read_tree(input, &config.tree_read_options())?;

    info!("Writing table `{}`", output.display());
    CsvFormat::from_resource_sets(&sets).write_to(output, config.delimiter)?;
    let locales = sets.iter().map(LocaleSummary::of).collect();
    Ok(ConversionReport { locales })
}

/// Reads a table into resource sets using the table settings of `config`.
pub fn read_table(input: &Path, config: &Config) -> Result<Vec<ResourceSet>, Error> {
    let options = config.table_options();
    CsvFormat::read_from(input, options.delimiter)?.into_resource_sets(&options)
}
