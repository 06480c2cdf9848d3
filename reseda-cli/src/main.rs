use clap::{Parser, Subcommand};
use reseda_cli::{
    ConvertArgs, DebugSource, run_convert_command, run_debug_command,
    validation::{parse_locales, parse_separator},
};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Show debug output, including dropped keys
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a CSV table to Android resources, or Android resources to a CSV table.
    Convert {
        /// The CSV table to read
        #[arg(long, value_name = "FILE")]
        in_csv: Option<String>,
        /// The res directory to write
        #[arg(long, value_name = "DIR")]
        out_res: Option<String>,
        /// The res directory to read
        #[arg(long, value_name = "DIR")]
        in_res: Option<String>,
        /// The CSV table to write
        #[arg(long, value_name = "FILE")]
        out_csv: Option<String>,

        /// Comma separated locales, e.g. "fr,de,pt-rBR" (default: all table columns)
        #[arg(short, long)]
        locales: Option<String>,

        /// CSV field separator; `\t` for tabs
        #[arg(short, long, default_value = ",")]
        separator: String,

        /// XML indentation unit; `\t`, `\n` and `\s` are unescaped
        #[arg(long, default_value = "\\s\\s")]
        indent: String,

        /// Keep empty lines between resources
        #[arg(long)]
        keep_empty_rows: bool,

        /// Fill missing translations with the default locale value instead of failing
        #[arg(long)]
        force_untranslated: bool,
    },

    /// Read a CSV table or a res directory and dump it as JSON.
    Debug {
        /// The CSV table to read
        #[arg(long, value_name = "FILE", conflicts_with = "in_res", required_unless_present = "in_res")]
        in_csv: Option<String>,
        /// The res directory to read
        #[arg(long, value_name = "DIR")]
        in_res: Option<String>,

        /// Comma separated locales to read
        #[arg(short, long)]
        locales: Option<String>,

        /// CSV field separator
        #[arg(short, long, default_value = ",")]
        separator: String,

        /// The output file for JSON (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(commands: Commands) -> Result<(), String> {
    match commands {
        Commands::Convert {
            in_csv,
            out_res,
            in_res,
            out_csv,
            locales,
            separator,
            indent,
            keep_empty_rows,
            force_untranslated,
        } => run_convert_command(ConvertArgs {
            in_csv,
            out_res,
            in_res,
            out_csv,
            locales,
            separator,
            indent,
            keep_empty_rows,
            force_untranslated,
        }),
        Commands::Debug {
            in_csv,
            in_res,
            locales,
            separator,
            output,
        } => {
            let source = match (in_csv, in_res) {
                (Some(csv), _) => DebugSource::Csv(csv),
                (None, Some(res)) => DebugSource::Res(res),
                (None, None) => return Err("Either --in-csv or --in-res is required".to_string()),
            };
            let locales = match locales {
                Some(list) => parse_locales(&list)?,
                None => Vec::new(),
            };
            run_debug_command(source, locales, parse_separator(&separator)?, output)
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args.commands) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
