//! Command-line front end for inspecting delimited files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::style::Stylize;
use csv_inspect::config::Config;
use csv_inspect::data::csv_reader::RaggedRows;
use csv_inspect::data::data_exporter::DataExporter;
use csv_inspect::data::type_converter::{parse_datetime, NumericKind};
use csv_inspect::dir_check::check_io;
use csv_inspect::table_display::display_table;
use csv_inspect::utils::logging::init_tracing;
use csv_inspect::{filter_data, DataTable, DataType, DataValue, FilterBounds, TableSession};

#[derive(Debug, Parser)]
#[command(name = "csv-inspect", version, about = "Typed inspection of delimited files")]
struct Cli {
    /// Config file (defaults to ~/.config/csv-inspect/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Default, Args)]
struct LoadArgs {
    /// Field separator
    #[arg(long)]
    sep: Option<char>,

    /// Treat the first row as column names
    #[arg(long)]
    header: bool,

    /// Explicit comma-separated column names
    #[arg(long, value_delimiter = ',')]
    names: Option<Vec<String>>,

    /// Convert numeric columns to integers instead of floats
    #[arg(long)]
    integer: bool,

    /// Value for numeric gaps with no neighbor
    #[arg(long)]
    default: Option<f64>,

    /// chrono format for datetime columns
    #[arg(long = "dt-format")]
    dt_format: Option<String>,

    /// Value for datetime gaps with no neighbor, in the datetime format
    #[arg(long = "dt-default")]
    dt_default: Option<String>,

    /// Repair gaps from the previous value instead of the next one
    #[arg(long = "use-prev")]
    use_prev: bool,

    /// Non-empty cells sampled when classifying a column
    #[arg(long = "test-size")]
    test_size: Option<usize>,

    /// Fail on rows with fewer fields than columns
    #[arg(long = "reject-ragged")]
    reject_ragged: bool,
}

impl LoadArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(sep) = self.sep {
            config.read.delimiter = sep;
        }
        if self.header {
            config.read.header = true;
        }
        if let Some(names) = &self.names {
            config.read.column_names = Some(names.clone());
        }
        if self.reject_ragged {
            config.read.ragged_rows = RaggedRows::Reject;
        }
        if self.integer {
            config.convert.numeric_kind = NumericKind::Integer;
        }
        if let Some(default) = self.default {
            config.convert.numeric_default = Some(default);
        }
        if let Some(format) = &self.dt_format {
            config.convert.datetime_format = format.clone();
        }
        if let Some(default) = &self.dt_default {
            config.convert.datetime_default = Some(default.clone());
        }
        if self.use_prev {
            config.convert.use_next = false;
        }
        if let Some(size) = self.test_size {
            config.convert.test_size = size;
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load files and print them as tables
    Show {
        files: Vec<PathBuf>,
        /// Print column types, null counts and metadata instead of the rows
        #[arg(long)]
        debug: bool,
        #[command(flatten)]
        load: LoadArgs,
    },
    /// Print the rows whose values fall inside every given range
    Filter {
        file: PathBuf,
        /// Lower bound as column=value (repeatable)
        #[arg(long = "min", required = true)]
        min: Vec<String>,
        /// Upper bound as column=value (repeatable)
        #[arg(long = "max", required = true)]
        max: Vec<String>,
        #[command(flatten)]
        load: LoadArgs,
    },
    /// Validate input and output directories
    Check {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value = ".csv")]
        ext: String,
    },
    /// Load one file and write the typed result
    Export {
        file: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        #[command(flatten)]
        load: LoadArgs,
    },
    /// Convert every matching file of a directory into an output directory
    Convert {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value = ".csv")]
        ext: String,
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        #[command(flatten)]
        load: LoadArgs,
    },
    /// Write a commented default config file
    InitConfig,
}

fn load_config(path: Option<&Path>, load: &LoadArgs) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => Config::load()?,
    };
    load.apply(&mut config);
    Ok(config)
}

/// Parse `column=value` pairs, typing each value after its column
fn parse_bounds(
    table: &DataTable,
    pairs: &[String],
    datetime_format: &str,
) -> Result<Vec<(String, DataValue)>> {
    pairs
        .iter()
        .map(|pair| -> Result<(String, DataValue)> {
            let (name, raw) = pair
                .split_once('=')
                .with_context(|| format!("Bound '{}' is not column=value", pair))?;
            let column = table
                .get_column(name)
                .with_context(|| format!("Unknown column '{}'", name))?;
            let value = match column.data_type {
                DataType::Integer | DataType::Float => DataValue::Float(
                    raw.parse::<f64>()
                        .with_context(|| format!("Bound '{}' is not a number", raw))?,
                ),
                DataType::DateTime => DataValue::DateTime(parse_datetime(raw, datetime_format)?),
                DataType::Null => bail!("Column '{}' has no type", name),
            };
            Ok((name.to_string(), value))
        })
        .collect()
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Show { files, debug, load } => {
            if files.is_empty() {
                bail!("No input files given");
            }
            let config = load_config(config_path, &load)?;
            let options = config.to_load_options()?;
            let mut session = TableSession::new();
            for file in &files {
                let table = session
                    .load(file, &options)
                    .with_context(|| format!("Failed to load {}", file.display()))?;
                println!("{}", file.display().to_string().bold());
                if debug {
                    print!("{}", table.debug_dump());
                } else {
                    display_table(&table, &config.display.datetime_format);
                }
            }
        }
        Command::Filter {
            file,
            min,
            max,
            load,
        } => {
            let config = load_config(config_path, &load)?;
            let options = config.to_load_options()?;
            let mut session = TableSession::new();
            let table = session
                .load(&file, &options)
                .with_context(|| format!("Failed to load {}", file.display()))?;

            let format = &config.convert.datetime_format;
            let bounds = FilterBounds {
                min: parse_bounds(&table, &min, format)?.into_iter().collect(),
                max: parse_bounds(&table, &max, format)?.into_iter().collect(),
            };
            let filtered = filter_data(&table, &bounds)?;
            display_table(&filtered, &config.display.datetime_format);
        }
        Command::Check { input, output, ext } => {
            let inputs = check_io(&input, &output, &ext)?;
            println!(
                "{}",
                format!("{} input files ready", inputs.len()).green()
            );
            for path in inputs {
                println!("  {}", path.display());
            }
        }
        Command::Export {
            file,
            output,
            format,
            load,
        } => {
            let config = load_config(config_path, &load)?;
            let options = config.to_load_options()?;
            let mut session = TableSession::new();
            let table = session
                .load(&file, &options)
                .with_context(|| format!("Failed to load {}", file.display()))?;
            export(&table, &output, format, options.read.delimiter)?;
            println!("{}", format!("Exported to {}", output.display()).green());
        }
        Command::Convert {
            input,
            output,
            ext,
            format,
            load,
        } => {
            let config = load_config(config_path, &load)?;
            let options = config.to_load_options()?;
            let inputs = check_io(&input, &output, &ext)?;
            let mut session = TableSession::new();
            for path in &inputs {
                let table = session
                    .load(path, &options)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "table".to_string());
                let target = output.join(format!("{}.{}", stem, format.extension()));
                export(&table, &target, format, options.read.delimiter)?;
                println!("{} -> {}", path.display(), target.display());
            }
            println!(
                "{}",
                format!("{} files converted", inputs.len()).green()
            );
        }
        Command::InitConfig => {
            let path = match config_path {
                Some(path) => path.to_path_buf(),
                None => Config::get_config_path()?,
            };
            Config::write_default(&path)?;
            println!("{}", format!("Wrote {}", path.display()).green());
        }
    }

    Ok(())
}

fn export(table: &DataTable, path: &Path, format: ExportFormat, delimiter: u8) -> Result<()> {
    match format {
        ExportFormat::Csv => DataExporter::export_csv(table, path, delimiter)?,
        ExportFormat::Json => DataExporter::export_json(table, path)?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
