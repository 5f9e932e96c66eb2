//! csvcheck - Reconcile two tabular exports

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};

use csvcheck::config::{CompareConfig, Config, Function, Method, OutputFormat};
use csvcheck::output::{render_result, result_file_name, CsvOutput, OutputFactory, OutputFormatter};
use csvcheck::parser::ParserFactory;
use csvcheck::pipeline::Pipeline;
use csvcheck::Table;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Pretty,
    Csv,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Pretty => OutputFormat::Pretty,
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Find the rows two CSV files have in common, or the rows that differ
#[derive(Parser, Debug)]
#[command(name = "csvcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the input files; prepended to the file names
    #[arg(short = 'd', long, default_value = ".")]
    input_dir: PathBuf,

    /// The two files to compare (comma-separated)
    #[arg(short, long, value_delimiter = ',', required = true)]
    files: Vec<PathBuf>,

    /// Row matching method: match, set or direct
    #[arg(short, long, default_value = "set")]
    method: String,

    /// Rows to report: common or different
    #[arg(short = 'F', long)]
    function: Option<String>,

    /// Append each row's original position as an _ind column
    #[arg(short, long)]
    keep_index: bool,

    /// Directory to write the result files to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Add a timestamp to the result file names
    #[arg(short = 't', long)]
    add_timestamp: bool,

    /// Columns to compare (comma-separated)
    #[arg(short = 'c', long, value_delimiter = ',')]
    use_columns: Option<Vec<String>>,

    /// Columns to leave out of the comparison (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    ignore_columns: Option<Vec<String>>,

    /// Move shared columns to the front of both files before comparing
    #[arg(short, long)]
    auto_align: bool,

    /// Compare on every column the two files share
    #[arg(short = 'C', long)]
    use_common_columns: bool,

    /// Columns to keep in the results (comma-separated)
    #[arg(short = 'K', long, value_delimiter = ',')]
    keep_columns: Option<Vec<String>>,

    /// Columns to delete from the results (comma-separated)
    #[arg(short = 'D', long, value_delimiter = ',')]
    delete_columns: Option<Vec<String>>,

    /// Full column order of the first result (comma-separated)
    #[arg(short = 'r', long, value_delimiter = ',')]
    columns_arrangement1: Option<Vec<String>>,

    /// Full column order of the second result (comma-separated)
    #[arg(short = 'R', long, value_delimiter = ',')]
    columns_arrangement2: Option<Vec<String>>,

    /// Print results as CSV (same as --format csv)
    #[arg(short = 'p', long)]
    csv: bool,

    /// Console output format
    #[arg(long, value_enum, default_value = "pretty")]
    format: CliOutputFormat,

    /// Truncate cells longer than this in pretty output; negative means no limit
    #[arg(short = 'l', long, default_value_t = -1, allow_negative_numbers = true)]
    pretty_max_length: i64,

    /// Field delimiter of the input files (default: from the file extension)
    #[arg(long)]
    delimiter: Option<char>,

    /// Log pipeline stages to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if env::var("RUST_LOG").is_err() {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        builder.filter_module("csvcheck", level);
    }
    let _ = builder.format_timestamp_millis().try_init();
}

fn build_config(cli: Cli) -> Result<Config> {
    let [file1, file2]: [PathBuf; 2] = match cli.files.try_into() {
        Ok(files) => files,
        Err(files) => bail!("exactly 2 file paths needed, got {}", files.len()),
    };

    let compare = CompareConfig {
        method: cli.method.parse::<Method>()?,
        function: cli.function.as_deref().map(str::parse::<Function>).transpose()?,
        use_columns: cli.use_columns,
        ignore_columns: cli.ignore_columns,
        use_common_columns: cli.use_common_columns,
        keep_index: cli.keep_index,
        keep_columns: cli.keep_columns,
        delete_columns: cli.delete_columns,
        arrangement1: cli.columns_arrangement1,
        arrangement2: cli.columns_arrangement2,
        auto_align: cli.auto_align,
    };
    // surface option conflicts before any file is read
    compare.validate()?;

    let output_format = if cli.csv {
        OutputFormat::Csv
    } else {
        cli.format.into()
    };

    let mut config = Config::new(cli.input_dir, [file1, file2], compare)
        .with_add_timestamp(cli.add_timestamp)
        .with_output_format(output_format)
        .with_pretty_max_length(cli.pretty_max_length);
    if let Some(dir) = cli.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(delimiter) = cli.delimiter {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("delimiter must be a single ASCII character: {}", delimiter))?;
        config = config.with_delimiter(delimiter);
    }
    Ok(config)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(cli)?;
    let [path1, path2] = config.input_paths();

    let factory = ParserFactory::new();
    let table1 = factory
        .parse(&path1, &config)
        .with_context(|| format!("Failed to parse first file: {}", path1.display()))?;
    let table2 = factory
        .parse(&path2, &config)
        .with_context(|| format!("Failed to parse second file: {}", path2.display()))?;

    let start_time = Local::now();
    println!("Start time: {}\n", start_time.format("%Y-%m-%d %H:%M:%S"));

    let output = Pipeline::new(config.compare.clone()).run(&table1, &table2)?;

    let name1 = display_name(&path1);
    let name2 = display_name(&path2);
    let formatter = OutputFactory::create(config.output_format, config.max_cell_length());
    let mut stdout = std::io::stdout().lock();
    render_result(formatter.as_ref(), &name1, &output.first, &mut stdout)?;
    render_result(formatter.as_ref(), &name2, &output.second, &mut stdout)?;

    if let Some(dir) = &config.output_dir {
        let timestamp = config
            .add_timestamp
            .then(|| start_time.format("%Y_%m_%d_%H_%M_%S").to_string());
        let out1 = dir.join(result_file_name(&path1, timestamp.as_deref()));
        let out2 = dir.join(result_file_name(&path2, timestamp.as_deref()));
        write_csv(&out1, &output.first)?;
        write_csv(&out2, &output.second)?;
        info!("wrote {} and {}", out1.display(), out2.display());
        writeln!(
            stdout,
            "Results written to {} and {}.",
            out1.display(),
            out2.display()
        )?;
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_csv(path: &Path, table: &Table) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    CsvOutput::new()
        .render(table, &mut writer)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
