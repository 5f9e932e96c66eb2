//! Configuration handling for csvcheck

use std::path::PathBuf;

use crate::error::{CheckError, Result};

/// How rows of one table correspond to rows of the other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    /// One-to-one pairing; duplicates are matched duplicate-for-duplicate
    Match,
    /// Membership in the other table's distinct keys
    #[default]
    Set,
    /// Row i against row i
    Direct,
}

impl std::str::FromStr for Method {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "match" => Ok(Method::Match),
            "set" => Ok(Method::Set),
            "direct" => Ok(Method::Direct),
            _ => Err(CheckError::configuration(format!("unsupported method {}", s))),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Match => write!(f, "match"),
            Method::Set => write!(f, "set"),
            Method::Direct => write!(f, "direct"),
        }
    }
}

/// Which rows a comparison emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Rows with a counterpart in the other table
    Common,
    /// Rows without a counterpart in the other table
    Different,
}

impl std::str::FromStr for Function {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "common" => Ok(Function::Common),
            "different" => Ok(Function::Different),
            "" => Err(CheckError::configuration("function must be given")),
            _ => Err(CheckError::configuration(format!(
                "unsupported function {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Function::Common => write!(f, "common"),
            Function::Different => write!(f, "different"),
        }
    }
}

/// Output format for result tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Settings for one comparison run over two tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareConfig {
    /// Row correspondence discipline
    pub method: Method,
    /// Common or different rows; required
    pub function: Option<Function>,
    /// Compare only these columns
    pub use_columns: Option<Vec<String>>,
    /// Compare every column except these
    pub ignore_columns: Option<Vec<String>>,
    /// Compare the columns both tables share
    pub use_common_columns: bool,
    /// Append the original row position to each output
    pub keep_index: bool,
    /// Keep only these columns in the outputs
    pub keep_columns: Option<Vec<String>>,
    /// Drop these columns from the outputs
    pub delete_columns: Option<Vec<String>>,
    /// Final column order of the first output
    pub arrangement1: Option<Vec<String>>,
    /// Final column order of the second output
    pub arrangement2: Option<Vec<String>>,
    /// Move shared columns to the front of both inputs before comparing
    pub auto_align: bool,
}

impl CompareConfig {
    /// Create a config for the given function with default options
    pub fn new(function: Function) -> Self {
        Self {
            function: Some(function),
            ..Default::default()
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_function(mut self, function: Function) -> Self {
        self.function = Some(function);
        self
    }

    pub fn with_use_columns(mut self, columns: Vec<String>) -> Self {
        self.use_columns = Some(columns);
        self
    }

    pub fn with_ignore_columns(mut self, columns: Vec<String>) -> Self {
        self.ignore_columns = Some(columns);
        self
    }

    pub fn with_use_common_columns(mut self, enabled: bool) -> Self {
        self.use_common_columns = enabled;
        self
    }

    pub fn with_keep_index(mut self, enabled: bool) -> Self {
        self.keep_index = enabled;
        self
    }

    pub fn with_keep_columns(mut self, columns: Vec<String>) -> Self {
        self.keep_columns = Some(columns);
        self
    }

    pub fn with_delete_columns(mut self, columns: Vec<String>) -> Self {
        self.delete_columns = Some(columns);
        self
    }

    pub fn with_arrangement1(mut self, columns: Vec<String>) -> Self {
        self.arrangement1 = Some(columns);
        self
    }

    pub fn with_arrangement2(mut self, columns: Vec<String>) -> Self {
        self.arrangement2 = Some(columns);
        self
    }

    pub fn with_auto_align(mut self, enabled: bool) -> Self {
        self.auto_align = enabled;
        self
    }

    /// Check option consistency before any table data is touched
    pub fn validate(&self) -> Result<Function> {
        let function = self
            .function
            .ok_or_else(|| CheckError::configuration("function must be given"))?;

        let scope_options = [
            self.use_columns.is_some(),
            self.ignore_columns.is_some(),
            self.use_common_columns,
        ];
        if scope_options.iter().filter(|&&set| set).count() > 1 {
            return Err(CheckError::configuration(
                "use-columns, ignore-columns and use-common-columns cannot be used together",
            ));
        }

        if self.keep_columns.is_some() && self.delete_columns.is_some() {
            return Err(CheckError::configuration(
                "keep-columns and delete-columns cannot be used together",
            ));
        }

        Ok(function)
    }
}

/// Run-level settings for the command line tool
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory prepended to both input file names
    pub input_dir: PathBuf,
    /// The two files to compare
    pub files: [PathBuf; 2],
    /// Where result CSV files are written, if anywhere
    pub output_dir: Option<PathBuf>,
    /// Add a timestamp to written file names
    pub add_timestamp: bool,
    /// Console output format
    pub output_format: OutputFormat,
    /// Pretty format cell truncation length; negative means unlimited
    pub pretty_max_length: i64,
    /// Field delimiter override; otherwise picked from the file extension
    pub delimiter: Option<u8>,
    /// Comparison settings
    pub compare: CompareConfig,
}

impl Config {
    /// Create a new Config for two files in a directory
    pub fn new(input_dir: PathBuf, files: [PathBuf; 2], compare: CompareConfig) -> Self {
        Self {
            input_dir,
            files,
            output_dir: None,
            add_timestamp: false,
            output_format: OutputFormat::default(),
            pretty_max_length: -1,
            delimiter: None,
            compare,
        }
    }

    /// Full paths of the two input files
    pub fn input_paths(&self) -> [PathBuf; 2] {
        [
            self.input_dir.join(&self.files[0]),
            self.input_dir.join(&self.files[1]),
        ]
    }

    /// Truncation length for pretty output, `None` when unlimited
    pub fn max_cell_length(&self) -> Option<usize> {
        usize::try_from(self.pretty_max_length).ok()
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    pub fn with_add_timestamp(mut self, enabled: bool) -> Self {
        self.add_timestamp = enabled;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_pretty_max_length(mut self, length: i64) -> Self {
        self.pretty_max_length = length;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
}
