use crate::style::ColorMode;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Id clap derives from the `invoke` field.
const INVOKE_ID: &str = "invoke";

#[derive(Parser, Debug)]
#[command(name = "component-inspector")]
#[command(about = "List, dump and invoke the types of a component")]
#[command(version)]
pub struct Cli {
    /// Component to inspect: a bundled component name or a .json manifest
    /// (defaults to example.dll)
    pub component: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// List all types
    #[arg(short, long)]
    pub types: bool,

    /// List all fields
    #[arg(short, long)]
    pub fields: bool,

    /// List all properties
    #[arg(short, long)]
    pub properties: bool,

    /// List all methods
    #[arg(short, long)]
    pub methods: bool,

    /// Show the complete component structure in declaration style
    #[arg(short, long)]
    pub all: bool,

    /// Invoke a method with optional arguments (repeatable)
    #[arg(
        short,
        long,
        value_name = "TYPE.METHOD [ARGS]",
        num_args = 1..,
        action = ArgAction::Append,
        allow_negative_numbers = true
    )]
    pub invoke: Vec<String>,

    /// `invoke` split per occurrence: the method name followed by its arguments.
    /// Filled by [`Cli::from_args`].
    #[arg(skip)]
    pub invocations: Vec<Vec<String>>,

    /// Hide members inherited from base types
    #[arg(long)]
    pub declared_only: bool,

    /// When to colour output
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Config file (defaults to .inspector.toml in the working directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse the process arguments.
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::from_args(std::env::args_os())
    }

    /// Parse `args`, keeping each `-i` occurrence as its own invocation.
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let mut cli = Self::from_arg_matches(&matches)?;
        cli.invocations = matches
            .get_occurrences::<String>(INVOKE_ID)
            .map(|occurrences| {
                occurrences
                    .map(|values| values.cloned().collect())
                    .collect()
            })
            .unwrap_or_default();
        Ok(cli)
    }
}

/// Exit code for a parse result that stopped the run: 0 for `--help` and
/// `--version`, 1 for usage errors.
pub fn exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}
