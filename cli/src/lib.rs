//! HTL CLI - render and inspect templates from the command line.
//!
//! Subcommands:
//! - `render`: render a template with JSON arguments
//! - `tokens`: print the lexer's token stream
//! - `bytecode`: print the compiled instruction listing

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use htl_engine::{Engine, EngineOptions, FsSourceProvider, HostValue, SourceProvider};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod error;

pub use error::{CliError, CliResult};

/// HTL template tool
#[derive(Parser, Debug)]
#[command(name = "htl")]
#[command(about = "HTL - render and inspect HTML templates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Template root directory; every template path is resolved inside it
    #[arg(short, long, env = "HTL_ROOT_DIR")]
    root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template to stdout
    Render {
        /// Template file, relative to the root
        file: String,

        /// Render arguments as a JSON object
        #[arg(long, conflicts_with = "args_file")]
        args: Option<String>,

        /// Read render arguments from a JSON file
        #[arg(long)]
        args_file: Option<PathBuf>,
    },

    /// Print the token stream of a template
    Tokens {
        /// Template file, relative to the root
        file: String,
    },

    /// Print the bytecode listing of a template
    Bytecode {
        /// Template file, relative to the root
        file: String,
    },
}

/// Run using the current process arguments, writing to stdout.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(cli, &mut std::io::stdout().lock())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I, out: &mut impl Write) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    execute(Cli::parse_from(args), out)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn execute(cli: Cli, out: &mut impl Write) -> CliResult<()> {
    let options = options(cli.root)?;

    match cli.command {
        Commands::Render {
            file,
            args,
            args_file,
        } => {
            let args = render_args(args, args_file)?;
            let html = Engine::new(options).render(&file, &args)?;
            out.write_all(html.as_bytes())?;
        }
        Commands::Tokens { file } => {
            let source = FsSourceProvider::new(&options).get_text(&file)?;
            for token in htl_parser::tokenize(file.as_str(), &source)? {
                writeln!(out, "{token}")?;
            }
        }
        Commands::Bytecode { file } => {
            let bytecode = Engine::new(options).compile(&file)?;
            write!(out, "{bytecode}")?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Relative roots are taken relative to the working directory.
fn options(root: Option<PathBuf>) -> CliResult<EngineOptions> {
    let mut builder = EngineOptions::builder();
    if let Some(root) = root {
        builder = builder.root_dir(std::path::absolute(root)?);
    }
    Ok(builder.build()?)
}

fn render_args(inline: Option<String>, file: Option<PathBuf>) -> CliResult<HostValue> {
    let json = match (inline, file) {
        (Some(json), _) => json,
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => return Ok(HostValue::Object(Default::default())),
    };
    let value: serde_json::Value = serde_json::from_str(&json)?;
    debug!(bytes = json.len(), "parsed render arguments");
    Ok(value.into())
}
