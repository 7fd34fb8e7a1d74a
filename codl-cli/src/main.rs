//! Command-line interface for codl
//! Translates CODL route files into registration code.
//!
//! Usage:
//!   codl build [-d `<dir>`]                          - Translate every *.codl file in a directory
//!   codl watch [-d `<dir>`] [--period `<ms>`]        - Re-translate files as they change
//!   codl inspect `<path>` [--format `<format>`]      - Print tokens or rendered output for one file
//!
//! Settings come from the built-in defaults, then `./codl.toml` if present, then `--config`,
//! then command-line flags.

mod discovery;
mod inspect;
mod translate;
mod watch;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use codl_config::{CodlConfig, Loader};
use codl_parser::ParseOptions;
use codl_render::{FormatRegistry, RustFormat};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use translate::Translator;

const EXIT_FAILURE: i32 = 1;
const EXIT_NO_FILES: i32 = 2;

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(EXIT_FAILURE);
    });

    let result = match matches.subcommand() {
        Some(("build", build_matches)) => handle_build_command(build_matches, &config),
        Some(("watch", watch_matches)) => handle_watch_command(watch_matches, &config),
        Some(("inspect", inspect_matches)) => handle_inspect_command(inspect_matches, &config),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_FAILURE);
    }
}

fn cli() -> Command {
    let dir_arg = Arg::new("dir")
        .long("dir")
        .short('d')
        .help("Directory containing the CODL files")
        .default_value(".");

    Command::new("codl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate CODL route definitions into code")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over ./codl.toml"),
        )
        .arg(
            Arg::new("dialect")
                .long("dialect")
                .global(true)
                .value_parser(["strict", "permissive"])
                .help("Grammar dialect (overrides parser.dialect)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .global(true)
                .help("Output format: rust, json, or tokens for inspect (overrides render.format)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output"),
        )
        .subcommand(
            Command::new("build")
                .about("Translate every CODL file in a directory")
                .arg(dir_arg.clone()),
        )
        .subcommand(
            Command::new("watch")
                .about("Poll a directory and translate files as they change")
                .arg(dir_arg)
                .arg(
                    Arg::new("period")
                        .long("period")
                        .value_parser(clap::value_parser!(u64))
                        .help("Milliseconds between polls (overrides watch.period_ms)"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the tokens or the rendered output of one file")
                .arg(
                    Arg::new("path")
                        .help("Path to the CODL file")
                        .required(true)
                        .index(1),
                ),
        )
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<CodlConfig> {
    let mut loader = Loader::new().with_project_file(".");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(dialect) = matches.get_one::<String>("dialect") {
        loader = loader.set_override("parser.dialect", dialect.as_str())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        if format != inspect::TOKENS {
            loader = loader.set_override("render.format", format.as_str())?;
        }
    }
    Ok(loader.build()?)
}

fn translator(config: &CodlConfig) -> Result<Translator> {
    let mut registry = FormatRegistry::with_defaults();
    registry.register(RustFormat::new(config.render.registry_path.as_str()));
    let options = ParseOptions::default().with_dialect(config.parser.dialect);
    Translator::new(registry, &config.render.format, options)
}

/// Handle the build command
fn handle_build_command(matches: &ArgMatches, config: &CodlConfig) -> Result<()> {
    let dir = Path::new(matches.get_one::<String>("dir").map_or(".", String::as_str));
    let translator = translator(config)?;

    let files = discovery::discover(dir, &config.build.source_extension)
        .with_context(|| format!("failed to search {}", dir.display()))?;
    if files.is_empty() {
        eprintln!(
            "No *.{} files found in {}",
            config.build.source_extension,
            dir.display()
        );
        std::process::exit(EXIT_NO_FILES);
    }

    translator.translate_all(&files)?;
    Ok(())
}

/// Handle the watch command
fn handle_watch_command(matches: &ArgMatches, config: &CodlConfig) -> Result<()> {
    let dir = Path::new(matches.get_one::<String>("dir").map_or(".", String::as_str));
    let period = matches
        .get_one::<u64>("period")
        .copied()
        .unwrap_or(config.watch.period_ms);
    let translator = translator(config)?;

    watch::run(
        dir,
        &config.build.source_extension,
        Duration::from_millis(period),
        &translator,
    )
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches, config: &CodlConfig) -> Result<()> {
    let path = Path::new(
        matches
            .get_one::<String>("path")
            .context("path is required")?,
    );
    let format = matches
        .get_one::<String>("format")
        .map_or(config.render.format.as_str(), String::as_str);
    let translator = translator(config)?;

    let output = inspect::inspect(path, format, &translator)?;
    print!("{}", output);
    Ok(())
}
