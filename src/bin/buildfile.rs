//! Command-line interface for buildfile
//! This binary parses BUILD files and prints them in the processing formats or canonically.
//!
//! Usage:
//!   buildfile `<path>` [`<format>`]                  - Process a file (default format: ast-canonical)
//!   buildfile process `<path>` [`<format>`]          - Same, as an explicit subcommand
//!   buildfile format `<path>` [--check]            - Print the canonical form (per `printer.scope`), or check a file is canonical
//!   buildfile formats                              - List the available formats
//!
//! `--config <file>` layers a TOML file over the built-in defaults.

use buildfile::buildfile::config::{BuildfileConfig, Loader};
use buildfile::buildfile::processor::{available_formats, process_file, ProcessingSpec};
use buildfile::buildfile::{format_with, ParseOptions, PrintOptions, PrintScope};
use clap::{Arg, ArgAction, ArgMatches, Command};

const DEFAULT_FORMAT: &str = "ast-canonical";

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the BUILD file")
        .required(true)
        .index(1)
}

fn format_arg() -> Arg {
    Arg::new("format")
        .help("Output format (see `buildfile formats`)")
        .default_value(DEFAULT_FORMAT)
        .index(2)
}

fn main() {
    let matches = Command::new("buildfile")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and formatting BUILD files")
        .arg_required_else_help(true)
        .args_conflicts_with_subcommands(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the default configuration")
                .global(true),
        )
        .arg(path_arg().required(false))
        .arg(format_arg())
        .subcommand(
            Command::new("process")
                .about("Process a BUILD file into one of the output formats")
                .arg(path_arg())
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("format")
                .about("Print the canonical form of a BUILD file")
                .arg(path_arg())
                .arg(
                    Arg::new("check")
                        .long("check")
                        .help("Exit with status 1 if the file is not in canonical form")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
        .get_matches();

    let config = load_config(&matches);
    init_logging(&config);

    match matches.subcommand() {
        Some(("process", process_matches)) => {
            handle_process_command(
                value(process_matches, "path"),
                value(process_matches, "format"),
                &config,
            );
        }
        Some(("format", format_matches)) => {
            handle_format_command(
                value(format_matches, "path"),
                format_matches.get_flag("check"),
                &config,
            );
        }
        Some(("formats", _)) => handle_formats_command(),
        _ => match matches.get_one::<String>("path") {
            Some(path) => handle_process_command(path, value(&matches, "format"), &config),
            None => fail("a path or a subcommand is required"),
        },
    }
}

fn value<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_default()
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn load_config(matches: &ArgMatches) -> BuildfileConfig {
    let mut loader = Loader::new();
    // `--config` is global, so it may sit on the subcommand's matches
    let path = matches.get_one::<String>("config").or_else(|| {
        matches
            .subcommand()
            .and_then(|(_, sub)| sub.get_one::<String>("config"))
    });
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| fail(e))
}

fn init_logging(config: &BuildfileConfig) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();
}

/// Handle the process command
fn handle_process_command(path: &str, format: &str, config: &BuildfileConfig) {
    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| fail(e));
    let output = process_file(path, &spec, config).unwrap_or_else(|e| fail(e));
    print!("{}", output);
}

/// Handle the format command
///
/// Printing follows `printer.scope`; `--check` always compares the whole file.
fn handle_format_command(path: &str, check: bool, config: &BuildfileConfig) {
    let source = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading {}: {}", path, e)));

    let mut print_options = PrintOptions::from(&config.printer);
    if check {
        print_options.scope = PrintScope::All;
    }
    let formatted = format_with(&source, &ParseOptions::from(&config.parser), &print_options)
        .unwrap_or_else(|e| fail(e));

    if !check {
        print!("{}", formatted);
    } else if formatted != source {
        eprintln!("{} is not canonically formatted", path);
        std::process::exit(1);
    }
}

/// Handle the formats command
fn handle_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
