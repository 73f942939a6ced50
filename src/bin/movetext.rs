//! Command-line interface for movetext
//! This binary parses PGN files, reports diagnostics and re-exports games in other formats.
//!
//! Usage:
//!   movetext convert `<path>` [--format `<format>`] [--no-comments] [--no-variations]
//!                    [--no-annotations] [--no-headers] [--config `<file>`]
//!   movetext check `<path>`      - Print parse errors and warnings, exit 1 on errors
//!   movetext list-formats       - List the available output formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use movetext::pgn::config::{Loader, MovetextConfig};
use movetext::pgn::formats::{ExportOptions, FormatRegistry};
use movetext::pgn::parse_game;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("movetext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing, checking and converting PGN games")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("convert")
                .about("Parse a PGN file and write it in another format")
                .arg(
                    Arg::new("path")
                        .help("Path to the PGN file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'pgn', 'json')")
                        .default_value("pgn"),
                )
                .arg(flag("no-comments", "Leave comments out"))
                .arg(flag("no-variations", "Leave variations out"))
                .arg(flag("no-annotations", "Leave annotation glyphs out"))
                .arg(flag("no-headers", "Leave tag pairs out")),
        )
        .subcommand(
            Command::new("check")
                .about("Report parse errors and warnings")
                .arg(
                    Arg::new("path")
                        .help("Path to the PGN file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    let config_path = matches
        .subcommand()
        .and_then(|(_, sub)| sub.get_one::<String>("config"))
        .or_else(|| matches.get_one::<String>("config"));
    let config = load_config(config_path);
    init_tracing(&config);

    match matches.subcommand() {
        Some(("convert", convert_matches)) => handle_convert_command(convert_matches, &config),
        Some(("check", check_matches)) => {
            let path = required(check_matches, "path");
            handle_check_command(path);
        }
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .action(ArgAction::SetTrue)
        .help(help)
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_else(|| {
            eprintln!("Missing argument: {}", name);
            std::process::exit(2);
        })
}

fn load_config(path: Option<&String>) -> MovetextConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    })
}

/// `RUST_LOG` wins over the configured filter
fn init_tracing(config: &MovetextConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &MovetextConfig) {
    let path = required(matches, "path");
    let format = required(matches, "format");

    let mut options = ExportOptions::from(&config.export);
    if matches.get_flag("no-comments") {
        options = options.with_comments(false);
    }
    if matches.get_flag("no-variations") {
        options = options.with_variations(false);
    }
    if matches.get_flag("no-annotations") {
        options = options.with_annotations(false);
    }
    if matches.get_flag("no-headers") {
        options = options.with_headers(false);
    }

    let outcome = parse_game(&read_source(path));
    for error in &outcome.errors {
        tracing::warn!(%error, "parse error");
    }
    let Some(game) = outcome.game else {
        eprintln!("No game found in {}", path);
        std::process::exit(1);
    };

    let registry = FormatRegistry::with_options(options);
    let output = registry.serialize(&game, format).unwrap_or_else(|e| {
        eprintln!("Conversion error: {}", e);
        std::process::exit(1);
    });
    print!("{}", output);
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let outcome = parse_game(&read_source(path));
    for error in &outcome.errors {
        println!("error: {}", error);
    }
    for warning in &outcome.warnings {
        println!("warning: {}", warning);
    }
    if let Some(game) = &outcome.game {
        println!(
            "{} half-moves, result {}",
            game.mainline_sans().len(),
            game.result.as_deref().unwrap_or("none")
        );
    }
    if outcome.has_errors() {
        std::process::exit(1);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {}", name);
        println!("    {}", description);
    }
}
