//! Command-line interface for yinl
//!
//! Usage:
//!   yinl `<path>` [--format `<format>`] [--output `<file>`] [--save]  - Render a document
//!   yinl --list-formats                                          - List the output formats
//!
//! `-` reads the document from standard input.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use yinl::yinl::config::{Loader, YinlConfig};
use yinl::yinl::formats::{FormatError, Formatter, RenderOptions};
use yinl::yinl::pipeline::{save_by_title, DocumentLoader, LoadError};

fn build_cli() -> Command {
    Command::new("yinl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render yinl documents to markdown and inspect their structure")
        .arg(
            Arg::new("path")
                .help("Path to the yinl document ('-' for stdin)")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (see --list-formats)")
                .default_value("markdown"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the output to this file instead of stdout")
                .value_name("FILE")
                .conflicts_with("save"),
        )
        .arg(
            Arg::new("save")
                .long("save")
                .help("Save the output as '<title>.<ext>' in the current directory (md, json, yaml, txt)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Configuration file layered over the defaults")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail when a macro call cannot be expanded")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List the available output formats")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<YinlConfig, LoadError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("strict") {
        loader = loader
            .set_override("render.strict_macros", true)
            .map_err(|err| LoadError::Config(err.to_string()))?;
    }
    loader
        .build()
        .map_err(|err| LoadError::Config(err.to_string()))
}

fn handle_list_formats() {
    let loader = DocumentLoader::new();
    println!("Available formats:\n");
    for (name, description) in loader.registry().describe_formats() {
        println!("  {name:<10} {description}");
    }
}

fn handle_render(matches: &ArgMatches) -> Result<(), LoadError> {
    let config = load_config(matches)?;
    let loader = DocumentLoader::from_config(&config);
    let Some(path) = matches.get_one::<String>("path") else {
        return Ok(());
    };
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("markdown");
    let extension = loader
        .registry()
        .get(format)
        .map(|formatter| formatter.file_extension().to_string())
        .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;

    let doc = loader.load(path)?;
    for warning in &doc.warnings {
        eprintln!("warning: {warning}");
    }

    let output = if format == "markdown" {
        let rendered = loader.render_markdown(&doc);
        for error in &rendered.errors {
            eprintln!("macro error: {error}");
        }
        let options: &RenderOptions = loader.render_options();
        if options.strict_macros && !rendered.errors.is_empty() {
            return Err(FormatError::UnresolvedMacros(rendered.errors).into());
        }
        rendered.markdown
    } else {
        loader.registry().serialize(&doc, format)?
    };

    if matches.get_flag("save") {
        let saved = save_by_title(&doc, &output, Path::new("."), &extension)?;
        eprintln!("saved {}", saved.display());
    } else if let Some(target) = matches.get_one::<String>("output") {
        let target = PathBuf::from(target);
        std::fs::write(&target, &output).map_err(|err| LoadError::Io {
            path: target.display().to_string(),
            message: err.to_string(),
        })?;
    } else {
        print!("{output}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats();
        return ExitCode::SUCCESS;
    }

    match handle_render(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
