//! Command-line interface for sourcery
//! This binary runs the directive preprocessor over the given files and
//! directories: directive lines are executed (directories created, files
//! generated, commands run) and their outcomes reported.
//!
//! Usage:
//!   sourcery [-r] `<paths>`...                 - Process files and directories
//!   sourcery --inspect `<paths>`...            - Classify directives without executing
//!   sourcery --config `<file>` `<paths>`...    - Layer a configuration file

use clap::{Arg, ArgAction, ArgMatches, Command};
use ignore::WalkBuilder;
use sourcery_config::{ConfigError, Loader, ReportFormat, SourceryConfig, DEFAULTS};
use sourcery_core::{inspect_source_file, process_source_file, Arena, LineEnding};
use std::path::{Path, PathBuf};

fn main() {
    let matches = Command::new("sourcery")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A line-directive preprocessor: scans text sources for #! directives and executes them")
        .arg_required_else_help(true)
        .arg(
            Arg::new("paths")
                .help("Files or directories to process")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("recursive")
                .long("recursive")
                .short('r')
                .help("Descend into directories recursively")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("line-ending")
                .long("line-ending")
                .help("Line-ending convention used to split sources")
                .value_parser(["lf", "crlf", "auto"]),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Report format")
                .value_parser(["text", "json"]),
        )
        .arg(
            Arg::new("inspect")
                .long("inspect")
                .help("Classify directives without executing them")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = build_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let paths: Vec<&String> = matches
        .get_many::<String>("paths")
        .expect("paths are required")
        .collect();
    let files = collect_files(&paths, matches.get_flag("recursive"));
    if files.is_empty() {
        eprintln!("No source files to process.");
        std::process::exit(1);
    }

    let ending = config.processing.line_ending.fixed();
    let mut arena = Arena::with_capacity(config.processing.arena_capacity);

    let failed = if matches.get_flag("inspect") {
        handle_inspect(&mut arena, &files, ending, config.report.format)
    } else {
        handle_process(&mut arena, &files, ending, config.report.format)
    };
    if failed {
        std::process::exit(1);
    }
}

/// Layer the defaults, an optional user file, and CLI overrides.
fn build_config(matches: &ArgMatches) -> Result<SourceryConfig, ConfigError> {
    let config_file = matches.get_one::<String>("config");
    if config_file.is_none()
        && matches.get_one::<String>("line-ending").is_none()
        && matches.get_one::<String>("format").is_none()
    {
        return Ok(DEFAULTS.clone());
    }

    let mut loader = Loader::new();
    if let Some(path) = config_file {
        loader = loader.with_file(path);
    }
    if let Some(ending) = matches.get_one::<String>("line-ending") {
        loader = loader.set_override("processing.line_ending", ending.as_str())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("report.format", format.as_str())?;
    }
    loader.build()
}

/// Expand directory arguments into the files they contain. Plain files pass
/// through as given, so a missing path surfaces later as a load error.
fn collect_files(paths: &[&String], recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for raw in paths {
        let path = Path::new(raw.as_str());
        if path.is_dir() {
            let mut walk = WalkBuilder::new(path);
            walk.standard_filters(false);
            if !recursive {
                walk.max_depth(Some(1));
            }
            for entry in walk.build().flatten() {
                if entry.file_type().is_some_and(|kind| kind.is_file()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files
}

/// Process every file in order. Returns whether any file failed to load.
fn handle_process(
    arena: &mut Arena,
    files: &[PathBuf],
    ending: Option<LineEnding>,
    format: ReportFormat,
) -> bool {
    let mut failed = false;
    let mut reports = Vec::new();
    for file in files {
        match process_source_file(arena, file, ending) {
            Ok(report) => {
                if format == ReportFormat::Text {
                    for outcome in &report.outcomes {
                        println!("{}", outcome);
                    }
                }
                reports.push(report);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }
    if format == ReportFormat::Json {
        match serde_json::to_string_pretty(&reports) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                eprintln!("Error rendering report: {}", e);
                failed = true;
            }
        }
    }
    failed
}

/// Classify every file in order without executing anything.
fn handle_inspect(
    arena: &mut Arena,
    files: &[PathBuf],
    ending: Option<LineEnding>,
    format: ReportFormat,
) -> bool {
    let mut failed = false;
    let mut listings = Vec::new();
    for file in files {
        match inspect_source_file(arena, file, ending) {
            Ok(directives) => {
                if format == ReportFormat::Text {
                    for directive in &directives {
                        println!(
                            "{}:{}: {}  {}",
                            file.display(),
                            directive.line_number,
                            directive.kind,
                            directive.text
                        );
                    }
                }
                listings.push(serde_json::json!({
                    "path": file,
                    "directives": directives,
                }));
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }
    if format == ReportFormat::Json {
        match serde_json::to_string_pretty(&listings) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                eprintln!("Error rendering report: {}", e);
                failed = true;
            }
        }
    }
    failed
}
