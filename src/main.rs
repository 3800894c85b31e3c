//! `hypertag`: parse markup templates with `${name}` placeholders from the
//! command line.
//!
//! Usage:
//!   hypertag render <template> [--holes FILE] [--config FILE] [--format snapshot|json] [--strict]
//!   hypertag placeholders <template>
//!
//! `<template>` may be `-` to read standard input.

use clap::{Arg, ArgAction, ArgMatches, Command};
use markup::json::{tree_to_json, value_from_json};
use markup::snapshot::TreeSnapshot;
use markup::{
    Element, ElementFactory, ParseContext, ParseError, ParserConfig, Template, TemplateParser,
    Value, split_placeholders,
};
use std::fmt;
use std::io::{self, Read};
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug)]
enum CliError {
    Io { path: String, source: io::Error },
    Holes { path: String, source: serde_json::Error },
    HolesNotObject { path: String },
    Config { path: String, source: toml::de::Error },
    Serialize(serde_json::Error),
    Parse(ParseError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io { path, source } => write!(f, "failed to read {path}: {source}"),
            CliError::Holes { path, source } => {
                write!(f, "invalid holes file {path}: {source}")
            }
            CliError::HolesNotObject { path } => {
                write!(f, "holes file {path} must contain a JSON object")
            }
            CliError::Config { path, source } => write!(f, "invalid config {path}: {source}"),
            CliError::Serialize(source) => write!(f, "failed to serialize tree: {source}"),
            CliError::Parse(error) => write!(f, "parse failed: {error}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io { source, .. } => Some(source),
            CliError::Holes { source, .. } => Some(source),
            CliError::Config { source, .. } => Some(source),
            CliError::Serialize(source) => Some(source),
            CliError::Parse(error) => Some(error),
            CliError::HolesNotObject { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Snapshot,
    Json,
}

impl OutputFormat {
    fn from_arg(raw: &str) -> Option<Self> {
        match raw {
            "snapshot" => Some(OutputFormat::Snapshot),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

fn cli() -> Command {
    let template_arg = || {
        Arg::new("template")
            .help("Template file with ${name} placeholders, or '-' for stdin")
            .required(true)
            .index(1)
    };
    Command::new("hypertag")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse interpolated markup templates into node trees")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Parse a template and print the resulting tree")
                .arg(template_arg())
                .arg(
                    Arg::new("holes")
                        .long("holes")
                        .value_name("FILE")
                        .help("JSON object mapping placeholder names to values"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_name("FILE")
                        .help("TOML parser configuration (max_depth, check_close_tags)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["snapshot", "json"])
                        .default_value("snapshot")
                        .help("Output format"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Exit with an error when the parser records any diagnostic")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("placeholders")
                .about("List the placeholder names of a template in order")
                .arg(template_arg()),
        )
}

fn main() -> ExitCode {
    env_logger::init();
    let matches = cli().get_matches();
    let result = match matches.subcommand() {
        Some(("render", sub)) => run_render(sub),
        Some(("placeholders", sub)) => run_placeholders(sub),
        _ => Ok(()),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_render(matches: &ArgMatches) -> Result<(), CliError> {
    let source = read_source(required_arg(matches, "template"))?;
    let holes = match matches.get_one::<String>("holes") {
        Some(path) => load_holes(path)?,
        None => serde_json::Map::new(),
    };
    let config = match matches.get_one::<String>("config") {
        Some(path) => load_config(path)?,
        None => ParserConfig::default(),
    };
    let format = matches
        .get_one::<String>("format")
        .and_then(|raw| OutputFormat::from_arg(raw))
        .unwrap_or(OutputFormat::Snapshot);
    let strict = matches.get_flag("strict");

    let template: Template<Element> = Template::from_placeholders(&source, |name| {
        match holes.get(name) {
            Some(json) => value_from_json(json.clone()),
            None => {
                log::warn!(target: "hypertag", "no value for placeholder '{name}', using null");
                Value::Null
            }
        }
    });

    let mut ctx = ParseContext::new();
    let tree = TemplateParser::new(config).parse(template, &mut ElementFactory, &mut ctx);
    log::debug!(target: "hypertag", "parse counters: {:?}", ctx.counters);
    for error in &ctx.errors {
        eprintln!("warning: {error}");
    }
    if strict && let Some(error) = ctx.take_first_error() {
        return Err(CliError::Parse(error));
    }

    match format {
        OutputFormat::Snapshot => println!("{}", TreeSnapshot::new(&tree)),
        OutputFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(&tree_to_json(&tree)).map_err(CliError::Serialize)?;
            println!("{rendered}");
        }
    }
    Ok(())
}

fn run_placeholders(matches: &ArgMatches) -> Result<(), CliError> {
    let source = read_source(required_arg(matches, "template"))?;
    let (_, names) = split_placeholders(&source);
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn required_arg<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or("-")
}

fn read_source(path: &str) -> Result<String, CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_string(),
        source,
    };
    if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(io_error)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(io_error)
}

fn load_holes(path: &str) -> Result<serde_json::Map<String, serde_json::Value>, CliError> {
    let raw = read_source(path)?;
    let json: serde_json::Value = serde_json::from_str(&raw).map_err(|source| CliError::Holes {
        path: path.to_string(),
        source,
    })?;
    match json {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(CliError::HolesNotObject {
            path: path.to_string(),
        }),
    }
}

fn load_config(path: &str) -> Result<ParserConfig, CliError> {
    let raw = read_source(path)?;
    toml::from_str(&raw).map_err(|source| CliError::Config {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn render_defaults_to_snapshot_format() {
        let matches = cli()
            .try_get_matches_from(["hypertag", "render", "page.html"])
            .expect("valid arguments");
        let (name, sub) = matches.subcommand().expect("subcommand present");
        assert_eq!(name, "render");
        assert_eq!(required_arg(sub, "template"), "page.html");
        assert_eq!(
            sub.get_one::<String>("format").map(String::as_str),
            Some("snapshot")
        );
        assert!(!sub.get_flag("strict"));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result = cli().try_get_matches_from(["hypertag", "render", "x", "--format", "yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_toml_fills_defaults() {
        let config: ParserConfig = toml::from_str("check_close_tags = true").expect("valid toml");
        assert!(config.check_close_tags);
        assert_eq!(config.max_depth, ParserConfig::default().max_depth);
        assert!(toml::from_str::<ParserConfig>("bogus = 1").is_err());
    }
}
