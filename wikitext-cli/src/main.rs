// Command-line interface for wikitext
//
// This binary converts wiki markup (TracWiki, Markdown) into HTML, or lists the structural
// events the parser produced for it.
//
// The dialect is auto-detected from the input file extension, while being overridable by an
// explicit --dialect flag. When neither gives an answer the configured default is used.
// Usage:
//  wikitext <input> [--dialect <name>] [--to <output>] [--output <file>]          - Convert (default)
//  wikitext convert <input> [--dialect <name>] [--to <output>] [--output <file>]  - Same as above
//  wikitext --list-dialects                                                      - List dialects
//
// Input "-" reads from stdin.
//
// Extra Parameters:
//
// Configuration values can be overridden using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and applies the value on top of the loaded config.
// Example:
//  wikitext page.trac --extra-server-url https://trac.example.org --extra-document

mod outputs;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use wikitext_config::{Loader, WikitextConfig};
use wikitext_parser::{DialectRegistry, HtmlOptions, LanguageConfiguration};

const SUBCOMMANDS: &[&str] = &["convert", "help"];

/// Keys accepted as `--extra-<key>`, as listed in the help text.
const EXTRA_KEYS: &[&str] = &[
    "server-url",
    "link-pattern",
    "wiki-words",
    "auto-link",
    "document",
    "title",
    "css",
];

/// Split `--extra-*` overrides out of the raw arguments before clap sees them.
///
/// `--extra-<key> <value>` takes the next argument unless it looks like a flag, in which case
/// the key is treated as a switch and set to "true".
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let value = args.get(i + 1).filter(|next| !next.starts_with('-'));
            match value {
                Some(value) => {
                    extra_params.insert(key.to_string(), value.clone());
                    i += 2;
                }
                None => {
                    extra_params.insert(key.to_string(), "true".to_string());
                    i += 1;
                }
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("wikitext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert TracWiki and Markdown markup to HTML")
        .long_about(format!(
            "wikitext parses lightweight wiki markup and renders it as HTML, or as the list of\n\
            structural events the parser produced.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration values.\n  \
            Boolean flags can omit the value (defaults to 'true').\n  \
            {}\n\n\
            Examples:\n  \
            wikitext page.trac                          # TracWiki to HTML (stdout)\n  \
            wikitext README.md -o readme.html           # Markdown to an HTML file\n  \
            wikitext page.txt --dialect tracwiki        # Explicit dialect\n  \
            wikitext page.trac --to events              # Show the parsed event stream\n  \
            cat page.trac | wikitext - --dialect tracwiki",
            EXTRA_KEYS.join(", ")
        ))
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-dialects")
                .long("list-dialects")
                .help("List available dialects")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a wikitext.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a markup file (default command)")
                .long_about(
                    "Convert a markup document.\n\n\
                    Outputs:\n  \
                    - html:        HTML fragment, or a full document with --extra-document\n  \
                    - events:      Parser events, one per line\n  \
                    - events-json: Parser events as JSON\n\n\
                    The dialect is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("dialect")
                        .long("dialect")
                        .short('d')
                        .help("Markup dialect (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Output format")
                        .default_value("html")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            outputs::AVAILABLE_OUTPUTS,
                        )),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

/// Match `args`, injecting the implied "convert" subcommand when the first argument is an input.
fn get_matches(cli: Command, args: &[String]) -> ArgMatches {
    match cli.clone().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) => {
            let implies_convert = args
                .get(1)
                .is_some_and(|first| {
                    (first == "-" || !first.starts_with('-'))
                        && !SUBCOMMANDS.contains(&first.as_str())
                });
            if !implies_convert {
                e.exit();
            }
            let mut new_args = vec![args[0].clone(), "convert".to_string()];
            new_args.extend_from_slice(&args[1..]);
            match cli.try_get_matches_from(&new_args) {
                Ok(matches) => matches,
                Err(e2) => e2.exit(),
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, mut extra_params) = parse_extra_args(&args);
    let matches = get_matches(build_cli(), &cleaned_args);

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-dialects") {
        handle_list_dialects_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    for key in extra_params.keys() {
        log::warn!("ignoring unknown parameter --extra-{key}");
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .map(|s| s.as_str())
                .unwrap_or("-");
            let dialect = sub_matches.get_one::<String>("dialect").map(|s| s.as_str());
            let to = sub_matches
                .get_one::<String>("to")
                .map(|s| s.as_str())
                .unwrap_or("html");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, dialect, to, output, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    dialect: Option<&str>,
    to: &str,
    output: Option<&str>,
    config: &WikitextConfig,
) {
    let registry = DialectRegistry::default();
    let dialect = resolve_dialect(&registry, input, dialect, config);
    log::debug!("converting {input} as {dialect} to {to}");

    let language = registry
        .configured(&dialect, &LanguageConfiguration::from(&config.language))
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    let source = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let html_options = html_options_for(config, input);
    let rendered = outputs::render(&source, &language, to, &html_options).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, rendered).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{rendered}"),
    }
}

/// Explicit dialect, else the one matching the file extension, else the configured default.
fn resolve_dialect(
    registry: &DialectRegistry,
    input: &str,
    explicit: Option<&str>,
    config: &WikitextConfig,
) -> String {
    if let Some(name) = explicit {
        if !registry.has(name) {
            eprintln!(
                "Error: unknown dialect '{name}'. Available: {}",
                registry.list_dialects().join(", ")
            );
            std::process::exit(1);
        }
        return name.to_string();
    }
    if input != "-" {
        if let Some(detected) = registry.detect_dialect_from_filename(input) {
            return detected;
        }
    }
    config.parser.dialect.clone()
}

fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(input)
    }
}

/// HTML options from config; documents without a title are named after the input file.
fn html_options_for(config: &WikitextConfig, input: &str) -> HtmlOptions {
    let mut options = HtmlOptions::from(&config.html);
    if options.emit_as_document && options.title.is_none() && input != "-" {
        options.title = std::path::Path::new(input)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string);
    }
    options
}

/// Handle the list-dialects command
fn handle_list_dialects_command() {
    let registry = DialectRegistry::default();
    println!("Available dialects:\n");
    for name in registry.list_dialects() {
        if let Ok(language) = registry.get(&name) {
            let extensions = language
                .file_extensions()
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {name:<10} {} ({extensions})", language.description());
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> WikitextConfig {
    let loader = Loader::new().with_optional_file("wikitext.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut WikitextConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["server-url", "server"]) {
        config.language.server_url = raw;
    }
    if let Some(raw) = take_override(extra_params, &["link-pattern", "internal-link-pattern"]) {
        config.language.internal_link_pattern = raw;
    }
    if let Some(raw) = take_override(extra_params, &["wiki-words", "wiki-word-linking"]) {
        config.language.wiki_word_linking = parse_bool_arg("wiki-words", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["auto-link", "auto-linking"]) {
        config.language.auto_linking = parse_bool_arg("auto-link", &raw);
    }
    if let Some(raw) = extra_params.remove("document") {
        config.html.emit_as_document = parse_bool_arg("document", &raw);
    }
    if let Some(raw) = extra_params.remove("title") {
        config.html.title = Some(raw);
    }
    if let Some(raw) = take_override(extra_params, &["css", "custom-css"]) {
        config.html.custom_css = Some(raw);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
