use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of src/outputs.rs; build scripts can't access src/ modules
const AVAILABLE_OUTPUTS: &[&str] = &["html", "events", "events-json"];
const DIALECTS: &[&str] = &["markdown", "tracwiki"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("wikitext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert TracWiki and Markdown markup to HTML")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input file, or - for stdin")
                .required_unless_present("list-dialects")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("dialect")
                .long("dialect")
                .help("Markup dialect of the input")
                .value_parser(clap::builder::PossibleValuesParser::new(DIALECTS)),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Output format")
                .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_OUTPUTS)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file path")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a wikitext.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("list-dialects")
                .long("list-dialects")
                .help("List available dialects")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        );

    generate_to(Bash, &mut cmd, "wikitext", &outdir)?;
    generate_to(Zsh, &mut cmd, "wikitext", &outdir)?;
    generate_to(Fish, &mut cmd, "wikitext", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
