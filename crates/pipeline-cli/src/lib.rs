//! Command-line front end for ingest pipeline rewriting
//!
//! ```text
//! pipeline-rewrite rewrite  --input <file|-> --substitutions <file> [--format json|yml] [--resolve] [--validate]
//! pipeline-rewrite add-hook --input <file|-> --extension yml|json --name <n> --custom-name <c>
//! pipeline-rewrite name     --type <t> --dataset <d> --version <v> [--pipeline <p>] [--entry <e>] [--custom]
//! ```

#![warn(missing_docs)]

pub mod commands;
pub mod logging;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use commands::{NameArgs, RewriteArgs};
use pipeline_rewrite::PipelineFormat;
use std::io::Write;

/// Build the command-line interface
#[must_use]
pub fn cli() -> Command {
    Command::new("pipeline-rewrite")
        .version(pipeline_rewrite::VERSION)
        .about("Rewrite and name ingest pipelines for installation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("rewrite")
                .about("Rewrite IngestPipeline references to installation names")
                .arg(input_arg())
                .arg(
                    Arg::new("substitutions")
                        .long("substitutions")
                        .short('s')
                        .required(true)
                        .help("YAML or JSON file listing source/target pairs"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["json", "yml", "yaml"])
                        .help("Document format (detected from content when omitted)"),
                )
                .arg(
                    Arg::new("resolve")
                        .long("resolve")
                        .action(ArgAction::SetTrue)
                        .help("Replace the whole reference with the bare name"),
                )
                .arg(
                    Arg::new("validate")
                        .long("validate")
                        .action(ArgAction::SetTrue)
                        .help("Reject syntactically invalid documents"),
                ),
        )
        .subcommand(
            Command::new("add-hook")
                .about("Append the @custom pipeline processor")
                .arg(input_arg())
                .arg(
                    Arg::new("extension")
                        .long("extension")
                        .required(true)
                        .value_parser(["json", "yml", "yaml"])
                        .help("Document format"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .required(true)
                        .help("Installation name of the pipeline"),
                )
                .arg(
                    Arg::new("custom-name")
                        .long("custom-name")
                        .required(true)
                        .help("Name of the custom pipeline to call"),
                ),
        )
        .subcommand(
            Command::new("name")
                .about("Print the installation name of a pipeline")
                .disable_version_flag(true)
                .arg(Arg::new("type").long("type").required(true).help("Data stream type"))
                .arg(
                    Arg::new("dataset")
                        .long("dataset")
                        .required(true)
                        .help("Data stream dataset"),
                )
                .arg(
                    Arg::new("version")
                        .long("version")
                        .required_unless_present("custom")
                        .help("Package version"),
                )
                .arg(
                    Arg::new("pipeline")
                        .long("pipeline")
                        .help("Pipeline file name without extension (defaults to the entry pipeline)"),
                )
                .arg(
                    Arg::new("entry")
                        .long("entry")
                        .help("Declared entry pipeline of the data stream"),
                )
                .arg(
                    Arg::new("custom")
                        .long("custom")
                        .action(ArgAction::SetTrue)
                        .help("Print the @custom hook pipeline name"),
                ),
        )
}

fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .default_value(commands::STDIN_PATH)
        .help("Pipeline file, or - for stdin")
}

fn string_arg(args: &ArgMatches, id: &str) -> Option<String> {
    args.get_one::<String>(id).cloned()
}

fn required_arg<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a str> {
    args.get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("missing --{id}"))
}

/// Execute parsed arguments, writing the result to `out`
///
/// Documents are written exactly as produced, with no trailing newline
/// added.
///
/// # Errors
/// Any failure of the selected command, or of writing to `out`.
pub fn run(matches: &ArgMatches, out: &mut impl Write) -> Result<()> {
    let output = match matches.subcommand() {
        Some(("rewrite", args)) => {
            let document = commands::read_input(required_arg(args, "input")?)?;
            let substitutions = std::fs::read_to_string(required_arg(args, "substitutions")?)
                .context("Failed to read substitutions file")?;
            let format = args
                .get_one::<String>("format")
                .map(|f| PipelineFormat::from_extension(f))
                .transpose()?;
            let rewrite_args = RewriteArgs {
                format,
                resolve: args.get_flag("resolve"),
                validate: args.get_flag("validate"),
            };
            commands::rewrite(&document, &substitutions, &rewrite_args)?
        }
        Some(("add-hook", args)) => {
            let document = commands::read_input(required_arg(args, "input")?)?;
            commands::add_hook(
                &document,
                required_arg(args, "extension")?,
                required_arg(args, "name")?,
                required_arg(args, "custom-name")?,
            )?
        }
        Some(("name", args)) => {
            let name_args = NameArgs {
                kind: required_arg(args, "type")?.to_string(),
                dataset: required_arg(args, "dataset")?.to_string(),
                version: string_arg(args, "version"),
                pipeline: string_arg(args, "pipeline"),
                entry: string_arg(args, "entry"),
                custom: args.get_flag("custom"),
            };
            let mut name = commands::name(&name_args)?;
            name.push('\n');
            name
        }
        _ => return Ok(()),
    };

    out.write_all(output.as_bytes()).context("Failed to write output")?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}
