mod report;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use binobj_core::objects::AttributeParameters;
use binobj_core::{BinarySource, ObjectOptions, make_binary_objects_default};
use clap::Parser;
use serde_json::Value;

/// Describe a binary as file / PE / ELF / Mach-O indicator objects
#[derive(Parser)]
#[command(
    name = "binobj",
    about = "Build file, format and section objects for a PE, ELF or Mach-O binary",
    version,
    author
)]
struct Cli {
    /// Path to binary file
    #[arg(required_unless_present = "stdin")]
    path: Option<PathBuf>,

    /// Read the binary from standard input instead of a path
    #[arg(long, requires = "filename", conflicts_with = "path")]
    stdin: bool,

    /// Filename recorded for the input (required with --stdin)
    #[arg(long)]
    filename: Option<String>,

    /// Mark the objects as embedded in a larger report
    #[arg(long)]
    embedded: bool,

    /// Default attribute parameter; VALUE is read as JSON when it parses
    #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    attrs: Vec<(String, Value)>,

    /// JSON object of default attribute parameters
    #[arg(long, value_name = "FILE")]
    defaults: Option<PathBuf>,

    /// Print every object as JSON
    #[arg(long)]
    json: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn load_options(cli: &Cli) -> Result<ObjectOptions> {
    let mut params = AttributeParameters::new();
    if let Some(path) = &cli.defaults {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading defaults from {}", path.display()))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("parsing defaults in {}", path.display()))?;
        match value {
            Value::Object(map) => params.extend(map),
            other => bail!("{}: expected a JSON object, got {other}", path.display()),
        }
    }
    params.extend(cli.attrs.iter().cloned());

    Ok(ObjectOptions {
        standalone: !cli.embedded,
        default_attributes_parameters: params,
    })
}

fn load_source(cli: &Cli) -> Result<BinarySource> {
    if cli.stdin {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("reading binary from stdin")?;
        let filename = cli
            .filename
            .clone()
            .ok_or_else(|| anyhow!("--stdin needs --filename"))?;
        return Ok(BinarySource::from_buffer(buf, filename));
    }

    let path = cli
        .path
        .clone()
        .ok_or_else(|| anyhow!("no input path given"))?;
    let mut source = BinarySource::from_path(path);
    source.filename = cli.filename.clone();
    Ok(source)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = load_options(&cli)?;
    let source = load_source(&cli)?;
    log::debug!(
        "standalone={}, {} default attribute parameters",
        options.standalone,
        options.default_attributes_parameters.len()
    );
    let objects = make_binary_objects_default(&source, &options);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&objects)?);
    } else {
        report::print_summary(&objects);
    }

    Ok(())
}
