//! Print the OpenAPI document as JSON, or YAML with `--format yaml`.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use contact_manager::doc::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// Export the contacts API description for client generators.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump")]
struct Args {
    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Serialisation format.
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,
}

fn render(format: Format) -> Result<String> {
    let doc = ApiDoc::openapi();
    match format {
        Format::Json => doc.to_pretty_json().wrap_err("failed to render JSON"),
        Format::Yaml => doc.to_yaml().wrap_err("failed to render YAML"),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let rendered = render(args.format)?;
    match args.output {
        Some(path) => fs::write(&path, rendered)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
