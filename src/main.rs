use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use bpmn_klaim::domain::translation::config::TranslatorConfig;
use bpmn_klaim::{logger, translate_diagram_file};

#[derive(Parser)]
#[command(name = "bpmn_klaim")]
#[command(version)]
#[command(about = "Translates BPMN process diagrams (JSON) into X-Klaim fragments")]
struct Cli {
    /// Diagram file in JSON format
    input: PathBuf,

    /// Fail on elements without a translation instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(long, short = 'f', default_value = "text", value_enum)]
    format: OutputFormat,

    /// Write the result to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = if cli.strict { TranslatorConfig::strict() } else { TranslatorConfig::default() };

    let translation = translate_diagram_file(&cli.input, config)
        .with_context(|| format!("translating '{}'", cli.input.display()))?;

    let rendered = match cli.format {
        OutputFormat::Text => translation.render_text(),
        OutputFormat::Json => serde_json::to_string_pretty(&translation)?,
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, rendered).with_context(|| format!("writing '{}'", path.display()))?;
            log::info!("Translation written to '{}'.", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
