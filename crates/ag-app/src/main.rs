use std::io;
use std::path::Path;

use ag_ascii::pipeline::Converter;
use ag_core::config::ConvertConfig;
use ag_core::traits::Sink;
use ag_source::{ImageFileDecoder, Resizer};
use anyhow::{Context, Result};
use clap::Parser;

pub mod batch;
pub mod cli;
pub mod interactive;
pub mod sink;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config, appliquer les overrides CLI
    let config = cli.merge(resolve_config(cli.config.as_deref())?);

    // Conversion par lots
    if let Some(folder) = cli.batch.as_deref() {
        let scaling = config.scaling()?;
        let report = batch::run_batch(folder, cli.batch_out.as_deref(), scaling, config.render)?;
        println!(
            "Converted {} image(s), {} failed",
            report.converted.len(),
            report.failed.len()
        );
        if !report.failed.is_empty() {
            anyhow::bail!("{} image(s) could not be converted", report.failed.len());
        }
        return Ok(());
    }

    // 4. Construire la requête (flags ou questions)
    let request = if cli.interactive {
        interactive::prompt_request(&mut io::stdin().lock(), &mut io::stdout(), &config)?
    } else {
        cli.request(&config)?
    };

    // 5. Convertir
    let mut converter = Converter::new(ImageFileDecoder, Resizer::new());
    let text = converter.convert(&request.input, request.scaling, request.options)?;

    // 6. Écrire
    match request.output {
        Some(path) => {
            let mut file = sink::FileSink::new(path);
            let shown =
                std::path::absolute(file.path()).unwrap_or_else(|_| file.path().to_path_buf());
            println!("Writing to {}", shown.display());
            file.write_text(&text)?;
        }
        None => sink::StreamSink::new(io::stdout().lock()).write_text(&text)?,
    }
    Ok(())
}

/// Load the TOML config if one was given, defaults otherwise.
fn resolve_config(path: Option<&Path>) -> Result<ConvertConfig> {
    match path {
        Some(path) => ag_core::config::load_config(path)
            .with_context(|| format!("Config invalide : {}", path.display())),
        None => Ok(ConvertConfig::default()),
    }
}
