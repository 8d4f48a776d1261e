use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use nebula_rust::config::AppConfig;
use nebula_rust::logging;
use nebula_rust::modules::{Module, Platform, Registry};
use nebula_rust::output::{sinks_for, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "nebula", version, about = "Cloud reconnaissance modules built from composable stage pipelines")]
struct Cli {
    /// none, error, warn, info o debug (por defecto NEBULA_LOG_LEVEL o warn)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lista los módulos disponibles
    List {
        #[arg(short, long)]
        platform: Option<Platform>,
    },
    /// Muestra las opciones de un módulo
    Options { module: String },
    /// Ejecuta un módulo
    Run {
        module: String,
        /// Valor de opción `nombre=valor`; se puede repetir
        #[arg(short, long = "set", value_parser = parse_key_val)]
        set: Vec<(String, String)>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
        format: OutputFormat,
        /// Directorio de salida (por defecto NEBULA_OUTPUT_DIR o nebula-output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw.split_once('=').ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty option name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn list(registry: &Registry, platform: Option<Platform>) {
    let modules: Vec<_> = match platform {
        Some(p) => registry.by_platform(p).collect(),
        None => registry.iter().collect(),
    };
    for module in modules {
        let meta = module.metadata();
        println!("{:<10} {:<16} {:<9} {}", meta.platform, meta.id, meta.opsec_level, meta.description);
    }
}

fn show_options(module: &dyn Module) {
    for cell in module.options().iter() {
        let short = cell.short.as_deref().map(|s| format!("-{s}, ")).unwrap_or_default();
        let required = if cell.required { " (required)" } else { "" };
        let default = if cell.value.is_empty() { String::new() } else { format!(" [default: {}]", cell.value) };
        println!("  {short}{}{required}: {}{default}", cell.name, cell.description);
    }
}

async fn run(module: &dyn Module, set: Vec<(String, String)>, format: OutputFormat, output: PathBuf) -> Result<()> {
    let mut options = module.options();
    options.apply(set.iter().map(|(k, v)| (k.as_str(), v.as_str())))
           .with_context(|| format!("invalid options for {}", module.metadata().id))?;
    let sinks = sinks_for(format, &output);
    let produced = module.invoke(options, &sinks).await?;
    if produced == 0 {
        bail!("module {} produced no results", module.metadata().id);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::global();
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    logging::init(level)?;

    let registry = Registry::builtin();
    match cli.command {
        Command::List { platform } => list(&registry, platform),
        Command::Options { module } => show_options(registry.get(&module)?.as_ref()),
        Command::Run { module, set, format, output } => {
            let module = registry.get(&module)?;
            let output = output.unwrap_or_else(|| config.output_dir.clone());
            run(module.as_ref(), set, format, output).await?;
        }
    }
    Ok(())
}
