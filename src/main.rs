//! restgen CLI entrypoint
//! Parses command-line arguments and dispatches to the generator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use restgen::{
    config::Config,
    generation::{GenerationOrchestrator, TemplateSet, TeraTemplateRenderer},
    model::{FileModelLoader, ModelLoader},
    output::FileSystemOutputService,
    rest::RestResolver,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "restgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate HTTP handlers and test helpers for every annotated service
    Generate {
        /// Parsed source model (JSON or YAML)
        #[arg(long)]
        model: PathBuf,
        /// Output directory for generated code
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Custom template directory
        #[arg(long)]
        template_dir: Option<PathBuf>,
    },
    /// Print the resolved endpoints of every service as JSON
    Inspect {
        /// Parsed source model (JSON or YAML)
        #[arg(long)]
        model: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            model,
            output_dir,
            config,
            template_dir,
        } => generate(&model, output_dir, config.as_deref(), template_dir).await?,
        Commands::Inspect { model } => inspect(&model).await?,
    }
    Ok(())
}

/// `info` unless `RUST_LOG` says otherwise; `--verbose` forces `debug`
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .parse_lossy(rust_log.unwrap_or_default());
    if verbose {
        filter.add_directive(Level::DEBUG.into())
    } else {
        filter
    }
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(Config::default()),
    }
}

async fn generate(
    model: &Path,
    output_dir: Option<PathBuf>,
    config_path: Option<&Path>,
    template_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = load_config(config_path).await?;
    if output_dir.is_some() {
        config.output.dir = output_dir;
    }
    if template_dir.is_some() {
        config.templates.dir = template_dir;
    }

    let sources = FileModelLoader::new()
        .load(model)
        .await
        .with_context(|| format!("Failed to load model {}", model.display()))?;

    let templates = TemplateSet::load(config.templates.dir.as_deref())
        .await
        .context("Failed to load templates")?;
    let renderer = TeraTemplateRenderer::new(&templates).context("Failed to compile templates")?;

    let output_path = config.output_dir_for(model);
    info!(
        model = %model.display(),
        output = %output_path.display(),
        "Generating REST handlers"
    );

    let orchestrator = GenerationOrchestrator::new(
        RestResolver::default(),
        Arc::new(renderer),
        Arc::new(FileSystemOutputService::new()),
        config,
    );
    let report = orchestrator.generate(&sources, &output_path).await;

    println!(
        "Generated {} service(s), skipped {} declaration(s), {} failure(s)",
        report.generated.len(),
        report.skipped.len(),
        report.failures.len()
    );
    for path in report.written_paths() {
        println!("  {}", path.display());
    }

    if !report.is_success() {
        for failure in &report.failures {
            error!("{failure}");
        }
    }

    report
        .into_result()
        .context("Generation finished with failures")?;
    Ok(())
}

async fn inspect(model: &Path) -> anyhow::Result<()> {
    let sources = FileModelLoader::new()
        .load(model)
        .await
        .with_context(|| format!("Failed to load model {}", model.display()))?;

    let resolver = RestResolver::default();
    let services: Vec<serde_json::Value> = sources
        .structs
        .iter()
        .filter(|declaration| resolver.is_service(declaration))
        .map(|declaration| {
            serde_json::json!({
                "service": declaration.name,
                "package": declaration.package_name,
                "base_path": resolver.service_base_path(declaration),
                "endpoints": resolver.endpoints(declaration),
            })
        })
        .collect();

    println!(
        "{}",
        serde_json::to_string_pretty(&services).context("Failed to serialize endpoints")?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honors_rust_log() {
        assert_eq!(
            log_filter(false, Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(false, Some("warn")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }

    #[test]
    fn test_log_filter_verbose_forces_debug() {
        assert_eq!(
            log_filter(true, Some("warn")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(log_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
