//! Generation orchestration - coordinates the generation workflow
//!
//! Each declaration is handled on its own: a failure is recorded in the
//! report with the declaration's name and the remaining declarations are
//! still generated.

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::generation::{
    Artifact, GeneratedService, GenerationError, GenerationReport, TemplateRenderer,
    build_service_context,
};
use crate::model::{Declaration, ParsedSources};
use crate::output::OutputService;
use crate::rest::RestResolver;

/// Orchestrates the code generation workflow
pub struct GenerationOrchestrator {
    resolver: RestResolver,
    renderer: Arc<dyn TemplateRenderer>,
    output_service: Arc<dyn OutputService>,
    config: Config,
}

impl GenerationOrchestrator {
    /// Create a new generation orchestrator
    pub fn new(
        resolver: RestResolver,
        renderer: Arc<dyn TemplateRenderer>,
        output_service: Arc<dyn OutputService>,
        config: Config,
    ) -> Self {
        Self {
            resolver,
            renderer,
            output_service,
            config,
        }
    }

    /// Render the artifacts of one service without writing them
    pub fn render_service(
        &self,
        declaration: &Declaration,
        output_dir: &Path,
    ) -> Result<Vec<Artifact>, GenerationError> {
        let context = build_service_context(&self.resolver, &self.config.errors, declaration);
        let rendered = self.renderer.render(&context)?;

        Ok(rendered
            .into_iter()
            .map(|file| Artifact {
                kind: file.kind,
                path: output_dir.join(self.config.output.file_name(file.kind, &declaration.name)),
                content: file.content,
            })
            .collect())
    }

    /// Render and write the artifacts of one service
    pub async fn generate_service(
        &self,
        declaration: &Declaration,
        output_dir: &Path,
    ) -> Result<GeneratedService, GenerationError> {
        let artifacts = self.render_service(declaration, output_dir)?;

        self.output_service.ensure_directory(output_dir).await?;
        self.output_service.write_artifacts(&artifacts).await?;

        Ok(GeneratedService {
            declaration: declaration.name.clone(),
            endpoints: self.resolver.endpoints(declaration).len(),
            paths: artifacts.into_iter().map(|a| a.path).collect(),
        })
    }

    /// Generate every REST service in `sources`, in declaration order
    pub async fn generate(&self, sources: &ParsedSources, output_dir: &Path) -> GenerationReport {
        let mut report = GenerationReport::default();

        tracing::debug!(
            "Orchestrator starting generation with {} declarations",
            sources.structs.len()
        );

        for declaration in &sources.structs {
            if !self.resolver.is_service(declaration) {
                tracing::debug!(
                    declaration = %declaration.name,
                    "Skipping declaration without RestService directive"
                );
                report.skipped.push(declaration.name.clone());
                continue;
            }

            match self.generate_service(declaration, output_dir).await {
                Ok(service) => {
                    for path in &service.paths {
                        tracing::info!(service = %service.declaration, "Generated {}", path.display());
                    }
                    report.generated.push(service);
                }
                Err(e) => {
                    tracing::error!(declaration = %declaration.name, "Generation failed: {e}");
                    report
                        .failures
                        .push(GenerationError::for_declaration(&declaration.name, e));
                }
            }
        }

        report
    }
}
