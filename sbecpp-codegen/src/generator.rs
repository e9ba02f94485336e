//! Schema walker.
//!
//! Classifies every schema entity, computes its includes, renders it and
//! writes one header per composite, enum, set and message, followed by the
//! umbrella header.

use crate::config::GeneratorConfig;
use crate::constants::SubstitutionTable;
use crate::cpp::CppRenderer;
use crate::error::CodegenError;
use crate::includes::{IncludeResolver, IncludeSet};
use crate::render::{Bindings, Helpers, Renderer, Subject, TemplateCategory};
use sbecpp_schema::{EncodedType, Schema};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// One artifact to produce.
#[derive(Debug, Clone)]
pub struct ArtifactPlan<'a> {
    /// File name of the artifact.
    pub name: String,
    /// Template to render it with.
    pub category: TemplateCategory,
    /// Source entity.
    pub subject: Subject<'a>,
    /// Artifacts it must include.
    pub includes: IncludeSet,
}

/// Rendered artifact held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// File name of the artifact.
    pub name: String,
    /// Template it was rendered with.
    pub category: TemplateCategory,
    /// Rendered text.
    pub contents: String,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Written files, in schema declaration order.
    pub written: Vec<PathBuf>,
}

impl GenerationReport {
    /// Number of written artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.written.len()
    }

    /// Returns true if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

/// Header generator.
#[derive(Debug, Clone)]
pub struct Generator<R = CppRenderer> {
    config: GeneratorConfig,
    renderer: R,
    table: &'static SubstitutionTable,
}

impl Generator<CppRenderer> {
    /// Creates a generator using the built-in C++ renderer.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_renderer(config, CppRenderer::new())
    }
}

impl<R: Renderer> Generator<R> {
    /// Creates a generator with a custom renderer.
    #[must_use]
    pub fn with_renderer(config: GeneratorConfig, renderer: R) -> Self {
        Self {
            config,
            renderer,
            table: SubstitutionTable::cpp(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds the artifact plan in schema declaration order.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnknownType`] on an unresolvable reference and
    /// [`CodegenError::ArtifactCollision`] if two entities share an artifact
    /// name.
    pub fn plan<'s>(&self, schema: &'s Schema) -> Result<Vec<ArtifactPlan<'s>>, CodegenError> {
        let resolver = IncludeResolver::new(schema).with_extension(self.config.header_extension());
        let mut plans = Vec::with_capacity(schema.types.len() + schema.messages.len() + 1);

        for encoded_type in &schema.types {
            let (category, includes) = match encoded_type {
                EncodedType::Type(p) => {
                    tracing::trace!(name = %p.name, "skipping primitive alias");
                    continue;
                }
                EncodedType::Composite(c) => {
                    (TemplateCategory::Composite, resolver.for_composite(c)?)
                }
                EncodedType::Enum(_) => (TemplateCategory::Enum, IncludeSet::new()),
                EncodedType::Set(_) => (TemplateCategory::Set, IncludeSet::new()),
            };
            plans.push(ArtifactPlan {
                name: self.artifact_name(encoded_type.name()),
                category,
                subject: Subject::Type(encoded_type),
                includes,
            });
        }

        if !schema.messages.is_empty() && !schema.has_type(&schema.header_type) {
            tracing::debug!(
                header = %schema.header_type,
                "header type not declared, messages include it by name"
            );
        }

        for message in &schema.messages {
            plans.push(ArtifactPlan {
                name: self.artifact_name(&message.name),
                category: TemplateCategory::Message,
                subject: Subject::Message(message),
                includes: resolver.for_message(message)?,
            });
        }

        plans.push(ArtifactPlan {
            name: self.config.umbrella().to_string(),
            category: TemplateCategory::Schema,
            subject: Subject::Schema,
            includes: resolver.for_schema(),
        });

        check_collisions(&plans)?;
        Ok(plans)
    }

    /// Renders every artifact in memory without touching the filesystem.
    ///
    /// # Errors
    /// Returns any planning or rendering error.
    pub fn render(&self, schema: &Schema) -> Result<Vec<RenderedArtifact>, CodegenError> {
        self.plan(schema)?
            .iter()
            .map(|plan| {
                Ok(RenderedArtifact {
                    name: plan.name.clone(),
                    category: plan.category,
                    contents: self.render_one(schema, plan)?,
                })
            })
            .collect()
    }

    /// Generates every artifact into the configured output directory.
    ///
    /// The directory is created first if missing. The first failure aborts
    /// the run; files already written stay on disk.
    ///
    /// # Errors
    /// Returns any planning, rendering or IO error.
    pub fn generate(&self, schema: &Schema) -> Result<GenerationReport, CodegenError> {
        let plans = self.plan(schema)?;
        let output_dir = self.config.output_dir();

        std::fs::create_dir_all(output_dir).map_err(|e| CodegenError::io(output_dir, e))?;
        tracing::info!(
            artifacts = plans.len(),
            output_dir = %output_dir.display(),
            jobs = self.config.job_count(),
            "generating headers"
        );

        let written = if self.config.job_count() > 1 && plans.len() > 1 {
            self.emit_parallel(schema, &plans, output_dir)?
        } else {
            plans
                .iter()
                .map(|plan| self.emit(schema, plan, output_dir))
                .collect::<Result<Vec<_>, _>>()?
        };

        tracing::info!(written = written.len(), "generation complete");
        Ok(GenerationReport { written })
    }

    fn emit_parallel(
        &self,
        schema: &Schema,
        plans: &[ArtifactPlan<'_>],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, CodegenError> {
        let (job_tx, job_rx) = crossbeam_channel::unbounded();
        for job in plans.iter().enumerate() {
            // Receiver is alive; cannot fail.
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        let failed = AtomicBool::new(false);
        let workers = self.config.job_count().min(plans.len());

        let outcomes: Vec<Result<Vec<(usize, PathBuf)>, CodegenError>> =
            std::thread::scope(|scope| {
                let handles: Vec<_> = (0..workers)
                    .map(|_| {
                        let job_rx = job_rx.clone();
                        let failed = &failed;
                        scope.spawn(move || {
                            let mut done = Vec::new();
                            for (index, plan) in job_rx.iter() {
                                if failed.load(Ordering::Relaxed) {
                                    break;
                                }
                                match self.emit(schema, plan, output_dir) {
                                    Ok(path) => done.push((index, path)),
                                    Err(e) => {
                                        failed.store(true, Ordering::Relaxed);
                                        return Err(e);
                                    }
                                }
                            }
                            Ok(done)
                        })
                    })
                    .collect();

                handles
                    .into_iter()
                    .map(|handle| match handle.join() {
                        Ok(outcome) => outcome,
                        Err(panic) => std::panic::resume_unwind(panic),
                    })
                    .collect()
            });

        let mut written = Vec::with_capacity(plans.len());
        for outcome in outcomes {
            written.extend(outcome?);
        }
        written.sort_by_key(|(index, _)| *index);
        Ok(written.into_iter().map(|(_, path)| path).collect())
    }

    fn emit(
        &self,
        schema: &Schema,
        plan: &ArtifactPlan<'_>,
        output_dir: &Path,
    ) -> Result<PathBuf, CodegenError> {
        let contents = self.render_one(schema, plan)?;
        let path = output_dir.join(&plan.name);
        std::fs::write(&path, contents).map_err(|e| CodegenError::io(&path, e))?;
        tracing::debug!(
            artifact = %plan.name,
            category = %plan.category,
            includes = plan.includes.len(),
            "wrote artifact"
        );
        Ok(path)
    }

    fn render_one(&self, schema: &Schema, plan: &ArtifactPlan<'_>) -> Result<String, CodegenError> {
        let bindings = Bindings {
            schema,
            subject: plan.subject,
            includes: &plan.includes,
            artifact: &plan.name,
        };
        let helpers = Helpers::new(self.table, self.config.header_extension());
        self.renderer.render(plan.category, &bindings, &helpers)
    }

    fn artifact_name(&self, identifier: &str) -> String {
        crate::naming::artifact_name_with(identifier, self.config.header_extension())
    }
}

/// Generates headers for `schema` with the built-in C++ renderer.
///
/// # Errors
/// Returns any planning, rendering or IO error.
pub fn generate(schema: &Schema, config: GeneratorConfig) -> Result<GenerationReport, CodegenError> {
    Generator::new(config).generate(schema)
}

/// Rejects plans whose artifacts share a name, a case-folded name or an
/// include guard.
fn check_collisions(plans: &[ArtifactPlan<'_>]) -> Result<(), CodegenError> {
    let mut names: HashMap<&str, &str> = HashMap::with_capacity(plans.len());
    let mut folded: HashMap<String, &str> = HashMap::with_capacity(plans.len());
    let mut guards: HashMap<String, &str> = HashMap::with_capacity(plans.len());

    for plan in plans {
        let entity = subject_name(plan.subject);
        let folded_name = plan.name.to_ascii_lowercase();
        let guard = crate::naming::include_guard(&plan.name);

        let clash = if let Some(first) = names.insert(plan.name.as_str(), entity) {
            Some((plan.name.clone(), first))
        } else if let Some(first) = folded.insert(folded_name.clone(), entity) {
            Some((folded_name, first))
        } else {
            guards.insert(guard.clone(), entity).map(|first| (guard, first))
        };

        if let Some((artifact, first)) = clash {
            return Err(CodegenError::ArtifactCollision {
                artifact,
                first: first.to_string(),
                second: entity.to_string(),
            });
        }
    }
    Ok(())
}

fn subject_name(subject: Subject<'_>) -> &str {
    match subject {
        Subject::Type(t) => t.name(),
        Subject::Message(m) => &m.name,
        Subject::Schema => "<schema>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbecpp_schema::{
        CompositeDef, EnumDef, Message, PrimitiveDef, PrimitiveType, ScalarField, SetDef,
    };

    fn shapes_schema() -> Schema {
        let mut schema = Schema::new("shapes").with_header_type("MessageHeader");
        schema.add_type(EncodedType::Type(PrimitiveDef::new(
            "Length",
            PrimitiveType::Uint16,
        )));
        schema.add_type(EncodedType::Enum(
            EnumDef::new("Color", PrimitiveType::Uint8)
                .with_value("RED", "0")
                .with_value("GREEN", "1"),
        ));
        schema.add_type(EncodedType::Composite(
            CompositeDef::new("Point")
                .with_member("x", "int32")
                .with_member("y", "int32"),
        ));
        schema.add_type(EncodedType::Set(
            SetDef::new("Style", PrimitiveType::Uint8).with_choice("Dashed", 0),
        ));
        schema.add_message(
            Message::new("Shape", 1)
                .with(ScalarField::new("position", 1, "Point"))
                .with(ScalarField::new("color", 2, "Color")),
        );
        schema
    }

    #[test]
    fn test_plan_order_and_categories() {
        let schema = shapes_schema();
        let generator = Generator::new(GeneratorConfig::new("unused"));
        let plans = generator.plan(&schema).expect("plan");

        let names: Vec<_> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Color.h", "Point.h", "Style.h", "Shape.h", "schema.h"]);

        let categories: Vec<_> = plans.iter().map(|p| p.category).collect();
        assert_eq!(
            categories,
            [
                TemplateCategory::Enum,
                TemplateCategory::Composite,
                TemplateCategory::Set,
                TemplateCategory::Message,
                TemplateCategory::Schema,
            ]
        );
    }

    #[test]
    fn test_plan_skips_primitive_aliases() {
        let schema = shapes_schema();
        let plans = Generator::new(GeneratorConfig::new("unused"))
            .plan(&schema)
            .expect("plan");

        assert!(plans.iter().all(|p| p.name != "Length.h"));
        assert!(plans.iter().all(|p| !p.includes.contains("Length.h")));
    }

    #[test]
    fn test_enum_and_set_have_no_includes() {
        let schema = shapes_schema();
        let plans = Generator::new(GeneratorConfig::new("unused"))
            .plan(&schema)
            .expect("plan");

        for plan in &plans {
            if matches!(plan.category, TemplateCategory::Enum | TemplateCategory::Set) {
                assert!(plan.includes.is_empty(), "{}", plan.name);
            }
        }
    }

    #[test]
    fn test_umbrella_includes_only_messages() {
        let schema = shapes_schema();
        let plans = Generator::new(GeneratorConfig::new("unused"))
            .plan(&schema)
            .expect("plan");
        let umbrella = plans.last().expect("umbrella");

        assert_eq!(umbrella.category, TemplateCategory::Schema);
        assert_eq!(umbrella.includes.iter().collect::<Vec<_>>(), ["Shape.h"]);
    }

    #[test]
    fn test_artifact_collision_rejected() {
        let mut schema = shapes_schema();
        schema.add_message(Message::new("point", 2));

        let err = Generator::new(GeneratorConfig::new("unused"))
            .plan(&schema)
            .expect_err("collision");
        match err {
            CodegenError::ArtifactCollision {
                artifact,
                first,
                second,
            } => {
                assert_eq!(artifact, "Point.h");
                assert_eq!(first, "Point");
                assert_eq!(second, "point");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn collision(schema: &Schema) -> (String, String, String) {
        match Generator::new(GeneratorConfig::new("unused")).plan(schema) {
            Err(CodegenError::ArtifactCollision {
                artifact,
                first,
                second,
            }) => (artifact, first, second),
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_case_insensitive_collision_rejected() {
        let mut schema = Schema::new("p");
        schema.add_type(EncodedType::Enum(EnumDef::new("ABTest", PrimitiveType::Uint8)));
        schema.add_type(EncodedType::Enum(EnumDef::new("ABtest", PrimitiveType::Uint8)));

        let (artifact, first, second) = collision(&schema);
        assert_eq!(artifact, "abtest.h");
        assert_eq!(first, "ABTest");
        assert_eq!(second, "ABtest");
    }

    #[test]
    fn test_message_colliding_with_umbrella_rejected() {
        let mut schema = Schema::new("p");
        schema.add_message(Message::new("Schema", 1));

        let (artifact, first, second) = collision(&schema);
        assert_eq!(artifact, "schema.h");
        assert_eq!(first, "Schema");
        assert_eq!(second, "<schema>");
    }

    #[test]
    fn test_include_guard_collision_rejected() {
        let mut schema = Schema::new("p");
        schema.add_type(EncodedType::Enum(EnumDef::new("Ab_c", PrimitiveType::Uint8)));
        schema.add_type(EncodedType::Enum(EnumDef::new("AbC", PrimitiveType::Uint8)));

        let (artifact, first, second) = collision(&schema);
        assert_eq!(artifact, "AB_C_H");
        assert_eq!(first, "Ab_c");
        assert_eq!(second, "AbC");
    }

    #[test]
    fn test_custom_extension_and_umbrella() {
        let schema = shapes_schema();
        let config = GeneratorConfig::new("unused")
            .extension("hpp")
            .umbrella_name("shapes.hpp");
        let plans = Generator::new(config).plan(&schema).expect("plan");

        let shape = plans.iter().find(|p| p.name == "Shape.hpp").expect("shape");
        assert!(shape.includes.contains("MessageHeader.hpp"));
        assert_eq!(plans.last().map(|p| p.name.as_str()), Some("shapes.hpp"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let schema = shapes_schema();
        let generator = Generator::new(GeneratorConfig::new("unused"));
        let first = generator.render(&schema).expect("render");
        let second = generator.render(&schema).expect("render");
        assert_eq!(first, second);
    }

    struct Listing;

    impl Renderer for Listing {
        fn render(
            &self,
            category: TemplateCategory,
            bindings: &Bindings<'_>,
            _helpers: &Helpers<'_>,
        ) -> Result<String, CodegenError> {
            if bindings.artifact == "Style.h" {
                return Err(CodegenError::render(bindings.artifact, "no set template"));
            }
            let includes: Vec<_> = bindings.includes.iter().map(String::as_str).collect();
            Ok(format!("{category}: {}", includes.join(",")))
        }
    }

    #[test]
    fn test_custom_renderer_receives_bindings() {
        let mut schema = shapes_schema();
        schema.types.retain(|t| t.name() != "Style");
        let rendered = Generator::with_renderer(GeneratorConfig::new("unused"), Listing)
            .render(&schema)
            .expect("render");

        let shape = rendered.iter().find(|a| a.name == "Shape.h").expect("shape");
        assert_eq!(shape.contents, "message: Color.h,MessageHeader.h,Point.h");
    }

    #[test]
    fn test_renderer_error_propagates() {
        let err = Generator::with_renderer(GeneratorConfig::new("unused"), Listing)
            .render(&shapes_schema())
            .expect_err("render failure");
        assert!(matches!(err, CodegenError::Render { ref artifact, .. } if artifact == "Style.h"));
    }
}
