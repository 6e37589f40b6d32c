//! `koja generate`: write the JSON Schema of parsed types

use crate::manifest::{self, Overrides, Settings};
use crate::source::SourceTable;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use koja_core::{BatchOutcome, GeneratorConfig, Schema, SchemaBatch, TypeDescriptor};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// Command line options of `koja generate`
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub types: Vec<String>,
    pub compact: bool,
    pub manifest: Option<PathBuf>,
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let manifest = manifest::load(options.manifest.as_deref())?;
    let settings = Settings::resolve(
        manifest.as_ref(),
        Overrides {
            inputs: options.inputs,
            output: options.output,
            types: options.types,
            compact: options.compact,
        },
    )?;

    let table = Arc::new(SourceTable::parse_files(&settings.sources)?);
    let names = select_types(&table, &settings.types)?;
    tracing::debug!(types = names.len(), files = settings.sources.len(), "generating schemas");

    let schemas = collect_schemas(&table, &names, settings.config.clone()).into_result()?;
    let document = render(&schemas, settings.pretty)?;

    match &settings.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {parent:?}"))?;
            }
            std::fs::write(path, format!("{document}\n"))
                .with_context(|| format!("Failed to write {path:?}"))?;
            println!("✓ Wrote {} schema(s) to {}", schemas.len(), path.display());
        }
        None => println!("{document}"),
    }

    Ok(())
}

/// The types to generate: the requested ones, or every eligible type
pub fn select_types(table: &SourceTable, requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        let names = table.eligible_names();
        if names.is_empty() {
            anyhow::bail!("No types deriving JsonSchema found in the input files");
        }
        return Ok(names);
    }

    for name in requested {
        if !table.contains(name) {
            anyhow::bail!("Type '{name}' was not found in the input files");
        }
    }
    Ok(requested.to_vec())
}

/// Validate, parse docs and generate for `names`, collecting every failure.
///
/// Doc comments of all eligible types are checked, not only those of the
/// requested roots.
pub fn collect_schemas(
    table: &Arc<SourceTable>,
    names: &[String],
    config: GeneratorConfig,
) -> BatchOutcome {
    let (registry, doc_failures) = table.doc_registry();
    let rejections = table.rejections();

    let roots: Vec<TypeDescriptor> = names
        .iter()
        .filter(|name| !rejections.iter().any(|(rejected, _)| rejected == *name))
        .filter_map(|name| table.descriptor(name))
        .collect();

    let mut outcome = SchemaBatch::with_config(&registry, config).run(&roots);
    for (identity, error) in doc_failures {
        outcome.push_failure(identity, error);
    }
    for (identity, error) in rejections {
        outcome.push_failure(identity, error);
    }
    outcome
}

/// Render `{ "<TypeName>": <schema>, ... }`
pub fn render(schemas: &IndexMap<String, Schema>, pretty: bool) -> Result<String> {
    let document: Map<String, Value> = schemas
        .iter()
        .map(|(name, schema)| (name.clone(), schema.to_json_value()))
        .collect();
    let document = Value::Object(document);

    let text = if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    text.context("Failed to serialize schema document")
}
