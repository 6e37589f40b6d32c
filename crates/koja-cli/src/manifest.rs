//! `koja.toml` parsing and settings resolution

use anyhow::{Context, Result};
use koja_core::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest file looked up in the working directory when `-m` is not given
pub const DEFAULT_MANIFEST: &str = "koja.toml";

/// koja.toml manifest structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub schema: SchemaSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaSection {
    /// Rust source files to parse
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Where to write the schema document (stdout when absent)
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Types to generate; every type deriving `JsonSchema` when empty
    #[serde(default)]
    pub types: Vec<String>,

    #[serde(default)]
    pub pretty: Option<bool>,

    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl Manifest {
    /// Load manifest from a file; relative paths are resolved against its directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {path:?}"))?;

        let mut manifest =
            Self::from_toml(&content).with_context(|| format!("Invalid manifest: {path:?}"))?;
        if let Some(base) = path.parent() {
            manifest.resolve_paths(base);
        }
        Ok(manifest)
    }

    /// Parse manifest from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        for source in &mut self.schema.sources {
            if source.is_relative() {
                *source = base.join(&*source);
            }
        }
        if let Some(output) = &mut self.schema.output {
            if output.is_relative() {
                *output = base.join(&*output);
            }
        }
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        if self.schema.max_depth == Some(0) {
            anyhow::bail!("max_depth must be at least 1");
        }

        for source in &self.schema.sources {
            if source.as_os_str().is_empty() {
                anyhow::bail!("Source paths cannot be empty");
            }
        }

        for name in &self.schema.types {
            if name.trim().is_empty() {
                anyhow::bail!("Type names cannot be empty");
            }
        }

        Ok(())
    }
}

/// Load the manifest named on the command line, or `koja.toml` from the
/// working directory when one exists
pub fn load(path: Option<&Path>) -> Result<Option<Manifest>> {
    let path = match path {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_MANIFEST);
            if !default.exists() {
                tracing::debug!("no {DEFAULT_MANIFEST} in working directory");
                return Ok(None);
            }
            default
        }
    };

    let manifest = Manifest::from_file(path)?;
    manifest.validate()?;
    tracing::debug!(manifest = ?path, sources = manifest.schema.sources.len(), "manifest loaded");
    Ok(Some(manifest))
}

/// Values given on the command line; each one wins over the manifest
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub types: Vec<String>,
    pub compact: bool,
}

/// Effective settings of a run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub sources: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub types: Vec<String>,
    pub pretty: bool,
    pub config: GeneratorConfig,
}

impl Settings {
    pub fn resolve(manifest: Option<&Manifest>, overrides: Overrides) -> Result<Self> {
        let section = manifest.map(|m| m.schema.clone()).unwrap_or_default();

        let sources = if overrides.inputs.is_empty() {
            section.sources
        } else {
            overrides.inputs
        };
        if sources.is_empty() {
            anyhow::bail!(
                "No input files: pass -i <file.rs> or set `sources` in the [schema] section of {DEFAULT_MANIFEST}"
            );
        }

        let types = if overrides.types.is_empty() {
            section.types
        } else {
            overrides.types
        };

        let mut config = GeneratorConfig::default();
        if let Some(max_depth) = section.max_depth {
            config = config.with_max_depth(max_depth);
        }

        Ok(Self {
            sources,
            output: overrides.output.or(section.output),
            types,
            pretty: !overrides.compact && section.pretty.unwrap_or(true),
            config,
        })
    }
}
