//! `koja check`: report every problem without writing output

use crate::generate::collect_schemas;
use crate::manifest::{self, Overrides, Settings};
use crate::source::SourceTable;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Check command implementation
pub fn run(inputs: Vec<PathBuf>, manifest_path: Option<PathBuf>) -> Result<()> {
    let manifest = manifest::load(manifest_path.as_deref())?;
    let settings = Settings::resolve(
        manifest.as_ref(),
        Overrides {
            inputs,
            ..Overrides::default()
        },
    )?;

    let table = Arc::new(SourceTable::parse_files(&settings.sources)?);
    let names = table.eligible_names();
    println!(
        "Checking {} type(s) from {} file(s)",
        names.len(),
        settings.sources.len()
    );

    let outcome = collect_schemas(&table, &names, settings.config);
    for failure in &outcome.failures {
        eprintln!("error: {}: {}", failure.identity, failure.error);
    }

    for name in outcome.schemas.keys() {
        if !outcome.failures.iter().any(|f| &f.identity == name) {
            println!("✓ {name}");
        }
    }

    if !outcome.is_success() {
        anyhow::bail!("{} problem(s) found", outcome.failures.len());
    }

    println!("\nAll types are valid!");
    Ok(())
}
