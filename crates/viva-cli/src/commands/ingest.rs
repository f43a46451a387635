use anyhow::Context;
use serde::Serialize;
use viva_knowledge::load_dataset;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::IngestArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct IngestResponse {
    store: String,
    files: Vec<FileReport>,
    reset: bool,
    total_records: usize,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    records: usize,
}

/// Handle `viva ingest`.
pub fn handle(args: &IngestArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    // Every file must parse before the store is touched.
    let mut datasets = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let records = load_dataset(path).with_context(|| format!("failed to load {}", path.display()))?;
        datasets.push((path, records));
    }

    let store = ctx.open_store()?;
    if args.reset {
        store.clear().context("failed to clear knowledge store")?;
    }

    let mut files = Vec::with_capacity(datasets.len());
    for (path, records) in &datasets {
        let written = store
            .upsert(records)
            .with_context(|| format!("failed to store records from {}", path.display()))?;
        tracing::info!(path = %path.display(), records = written, "ingested dataset");
        files.push(FileReport {
            path: path.display().to_string(),
            records: written,
        });
    }

    output(
        &IngestResponse {
            store: ctx.store_path().display().to_string(),
            files,
            reset: args.reset,
            total_records: store.count()?,
        },
        flags.format,
    )
}
