use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::QueryArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `viva query`.
pub fn handle(args: &QueryArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let hits = store
        .search(&args.text, args.limit)
        .with_context(|| format!("knowledge search failed for '{}'", args.text))?;
    output(&hits, flags.format)
}
