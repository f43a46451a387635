use anyhow::Context;
use serde::Serialize;
use viva_core::VivaRequest;

use crate::cli::root_commands::AskArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AskResponse {
    topic: String,
    source: String,
    reply: String,
}

/// Handle `viva ask`.
pub async fn handle(args: &AskArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let history_text = match &args.history_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read history file {}", path.display()))?,
        None => String::new(),
    };

    let topic = ctx.topic(args.topic.as_deref());
    let engine = ctx.build_engine();
    let request = VivaRequest::from_transcript(args.message.as_str(), topic.as_str(), &history_text);
    let outcome = engine.reply(&request).await;

    if flags.format == OutputFormat::Text {
        println!("{}", outcome.reply);
        return Ok(());
    }
    output(
        &AskResponse {
            topic,
            source: outcome.source.to_string(),
            reply: outcome.reply,
        },
        flags.format,
    )
}
