use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use viva_core::transcript::render_transcript;
use viva_core::{ConversationTurn, VivaRequest};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ChatArgs;
use crate::context::AppContext;

const QUIT: &str = "/quit";

/// Handle `viva chat`: read student lines from stdin until `/quit` or EOF.
pub async fn handle(args: &ChatArgs, ctx: &AppContext, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let topic = ctx.topic(args.topic.as_deref());
    let engine = ctx.build_engine();
    let mode = engine.binding().bound().map_or("offline", |p| p.name());

    println!("Viva on {topic} ({mode}). Share your code or approach; {QUIT} to finish.");

    let mut history: Vec<ConversationTurn> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("you> ");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == QUIT {
            break;
        }

        let request = VivaRequest::new(message, topic.as_str(), history.clone());
        let outcome = engine.reply(&request).await;
        println!("tutor> {}\n", outcome.reply);

        history.push(ConversationTurn::student(message));
        history.push(ConversationTurn::tutor(outcome.reply));
    }

    if let Some(path) = &args.save {
        std::fs::write(path, render_transcript(&history))
            .with_context(|| format!("failed to write transcript to {}", path.display()))?;
        tracing::info!(path = %path.display(), turns = history.len(), "saved transcript");
    }
    Ok(())
}
