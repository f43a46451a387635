use std::time::Duration;

use serde::Serialize;
use viva_llm::{GenerationRequest, select_providers};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProvidersArgs;
use crate::context::AppContext;
use crate::output::output;

const PING_PROMPT: &str = "You are a health check. Reply with the single word: ready";

#[derive(Debug, Serialize)]
struct ProvidersResponse {
    order: Vec<String>,
    bound: Option<String>,
    offline: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ping: Vec<PingReport>,
}

#[derive(Debug, Serialize)]
struct PingReport {
    provider: String,
    ok: bool,
    detail: String,
}

/// Handle `viva providers`.
pub async fn handle(args: &ProvidersArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let binding = select_providers(&ctx.config);
    let timeout = Duration::from_secs(ctx.config.generation.attempt_timeout_secs);

    let mut ping = Vec::new();
    if args.ping {
        let request = GenerationRequest {
            system_prompt: PING_PROMPT,
            history: &[],
            user_message: "ping",
            max_tokens: 5,
            temperature: 0.0,
        };
        for provider in binding.providers() {
            let (ok, detail) = match tokio::time::timeout(timeout, provider.generate(&request)).await {
                Ok(Ok(text)) => (true, text),
                Ok(Err(error)) => (false, error.to_string()),
                Err(_) => (false, format!("timed out after {}s", timeout.as_secs())),
            };
            ping.push(PingReport {
                provider: provider.name().to_string(),
                ok,
                detail,
            });
        }
    }

    output(
        &ProvidersResponse {
            order: ctx.config.generation.provider_order.clone(),
            bound: binding.bound().map(|p| p.name().to_string()),
            offline: binding.is_offline(),
            ping,
        },
        flags.format,
    )
}
