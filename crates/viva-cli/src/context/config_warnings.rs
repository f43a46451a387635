use viva_config::VivaConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &VivaConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &VivaConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.groq.is_configured() && has_env_prefix(&env_keys, "VIVA_GROQ") {
        warnings.push(
            "Groq config appears default while VIVA_GROQ* env vars exist. Use double underscores (example: VIVA_GROQ__API_KEY)."
                .to_string(),
        );
    }

    if !config.gemini.is_configured() && has_env_prefix(&env_keys, "VIVA_GEMINI") {
        warnings.push(
            "Gemini config appears default while VIVA_GEMINI* env vars exist. Use double underscores (example: VIVA_GEMINI__API_KEY)."
                .to_string(),
        );
    }

    if !config.has_any_provider() && env_keys.iter().any(|k| k == "GROQ_API_KEY" || k == "GEMINI_API_KEY") {
        warnings.push(
            "GROQ_API_KEY / GEMINI_API_KEY is set but looks like a placeholder; replies will come from the offline responder."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
