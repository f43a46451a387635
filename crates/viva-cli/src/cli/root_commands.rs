use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Load JSON datasets into the knowledge store.
    Ingest(IngestArgs),
    /// Show the knowledge records closest to a query.
    Query(QueryArgs),
    /// Get one tutor reply.
    Ask(AskArgs),
    /// Run an interactive viva session.
    Chat(ChatArgs),
    /// Show which generation providers are bound.
    Providers(ProvidersArgs),
}

#[derive(Clone, Debug, Args)]
pub struct IngestArgs {
    /// Dataset files (misconception lists or problem sheets).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Delete existing records before loading.
    #[arg(long)]
    pub reset: bool,
}

#[derive(Clone, Debug, Args)]
pub struct QueryArgs {
    /// Free-text query, usually a topic name.
    pub text: String,

    /// Maximum records to return.
    #[arg(short = 'n', long, default_value_t = 3)]
    pub limit: usize,
}

#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    /// The student's message or code.
    pub message: String,

    /// Viva topic (defaults to `knowledge.default_topic`).
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Prior conversation as `Tutor:` / `Student:` lines.
    #[arg(long)]
    pub history_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ChatArgs {
    /// Viva topic (defaults to `knowledge.default_topic`).
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Write the transcript here when the session ends.
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ProvidersArgs {
    /// Send a one-line prompt to each bound provider.
    #[arg(long)]
    pub ping: bool,
}
