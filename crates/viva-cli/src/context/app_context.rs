use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use viva_config::VivaConfig;
use viva_knowledge::KnowledgeStore;
use viva_llm::select_providers;
use viva_tutor::{KnowledgeLookup, OfflineResponder, StaticLookup, TutorEngine};

/// Resolved config and project root shared by command handlers.
pub struct AppContext {
    pub config: VivaConfig,
    pub project_root: PathBuf,
}

impl AppContext {
    pub const fn new(project_root: PathBuf, config: VivaConfig) -> Self {
        Self { config, project_root }
    }

    /// Knowledge store path, relative paths resolved against the project root.
    pub fn store_path(&self) -> PathBuf {
        resolve(&self.project_root, Path::new(&self.config.knowledge.db_path))
    }

    /// Open the knowledge store with the fastembed model.
    pub fn open_store(&self) -> anyhow::Result<KnowledgeStore> {
        let path = self.store_path();
        let store = KnowledgeStore::open_default(&path)
            .with_context(|| format!("failed to open knowledge store at {}", path.display()))?;
        Ok(store.with_min_score(self.config.knowledge.min_score))
    }

    /// Build the tutoring engine. A store that cannot be opened is logged and
    /// replaced by an empty lookup so replies still flow.
    pub fn build_engine(&self) -> TutorEngine {
        let lookup: Box<dyn KnowledgeLookup> = match self.open_store() {
            Ok(store) => Box::new(Arc::new(store)),
            Err(error) => {
                tracing::warn!("knowledge store unavailable, continuing without context: {error:#}");
                Box::new(StaticLookup::empty())
            }
        };

        TutorEngine::new(
            lookup,
            select_providers(&self.config),
            OfflineResponder::from_config(&self.config.offline),
            &self.config,
        )
    }

    /// Topic argument, or the configured default.
    pub fn topic(&self, topic: Option<&str>) -> String {
        topic
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.config.knowledge.default_topic)
            .to_string()
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
