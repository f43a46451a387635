use std::path::{Path, PathBuf};

use anyhow::Context;
use viva_config::{PROJECT_DIR, VivaConfig};

use crate::cli::GlobalFlags;

/// Directory whose `.viva/` and `.env` are used: `--project`, else the
/// current directory.
pub fn resolve_project_root(flags: &GlobalFlags) -> anyhow::Result<PathBuf> {
    let Some(project) = &flags.project else {
        return std::env::current_dir().context("failed to read current directory");
    };

    let explicit = PathBuf::from(project);
    if explicit
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name == PROJECT_DIR)
    {
        return explicit
            .parent()
            .map(Path::to_path_buf)
            .context("invalid --project path: '.viva' directory has no parent");
    }

    if !explicit.is_dir() {
        anyhow::bail!("invalid --project '{}': directory does not exist", explicit.display());
    }
    Ok(explicit)
}

/// Load `.env` from the project root (falling back to the usual search),
/// then the layered config.
pub fn load_config(project_root: &Path) -> anyhow::Result<VivaConfig> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    } else {
        let _ = dotenvy::dotenv();
    }

    VivaConfig::load_from(project_root).map_err(anyhow::Error::from)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags(project: Option<String>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: false,
            verbose: false,
            project,
        }
    }

    #[test]
    fn viva_dir_resolves_to_parent() {
        let dir = TempDir::new().unwrap();
        let viva_dir = dir.path().join(".viva");
        std::fs::create_dir_all(&viva_dir).unwrap();
        let root = resolve_project_root(&flags(Some(viva_dir.display().to_string()))).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn missing_project_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(resolve_project_root(&flags(Some(missing.display().to_string()))).is_err());
    }
}
