pub mod build;
pub mod list;
pub mod project_root;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use patternkit::config::Config;

/// Resolved project root and configuration shared by every command
pub struct CommandContext {
    pub project_root: PathBuf,
    pub config: Config,
}

/// Locate the project, load its configuration and start logging.
///
/// An explicit `--config` anchors the project root at the file's directory.
pub fn load_context(config_path: Option<&Path>, verbose: u8) -> Result<CommandContext> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;

    let (project_root, config, warnings) = match config_path {
        Some(path) => {
            let path = cwd.join(path);
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            let (config, warnings) = Config::load_with_warnings(&path)?;
            let (config, warnings) = config.with_env_overrides(warnings);
            (root, config, warnings)
        }
        None => {
            let root = project_root::discover_project_root(&cwd);
            let (config, warnings) = Config::load_or_default(&root)?;
            (root, config, warnings)
        }
    };

    for warning in &warnings {
        eprintln!("warning: {warning}");
    }

    patternkit::logging::init_with_config(&config.logging, verbose);
    tracing::debug!(root = %project_root.display(), "project resolved");

    Ok(CommandContext {
        project_root,
        config,
    })
}
