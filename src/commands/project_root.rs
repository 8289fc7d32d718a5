use std::path::{Path, PathBuf};

use patternkit::config::CONFIG_FILE_NAME;

/// Discover the project root directory from an invocation directory.
///
/// Heuristics (first match wins, walking upward from `start`):
/// - `patternkit.toml`
/// - `source/_patterns/` (default layout without a config file)
/// - `.git/` or `.git` file (git repo root / worktree)
///
/// Falls back to `start` when no markers are found.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(CONFIG_FILE_NAME).is_file() {
            return dir.to_path_buf();
        }
        if dir.join("source").join("_patterns").is_dir() {
            return dir.to_path_buf();
        }
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn prefers_nearest_config_file() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("site/src")).unwrap();
        std::fs::write(root.join("site").join(CONFIG_FILE_NAME), "").unwrap();

        assert_eq!(discover_project_root(&root.join("site/src")), root.join("site"));
    }

    #[test]
    fn default_layout_marks_the_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("source/_patterns/00-atoms")).unwrap();

        let start = root.join("source/_patterns/00-atoms");
        assert_eq!(discover_project_root(&start), root.to_path_buf());
    }

    #[test]
    fn falls_back_to_git_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("sub/src")).unwrap();

        assert_eq!(discover_project_root(&root.join("sub/src")), root.to_path_buf());
    }
}
