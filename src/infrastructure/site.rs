//! Local site builder
//!
//! Implements the build collaborator ports against a public tree on local
//! disk. Layout under the public root:
//!
//! ```text
//! patterns/<unique>/<unique>.html   rendered pattern
//! patterns/<bucket>/view-all.json   per-bucket listing
//! patterns/navigation.json          full navigation tree
//! latest-change.txt                 epoch millis of the last change
//! ```

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::entities::{PatternData, PatternIdentity, PatternRegistry};
use crate::domain::ports::{ChangeClock, EngineRegistry, FileMover, PageGenerator, PatternRenderer};
use crate::error::PatternKitResult;

use super::discovery::{discover, SkippedFile};
use super::fs::{atomic_write, copy_file, read_json_object};

/// Output directory for patterns, relative to the public root
pub const PATTERNS_OUTPUT_DIR: &str = "patterns";

pub const NAVIGATION_FILE: &str = "navigation.json";

pub const VIEW_ALL_FILE: &str = "view-all.json";

pub const CHANGE_TIME_FILE: &str = "latest-change.txt";

#[derive(Debug)]
pub struct LocalSite {
    source_dir: PathBuf,
    patterns_dir: PathBuf,
    public_dir: PathBuf,
    data_file: PathBuf,
    ignore: Vec<String>,
    global_data: PatternData,
    registry: PatternRegistry,
    skipped: Vec<SkippedFile>,
}

impl LocalSite {
    pub fn from_config(config: &Config, project_root: &Path, engines: EngineRegistry) -> Self {
        Self {
            source_dir: config.source_dir(project_root),
            patterns_dir: config.patterns_dir(project_root),
            public_dir: config.public_dir(project_root),
            data_file: config.data_file(project_root),
            ignore: config.watch.ignore.clone(),
            global_data: PatternData::new(),
            registry: PatternRegistry::new(engines),
            skipped: Vec::new(),
        }
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    pub fn global_data(&self) -> &PatternData {
        &self.global_data
    }

    /// Files the last gather found but could not add
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Where a pattern's rendered output lands
    pub fn output_path(&self, pattern: &PatternIdentity) -> PathBuf {
        self.public_dir
            .join(PATTERNS_OUTPUT_DIR)
            .join(pattern.pattern_link())
    }
}

impl PatternRenderer for LocalSite {
    fn gather_data(&mut self) -> PatternKitResult<()> {
        self.global_data = read_json_object(&self.data_file)?;

        let discovery = discover(&self.patterns_dir, self.registry.engines(), &self.ignore)?;
        for skipped in &discovery.skipped {
            tracing::warn!(file = %skipped.relative_path, error = %skipped.error, "pattern skipped");
        }
        self.registry = discovery.registry;
        self.skipped = discovery.skipped;
        Ok(())
    }

    /// Render with global data shallow-merged under each pattern's own data.
    ///
    /// A pattern that fails to render is logged and left out; write failures
    /// abort the rebuild.
    fn render_and_move(&mut self) -> PatternKitResult<usize> {
        let partials = self.registry.partials();
        let output_root = self.public_dir.join(PATTERNS_OUTPUT_DIR);
        let mut written = 0;

        for pattern in self.registry.iter_mut() {
            let mut data = self.global_data.clone();
            data.extend(pattern.raw_data().clone());

            let html = match pattern.render(Some(&data), &partials) {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(pattern = pattern.unique_name(), error = %e, "render failed");
                    continue;
                }
            };
            atomic_write(&output_root.join(pattern.pattern_link()), html.as_bytes())?;
            pattern.set_rendered_template(html);
            written += 1;
        }

        tracing::info!(rendered = written, "patterns rendered");
        Ok(written)
    }

    fn registry(&self) -> &PatternRegistry {
        &self.registry
    }
}

impl PageGenerator for LocalSite {
    fn generate_main_pages(&mut self) -> PatternKitResult<()> {
        let navigation = self.registry.build_navigation();
        let path = self
            .public_dir
            .join(PATTERNS_OUTPUT_DIR)
            .join(NAVIGATION_FILE);
        atomic_write(&path, &serde_json::to_vec_pretty(&navigation)?)
    }

    fn generate_view_all_pages(&mut self) -> PatternKitResult<()> {
        let output_root = self.public_dir.join(PATTERNS_OUTPUT_DIR);
        for bucket in self.registry.build_navigation() {
            let dir = if bucket.name_lc.is_empty() {
                output_root.clone()
            } else {
                output_root.join(&bucket.name_lc)
            };
            atomic_write(&dir.join(VIEW_ALL_FILE), &serde_json::to_vec_pretty(&bucket)?)?;
        }
        Ok(())
    }
}

impl ChangeClock for LocalSite {
    fn update_change_time(&mut self) -> PatternKitResult<()> {
        let millis = chrono::Utc::now().timestamp_millis();
        atomic_write(
            &self.public_dir.join(CHANGE_TIME_FILE),
            millis.to_string().as_bytes(),
        )
    }
}

impl FileMover for LocalSite {
    /// `source` is relative to the source root, `dest` to the public root
    fn move_file(&mut self, source: &Path, dest: &Path) -> PatternKitResult<()> {
        copy_file(&self.source_dir.join(source), &self.public_dir.join(dest))?;
        tracing::debug!(source = %source.display(), dest = %dest.display(), "file moved");
        Ok(())
    }
}
