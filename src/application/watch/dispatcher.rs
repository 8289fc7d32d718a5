//! Rebuild dispatcher
//!
//! Maps a change set to the smallest set of build actions. Any pattern or
//! global data change rebuilds every pattern, since partial inclusion can
//! make one pattern's output depend on any other. Watch files only move.

use std::path::PathBuf;

use crate::domain::ports::SiteBuilder;
use crate::error::PatternKitResult;
use crate::infrastructure::fs::BuildLock;

use super::change::ChangeSet;

/// What one `apply` did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    pub full_rebuild: bool,
    pub main_pages: bool,
    pub rendered: usize,
    pub files_moved: usize,
}

impl RebuildReport {
    pub fn is_noop(&self) -> bool {
        !self.full_rebuild && self.files_moved == 0
    }
}

/// Owns the site builder; `&mut self` keeps rebuilds in one process serial,
/// the optional file lock keeps them serial across processes.
pub struct RebuildDispatcher<B: SiteBuilder> {
    builder: B,
    lock_root: Option<PathBuf>,
}

impl<B: SiteBuilder> RebuildDispatcher<B> {
    pub fn new(builder: B) -> Self {
        Self {
            builder,
            lock_root: None,
        }
    }

    /// Take `<public_root>/.patternkit.lock` around every action
    pub fn with_build_lock(mut self, public_root: impl Into<PathBuf>) -> Self {
        self.lock_root = Some(public_root.into());
        self
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut B {
        &mut self.builder
    }

    pub fn into_builder(self) -> B {
        self.builder
    }

    /// Gather, render, regenerate every page and stamp the change time
    pub fn full_build(&mut self) -> PatternKitResult<RebuildReport> {
        let _lock = self.lock()?;
        let rendered = self.rebuild_patterns(true)?;
        Ok(RebuildReport {
            full_rebuild: true,
            main_pages: true,
            rendered,
            files_moved: 0,
        })
    }

    pub fn apply(&mut self, changes: &ChangeSet) -> PatternKitResult<RebuildReport> {
        let mut report = RebuildReport::default();
        if changes.is_empty() {
            return Ok(report);
        }

        let _lock = self.lock()?;
        let mut failure = None;

        if changes.needs_full_rebuild() {
            report.main_pages = changes.needs_main_pages();
            match self.rebuild_patterns(report.main_pages) {
                Ok(rendered) => {
                    report.rendered = rendered;
                    report.full_rebuild = true;
                }
                Err(e) => failure = Some(e),
            }
        }

        // Watch files are copied even when the rebuild failed; the snapshot
        // has already moved past their change.
        for change in &changes.watch_files {
            let moved = self
                .builder
                .move_file(&change.source, &change.dest)
                .and_then(|()| self.builder.update_change_time());
            match moved {
                Ok(()) => report.files_moved += 1,
                Err(e) => {
                    tracing::warn!(source = %change.source.display(), error = %e, "watch file not moved");
                    failure.get_or_insert(e);
                }
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }

        tracing::debug!(
            full = report.full_rebuild,
            main_pages = report.main_pages,
            rendered = report.rendered,
            moved = report.files_moved,
            "rebuild applied"
        );
        Ok(report)
    }

    fn rebuild_patterns(&mut self, main_pages: bool) -> PatternKitResult<usize> {
        self.builder.gather_data()?;
        let rendered = self.builder.render_and_move()?;
        if main_pages {
            self.builder.generate_main_pages()?;
        }
        self.builder.generate_view_all_pages()?;
        self.builder.update_change_time()?;
        Ok(rendered)
    }

    fn lock(&self) -> PatternKitResult<Option<BuildLock>> {
        self.lock_root
            .as_deref()
            .map(BuildLock::acquire)
            .transpose()
    }
}
