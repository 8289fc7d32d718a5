//! Watch Use Case implementation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::ports::SiteBuilder;
use crate::error::PatternKitResult;

use super::change::ChangeSet;
use super::detector::ChangeDetector;
use super::dispatcher::{RebuildDispatcher, RebuildReport};
use super::event::{WatchEvent, WatchOptions};
use super::snapshot::WatchSnapshot;

/// Granularity of the cancellation check while waiting between passes
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Watch Use Case
///
/// Owns the detector snapshot and the dispatcher. One pass, including the
/// rebuild it triggers, finishes before the next one starts.
pub struct WatchUseCase<B: SiteBuilder> {
    options: WatchOptions,
    detector: ChangeDetector,
    dispatcher: RebuildDispatcher<B>,
    snapshot: WatchSnapshot,
    passes: usize,
}

impl<B: SiteBuilder> WatchUseCase<B> {
    pub fn new(options: WatchOptions, builder: B) -> Self {
        let detector = ChangeDetector::new(&options);
        let mut dispatcher = RebuildDispatcher::new(builder);
        if options.build_lock {
            dispatcher = dispatcher.with_build_lock(options.public_dir.clone());
        }
        Self {
            options,
            detector,
            dispatcher,
            snapshot: WatchSnapshot::new(),
            passes: 0,
        }
    }

    pub fn snapshot(&self) -> &WatchSnapshot {
        &self.snapshot
    }

    /// Completed passes, failed ones included
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn builder(&self) -> &B {
        self.dispatcher.builder()
    }

    pub fn builder_mut(&mut self) -> &mut B {
        self.dispatcher.builder_mut()
    }

    /// Run until `running` is cleared or `max_passes` is reached.
    ///
    /// Pass failures are reported through `on_event` and never end the loop.
    pub fn start<F>(&mut self, running: Arc<AtomicBool>, on_event: F) -> PatternKitResult<()>
    where
        F: Fn(WatchEvent),
    {
        on_event(WatchEvent::WatchStarted {
            source: self.options.patterns_dir.display().to_string(),
            interval_ms: self.options.interval.as_millis() as u64,
        });

        self.initial_build(&on_event);

        while running.load(Ordering::SeqCst) && !self.limit_reached() {
            self.poll_once(&on_event);
            if self.limit_reached() {
                break;
            }
            self.wait(&running);
        }

        on_event(WatchEvent::Shutdown);
        Ok(())
    }

    /// Full build so the first (seeding) pass starts from fresh output
    pub fn initial_build(&mut self, on_event: &impl Fn(WatchEvent)) -> Option<RebuildReport> {
        match self.dispatcher.full_build() {
            Ok(report) => {
                on_event(rebuild_event(&report));
                Some(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, "initial build failed");
                on_event(WatchEvent::Error {
                    message: e.to_string(),
                });
                None
            }
        }
    }

    /// One detector pass plus the rebuild it calls for.
    ///
    /// Returns the changes seen, or `None` when the pass was aborted. An
    /// aborted pass keeps the previous snapshot.
    pub fn poll_once(&mut self, on_event: &impl Fn(WatchEvent)) -> Option<ChangeSet> {
        self.passes += 1;

        let (next, changes) = match self.detector.scan_once(&self.snapshot) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(pass = self.passes, error = %e, "scan pass aborted");
                on_event(WatchEvent::Error {
                    message: e.to_string(),
                });
                return None;
            }
        };
        self.snapshot = next;

        if changes.is_empty() {
            return Some(changes);
        }

        for event in WatchEvent::from_changes(&changes) {
            on_event(event);
        }

        match self.dispatcher.apply(&changes) {
            Ok(report) => on_event(rebuild_event(&report)),
            Err(e) => {
                tracing::warn!(pass = self.passes, error = %e, "rebuild failed");
                on_event(WatchEvent::Error {
                    message: e.to_string(),
                });
            }
        }
        Some(changes)
    }

    fn limit_reached(&self) -> bool {
        self.options
            .max_passes
            .is_some_and(|max| self.passes >= max)
    }

    fn wait(&self, running: &AtomicBool) {
        let deadline = Instant::now() + self.options.interval;
        while running.load(Ordering::SeqCst) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(SLEEP_SLICE.min(deadline - now));
        }
    }
}

fn rebuild_event(report: &RebuildReport) -> WatchEvent {
    WatchEvent::RebuildComplete {
        full: report.full_rebuild,
        main_pages: report.main_pages,
        rendered: report.rendered,
        files_moved: report.files_moved,
    }
}
