//! Build Collaborator Ports
//!
//! The rebuild dispatcher decides *what* to rebuild; these traits do the
//! work. Each concern is its own trait so tests can record calls and the
//! local implementation can be swapped for a remote or in-memory one.

use std::path::Path;

use crate::domain::entities::PatternRegistry;
use crate::error::PatternKitResult;

/// Gathers data and renders the whole pattern set to the public tree
pub trait PatternRenderer {
    /// Re-read global data and rediscover every pattern
    fn gather_data(&mut self) -> PatternKitResult<()>;

    /// Render every pattern and move it into the public tree.
    /// Returns the number of patterns written.
    fn render_and_move(&mut self) -> PatternKitResult<usize>;

    /// The registry built by the last `gather_data`
    fn registry(&self) -> &PatternRegistry;
}

/// Owns HTML (or data) assembly for index and navigation pages
pub trait PageGenerator {
    fn generate_main_pages(&mut self) -> PatternKitResult<()>;
    fn generate_view_all_pages(&mut self) -> PatternKitResult<()>;
}

/// Records the last time the public tree changed
pub trait ChangeClock {
    fn update_change_time(&mut self) -> PatternKitResult<()>;
}

/// Copies a single source file into the public tree (overwrite, no merge)
pub trait FileMover {
    fn move_file(&mut self, source: &Path, dest: &Path) -> PatternKitResult<()>;
}

/// Everything the dispatcher needs, as one bound
pub trait SiteBuilder: PatternRenderer + PageGenerator + ChangeClock + FileMover {}

impl<T> SiteBuilder for T where T: PatternRenderer + PageGenerator + ChangeClock + FileMover {}
