// src/progress.rs
use tracing::info;

/// Progress hooks for multi-chapter fetches. Frontends implement this to show status.
pub trait Progress {
    /// Called once with the number of fetch units.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line.
    fn log(&mut self, _msg: &str) {}

    /// One chapter finished successfully.
    fn item_done(&mut self, _chapter: u32) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Reports through `tracing` at info level.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }

    fn item_done(&mut self, chapter: u32) {
        self.done += 1;
        info!(chapter, "{}/{} chapters", self.done, self.total);
    }
}
