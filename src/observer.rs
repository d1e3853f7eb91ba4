//! Progress reporting for part downloads.
//!
//! Fetchers talk to a [`ProgressObserver`] so the library does not care
//! whether progress ends up on a terminal or nowhere at all.
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;

use crate::part::{PART_SIZE, Part};

pub trait ProgressObserver: Send + Sync {
    /// Called with the size of every body chunk written.
    fn inc(&self, delta: u64);
    fn message(&self, msg: String);
    fn finish(&self, msg: String);
}

/// Drives one indicatif bar.
pub struct ConsoleObserver {
    pub pb: ProgressBar,
}

impl ProgressObserver for ConsoleObserver {
    fn inc(&self, delta: u64) {
        self.pb.inc(delta);
    }

    fn message(&self, msg: String) {
        self.pb.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.pb.finish_with_message(msg);
    }
}

/// Hands out one observer per part, all drawn on a shared [`MultiProgress`].
#[derive(Clone)]
pub struct Reporter {
    multi_progress: MultiProgress,
    style: ProgressStyle,
}

impl Reporter {
    /// Bars on stderr. indicatif hides them by itself when stderr is not a terminal.
    pub fn console() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let style = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");

        Self {
            multi_progress: MultiProgress::with_draw_target(target),
            style,
        }
    }

    pub fn part(&self, part: &Part) -> Arc<dyn ProgressObserver> {
        let pb = self.multi_progress.add(ProgressBar::new(PART_SIZE));
        pb.set_style(self.style.clone());
        pb.set_message(format!("Part {}", part.index));
        Arc::new(ConsoleObserver { pb })
    }

    /// Prints a line above the bars without tearing them.
    pub fn println(&self, line: impl AsRef<str>) {
        let _ = self.multi_progress.println(line);
    }
}
