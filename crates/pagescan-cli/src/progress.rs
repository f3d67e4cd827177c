use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use pagescan_core::scoring::CandidatePage;
use pagescan_core::session::{ProgressReporter, SessionStage};
use tracing::debug;

/// Drives one terminal progress bar per session stage.
pub struct BarReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl BarReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(bar) = guard.as_ref() {
                f(bar);
            }
        }
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: SessionStage, total_items: Option<usize>) {
        let bar = match total_items {
            Some(total) => {
                let bar = ProgressBar::new(total as u64);
                if let Ok(style) = ProgressStyle::default_bar().template("{msg:22} [{bar:40}] {pos}/{len}") {
                    bar.set_style(style.progress_chars("=> "));
                }
                bar
            }
            None => ProgressBar::new_spinner(),
        };
        bar.set_message(stage.to_string());

        if let Ok(mut guard) = self.bar.lock() {
            if let Some(previous) = guard.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn advance(&self, items_done: usize) {
        self.with_bar(|bar| bar.set_position(items_done as u64));
    }

    fn candidate_emitted(&self, candidate: &CandidatePage) {
        debug!(
            timestamp_ms = candidate.timestamp_ms,
            selected = candidate.is_selected(),
            "candidate"
        );
    }

    fn finish_stage(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_with_message("Done");
            }
        }
    }
}
