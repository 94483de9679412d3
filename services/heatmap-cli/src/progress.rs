//! Terminal progress bar for grid evaluation.

use grid_processor::ProgressObserver;
use indicatif::{ProgressBar, ProgressStyle};

/// Shows evaluation progress as a percentage bar on stderr.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}% {msg}")
        {
            bar.set_style(style.progress_chars("##-"));
        }
        bar.set_message("Estimating prices");
        Self { bar }
    }

    /// Progress bar that draws nothing, for `--no-progress` and tests.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Complete!");
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for BarProgress {
    fn on_progress(&self, percent: u8) {
        self.bar.set_position(u64::from(percent));
    }
}
