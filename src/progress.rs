//! Progress display for dependency scans
//!
//! A spinner while project files are detected, then a bar over the package
//! lookups. Drawn on stderr so stdout stays clean for the report.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const BAR_TEMPLATE: &str = "{spinner:.cyan} {prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}";
const TICK: Duration = Duration::from_millis(100);

/// Progress reporter for one scan
pub struct ScanProgress {
    /// Disabled in quiet and JSON modes
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl ScanProgress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Spinner shown while walking the scan root
    pub fn detecting(&mut self, root: &Path) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template(SPINNER_TEMPLATE)
        {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Scanning {}", root.display()));
        spinner.enable_steady_tick(TICK);
        self.replace(spinner);
    }

    /// Bar over `total` package lookups
    pub fn checking(&mut self, total: usize) {
        if !self.enabled || total == 0 {
            return;
        }

        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("█▓▒░"));
        }
        bar.set_prefix("Checking packages");
        bar.enable_steady_tick(TICK);
        self.replace(bar);
    }

    /// Show the package currently being looked up
    pub fn package(&self, package_id: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(package_id.to_string());
        }
    }

    /// Count one finished lookup
    pub fn advance(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn replace(&mut self, bar: ProgressBar) {
        self.clear();
        self.bar = Some(bar);
    }
}
