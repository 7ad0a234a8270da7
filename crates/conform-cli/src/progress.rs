use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use conform_core::enums::DomainScanState;
use conform_engine::ScanProgress;
use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

fn bar_template() -> &'static str {
    match ui::prefs().term_width {
        Some(cols) if cols >= 110 => "{bar:40.cyan/blue} {pos}/{len} {msg}",
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

/// Progress bar over the domains of one scan. Inert when progress output is
/// disabled.
pub struct ScanBar {
    enabled: bool,
    table: String,
    bar: OnceLock<ProgressBar>,
    failed: AtomicUsize,
}

impl ScanBar {
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            enabled: ui::prefs().progress,
            table: table.to_string(),
            bar: OnceLock::new(),
            failed: AtomicUsize::new(0),
        }
    }

    pub fn finish_ok(&self) {
        if let Some(bar) = self.bar.get() {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = self.bar.get() {
            bar.abandon_with_message(message.to_string());
        }
    }
}

impl ScanProgress for ScanBar {
    fn domains_listed(&self, total: usize) {
        if !self.enabled {
            return;
        }
        let bar = self
            .bar
            .get_or_init(|| ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX)));
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(format!("scanning {}", self.table));
    }

    fn domain_state(&self, domain: &str, state: DomainScanState) {
        let Some(bar) = self.bar.get() else {
            return;
        };
        if !state.is_settled() {
            if self.failed.load(Ordering::Relaxed) == 0 {
                bar.set_message(format!("scanning {} ({domain})", self.table));
            }
            return;
        }
        if state == DomainScanState::Error {
            let failed = self.failed.fetch_add(1, Ordering::Relaxed) + 1;
            bar.set_message(format!(
                "scanning {} ({failed} failed, last: {domain})",
                self.table
            ));
        }
        bar.inc(1);
    }
}
