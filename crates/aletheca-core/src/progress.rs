//! Progress reporting for TTY and non-TTY environments.
//!
//! TTY mode: indicatif bars per input file plus an overall item counter.
//! Non-TTY mode: hidden bars; progress goes through the log instead.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

const PREFIX_WIDTH: usize = 24;

/// Byte progress through one input file
fn file_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix:<24.dim} {bar:30.green/dim} {binary_bytes:>7}/{binary_total_bytes:7} {wide_msg:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("--")
}

/// Running item counter (total unknown up front)
fn counter_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {prefix:<10.cyan.bold} {human_pos} items {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Shorten `name` from the left so the tail (file name) stays visible.
fn fit_prefix(name: &str) -> String {
    let count = name.chars().count();
    if count <= PREFIX_WIDTH {
        return name.to_string();
    }
    let tail: String = name.chars().skip(count - (PREFIX_WIDTH - 1)).collect();
    format!("…{tail}")
}

/// Central progress context managing multi-progress bars.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl ProgressContext {
    /// Create new context, detecting TTY automatically.
    pub fn new() -> Self {
        Self::with_tty(std::io::stderr().is_terminal())
    }

    pub fn with_tty(is_tty: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            is_tty,
        }
    }

    /// Byte bar for one input file; hidden off-TTY or when the size is unknown.
    pub fn file_bar(&self, name: &str, total_bytes: Option<u64>) -> ProgressBar {
        let Some(total) = total_bytes.filter(|_| self.is_tty) else {
            return ProgressBar::hidden();
        };
        let pb = self.multi.add(ProgressBar::new(total));
        pb.set_style(file_style());
        pb.set_prefix(fit_prefix(name));
        pb
    }

    /// Spinner counting decoded items.
    ///
    /// Advance with `pb.inc(n)`; call `pb.finish_and_clear()` when done.
    pub fn item_counter(&self, name: &str) -> ProgressBar {
        if !self.is_tty {
            return ProgressBar::hidden();
        }
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(counter_style());
        pb.set_prefix(name.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    /// Print a line above managed progress bars (avoids interference).
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.is_tty {
            let _ = self.multi.println(msg);
        } else {
            eprintln!("{}", msg.as_ref());
        }
    }

    /// Whether running in TTY mode.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Get reference to `MultiProgress` for log bridge.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper for `ProgressContext`.
pub type SharedProgress = Arc<ProgressContext>;

/// Format number with thousand separators.
pub fn fmt_num(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_num_small() {
        assert_eq!(fmt_num(0), "0");
        assert_eq!(fmt_num(123), "123");
    }

    #[test]
    fn fmt_num_thousands() {
        assert_eq!(fmt_num(1_000), "1,000");
        assert_eq!(fmt_num(123_456), "123,456");
        assert_eq!(fmt_num(1_234_567_890), "1,234,567,890");
    }

    #[test]
    fn prefix_keeps_tail() {
        assert_eq!(fit_prefix("works.jsonl"), "works.jsonl");
        let long = "data/openalex/works/updated_date=2024-01-01/part_000.gz";
        let fitted = fit_prefix(long);
        assert_eq!(fitted.chars().count(), PREFIX_WIDTH);
        assert!(fitted.ends_with("part_000.gz"));
    }

    #[test]
    fn bars_hidden_off_tty() {
        let ctx = ProgressContext::with_tty(false);
        assert!(ctx.file_bar("x.json", Some(10)).is_hidden());
        assert!(ctx.item_counter("check").is_hidden());
    }
}
