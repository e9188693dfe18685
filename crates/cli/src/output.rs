//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use citra_image::{HistogramAnalysis, HistogramBucket, HistogramStatus};
use owo_colors::OwoColorize;

/// Widest bar drawn, whatever the terminal size
pub const MAX_BAR_WIDTH: usize = 60;

/// One-line status messages: results to stdout, problems to stderr
pub struct Status;

impl Status {
    /// A finished step
    pub fn success(message: &str) {
        println!("{} {message}", "✓".green());
    }

    /// Something the user should know but that does not stop the command
    pub fn warning(message: &str) {
        eprintln!("{} {message}", "⚠".yellow());
    }

    /// Bold title underlined to its display width
    pub fn header(message: &str) {
        let rule = "─".repeat(console::measure_text_width(message));
        println!("{}\n{}", message.bold(), rule.dimmed());
    }
}

/// Columns available for a bar, from the attached terminal if there is one
pub fn bar_width() -> usize {
    let term = console::Term::stdout();
    match term.size_checked() {
        // "255 │" on the left, " 123456" on the right
        Some((_, cols)) => (cols as usize).saturating_sub(16).clamp(10, MAX_BAR_WIDTH),
        None => MAX_BAR_WIDTH / 2,
    }
}

/// One line per bucket: level, a bar scaled against the tallest bucket, count
pub fn histogram_lines(buckets: &[HistogramBucket], width: usize) -> Vec<String> {
    let tallest = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    buckets
        .iter()
        .map(|bucket| {
            let len = if tallest == 0 {
                0
            } else {
                (bucket.count as u128 * width as u128 / tallest as u128) as usize
            };
            format!("{:>3} │{:<width$} {}", bucket.value, "█".repeat(len), bucket.count)
        })
        .collect()
}

/// Print the bar chart sized to the terminal
pub fn print_histogram(buckets: &[HistogramBucket]) {
    for line in histogram_lines(buckets, bar_width()) {
        println!("{line}");
    }
}

/// Print a classifier result, coloured by how much attention it needs
pub fn print_analysis(analysis: &HistogramAnalysis) {
    let title = match analysis.status {
        HistogramStatus::Balanced => analysis.title.green().bold().to_string(),
        HistogramStatus::LowContrast | HistogramStatus::HighContrast => {
            analysis.title.yellow().bold().to_string()
        }
        HistogramStatus::Dark | HistogramStatus::Bright => analysis.title.red().bold().to_string(),
    };
    println!();
    println!("{} {}", title, format!("[{}]", analysis.status).dimmed());
    println!("{}", analysis.description);
    println!("{} {}", "→".cyan(), analysis.recommendation);
}

/// Format a file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format `width x height` with a pixel total
pub fn format_dimensions(width: u32, height: u32) -> String {
    format!("{width}x{height} ({} px)", u64::from(width) * u64::from(height))
}
