//! Text output formatting with colors.

use hubscope_core::{ContextReport, ModelRecord, ScrapeResult};
use hubscope_fetch::ListingOutcome;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// How many characters of scraped text to show in previews.
const PREVIEW_CHARS: usize = 240;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a listing outcome as a numbered identifier list.
    pub fn format_identifiers(&self, outcome: &ListingOutcome) -> String {
        let mut lines = Vec::new();

        let source = outcome
            .source
            .map_or("unknown", |kind| kind.display_name());
        lines.push(format!(
            "{} ({}, {} models)",
            self.bold("Model Listing"),
            source,
            outcome.identifiers.len()
        ));

        for (i, id) in outcome.identifiers.iter().enumerate() {
            lines.push(format!("{:>3}. {}", i + 1, self.cyan(id.as_str())));
        }

        lines.join("\n")
    }

    /// Formats an aggregated context report.
    pub fn format_report(&self, report: &ContextReport) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} {}",
            self.bold("Model Context:"),
            self.cyan(&report.topic)
        ));
        lines.push("─".repeat(50));

        lines.push(format!("Models:     {}", report.total_models));
        lines.push(format!(
            "Likes:      {} total, {:.1} avg",
            self.format_number(report.total_likes as f64),
            report.average_likes
        ));
        lines.push(format!(
            "Downloads:  {} total, {:.1} avg",
            self.format_number(report.total_downloads as f64),
            report.average_downloads
        ));

        if !report.pipeline_tags.is_empty() {
            lines.push(format!("Tasks:      {}", report.pipeline_tags.join(", ")));
        }

        if !report.top_models.is_empty() {
            lines.push(String::new());
            lines.push(self.dim("Top models by likes:"));
            for record in &report.top_models {
                lines.push(self.format_record_line(record));
            }
        }

        lines.join("\n")
    }

    /// Formats enriched records as an aligned list.
    pub fn format_models(&self, records: &[ModelRecord]) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} ({} models)",
            self.bold("Enriched Models"),
            records.len()
        ));
        for record in records {
            lines.push(self.format_record_line(record));
        }

        lines.join("\n")
    }

    /// Formats one record as a list line.
    fn format_record_line(&self, record: &ModelRecord) -> String {
        format!(
            "  {:<44} {:>8} likes {:>10} downloads",
            record.model_id.as_str(),
            self.format_number(record.likes as f64),
            self.format_number(record.downloads as f64)
        )
    }

    /// Formats a scrape result.
    pub fn format_scrape(&self, result: &ScrapeResult) -> String {
        let mut lines = Vec::new();

        let title = result.title.as_deref().unwrap_or("(no title)");
        lines.push(self.bold(title));
        lines.push(self.dim(&result.url));

        if result.is_success() {
            lines.push(format!("Status: {}", self.green("success")));
            lines.push(format!("Text:   {} characters", result.text.chars().count()));
            if !result.text.is_empty() {
                lines.push(String::new());
                lines.push(preview(&result.text));
            }
        } else {
            let error = result.error.as_deref().unwrap_or("unknown error");
            lines.push(format!("Status: {}", self.red("error")));
            lines.push(format!("Error:  {error}"));
        }

        lines.join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn format_number(&self, n: f64) -> String {
        if n >= 1_000_000.0 {
            format!("{:.1}M", n / 1_000_000.0)
        } else if n >= 1_000.0 {
            format!("{:.1}K", n / 1_000.0)
        } else {
            format!("{:.0}", n)
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", BOLD, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", DIM, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", GREEN, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", RED, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn cyan(&self, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", CYAN, text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// Truncates scraped text for terminal display.
fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{prefix}…")
    }
}

// ============================================================================
// Tests
// ============================================================================
