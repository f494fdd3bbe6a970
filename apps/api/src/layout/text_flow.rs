//! Text Flow Engine — greedy word-wrap and shrink-to-fit with truncation.
//!
//! # Invariants
//! - `wrap`: every returned line fits `max_width`, except a single word that is
//!   wider than `max_width` on its own (words are never split).
//! - `fit_to_line_budget`: never returns more than `target_line_count` lines.
//!
//! Candidate lines are always measured as whole strings, so a line accepted here
//! measures identically when a caller re-measures it.

use tracing::debug;

use crate::layout::font_metrics::FontMetricTable;

pub const ELLIPSIS: &str = "…";
pub const DEFAULT_MIN_FONT_SIZE: f64 = 7.0;
pub const DEFAULT_FONT_STEP: f64 = 0.5;

// ────────────────────────────────────────────────────────────────────────────
// Wrapping
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word-wrap at a single width.
///
/// Whitespace runs collapse to one space. Empty or whitespace-only text yields no lines.
pub fn wrap(metrics: &FontMetricTable, text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    wrap_hanging(metrics, text, max_width, max_width, font_size)
}

/// Greedy word-wrap where the first line may be wider or narrower than the rest
/// (hanging indents, inline labels).
pub fn wrap_hanging(
    metrics: &FontMetricTable,
    text: &str,
    first_width: f64,
    rest_width: f64,
    font_size: f64,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let limit = if lines.is_empty() { first_width } else { rest_width };
        let candidate = format!("{current} {word}");
        if metrics.measure(&candidate, font_size) <= limit {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Shrink-to-fit
// ────────────────────────────────────────────────────────────────────────────

/// Font-size search bounds for `fit_to_line_budget`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub start_font_size: f64,
    pub min_font_size: f64,
    pub step: f64,
}

impl FitOptions {
    pub fn starting_at(start_font_size: f64) -> Self {
        Self {
            start_font_size,
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            step: DEFAULT_FONT_STEP,
        }
    }
}

/// Result of a shrink-to-fit pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub font_size: f64,
    pub lines: Vec<String>,
    /// True if content was dropped and the last line ends in an ellipsis.
    pub truncated: bool,
}

/// Wraps `text` at decreasing font sizes until it fits `target_line_count` lines.
///
/// The size drops by `step` while over budget and above `min_font_size`. If the text
/// is still over budget at the floor, it is cut to `target_line_count` lines and the
/// last line is shortened until `line + "…"` fits `max_width`.
pub fn fit_to_line_budget(
    metrics: &FontMetricTable,
    text: &str,
    max_width: f64,
    target_line_count: usize,
    options: FitOptions,
) -> FittedText {
    let step = if options.step > 0.0 { options.step } else { DEFAULT_FONT_STEP };
    let min_size = options.min_font_size.min(options.start_font_size);

    let mut font_size = options.start_font_size;
    let mut lines = wrap(metrics, text, max_width, font_size);
    let mut shrink_steps = 0u32;

    while lines.len() > target_line_count && font_size > min_size {
        font_size = (font_size - step).max(min_size);
        lines = wrap(metrics, text, max_width, font_size);
        shrink_steps += 1;
    }

    if shrink_steps > 0 {
        debug!(
            shrink_steps,
            font_size,
            lines = lines.len(),
            target = target_line_count,
            "Text flow: shrunk to fit line budget"
        );
    }

    if lines.len() <= target_line_count {
        return FittedText {
            font_size,
            lines,
            truncated: false,
        };
    }

    lines.truncate(target_line_count);
    if let Some(last) = lines.last_mut() {
        *last = ellipsize(metrics, last, max_width, font_size);
    }

    FittedText {
        font_size,
        lines,
        truncated: true,
    }
}

/// Strips trailing characters until `line + "…"` fits, then appends the ellipsis.
/// A line that empties entirely becomes exactly `"…"`.
pub fn ellipsize(metrics: &FontMetricTable, line: &str, max_width: f64, font_size: f64) -> String {
    let mut kept = line.to_string();
    while !kept.is_empty() && metrics.measure(&format!("{kept}{ELLIPSIS}"), font_size) > max_width {
        kept.pop();
    }
    let kept = kept.trim_end();
    if kept.is_empty() {
        ELLIPSIS.to_string()
    } else {
        format!("{kept}{ELLIPSIS}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
