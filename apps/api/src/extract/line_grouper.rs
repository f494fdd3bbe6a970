//! Line Grouper — turns a page's positioned glyph runs into ordered text lines.
//!
//! Tokens are bucketed by baseline: a token joins the first open line whose
//! representative baseline (the baseline of the token that opened it) lies within
//! `BASELINE_TOLERANCE`. Lines come out top-to-bottom, tokens left-to-right.
//! Pure and deterministic: the same token set always yields the same lines.

use std::cmp::Ordering;

use tracing::debug;

use crate::extract::tokens::{PositionedToken, TextLine};

/// Max baseline difference for two tokens to share a line.
pub const BASELINE_TOLERANCE: f64 = 2.0;
/// Horizontal gap above which a space is inserted between consecutive tokens.
pub const WORD_GAP_THRESHOLD: f64 = 4.0;

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Groups all tokens of one page into lines.
///
/// Tokens with non-finite geometry are dropped silently.
pub fn group_lines(tokens: &[PositionedToken]) -> Vec<TextLine> {
    let mut sorted: Vec<&PositionedToken> = tokens.iter().filter(|t| t.is_finite()).collect();
    let dropped = tokens.len() - sorted.len();
    if dropped > 0 {
        debug!(dropped, "Line grouper: dropped tokens with non-finite geometry");
    }

    sorted.sort_by(|a, b| compare_reading_order(a, b));

    // (representative baseline, members)
    let mut open: Vec<(f64, Vec<&PositionedToken>)> = Vec::new();
    for token in sorted {
        match open
            .iter_mut()
            .find(|(baseline, _)| (baseline - token.y).abs() <= BASELINE_TOLERANCE)
        {
            Some((_, members)) => members.push(token),
            None => open.push((token.y, vec![token])),
        }
    }

    // Seeds were visited in descending y, but keep the ordering explicit.
    open.sort_by(|a, b| b.0.total_cmp(&a.0));

    open.into_iter()
        .map(|(_, mut members)| {
            members.sort_by(|a, b| a.x.total_cmp(&b.x));
            build_line(&members)
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Descending y, then ascending x.
fn compare_reading_order(a: &PositionedToken, b: &PositionedToken) -> Ordering {
    b.y.total_cmp(&a.y).then_with(|| a.x.total_cmp(&b.x))
}

fn build_line(members: &[&PositionedToken]) -> TextLine {
    let mut text = String::new();
    let mut prev: Option<&PositionedToken> = None;

    for token in members {
        if let Some(p) = prev {
            let gap = token.x - p.right();
            let already_spaced = text.ends_with(char::is_whitespace)
                || token.text.starts_with(char::is_whitespace);
            if gap > WORD_GAP_THRESHOLD && !already_spaced {
                text.push(' ');
            }
        }
        text.push_str(&token.text);
        prev = Some(token);
    }

    let x0 = members.iter().map(|t| t.x).fold(f64::INFINITY, f64::min);
    let x1 = members.iter().map(|t| t.right()).fold(f64::NEG_INFINITY, f64::max);
    let y0 = members.iter().map(|t| t.y).fold(f64::INFINITY, f64::min);
    let y1 = members.iter().map(|t| t.top()).fold(f64::NEG_INFINITY, f64::max);

    TextLine {
        text,
        x0,
        y0,
        x1,
        y1,
        tokens: members.iter().map(|t| (*t).clone()).collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
