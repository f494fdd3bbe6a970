//! Bullet Block Detector — merges bullet-started lines with their indented
//! continuation lines into addressable edit blocks.
//!
//! The continuation thresholds (18 units vertical, 8 units indent) were tuned
//! against one résumé font/size and are not derived from font metrics.

use tracing::debug;

use crate::extract::tokens::{BulletBlock, TextLine};

/// Glyphs that mark a line as the start of a bullet.
pub const BULLET_GLYPHS: [char; 9] = ['•', '‣', '◦', '·', '●', '-', '–', '—', '*'];
/// Continuation lines absorbed per block, at most.
pub const MAX_CONTINUATION_LINES: usize = 6;
/// Blocks returned per document, at most.
pub const MAX_BLOCKS_PER_DOCUMENT: usize = 40;
/// Max baseline distance between a continuation line and the previous block line.
pub const MAX_CONTINUATION_GAP: f64 = 18.0;
/// Min extra left indent of a continuation line relative to the bullet line.
pub const MIN_CONTINUATION_INDENT: f64 = 8.0;

// ────────────────────────────────────────────────────────────────────────────
// Marker recognition
// ────────────────────────────────────────────────────────────────────────────

/// True if `text` (ignoring leading whitespace) starts with a bullet glyph or a
/// `<digits>.` ordinal such as `1.` or `12.`.
pub fn starts_with_bullet_marker(text: &str) -> bool {
    let trimmed = text.trim_start();
    let Some(first) = trimmed.chars().next() else {
        return false;
    };
    if BULLET_GLYPHS.contains(&first) {
        return true;
    }
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && trimmed[digits..].starts_with('.')
}

pub fn is_bullet_line(line: &TextLine) -> bool {
    starts_with_bullet_marker(&line.text)
}

// ────────────────────────────────────────────────────────────────────────────
// Detection
// ────────────────────────────────────────────────────────────────────────────

/// Detects bullet blocks across a document.
///
/// `pages[i]` is the grouped line list of page `i`, top-to-bottom. Pages are scanned
/// in order; a line belongs to at most one block (the first bullet line to reach
/// it). Output is capped at `MAX_BLOCKS_PER_DOCUMENT`.
pub fn detect_bullet_blocks(pages: &[Vec<TextLine>]) -> Vec<BulletBlock> {
    let mut blocks = Vec::new();

    'pages: for (page_index, lines) in pages.iter().enumerate() {
        let mut consumed = vec![false; lines.len()];

        for start in 0..lines.len() {
            if blocks.len() >= MAX_BLOCKS_PER_DOCUMENT {
                break 'pages;
            }
            if consumed[start] || !is_bullet_line(&lines[start]) {
                continue;
            }
            consumed[start] = true;

            let seed = &lines[start];
            let mut members: Vec<&TextLine> = vec![seed];
            let mut next = start + 1;

            while members.len() <= MAX_CONTINUATION_LINES && next < lines.len() {
                let candidate = &lines[next];
                let last = members[members.len() - 1];
                if consumed[next] || !is_continuation(seed, last, candidate) {
                    break;
                }
                consumed[next] = true;
                members.push(candidate);
                next += 1;
            }

            let id = format!("p{}-b{}", page_index, blocks.len());
            blocks.push(build_block(id, page_index, &members));
        }
    }

    debug!(blocks = blocks.len(), pages = pages.len(), "Bullet blocks detected");
    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn is_continuation(seed: &TextLine, last: &TextLine, candidate: &TextLine) -> bool {
    !is_bullet_line(candidate)
        && (last.y0 - candidate.y0).abs() <= MAX_CONTINUATION_GAP
        && candidate.x0 >= seed.x0 + MIN_CONTINUATION_INDENT
}

fn build_block(id: String, page_index: usize, members: &[&TextLine]) -> BulletBlock {
    let x0 = members.iter().map(|l| l.x0).fold(f64::INFINITY, f64::min);
    let y0 = members.iter().map(|l| l.y0).fold(f64::INFINITY, f64::min);
    let x1 = members.iter().map(|l| l.x1).fold(f64::NEG_INFINITY, f64::max);
    let y1 = members.iter().map(|l| l.y1).fold(f64::NEG_INFINITY, f64::max);

    let raw_text = members
        .iter()
        .map(|l| l.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    BulletBlock {
        id,
        page_index,
        x0,
        y0,
        x1,
        y1,
        lines: members.iter().map(|l| (*l).clone()).collect(),
        raw_text,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
