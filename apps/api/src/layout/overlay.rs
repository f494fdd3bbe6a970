//! Overlay Editor — replaces detected bullet blocks in an existing PDF.
//!
//! Each edited block is erased with an opaque rectangle and the replacement text is
//! re-flowed into the same box. A block never grows: the replacement is fitted to
//! the block's original line count, and drawing stops at the block's bottom edge.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::errors::LayoutError;
use crate::extract::bullet_blocks::BULLET_GLYPHS;
use crate::extract::tokens::BulletBlock;
use crate::layout::canvas::{Color, PageCanvas, PdfCanvas, Rect};
use crate::layout::font_metrics::{get_metrics, Font, FontFamily};
use crate::layout::text_flow::{fit_to_line_budget, FitOptions};

/// Marker prepended to replacement text that does not bring its own.
pub const DEFAULT_BULLET_PREFIX: &str = "• ";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub font: Font,
    /// Starting size for shrink-to-fit; should match the document's body size.
    pub start_font_size: f64,
    /// Grows the erase rectangle on every side.
    pub padding: f64,
    /// Erase colour; must match the page background.
    pub fill: Color,
    pub text_color: Color,
    /// Baseline step as a multiple of the fitted font size.
    pub line_step_factor: f64,
}

impl OverlayStyle {
    pub fn new(family: FontFamily, start_font_size: f64) -> Self {
        Self {
            font: Font::regular(family),
            start_font_size,
            ..Self::default()
        }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            font: Font::regular(FontFamily::Helvetica),
            start_font_size: 10.0,
            padding: 1.5,
            fill: Color::WHITE,
            text_color: Color::BLACK,
            line_step_factor: 1.15,
        }
    }
}

/// Edited document bytes and the number of blocks rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayOutcome {
    pub bytes: Vec<u8>,
    pub edited_blocks: usize,
}

/// Applies `edits` (block id → replacement text) to `pdf_bytes`.
///
/// Returns the input unchanged when nothing is edited: an empty map, only blank
/// replacements, or ids that match no block.
pub fn apply_overlay_edits(
    pdf_bytes: &[u8],
    blocks: &[BulletBlock],
    edits: &HashMap<String, String>,
    style: &OverlayStyle,
) -> Result<OverlayOutcome, LayoutError> {
    let unchanged = || OverlayOutcome {
        bytes: pdf_bytes.to_vec(),
        edited_blocks: 0,
    };
    if edits.is_empty() {
        return Ok(unchanged());
    }
    let mut canvas = PdfCanvas::open(pdf_bytes)?;
    let edited_blocks = overlay_blocks(&mut canvas, blocks, edits, style);
    if edited_blocks == 0 {
        return Ok(unchanged());
    }
    Ok(OverlayOutcome {
        bytes: canvas.save()?,
        edited_blocks,
    })
}

/// Draws the edits onto any canvas and returns how many blocks were rewritten.
pub fn overlay_blocks<C: PageCanvas>(
    canvas: &mut C,
    blocks: &[BulletBlock],
    edits: &HashMap<String, String>,
    style: &OverlayStyle,
) -> usize {
    let mut edited = 0;
    for block in blocks {
        let Some(replacement) = edits.get(&block.id) else {
            continue;
        };
        let replacement = replacement.trim();
        if replacement.is_empty() {
            debug!(block = %block.id, "Blank replacement, block left unedited");
            continue;
        }
        let Some(page) = canvas.page(block.page_index) else {
            warn!(
                block = %block.id,
                page = block.page_index,
                "Block refers to a page the document does not have"
            );
            continue;
        };

        let p = style.padding;
        canvas.draw_rectangle(
            page,
            Rect::from_corners(block.x0 - p, block.y0 - p, block.x1 + p, block.y1 + p),
            style.fill,
        );

        let text = if has_list_marker(replacement) {
            replacement.to_string()
        } else {
            format!("{DEFAULT_BULLET_PREFIX}{replacement}")
        };
        let budget = block.lines.len().max(1);
        let fitted = fit_to_line_budget(
            get_metrics(&style.font),
            &text,
            block.width(),
            budget,
            FitOptions::starting_at(style.start_font_size),
        );

        let step = fitted.font_size * style.line_step_factor;
        // The first line always lands inside the box, even when the original glyphs
        // were shorter than the fitted size.
        let mut baseline = (block.y1 - fitted.font_size).max(block.y0);
        let mut drawn = 0usize;
        for line in &fitted.lines {
            if baseline < block.y0 {
                break;
            }
            canvas.draw_text(
                page,
                line,
                block.x0,
                baseline,
                fitted.font_size,
                style.font,
                style.text_color,
            );
            drawn += 1;
            baseline -= step;
        }

        debug!(
            block = %block.id,
            budget,
            fitted_lines = fitted.lines.len(),
            drawn,
            font_size = fitted.font_size,
            truncated = fitted.truncated,
            "Overlay: block rewritten"
        );
        edited += 1;
    }

    let unknown = edits
        .keys()
        .filter(|id| !blocks.iter().any(|b| &b.id == *id))
        .count();
    if unknown > 0 {
        warn!(unknown, "Edits reference unknown block ids; ignored");
    }
    edited
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

/// True if replacement text already opens with its own list marker.
///
/// Stricter than line detection: `-`, `*`, dashes and `<digits>.` only count when
/// followed by whitespace, so "3.5x faster" or "-40% latency" still get a bullet.
fn has_list_marker(text: &str) -> bool {
    let trimmed = text.trim_start();
    let Some(first) = trimmed.chars().next() else {
        return false;
    };
    let rest = if BULLET_GLYPHS.contains(&first) {
        if matches!(first, '•' | '‣' | '◦' | '●' | '·') {
            return true;
        }
        &trimmed[first.len_utf8()..]
    } else {
        let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
        match trimmed[digits..].strip_prefix('.') {
            Some(rest) if digits > 0 => rest,
            _ => return false,
        }
    };
    rest.starts_with(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tokens::TextLine;
    use crate::layout::canvas::tests::single_page_pdf;
    use crate::layout::canvas::DrawOp;

    fn line(text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> TextLine {
        TextLine {
            text: text.to_string(),
            x0,
            y0,
            x1,
            y1,
            tokens: Vec::new(),
        }
    }

    /// Two-line block: baselines 700 and 688, 10pt glyphs, 72..300 wide.
    fn two_line_block() -> BulletBlock {
        BulletBlock {
            id: "p0-b0".to_string(),
            page_index: 0,
            x0: 72.0,
            y0: 688.0,
            x1: 300.0,
            y1: 710.0,
            lines: vec![
                line("• Led migration to Rust", 72.0, 700.0, 300.0, 710.0),
                line("across three services", 82.0, 688.0, 250.0, 698.0),
            ],
            raw_text: "• Led migration to Rust across three services".to_string(),
        }
    }

    fn edits(id: &str, text: &str) -> HashMap<String, String> {
        HashMap::from([(id.to_string(), text.to_string())])
    }

    fn texts(ops: &[DrawOp]) -> Vec<(String, f64, f64)> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, y, size, .. } => Some((text.clone(), *y, *size)),
                DrawOp::Rectangle { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_edit_map_returns_input_unchanged() {
        let pdf = single_page_pdf("Original");
        let out = apply_overlay_edits(&pdf, &[two_line_block()], &HashMap::new(), &OverlayStyle::default())
            .unwrap();
        assert_eq!(out.bytes, pdf);
        assert_eq!(out.edited_blocks, 0);
    }

    #[test]
    fn test_blank_replacement_leaves_block_unedited() {
        let pdf = single_page_pdf("Original");
        let out = apply_overlay_edits(
            &pdf,
            &[two_line_block()],
            &edits("p0-b0", "   \n"),
            &OverlayStyle::default(),
        )
        .unwrap();
        assert_eq!(out.bytes, pdf, "blank replacement is not an edit");
    }

    #[test]
    fn test_erase_rectangle_is_padded() {
        let mut canvas = PdfCanvas::open(&single_page_pdf("Original")).unwrap();
        let count = overlay_blocks(&mut canvas, &[two_line_block()], &edits("p0-b0", "Shipped it"), &OverlayStyle::default());
        assert_eq!(count, 1);
        let page = canvas.page(0).unwrap();
        let rect = canvas
            .ops(page)
            .iter()
            .find_map(|op| match op {
                DrawOp::Rectangle { rect, fill } => Some((*rect, *fill)),
                DrawOp::Text { .. } => None,
            })
            .unwrap();
        assert_eq!(rect.0, Rect::from_corners(70.5, 686.5, 301.5, 711.5));
        assert_eq!(rect.1, Color::WHITE);
    }

    #[test]
    fn test_default_bullet_prefix_added_once() {
        let mut canvas = PdfCanvas::open(&single_page_pdf("Original")).unwrap();
        overlay_blocks(&mut canvas, &[two_line_block()], &edits("p0-b0", "Shipped it"), &OverlayStyle::default());
        let page = canvas.page(0).unwrap();
        assert_eq!(texts(canvas.ops(page))[0].0, "• Shipped it");

        let mut canvas = PdfCanvas::open(&single_page_pdf("Original")).unwrap();
        overlay_blocks(&mut canvas, &[two_line_block()], &edits("p0-b0", "- Shipped it"), &OverlayStyle::default());
        let page = canvas.page(0).unwrap();
        assert_eq!(texts(canvas.ops(page))[0].0, "- Shipped it");
    }

    #[test]
    fn test_numbers_and_negative_figures_still_get_a_bullet() {
        for (input, expected) in [
            ("3.5x faster builds", "• 3.5x faster builds"),
            ("-40% p99 latency", "• -40% p99 latency"),
            ("2. Cut costs", "2. Cut costs"),
            ("* Cut costs", "* Cut costs"),
            ("•Cut costs", "•Cut costs"),
        ] {
            let mut canvas = PdfCanvas::open(&single_page_pdf("Original")).unwrap();
            overlay_blocks(&mut canvas, &[two_line_block()], &edits("p0-b0", input), &OverlayStyle::default());
            let page = canvas.page(0).unwrap();
            assert_eq!(texts(canvas.ops(page))[0].0, expected, "input {input:?}");
        }
    }

    #[test]
    fn test_has_list_marker_requires_space_after_ascii_markers() {
        assert!(has_list_marker("- Shipped"));
        assert!(has_list_marker("12. Shipped"));
        assert!(has_list_marker("– Shipped"));
        assert!(has_list_marker("◦Shipped"));
        assert!(!has_list_marker("-40% latency"));
        assert!(!has_list_marker("3.5x faster"));
        assert!(!has_list_marker("12.Shipped"));
        assert!(!has_list_marker("Shipped"));
        assert!(!has_list_marker(""));
    }

    #[test]
    fn test_replacement_never_exceeds_original_line_count() {
        let long = "Rebuilt the ingestion pipeline around a bounded work queue so that \
                    bursty upstream traffic no longer starved the scoring workers, and \
                    documented the new failure modes for on-call"
            .repeat(3);
        let mut canvas = PdfCanvas::open(&single_page_pdf("Original")).unwrap();
        overlay_blocks(&mut canvas, &[two_line_block()], &edits("p0-b0", &long), &OverlayStyle::default());
        let page = canvas.page(0).unwrap();
        let drawn = texts(canvas.ops(page));
        assert!(drawn.len() <= 2, "drew {} lines into a 2-line block", drawn.len());
        assert!(drawn.last().unwrap().0.ends_with('…'));
        for (_, y, _) in &drawn {
            assert!(*y >= 688.0, "baseline {y} below block bottom");
        }
    }

    #[test]
    fn test_lines_step_down_from_block_top() {
        let mut canvas = PdfCanvas::open(&single_page_pdf("Original")).unwrap();
        let text = "word ".repeat(30);
        overlay_blocks(&mut canvas, &[two_line_block()], &edits("p0-b0", &text), &OverlayStyle::default());
        let page = canvas.page(0).unwrap();
        let drawn = texts(canvas.ops(page));
        let (_, first_y, size) = drawn[0];
        assert!((first_y - (710.0 - size)).abs() < 1e-9);
        if let Some((_, second_y, _)) = drawn.get(1) {
            assert!((first_y - second_y - size * 1.15).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unknown_ids_and_missing_pages_are_skipped() {
        let mut block = two_line_block();
        block.page_index = 3;
        let mut canvas = PdfCanvas::open(&single_page_pdf("Original")).unwrap();
        let mut map = edits("p0-b0", "Moved");
        map.insert("p9-b9".into(), "Nothing here".into());
        assert_eq!(overlay_blocks(&mut canvas, &[block], &map, &OverlayStyle::default()), 0);
    }

    #[test]
    fn test_edited_document_contains_replacement_text() {
        let pdf = single_page_pdf("Original");
        let out = apply_overlay_edits(
            &pdf,
            &[two_line_block()],
            &edits("p0-b0", "Cut p99 latency"),
            &OverlayStyle::default(),
        )
        .unwrap();
        assert_eq!(out.edited_blocks, 1);
        let doc = lopdf::Document::load_mem(&out.bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("Cut p99 latency"));
    }
}
