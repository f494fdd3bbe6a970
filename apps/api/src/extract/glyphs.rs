//! Glyph extraction — positioned text runs from existing PDF bytes.
//!
//! `pdf-extract` walks every content stream and reports one character at a time
//! through its `OutputDev` callbacks, with the text rendering matrix already in
//! user space. `RunCollector` stitches those characters back into runs and closes a
//! run at whitespace, at word/line boundaries, or when the next glyph does not
//! continue on the same baseline.

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};
use tracing::debug;

use crate::errors::LayoutError;
use crate::extract::tokens::PositionedToken;

/// Source of positioned glyph runs for a PDF page.
pub trait GlyphSource {
    /// Returns the tokens of every page, indexed by page (0-based).
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Vec<PositionedToken>>, LayoutError>;

    /// Returns the tokens of a single page.
    fn extract_page(
        &self,
        pdf_bytes: &[u8],
        page_index: usize,
    ) -> Result<Vec<PositionedToken>, LayoutError> {
        let mut pages = self.extract_pages(pdf_bytes)?;
        let count = pages.len();
        if page_index >= count {
            return Err(LayoutError::PageOutOfRange {
                index: page_index,
                count,
            });
        }
        Ok(pages.swap_remove(page_index))
    }
}

/// `GlyphSource` backed by the `pdf-extract` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfGlyphSource;

impl GlyphSource for PdfGlyphSource {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Vec<PositionedToken>>, LayoutError> {
        let doc = pdf_extract::Document::load_mem(pdf_bytes)
            .map_err(|e| LayoutError::Pdf(e.to_string()))?;
        if doc.is_encrypted() {
            return Err(LayoutError::EncryptedDocument);
        }

        let page_count = doc.get_pages().len();
        let mut collector = RunCollector::new(page_count);
        pdf_extract::output_doc(&doc, &mut collector)
            .map_err(|e| LayoutError::Extraction(format!("{e:?}")))?;

        let pages = collector.finish();
        debug!(
            pages = pages.len(),
            tokens = pages.iter().map(Vec::len).sum::<usize>(),
            "Glyph runs extracted"
        );
        Ok(pages)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OutputDev sink
// ────────────────────────────────────────────────────────────────────────────

/// Baseline drift tolerated inside one run.
const RUN_BASELINE_SLACK: f64 = 0.5;
/// Horizontal gap (in units of the glyph height) that splits a run.
const RUN_GAP_FACTOR: f64 = 0.15;

#[derive(Debug)]
struct OpenRun {
    text: String,
    x: f64,
    y: f64,
    right: f64,
    height: f64,
}

struct RunCollector {
    pages: Vec<Vec<PositionedToken>>,
    current_page: usize,
    run: Option<OpenRun>,
}

impl RunCollector {
    fn new(page_count: usize) -> Self {
        Self {
            pages: vec![Vec::new(); page_count],
            current_page: 0,
            run: None,
        }
    }

    fn flush(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        if run.text.trim().is_empty() {
            return;
        }
        if self.pages.len() <= self.current_page {
            self.pages.resize_with(self.current_page + 1, Vec::new);
        }
        let width = run.right - run.x;
        self.pages[self.current_page].push(PositionedToken::new(run.text, run.x, run.y, width, run.height));
    }

    fn push_glyph(&mut self, ch: &str, x: f64, y: f64, advance: f64, height: f64) {
        if ch.chars().all(char::is_whitespace) {
            self.flush();
            return;
        }

        let continues = self.run.as_ref().is_some_and(|run| {
            (run.y - y).abs() <= RUN_BASELINE_SLACK
                && x >= run.right - RUN_GAP_FACTOR * height
                && x - run.right <= RUN_GAP_FACTOR * height
        });
        if !continues {
            self.flush();
        }

        match self.run.as_mut() {
            Some(run) => {
                run.text.push_str(ch);
                run.right = run.right.max(x + advance);
                run.height = run.height.max(height);
            }
            None => {
                self.run = Some(OpenRun {
                    text: ch.to_string(),
                    x,
                    y,
                    right: x + advance,
                    height,
                });
            }
        }
    }

    fn finish(mut self) -> Vec<Vec<PositionedToken>> {
        self.flush();
        self.pages
    }
}

impl OutputDev for RunCollector {
    fn begin_page(
        &mut self,
        page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.flush();
        self.current_page = (page_num as usize).saturating_sub(1);
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        let x_scale = trm.m11.hypot(trm.m12);
        let y_scale = trm.m21.hypot(trm.m22);
        let advance = width * font_size * x_scale;
        let height = font_size * y_scale;
        self.push_glyph(char, trm.m31, trm.m32, advance, height);
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_joins_adjacent_glyphs() {
        let mut c = RunCollector::new(1);
        c.push_glyph("R", 10.0, 100.0, 6.0, 10.0);
        c.push_glyph("u", 16.0, 100.0, 5.0, 10.0);
        c.push_glyph("s", 21.0, 100.0, 5.0, 10.0);
        c.push_glyph("t", 26.0, 100.0, 3.0, 10.0);
        let pages = c.finish();
        assert_eq!(pages[0].len(), 1);
        let t = &pages[0][0];
        assert_eq!(t.text, "Rust");
        assert_eq!(t.x, 10.0);
        assert_eq!(t.width, 19.0);
        assert_eq!(t.height, 10.0);
    }

    #[test]
    fn test_collector_splits_on_whitespace_and_gaps() {
        let mut c = RunCollector::new(1);
        c.push_glyph("a", 10.0, 100.0, 5.0, 10.0);
        c.push_glyph(" ", 15.0, 100.0, 3.0, 10.0);
        c.push_glyph("b", 18.0, 100.0, 5.0, 10.0);
        c.push_glyph("c", 40.0, 100.0, 5.0, 10.0);
        c.push_glyph("d", 45.0, 80.0, 5.0, 10.0);
        let pages = c.finish();
        let texts: Vec<&str> = pages[0].iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_collector_routes_tokens_to_current_page() {
        let mut c = RunCollector::new(2);
        c.push_glyph("x", 10.0, 100.0, 5.0, 10.0);
        c.flush();
        c.current_page = 1;
        c.push_glyph("y", 10.0, 100.0, 5.0, 10.0);
        let pages = c.finish();
        assert_eq!(pages[0][0].text, "x");
        assert_eq!(pages[1][0].text, "y");
    }

    #[test]
    fn test_extract_pages_rejects_garbage() {
        let result = PdfGlyphSource.extract_pages(b"definitely not a pdf");
        assert!(result.is_err());
    }
}
