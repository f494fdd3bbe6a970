// Existing-document path: glyph runs → lines → bullet blocks.

pub mod bullet_blocks;
pub mod glyphs;
pub mod line_grouper;
pub mod tokens;

use tracing::debug;

use crate::errors::LayoutError;
use crate::extract::bullet_blocks::detect_bullet_blocks;
use crate::extract::glyphs::GlyphSource;
use crate::extract::line_grouper::group_lines;
use crate::extract::tokens::{BulletBlock, TextLine};

/// Blocks detected in a whole document, with its page count.
#[derive(Debug, Clone)]
pub struct DetectedDocument {
    pub page_count: usize,
    pub blocks: Vec<BulletBlock>,
}

/// Extracts glyph runs from every page, groups them into lines and detects blocks.
pub fn detect_document_blocks<G: GlyphSource>(
    source: &G,
    pdf_bytes: &[u8],
) -> Result<DetectedDocument, LayoutError> {
    let pages: Vec<_> = source
        .extract_pages(pdf_bytes)?
        .iter()
        .map(|tokens| group_lines(tokens))
        .collect();
    let blocks = detect_bullet_blocks(&pages);
    debug!(
        pages = pages.len(),
        lines = pages.iter().map(Vec::len).sum::<usize>(),
        blocks = blocks.len(),
        "Document blocks detected"
    );
    Ok(DetectedDocument {
        page_count: pages.len(),
        blocks,
    })
}

/// Groups the lines of a single page.
pub fn page_lines<G: GlyphSource>(
    source: &G,
    pdf_bytes: &[u8],
    page_index: usize,
) -> Result<Vec<TextLine>, LayoutError> {
    let tokens = source.extract_page(pdf_bytes, page_index)?;
    Ok(group_lines(&tokens))
}
