//! Page canvas — the drawing surface the layout engine writes to.
//!
//! `PageCanvas` is the seam between layout and PDF bytes. `PdfCanvas` records
//! every draw call as a `DrawOp` per page and serialises them with `lopdf` on
//! `save`. It can start an empty document or open existing PDF bytes; drawing on an
//! existing page appends a content stream after the page's own content, which is
//! wrapped in `q`/`Q` so its graphics state cannot leak into ours.

use std::collections::BTreeMap;
use std::str::FromStr;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::LayoutError;
use crate::layout::font_metrics::{get_metrics, Font};

// ────────────────────────────────────────────────────────────────────────────
// Geometry & colour
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
        }
    }

    pub const fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
        }
    }
}

impl FromStr for PageSize {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" | "us-letter" => Ok(PageSize::letter()),
            "a4" => Ok(PageSize::a4()),
            _ => Err(LayoutError::UnknownPageSize(s.to_string())),
        }
    }
}

/// RGB colour, components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const DARK_GRAY: Color = Color::rgb(0.25, 0.25, 0.25);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle; `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x: x0.min(x1),
            y: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        }
    }
}

/// Index of a page within one canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle(usize);

impl PageHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rectangle {
        rect: Rect,
        fill: Color,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        size: f64,
        font: Font,
        color: Color,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas contract
// ────────────────────────────────────────────────────────────────────────────

pub trait PageCanvas {
    fn new_page(&mut self, size: PageSize) -> PageHandle;

    fn page_count(&self) -> usize;

    /// Handle for the page at `index`, if it exists.
    fn page(&self, index: usize) -> Option<PageHandle> {
        (index < self.page_count()).then_some(PageHandle(index))
    }

    fn draw_rectangle(&mut self, page: PageHandle, rect: Rect, fill: Color);

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        page: PageHandle,
        text: &str,
        x: f64,
        y: f64,
        size: f64,
        font: Font,
        color: Color,
    );

    fn measure_width(&self, font: Font, text: &str, size: f64) -> f64 {
        get_metrics(&font).measure(text, size)
    }

    fn save(self) -> Result<Vec<u8>, LayoutError>
    where
        Self: Sized;
}

// ────────────────────────────────────────────────────────────────────────────
// lopdf-backed canvas
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct CanvasPage {
    /// Object id of the page in the loaded document; `None` for pages added here.
    existing: Option<ObjectId>,
    size: PageSize,
    ops: Vec<DrawOp>,
}

pub struct PdfCanvas {
    doc: Document,
    pages_root: ObjectId,
    pages: Vec<CanvasPage>,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfCanvas {
    /// Starts an empty document.
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_root = doc.new_object_id();
        doc.objects.insert(
            pages_root,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_root,
        });
        doc.trailer.set("Root", catalog_id);

        Self {
            doc,
            pages_root,
            pages: Vec::new(),
        }
    }

    /// Opens existing PDF bytes; every existing page becomes drawable.
    pub fn open(pdf_bytes: &[u8]) -> Result<Self, LayoutError> {
        let doc = Document::load_mem(pdf_bytes)?;
        if doc.is_encrypted() {
            return Err(LayoutError::EncryptedDocument);
        }
        let pages_root = catalog_pages_root(&doc)?;

        let pages = doc
            .get_pages()
            .into_values()
            .map(|page_id| CanvasPage {
                existing: Some(page_id),
                size: media_box_size(&doc, page_id).unwrap_or(PageSize::letter()),
                ops: Vec::new(),
            })
            .collect();

        Ok(Self {
            doc,
            pages_root,
            pages,
        })
    }

    fn push_op(&mut self, page: PageHandle, op: DrawOp) {
        match self.pages.get_mut(page.0) {
            Some(p) => p.ops.push(op),
            None => warn!(page = page.0, "Draw call on unknown page ignored"),
        }
    }

    fn write_page(
        &mut self,
        index: usize,
        font_ids: &BTreeMap<String, ObjectId>,
    ) -> Result<(), LayoutError> {
        let page = &self.pages[index];
        match page.existing {
            None => {
                let content = encode_ops(&page.ops, false)?;
                let size = page.size;
                let content_id = self.doc.add_object(Stream::new(dictionary! {}, content));
                let page_id = self.doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => self.pages_root,
                    "MediaBox" => vec![
                        0.into(),
                        0.into(),
                        Object::Real(size.width as f32),
                        Object::Real(size.height as f32),
                    ],
                    "Contents" => content_id,
                    "Resources" => dictionary! { "Font" => font_dictionary(font_ids) },
                });
                append_kid(&mut self.doc, self.pages_root, page_id)?;
            }
            Some(page_id) => {
                if page.ops.is_empty() {
                    return Ok(());
                }
                let content = encode_ops(&page.ops, true)?;
                let open_id = self
                    .doc
                    .add_object(Stream::new(dictionary! {}, b"q\n".to_vec()));
                let overlay_id = self.doc.add_object(Stream::new(dictionary! {}, content));

                let mut resources = effective_resources(&self.doc, page_id)?;
                let mut fonts = match resources.get(b"Font") {
                    Ok(obj) => resolve_dict(&self.doc, obj)?,
                    Err(_) => Dictionary::new(),
                };
                for (name, id) in font_ids {
                    fonts.set(name.as_bytes().to_vec(), Object::Reference(*id));
                }
                resources.set("Font", Object::Dictionary(fonts));

                let mut contents = vec![Object::Reference(open_id)];
                contents.extend(existing_contents(&self.doc, page_id)?);
                contents.push(Object::Reference(overlay_id));

                let page_dict = self
                    .doc
                    .get_object_mut(page_id)
                    .and_then(Object::as_dict_mut)?;
                page_dict.set("Resources", Object::Dictionary(resources));
                page_dict.set("Contents", Object::Array(contents));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
impl PdfCanvas {
    /// Draw calls recorded on `page` so far.
    pub fn ops(&self, page: PageHandle) -> &[DrawOp] {
        self.pages
            .get(page.0)
            .map(|p| p.ops.as_slice())
            .unwrap_or(&[])
    }

    pub fn page_size(&self, page: PageHandle) -> Option<PageSize> {
        self.pages.get(page.0).map(|p| p.size)
    }
}

impl PageCanvas for PdfCanvas {
    fn new_page(&mut self, size: PageSize) -> PageHandle {
        self.pages.push(CanvasPage {
            existing: None,
            size,
            ops: Vec::new(),
        });
        PageHandle(self.pages.len() - 1)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn draw_rectangle(&mut self, page: PageHandle, rect: Rect, fill: Color) {
        self.push_op(page, DrawOp::Rectangle { rect, fill });
    }

    fn draw_text(
        &mut self,
        page: PageHandle,
        text: &str,
        x: f64,
        y: f64,
        size: f64,
        font: Font,
        color: Color,
    ) {
        self.push_op(
            page,
            DrawOp::Text {
                text: text.to_string(),
                x,
                y,
                size,
                font,
                color,
            },
        );
    }

    fn save(mut self) -> Result<Vec<u8>, LayoutError> {
        // One font object per face actually drawn, shared by all pages.
        let mut font_ids: BTreeMap<String, ObjectId> = BTreeMap::new();
        let faces: Vec<Font> = self
            .pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Text { font, .. } => Some(*font),
                DrawOp::Rectangle { .. } => None,
            })
            .collect();
        for font in faces {
            let name = font_resource_name(&font);
            if font_ids.contains_key(&name) {
                continue;
            }
            let id = self.doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            font_ids.insert(name, id);
        }

        for index in 0..self.pages.len() {
            self.write_page(index, &font_ids)?;
        }

        let mut out = Vec::new();
        self.doc
            .save_to(&mut out)
            .map_err(|e| LayoutError::Pdf(e.to_string()))?;
        debug!(pages = self.pages.len(), bytes = out.len(), "Canvas saved");
        Ok(out)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content encoding
// ────────────────────────────────────────────────────────────────────────────

/// Resource name for a face; prefixed so it cannot shadow a loaded page's fonts.
fn font_resource_name(font: &Font) -> String {
    format!("RRE{}", font.base_font_name().replace('-', ""))
}

fn real(v: f64) -> Object {
    Object::Real(v as f32)
}

fn color_operands(c: &Color) -> Vec<Object> {
    vec![real(c.r), real(c.g), real(c.b)]
}

/// `restore_first` closes the `q` pushed before an existing page's own content.
fn encode_ops(ops: &[DrawOp], restore_first: bool) -> Result<Vec<u8>, LayoutError> {
    let mut operations = Vec::with_capacity(ops.len() * 6 + 1);
    if restore_first {
        operations.push(Operation::new("Q", vec![]));
    }
    for op in ops {
        match op {
            DrawOp::Rectangle { rect, fill } => {
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new("rg", color_operands(fill)));
                operations.push(Operation::new(
                    "re",
                    vec![real(rect.x), real(rect.y), real(rect.width), real(rect.height)],
                ));
                operations.push(Operation::new("f", vec![]));
                operations.push(Operation::new("Q", vec![]));
            }
            DrawOp::Text {
                text,
                x,
                y,
                size,
                font,
                color,
            } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(font_resource_name(font).into_bytes()),
                        real(*size),
                    ],
                ));
                operations.push(Operation::new("rg", color_operands(color)));
                operations.push(Operation::new("Td", vec![real(*x), real(*y)]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
        }
    }
    Ok(Content { operations }.encode()?)
}

/// Encodes text for a WinAnsiEncoding simple font. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Document structure helpers
// ────────────────────────────────────────────────────────────────────────────

fn font_dictionary(font_ids: &BTreeMap<String, ObjectId>) -> Dictionary {
    let mut dict = Dictionary::new();
    for (name, id) in font_ids {
        dict.set(name.as_bytes().to_vec(), Object::Reference(*id));
    }
    dict
}

fn catalog_pages_root(doc: &Document) -> Result<ObjectId, LayoutError> {
    let root_id = doc.trailer.get(b"Root").and_then(Object::as_reference)?;
    let catalog = doc.get_object(root_id).and_then(Object::as_dict)?;
    Ok(catalog.get(b"Pages").and_then(Object::as_reference)?)
}

fn append_kid(doc: &mut Document, pages_root: ObjectId, page_id: ObjectId) -> Result<(), LayoutError> {
    let pages = doc.get_object_mut(pages_root).and_then(Object::as_dict_mut)?;
    let mut kids = match pages.get(b"Kids") {
        Ok(Object::Array(kids)) => kids.clone(),
        _ => Vec::new(),
    };
    kids.push(Object::Reference(page_id));
    let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages.set("Kids", Object::Array(kids));
    pages.set("Count", Object::Integer(count + 1));
    Ok(())
}

/// Follows a reference if `obj` is one, and returns the dictionary it names.
fn resolve_dict(doc: &Document, obj: &Object) -> Result<Dictionary, LayoutError> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id).and_then(Object::as_dict)?.clone()),
        Object::Dictionary(dict) => Ok(dict.clone()),
        _ => Ok(Dictionary::new()),
    }
}

/// Looks up an inheritable page attribute, walking the `Parent` chain.
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = doc.get_object(page_id).and_then(Object::as_dict).ok()?;
    // Bounded walk in case of a malformed cyclic tree.
    for _ in 0..32 {
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
        let parent = current.get(b"Parent").and_then(Object::as_reference).ok()?;
        current = doc.get_object(parent).and_then(Object::as_dict).ok()?;
    }
    None
}

fn effective_resources(doc: &Document, page_id: ObjectId) -> Result<Dictionary, LayoutError> {
    match inherited_attribute(doc, page_id, b"Resources") {
        Some(obj) => resolve_dict(doc, obj),
        None => Ok(Dictionary::new()),
    }
}

fn existing_contents(doc: &Document, page_id: ObjectId) -> Result<Vec<Object>, LayoutError> {
    let page = doc.get_object(page_id).and_then(Object::as_dict)?;
    let contents = match page.get(b"Contents") {
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            // A reference to an array of stream references.
            Ok(Object::Array(items)) => items.clone(),
            _ => vec![Object::Reference(*id)],
        },
        Ok(Object::Array(items)) => items.clone(),
        _ => Vec::new(),
    };
    Ok(contents)
}

fn number(obj: &Object) -> Option<f64> {
    obj.as_float()
        .map(f64::from)
        .ok()
        .or_else(|| obj.as_i64().ok().map(|v| v as f64))
}

fn media_box_size(doc: &Document, page_id: ObjectId) -> Option<PageSize> {
    let obj = inherited_attribute(doc, page_id, b"MediaBox")?;
    let array = match obj {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_array().ok()?,
        other => other.as_array().ok()?,
    };
    let values: Vec<f64> = array.iter().filter_map(number).collect();
    if values.len() != 4 {
        return None;
    }
    Some(PageSize {
        width: (values[2] - values[0]).abs(),
        height: (values[3] - values[1]).abs(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::layout::font_metrics::FontFamily;

    /// Builds a one-page PDF whose text sits under an inherited Resources dictionary.
    pub(crate) fn single_page_pdf(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let content = format!("BT /F1 10 Tf 72 700 Td ({text}) Tj ET").into_bytes();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    fn helv() -> Font {
        Font::regular(FontFamily::Helvetica)
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!("Letter".parse::<PageSize>().unwrap(), PageSize::letter());
        assert_eq!("a4".parse::<PageSize>().unwrap(), PageSize::a4());
        assert!(matches!(
            "tabloid".parse::<PageSize>(),
            Err(LayoutError::UnknownPageSize(_))
        ));
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let r = Rect::from_corners(10.0, 20.0, 4.0, 2.0);
        assert_eq!(r, Rect { x: 4.0, y: 2.0, width: 6.0, height: 18.0 });
    }

    #[test]
    fn test_ops_are_recorded_in_order() {
        let mut canvas = PdfCanvas::new();
        let page = canvas.new_page(PageSize::letter());
        canvas.draw_rectangle(page, Rect::from_corners(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        canvas.draw_text(page, "Hello", 72.0, 700.0, 10.0, helv(), Color::BLACK);
        let ops = canvas.ops(page);
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], DrawOp::Rectangle { .. }));
        assert!(matches!(&ops[1], DrawOp::Text { text, .. } if text == "Hello"));
    }

    #[test]
    fn test_new_document_saves_all_pages() {
        let mut canvas = PdfCanvas::new();
        let first = canvas.new_page(PageSize::letter());
        let second = canvas.new_page(PageSize::a4());
        canvas.draw_text(first, "one", 72.0, 700.0, 10.0, helv(), Color::BLACK);
        canvas.draw_text(second, "two", 72.0, 700.0, 10.0, Font::bold(FontFamily::Helvetica), Color::BLACK);
        assert_eq!(canvas.page_count(), 2);

        let bytes = canvas.save().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_open_existing_document_reads_inherited_media_box() {
        let canvas = PdfCanvas::open(&single_page_pdf("Hello")).unwrap();
        assert_eq!(canvas.page_count(), 1);
        let page = canvas.page(0).unwrap();
        assert_eq!(canvas.page_size(page), Some(PageSize::letter()));
        assert!(canvas.page(1).is_none());
    }

    #[test]
    fn test_drawing_on_existing_page_keeps_original_fonts() {
        let mut canvas = PdfCanvas::open(&single_page_pdf("Original")).unwrap();
        let page = canvas.page(0).unwrap();
        canvas.draw_rectangle(page, Rect::from_corners(70.0, 695.0, 200.0, 712.0), Color::WHITE);
        canvas.draw_text(page, "• Replaced", 72.0, 700.0, 10.0, helv(), Color::BLACK);
        let bytes = canvas.save().unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let page_dict = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let resources = page_dict.get(b"Resources").unwrap().as_dict().unwrap();
        let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
        assert!(fonts.has(b"F1"), "original font must survive");
        assert!(fonts.has(b"RREHelvetica"));

        let contents = page_dict.get(b"Contents").unwrap().as_array().unwrap();
        assert_eq!(contents.len(), 3, "q wrapper + original + overlay");

        let content = doc.get_page_content(page_id).unwrap();
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("Original"));
        assert!(text.contains("Replaced"));
    }

    #[test]
    fn test_untouched_existing_page_is_not_rewritten() {
        let mut canvas = PdfCanvas::open(&single_page_pdf("Untouched")).unwrap();
        canvas.new_page(PageSize::letter());
        let bytes = canvas.save().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let first = *doc.get_pages().values().next().unwrap();
        let page_dict = doc.get_object(first).unwrap().as_dict().unwrap();
        assert!(page_dict.get(b"Contents").unwrap().as_reference().is_ok());
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_open_rejects_garbage() {
        assert!(PdfCanvas::open(b"%PDF-nope").is_err());
    }

    #[test]
    fn test_encode_win_ansi_maps_punctuation() {
        assert_eq!(encode_win_ansi("A•…–—"), vec![b'A', 0x95, 0x85, 0x96, 0x97]);
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        assert_eq!(encode_win_ansi("漢"), vec![b'?']);
    }

    #[test]
    fn test_encode_win_ansi_covers_high_block() {
        assert_eq!(encode_win_ansi("Šimon"), vec![0x8A, b'i', b'm', b'o', b'n']);
        assert_eq!(
            encode_win_ansi("Œuvre Ÿ žš‰†‡ƒˆ˜‹›œŽ"),
            vec![
                0x8C, b'u', b'v', b'r', b'e', b' ', 0x9F, b' ', 0x9E, 0x9A, 0x89, 0x86, 0x87, 0x83,
                0x88, 0x98, 0x8B, 0x9B, 0x9C, 0x8E,
            ]
        );
    }

    #[test]
    fn test_measure_width_delegates_to_metrics() {
        let canvas = PdfCanvas::new();
        let w = canvas.measure_width(helv(), "Rust", 10.0);
        assert!((w - 20.56).abs() < 1e-9);
    }
}
