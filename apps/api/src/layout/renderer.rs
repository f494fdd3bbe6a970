//! Paginated Résumé Renderer — lays a `StructuredResume` out onto page canvases.
//!
//! # Modes
//! - `MultiPage`: when a line does not fit above the bottom margin a new page is
//!   started and the cursor resets to the top margin. Never truncates.
//! - `SinglePageStrict`: the same low-space condition marks the cursor truncated
//!   instead. Truncation is terminal for the pass: every later draw is refused.
//!
//! Order: header (name, headline, contact line), then each non-empty section in the
//! order Summary, Skills, Experience, Education, Certifications, Projects.
//!
//! The compact retry after a truncated strict render belongs to the caller
//! (`render::policy`), not to this module.

use tracing::{debug, warn};

use crate::errors::LayoutError;
use crate::layout::canvas::{Color, PageCanvas, PageHandle, PageSize, PdfCanvas, Rect};
use crate::layout::font_metrics::{get_metrics, Font, FontFamily};
use crate::layout::profile::SizeProfile;
use crate::layout::text_flow::{ellipsize, fit_to_line_budget, wrap, wrap_hanging, FitOptions};
use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry, SkillGroup,
    StructuredResume,
};

const BULLET_GLYPH: &str = "•";
const TITLE_SEPARATOR: &str = " — ";
const DETAIL_SEPARATOR: &str = " | ";
const HEADLINE_MAX_LINES: usize = 2;
const CONTACT_MAX_LINES: usize = 2;
const RULE_COLOR: Color = Color::DARK_GRAY;
/// Floor for the left column of a two-column row, as a share of content width.
const MIN_LEFT_COLUMN_SHARE: f64 = 0.35;

// ────────────────────────────────────────────────────────────────────────────
// Cursor & outcome types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    MultiPage,
    SinglePageStrict,
}

/// Per-pass layout state. Owned by exactly one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCursor {
    pub page: PageHandle,
    /// Top of the next line box, in page units from the bottom edge.
    pub y: f64,
    truncated: bool,
}

impl RenderCursor {
    pub fn new(page: PageHandle, y: f64) -> Self {
        Self {
            page,
            y,
            truncated: false,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// One-way: there is no way to clear the flag.
    pub fn mark_truncated(&mut self) {
        self.truncated = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub page_count: usize,
    pub truncated: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Renders across as many pages as needed. Returns `(bytes, page_count)`.
pub fn render_multi_page(
    doc: &StructuredResume,
    profile: &SizeProfile,
    family: FontFamily,
    page_size: PageSize,
) -> Result<(Vec<u8>, usize), LayoutError> {
    let mut canvas = PdfCanvas::new();
    let summary = render_on(&mut canvas, doc, profile, family, page_size, RenderMode::MultiPage);
    Ok((canvas.save()?, summary.page_count))
}

/// Renders onto exactly one page. Returns `(bytes, truncated)`.
pub fn render_single_page_strict(
    doc: &StructuredResume,
    profile: &SizeProfile,
    family: FontFamily,
    page_size: PageSize,
) -> Result<(Vec<u8>, bool), LayoutError> {
    let mut canvas = PdfCanvas::new();
    let summary = render_on(
        &mut canvas,
        doc,
        profile,
        family,
        page_size,
        RenderMode::SinglePageStrict,
    );
    Ok((canvas.save()?, summary.truncated))
}

/// Lays `doc` out onto `canvas`, starting a fresh page.
pub fn render_on<C: PageCanvas>(
    canvas: &mut C,
    doc: &StructuredResume,
    profile: &SizeProfile,
    family: FontFamily,
    page_size: PageSize,
    mode: RenderMode,
) -> RenderSummary {
    let pages_before = canvas.page_count();
    let mut renderer = Renderer::new(canvas, profile, family, page_size, mode);
    renderer.render(doc);

    let summary = RenderSummary {
        page_count: renderer.canvas.page_count() - pages_before,
        truncated: renderer.cursor.is_truncated(),
    };
    debug!(
        profile = profile.kind.as_str(),
        ?mode,
        pages = summary.page_count,
        truncated = summary.truncated,
        "Render pass complete"
    );
    summary
}

// ────────────────────────────────────────────────────────────────────────────
// Renderer
// ────────────────────────────────────────────────────────────────────────────

struct Renderer<'a, C: PageCanvas> {
    canvas: &'a mut C,
    profile: &'a SizeProfile,
    regular: Font,
    bold: Font,
    page_size: PageSize,
    mode: RenderMode,
    cursor: RenderCursor,
}

impl<'a, C: PageCanvas> Renderer<'a, C> {
    fn new(
        canvas: &'a mut C,
        profile: &'a SizeProfile,
        family: FontFamily,
        page_size: PageSize,
        mode: RenderMode,
    ) -> Self {
        let page = canvas.new_page(page_size);
        let top = page_size.height - profile.margin_top;
        Self {
            canvas,
            profile,
            regular: Font::regular(family),
            bold: Font::bold(family),
            page_size,
            mode,
            cursor: RenderCursor::new(page, top),
        }
    }

    fn left(&self) -> f64 {
        self.profile.margin_left
    }

    fn content_width(&self) -> f64 {
        self.page_size.width - self.profile.margin_left - self.profile.margin_right
    }

    fn top(&self) -> f64 {
        self.page_size.height - self.profile.margin_top
    }

    fn bottom(&self) -> f64 {
        self.profile.margin_bottom
    }

    // ── Space management ────────────────────────────────────────────────────

    /// Makes sure `needed` units fit above the bottom margin.
    ///
    /// Multi-page mode breaks to a new page; strict mode marks the cursor truncated.
    /// A block taller than a whole page is drawn anyway once at the top of a page.
    fn reserve(&mut self, needed: f64) -> bool {
        if self.cursor.is_truncated() {
            return false;
        }
        if self.cursor.y - needed >= self.bottom() - 1e-9 {
            return true;
        }
        match self.mode {
            RenderMode::MultiPage => {
                if self.cursor.y >= self.top() {
                    return true;
                }
                let page = self.canvas.new_page(self.page_size);
                self.cursor = RenderCursor::new(page, self.top());
                debug!(page = page.index(), "Page break");
                true
            }
            RenderMode::SinglePageStrict => {
                self.cursor.mark_truncated();
                warn!(
                    profile = self.profile.kind.as_str(),
                    y = self.cursor.y,
                    needed,
                    "Single-page render truncated"
                );
                false
            }
        }
    }

    /// Reserves one line at `size` and returns its baseline.
    fn place_line(&mut self, size: f64) -> Option<f64> {
        let step = self.profile.line_step(size);
        if !self.reserve(step) {
            return None;
        }
        let baseline = self.cursor.y - size;
        self.cursor.y -= step;
        Some(baseline)
    }

    fn gap(&mut self, amount: f64) {
        if !self.cursor.is_truncated() && self.cursor.y < self.top() {
            self.cursor.y -= amount;
        }
    }

    // ── Primitive draws ─────────────────────────────────────────────────────

    fn text(&mut self, text: &str, x: f64, baseline: f64, size: f64, font: Font) {
        if self.cursor.is_truncated() {
            return;
        }
        self.canvas
            .draw_text(self.cursor.page, text, x, baseline, size, font, Color::BLACK);
    }

    fn line(&mut self, text: &str, x: f64, size: f64, font: Font) -> bool {
        match self.place_line(size) {
            Some(baseline) => {
                self.text(text, x, baseline, size, font);
                true
            }
            None => false,
        }
    }

    fn centered(&mut self, text: &str, size: f64, font: Font) -> bool {
        let width = self.canvas.measure_width(font, text, size);
        let x = self.left() + ((self.content_width() - width) / 2.0).max(0.0);
        self.line(text, x, size, font)
    }

    fn paragraph(&mut self, text: &str, x: f64, width: f64) -> bool {
        let size = self.profile.body_size;
        for line in wrap(get_metrics(&self.regular), text, width, size) {
            if !self.line(&line, x, size, self.regular) {
                return false;
            }
        }
        true
    }

    fn bullet(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return true;
        }
        let size = self.profile.body_size;
        let glyph_x = self.left() + self.profile.bullet_indent;
        let text_x = glyph_x + self.profile.bullet_text_indent;
        let width = self.content_width() - self.profile.bullet_indent - self.profile.bullet_text_indent;

        let lines = wrap(get_metrics(&self.regular), text, width, size);
        for (i, line) in lines.iter().enumerate() {
            let Some(baseline) = self.place_line(size) else {
                return false;
            };
            if i == 0 {
                self.text(BULLET_GLYPH, glyph_x, baseline, size, self.regular);
            }
            self.text(line, text_x, baseline, size, self.regular);
        }
        true
    }

    fn bullets(&mut self, items: &[String]) -> bool {
        items.iter().all(|item| self.bullet(item))
    }

    /// Left/right row: bold left text fitted to one line, right text right-aligned
    /// in whatever width the left text leaves after the column gap. Both halves
    /// shrink and then ellipsize rather than cross the margin or each other.
    fn row(&mut self, left_text: &str, right_text: &str) -> bool {
        let size = self.profile.body_size;
        let content_width = self.content_width();
        let gap = self.profile.column_gap;
        let left_max = if right_text.is_empty() {
            content_width
        } else {
            let right_width = self.canvas.measure_width(self.regular, right_text, size);
            (content_width - right_width - gap).max(content_width * MIN_LEFT_COLUMN_SHARE)
        };

        let fitted = fit_to_line_budget(
            get_metrics(&self.bold),
            left_text,
            left_max,
            1,
            FitOptions::starting_at(size),
        );
        let Some(baseline) = self.place_line(size) else {
            return false;
        };
        let left_line = fitted.lines.first().map(String::as_str).unwrap_or("");
        let mut left_used = 0.0;
        if !left_line.is_empty() {
            self.text(left_line, self.left(), baseline, fitted.font_size, self.bold);
            left_used = self.canvas.measure_width(self.bold, left_line, fitted.font_size) + gap;
        }
        if right_text.is_empty() {
            return true;
        }

        let right_max = content_width - left_used;
        let metrics = get_metrics(&self.regular);
        let right = fit_to_line_budget(metrics, right_text, right_max, 1, FitOptions::starting_at(size));
        let Some(first) = right.lines.first() else {
            return true;
        };
        // A single unbreakable word can still be wider than the column.
        let right_line = if metrics.measure(first, right.font_size) > right_max {
            ellipsize(metrics, first, right_max, right.font_size)
        } else {
            first.clone()
        };
        let width = self.canvas.measure_width(self.regular, &right_line, right.font_size);
        let x = self.left() + content_width - width;
        self.text(&right_line, x, baseline, right.font_size, self.regular);
        true
    }

    // ── Document structure ──────────────────────────────────────────────────

    fn render(&mut self, doc: &StructuredResume) {
        self.header(doc);

        if has_text(&doc.summary) && self.section_title("Summary") {
            for line in doc.summary.iter().filter(|s| !s.trim().is_empty()) {
                let (x, width) = (self.left(), self.content_width());
                if !self.paragraph(line, x, width) {
                    break;
                }
            }
        }
        if !doc.skills.is_empty() && self.section_title("Skills") {
            for group in &doc.skills {
                if !self.skill_group(group) {
                    break;
                }
            }
        }
        if !doc.experience.is_empty() && self.section_title("Experience") {
            self.entries(&doc.experience, Self::experience_entry);
        }
        if !doc.education.is_empty() && self.section_title("Education") {
            self.entries(&doc.education, Self::education_entry);
        }
        if !doc.certifications.is_empty() && self.section_title("Certifications") {
            for cert in &doc.certifications {
                if !self.bullet(&certification_line(cert)) {
                    break;
                }
            }
        }
        if !doc.projects.is_empty() && self.section_title("Projects") {
            self.entries(&doc.projects, Self::project_entry);
        }
    }

    fn entries<T>(&mut self, entries: &[T], draw: fn(&mut Self, &T) -> bool) {
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                self.gap(self.profile.entry_gap);
            }
            if !draw(self, entry) {
                return;
            }
        }
    }

    fn header(&mut self, doc: &StructuredResume) {
        let width = self.content_width();
        let header = &doc.header;

        let name = header.name.trim();
        if !name.is_empty() {
            let fitted = fit_to_line_budget(
                get_metrics(&self.bold),
                name,
                width,
                1,
                FitOptions::starting_at(self.profile.name_size),
            );
            for line in &fitted.lines {
                self.centered(line, fitted.font_size, self.bold);
            }
        }

        if let Some(headline) = header.headline.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let fitted = fit_to_line_budget(
                get_metrics(&self.regular),
                headline,
                width,
                HEADLINE_MAX_LINES,
                FitOptions::starting_at(self.profile.headline_size),
            );
            for line in &fitted.lines {
                self.centered(line, fitted.font_size, self.regular);
            }
        }

        let contact = header.contact_parts().join(DETAIL_SEPARATOR);
        if !contact.is_empty() {
            let fitted = fit_to_line_budget(
                get_metrics(&self.regular),
                &contact,
                width,
                CONTACT_MAX_LINES,
                FitOptions::starting_at(self.profile.contact_size),
            );
            for line in &fitted.lines {
                self.centered(line, fitted.font_size, self.regular);
            }
        }
    }

    /// Uppercase bold title over a full-width rule. Only drawn when the title and
    /// one body line fit together.
    fn section_title(&mut self, title: &str) -> bool {
        let p = self.profile;
        let needed = p.section_gap
            + p.line_step(p.section_title_size)
            + p.rule_offset
            + p.rule_thickness
            + p.rule_gap
            + p.body_line_step();
        if !self.reserve(needed) {
            return false;
        }
        self.gap(p.section_gap);

        let baseline = self.cursor.y - p.section_title_size;
        self.text(&title.to_uppercase(), self.left(), baseline, p.section_title_size, self.bold);
        let rule_y = baseline - p.rule_offset - p.rule_thickness;
        if !self.cursor.is_truncated() {
            self.canvas.draw_rectangle(
                self.cursor.page,
                Rect {
                    x: self.left(),
                    y: rule_y,
                    width: self.content_width(),
                    height: p.rule_thickness,
                },
                RULE_COLOR,
            );
        }
        self.cursor.y = rule_y - p.rule_gap;
        true
    }

    fn skill_group(&mut self, group: &SkillGroup) -> bool {
        let items: Vec<&str> = group
            .items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        let category = group.category.trim();
        let text = match (category.is_empty(), items.is_empty()) {
            (_, true) => category.to_string(),
            (true, false) => items.join(", "),
            (false, false) => format!("{category}: {}", items.join(", ")),
        };
        if text.is_empty() {
            return true;
        }

        let size = self.profile.body_size;
        let width = self.content_width();
        let indent = self.profile.hanging_indent;
        let lines = wrap_hanging(get_metrics(&self.regular), &text, width, width - indent, size);
        for (i, line) in lines.iter().enumerate() {
            let x = if i == 0 { self.left() } else { self.left() + indent };
            if !self.line(line, x, size, self.regular) {
                return false;
            }
        }
        true
    }

    fn experience_entry(&mut self, entry: &ExperienceEntry) -> bool {
        let left = join_title(&entry.title, &entry.company);
        let right = join_details(&[entry.location.as_deref(), entry.dates.as_deref()]);
        self.row(&left, &right) && self.bullets(&entry.bullets)
    }

    fn education_entry(&mut self, entry: &EducationEntry) -> bool {
        let left = join_title(&entry.degree, &entry.institution);
        let right = join_details(&[entry.location.as_deref(), entry.dates.as_deref()]);
        self.row(&left, &right) && self.bullets(&entry.details)
    }

    fn project_entry(&mut self, entry: &ProjectEntry) -> bool {
        let right = join_details(&[entry.dates.as_deref()]);
        if !self.row(entry.name.trim(), &right) {
            return false;
        }
        let (x, width) = (self.left(), self.content_width());
        if let Some(description) = entry.description.as_deref().filter(|s| !s.trim().is_empty()) {
            if !self.paragraph(description, x, width) {
                return false;
            }
        }
        let tech: Vec<&str> = entry
            .technologies
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if !tech.is_empty() && !self.paragraph(&format!("Tech: {}", tech.join(", ")), x, width) {
            return false;
        }
        self.bullets(&entry.bullets)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Text helpers
// ────────────────────────────────────────────────────────────────────────────

fn has_text(lines: &[String]) -> bool {
    lines.iter().any(|s| !s.trim().is_empty())
}

fn join_title(primary: &str, secondary: &str) -> String {
    match (primary.trim(), secondary.trim()) {
        (p, "") => p.to_string(),
        ("", s) => s.to_string(),
        (p, s) => format!("{p}{TITLE_SEPARATOR}{s}"),
    }
}

fn join_details(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(DETAIL_SEPARATOR)
}

fn certification_line(cert: &CertificationEntry) -> String {
    let mut line = join_title(&cert.name, cert.issuer.as_deref().unwrap_or(""));
    if let Some(date) = cert.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        line.push_str(&format!(" ({date})"));
    }
    line
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
