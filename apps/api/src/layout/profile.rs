//! Size profiles — the font sizes, line heights and margins for one render attempt.
//!
//! A profile is chosen once per attempt and passed explicitly; the renderer never
//! mixes profiles within a page.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeProfileKind {
    Normal,
    Compact,
}

impl SizeProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeProfileKind::Normal => "normal",
            SizeProfileKind::Compact => "compact",
        }
    }

    pub fn profile(&self) -> SizeProfile {
        match self {
            SizeProfileKind::Normal => SizeProfile::normal(),
            SizeProfileKind::Compact => SizeProfile::compact(),
        }
    }
}

impl FromStr for SizeProfileKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(SizeProfileKind::Normal),
            "compact" => Ok(SizeProfileKind::Compact),
            _ => Err(LayoutError::UnknownProfile(s.to_string())),
        }
    }
}

/// Sizes are in points; multipliers are applied to the font size of the line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeProfile {
    pub kind: SizeProfileKind,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub name_size: f64,
    pub headline_size: f64,
    pub contact_size: f64,
    pub section_title_size: f64,
    pub body_size: f64,
    /// Line step = font size × `line_height`.
    pub line_height: f64,
    /// Space above each section title.
    pub section_gap: f64,
    /// Space between the title baseline and its underline rule.
    pub rule_offset: f64,
    pub rule_thickness: f64,
    /// Space after the underline rule before section content.
    pub rule_gap: f64,
    /// Space between entries inside a section (experience rows, projects).
    pub entry_gap: f64,
    /// Left offset of the bullet glyph from the content edge.
    pub bullet_indent: f64,
    /// Left offset of bullet text from the bullet glyph.
    pub bullet_text_indent: f64,
    /// Continuation indent for wrapped skill lines.
    pub hanging_indent: f64,
    /// Minimum gap between left and right header columns.
    pub column_gap: f64,
}

impl SizeProfile {
    pub fn normal() -> Self {
        Self {
            kind: SizeProfileKind::Normal,
            margin_top: 54.0,
            margin_bottom: 54.0,
            margin_left: 54.0,
            margin_right: 54.0,
            name_size: 20.0,
            headline_size: 11.5,
            contact_size: 9.5,
            section_title_size: 11.5,
            body_size: 10.5,
            line_height: 1.3,
            section_gap: 10.0,
            rule_offset: 3.0,
            rule_thickness: 0.75,
            rule_gap: 5.0,
            entry_gap: 5.0,
            bullet_indent: 6.0,
            bullet_text_indent: 10.0,
            hanging_indent: 12.0,
            column_gap: 12.0,
        }
    }

    pub fn compact() -> Self {
        Self {
            kind: SizeProfileKind::Compact,
            margin_top: 36.0,
            margin_bottom: 36.0,
            margin_left: 40.0,
            margin_right: 40.0,
            name_size: 16.0,
            headline_size: 10.0,
            contact_size: 8.5,
            section_title_size: 10.0,
            body_size: 9.0,
            line_height: 1.15,
            section_gap: 6.0,
            rule_offset: 2.5,
            rule_thickness: 0.6,
            rule_gap: 3.0,
            entry_gap: 3.0,
            bullet_indent: 4.0,
            bullet_text_indent: 9.0,
            hanging_indent: 10.0,
            column_gap: 10.0,
        }
    }

    pub fn line_step(&self, font_size: f64) -> f64 {
        font_size * self.line_height
    }

    pub fn body_line_step(&self) -> f64 {
        self.line_step(self.body_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_is_smaller_than_normal_everywhere() {
        let n = SizeProfile::normal();
        let c = SizeProfile::compact();
        assert!(c.body_size < n.body_size);
        assert!(c.name_size < n.name_size);
        assert!(c.line_height < n.line_height);
        assert!(c.margin_top < n.margin_top);
        assert!(c.margin_left < n.margin_left);
        assert!(c.section_gap < n.section_gap);
        assert!(c.body_line_step() < n.body_line_step());
    }

    #[test]
    fn test_profile_kind_round_trips_through_name() {
        for kind in [SizeProfileKind::Normal, SizeProfileKind::Compact] {
            assert_eq!(kind.as_str().parse::<SizeProfileKind>().unwrap(), kind);
            assert_eq!(kind.profile().kind, kind);
        }
    }

    #[test]
    fn test_unknown_profile_rejected() {
        assert!(matches!(
            "tiny".parse::<SizeProfileKind>(),
            Err(LayoutError::UnknownProfile(_))
        ));
    }
}
