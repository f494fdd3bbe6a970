//! Positioned text geometry for the existing-document path.
//!
//! All coordinates are PDF user space: origin bottom-left, y increases upward.
//! A token's `y` is its baseline; `height` extends upward from it.

use serde::{Deserialize, Serialize};

/// A single run of rendered text with its page-space bounding geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedToken {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PositionedToken {
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// False if any coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }
}

/// Tokens sharing a baseline, ordered left-to-right.
///
/// The box is the union of the token boxes: `x0 = min(x)`, `x1 = max(x + width)`,
/// `y0 = min(y)`, `y1 = max(y + height)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    #[serde(skip_serializing, default)]
    pub tokens: Vec<PositionedToken>,
}

/// A bullet-started line plus its indented continuation lines.
///
/// Built once per detection pass and only ever referenced by `id` afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletBlock {
    pub id: String,
    pub page_index: usize,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub lines: Vec<TextLine>,
    pub raw_text: String,
}

impl BulletBlock {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_finite_rejects_nan_and_infinity() {
        assert!(PositionedToken::new("a", 1.0, 2.0, 3.0, 4.0).is_finite());
        assert!(!PositionedToken::new("a", f64::NAN, 2.0, 3.0, 4.0).is_finite());
        assert!(!PositionedToken::new("a", 1.0, 2.0, f64::INFINITY, 4.0).is_finite());
    }

    #[test]
    fn test_token_edges() {
        let t = PositionedToken::new("word", 10.0, 700.0, 25.0, 9.0);
        assert_eq!(t.right(), 35.0);
        assert_eq!(t.top(), 709.0);
    }

    #[test]
    fn test_text_line_serialization_omits_tokens() {
        let line = TextLine {
            text: "hello".to_string(),
            x0: 0.0,
            y0: 0.0,
            x1: 10.0,
            y1: 10.0,
            tokens: vec![PositionedToken::new("hello", 0.0, 0.0, 10.0, 10.0)],
        };
        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("tokens").is_none(), "tokens should not be serialized");
        assert_eq!(json["text"], "hello");
    }
}
