//! Static font-metric tables for the standard PDF base fonts the renderer draws with.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em, so a string's width at a
//! given size is `sum(widths) / 1000 × size`. Integer summation keeps measurement
//! exact and order-independent, which the wrap/re-wrap invariants rely on.
//!
//! Tables cover every character WinAnsiEncoding can draw: ASCII 0x20..=0x7E
//! (index = `(char as usize) - 32`), Latin-1 0xA0..=0xFF (index = `code - 0xA0`) and
//! the 0x80..=0x9F punctuation block keyed by char. Anything else is encoded as `?`
//! and measured with `fallback_width`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

// ────────────────────────────────────────────────────────────────────────────
// Font identity
// ────────────────────────────────────────────────────────────────────────────

/// Font families available to the renderer. Parsed once from configuration or a
/// request; an unknown name is rejected at that boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Proportional sans-serif, the default ATS-safe face.
    Helvetica,
    /// Fixed-pitch face.
    Courier,
}

impl FromStr for FontFamily {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "helvetica" => Ok(FontFamily::Helvetica),
            "courier" => Ok(FontFamily::Courier),
            _ => Err(LayoutError::UnknownFont(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// A concrete face: family plus weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub family: FontFamily,
    pub weight: FontWeight,
}

impl Font {
    pub const fn regular(family: FontFamily) -> Self {
        Self {
            family,
            weight: FontWeight::Regular,
        }
    }

    pub const fn bold(family: FontFamily) -> Self {
        Self {
            family,
            weight: FontWeight::Bold,
        }
    }

    /// PostScript name of the matching standard 14 font.
    pub fn base_font_name(&self) -> &'static str {
        match (self.family, self.weight) {
            (FontFamily::Helvetica, FontWeight::Regular) => "Helvetica",
            (FontFamily::Helvetica, FontWeight::Bold) => "Helvetica-Bold",
            (FontFamily::Courier, FontWeight::Regular) => "Courier",
            (FontFamily::Courier, FontWeight::Bold) => "Courier-Bold",
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_font_name())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    latin1: [u16; 96],
    extras: &'static [(char, u16)],
    /// Width used for characters outside the table.
    pub fallback_width: u16,
}

impl FontMetricTable {
    /// Advance width of one character in 1/1000 em.
    pub fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        if (0xA0..=0xFF).contains(&code) {
            return self.latin1[code - 0xA0];
        }
        self.extras
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|(_, w)| *w)
            .unwrap_or(self.fallback_width)
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f64 {
        let units: u64 = s.chars().map(|c| u64::from(self.char_width(c))).sum();
        units as f64 / 1000.0
    }

    /// Width of `s` in page units at `font_size`.
    pub fn measure(&self, s: &str, font_size: f64) -> f64 {
        self.measure_str(s) * font_size
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII + 96 Latin-1 + WinAnsi punctuation)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0   1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :   ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A   B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [   \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a   b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n   o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {   |    }    ~
        334, 260, 334, 584,
    ],
    #[rustfmt::skip]
    latin1: [
        // nbsp ¡   ¢    £    ¤    ¥    ¦    §    ¨    ©    ª    «    ¬    shy  ®    ¯
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // °   ±    ²    ³    ´    µ    ¶    ·    ¸    ¹    º    »    ¼    ½    ¾    ¿
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // À   Á    Â    Ã    Ä    Å    Æ    Ç    È    É    Ê    Ë    Ì    Í    Î    Ï
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // Ð   Ñ    Ò    Ó    Ô    Õ    Ö    ×    Ø    Ù    Ú    Û    Ü    Ý    Þ    ß
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // à   á    â    ã    ä    å    æ    ç    è    é    ê    ë    ì    í    î    ï
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        // ð   ñ    ò    ó    ô    õ    ö    ÷    ø    ù    ú    û    ü    ý    þ    ÿ
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
    extras: &[
        ('€', 556),
        ('‚', 222),
        ('ƒ', 556),
        ('„', 333),
        ('…', 1000),
        ('†', 556),
        ('‡', 556),
        ('ˆ', 333),
        ('‰', 1000),
        ('Š', 667),
        ('‹', 333),
        ('Œ', 1000),
        ('Ž', 611),
        ('‘', 222),
        ('’', 222),
        ('“', 333),
        ('”', 333),
        ('•', 350),
        ('–', 556),
        ('—', 1000),
        ('˜', 333),
        ('™', 1000),
        ('š', 500),
        ('›', 333),
        ('œ', 944),
        ('ž', 500),
        ('Ÿ', 667),
    ],
    fallback_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0   1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :   ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A   B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [   \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a   b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n   o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {   |    }    ~
        389, 280, 389, 584,
    ],
    #[rustfmt::skip]
    latin1: [
        // nbsp ¡   ¢    £    ¤    ¥    ¦    §    ¨    ©    ª    «    ¬    shy  ®    ¯
        278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // °   ±    ²    ³    ´    µ    ¶    ·    ¸    ¹    º    »    ¼    ½    ¾    ¿
        400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // À   Á    Â    Ã    Ä    Å    Æ    Ç    È    É    Ê    Ë    Ì    Í    Î    Ï
        722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // Ð   Ñ    Ò    Ó    Ô    Õ    Ö    ×    Ø    Ù    Ú    Û    Ü    Ý    Þ    ß
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // à   á    â    ã    ä    å    æ    ç    è    é    ê    ë    ì    í    î    ï
        556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
        // ð   ñ    ò    ó    ô    õ    ö    ÷    ø    ù    ú    û    ü    ý    þ    ÿ
        611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
    ],
    extras: &[
        ('€', 556),
        ('‚', 278),
        ('ƒ', 556),
        ('„', 500),
        ('…', 1000),
        ('†', 556),
        ('‡', 556),
        ('ˆ', 333),
        ('‰', 1000),
        ('Š', 667),
        ('‹', 333),
        ('Œ', 1000),
        ('Ž', 611),
        ('‘', 278),
        ('’', 278),
        ('“', 500),
        ('”', 500),
        ('•', 350),
        ('–', 556),
        ('—', 1000),
        ('˜', 333),
        ('™', 1000),
        ('š', 556),
        ('›', 333),
        ('œ', 944),
        ('ž', 500),
        ('Ÿ', 667),
    ],
    fallback_width: 611,
};

/// Courier and Courier-Bold share one fixed pitch.
static COURIER_TABLE: FontMetricTable = FontMetricTable {
    widths: [600; 95],
    latin1: [600; 96],
    extras: &[],
    fallback_width: 600,
};

/// Returns the static metric table for a face.
pub fn get_metrics(font: &Font) -> &'static FontMetricTable {
    match (font.family, font.weight) {
        (FontFamily::Helvetica, FontWeight::Regular) => &HELVETICA_TABLE,
        (FontFamily::Helvetica, FontWeight::Bold) => &HELVETICA_BOLD_TABLE,
        (FontFamily::Courier, _) => &COURIER_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const HELV: Font = Font::regular(FontFamily::Helvetica);
    const HELV_BOLD: Font = Font::bold(FontFamily::Helvetica);

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(&HELV).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2056
        let width = get_metrics(&HELV).measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-9, "Rust width should be 2.056em, got {width}");
    }

    #[test]
    fn test_measure_scales_with_font_size() {
        let metrics = get_metrics(&HELV);
        let at_ten = metrics.measure("Engineer", 10.0);
        let at_twenty = metrics.measure("Engineer", 20.0);
        assert!((at_twenty - 2.0 * at_ten).abs() < 1e-9);
    }

    #[test]
    fn test_winansi_extras_have_real_widths() {
        let metrics = get_metrics(&HELV);
        assert_eq!(metrics.char_width('•'), 350);
        assert_eq!(metrics.char_width('…'), 1000);
    }

    #[test]
    fn test_latin1_letters_use_afm_widths() {
        let metrics = get_metrics(&HELV);
        assert_eq!(metrics.char_width('Æ'), 1000);
        assert_eq!(metrics.char_width('Ö'), 778);
        assert_eq!(metrics.char_width('í'), 278);
        assert_eq!(get_metrics(&HELV_BOLD).char_width('ö'), 611);
    }

    #[test]
    fn test_winansi_high_punctuation_has_widths() {
        let metrics = get_metrics(&HELV);
        assert_eq!(metrics.char_width('Š'), 667);
        assert_eq!(metrics.char_width('œ'), 944);
        assert_eq!(metrics.char_width('‰'), 1000);
        // "Šimon" = Š(667) + i(222) + m(833) + o(556) + n(556)
        assert!((metrics.measure_str("Šimon") - 2.834).abs() < 1e-9);
    }

    #[test]
    fn test_courier_covers_latin1_at_fixed_pitch() {
        let metrics = get_metrics(&Font::regular(FontFamily::Courier));
        assert_eq!(metrics.char_width('é'), 600);
        assert_eq!(metrics.char_width('Ÿ'), 600);
    }

    #[test]
    fn test_non_table_character_falls_back() {
        let metrics = get_metrics(&HELV);
        assert_eq!(metrics.char_width('漢'), metrics.fallback_width);
    }

    #[test]
    fn test_bold_is_not_narrower_than_regular() {
        let text = "Architected distributed caching layer";
        assert!(get_metrics(&HELV_BOLD).measure_str(text) >= get_metrics(&HELV).measure_str(text));
    }

    #[test]
    fn test_courier_is_fixed_pitch() {
        let metrics = get_metrics(&Font::regular(FontFamily::Courier));
        assert_eq!(metrics.measure_str("iiii"), metrics.measure_str("WWWW"));
        assert!((metrics.measure_str("abc") - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_font_family_parse_is_case_insensitive() {
        assert_eq!("Helvetica".parse::<FontFamily>().unwrap(), FontFamily::Helvetica);
        assert_eq!(" courier ".parse::<FontFamily>().unwrap(), FontFamily::Courier);
    }

    #[test]
    fn test_unknown_font_fails_fast() {
        let err = "Comic Sans".parse::<FontFamily>().unwrap_err();
        assert!(matches!(err, LayoutError::UnknownFont(name) if name == "Comic Sans"));
    }

    #[test]
    fn test_base_font_names() {
        assert_eq!(HELV.base_font_name(), "Helvetica");
        assert_eq!(HELV_BOLD.base_font_name(), "Helvetica-Bold");
        assert_eq!(Font::bold(FontFamily::Courier).base_font_name(), "Courier-Bold");
    }
}
