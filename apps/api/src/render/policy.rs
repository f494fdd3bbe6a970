//! Render policy — which engine entry point to call, and the one-page retry.
//!
//! A one-page request is rendered strictly at the normal profile first. If that
//! truncates, it is rendered once more at the compact profile and the compact
//! result is accepted whether or not it still truncates.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::LayoutError;
use crate::layout::{
    render_multi_page, render_single_page_strict, FontFamily, PageSize, SizeProfileKind,
};
use crate::models::resume::StructuredResume;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageMode {
    #[default]
    MultiPage,
    SinglePage,
}

/// A finished PDF plus how it was produced.
#[derive(Debug, Clone)]
pub struct RenderedResume {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub truncated: bool,
    pub profile: SizeProfileKind,
}

/// Strict normal render, then one compact retry if the first attempt truncated.
pub fn render_one_page(
    doc: &StructuredResume,
    family: FontFamily,
    page_size: PageSize,
) -> Result<RenderedResume, LayoutError> {
    let (bytes, truncated) =
        render_single_page_strict(doc, &SizeProfileKind::Normal.profile(), family, page_size)?;
    if !truncated {
        return Ok(RenderedResume {
            bytes,
            page_count: 1,
            truncated: false,
            profile: SizeProfileKind::Normal,
        });
    }

    info!("Normal profile truncated; retrying one-page render at compact profile");
    let (bytes, truncated) =
        render_single_page_strict(doc, &SizeProfileKind::Compact.profile(), family, page_size)?;
    if truncated {
        warn!("Compact profile also truncated; returning truncated one-page render");
    }
    Ok(RenderedResume {
        bytes,
        page_count: 1,
        truncated,
        profile: SizeProfileKind::Compact,
    })
}

/// Dispatches on mode. An explicit profile pins a single attempt.
pub fn render_resume(
    doc: &StructuredResume,
    mode: PageMode,
    profile: Option<SizeProfileKind>,
    family: FontFamily,
    page_size: PageSize,
) -> Result<RenderedResume, LayoutError> {
    match (mode, profile) {
        (PageMode::SinglePage, None) => render_one_page(doc, family, page_size),
        (PageMode::SinglePage, Some(kind)) => {
            let (bytes, truncated) =
                render_single_page_strict(doc, &kind.profile(), family, page_size)?;
            Ok(RenderedResume {
                bytes,
                page_count: 1,
                truncated,
                profile: kind,
            })
        }
        (PageMode::MultiPage, profile) => {
            let kind = profile.unwrap_or(SizeProfileKind::Normal);
            let (bytes, page_count) = render_multi_page(doc, &kind.profile(), family, page_size)?;
            Ok(RenderedResume {
                bytes,
                page_count,
                truncated: false,
                profile: kind,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::renderer::tests::{first_truncating_bullet_count, resume_with_bullets};
    use crate::layout::profile::SizeProfile;

    fn page_count(bytes: &[u8]) -> usize {
        lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn test_short_resume_keeps_normal_profile() {
        let out = render_one_page(&resume_with_bullets(2), FontFamily::Helvetica, PageSize::letter()).unwrap();
        assert_eq!(out.profile, SizeProfileKind::Normal);
        assert!(!out.truncated);
        assert_eq!(out.page_count, 1);
    }

    #[test]
    fn test_retry_at_compact_fits_one_page() {
        let n = first_truncating_bullet_count(&SizeProfile::normal());
        let out = render_one_page(&resume_with_bullets(n), FontFamily::Helvetica, PageSize::letter()).unwrap();
        assert_eq!(out.profile, SizeProfileKind::Compact);
        assert!(!out.truncated, "compact retry should fit {n} bullets");
        assert_eq!(out.page_count, 1);
        assert_eq!(page_count(&out.bytes), 1);
    }

    #[test]
    fn test_overlong_resume_returns_truncated_compact_result() {
        let out = render_one_page(&resume_with_bullets(150), FontFamily::Helvetica, PageSize::letter()).unwrap();
        assert_eq!(out.profile, SizeProfileKind::Compact);
        assert!(out.truncated);
        assert_eq!(page_count(&out.bytes), 1);
    }

    #[test]
    fn test_explicit_profile_pins_single_attempt() {
        let out = render_resume(
            &resume_with_bullets(150),
            PageMode::SinglePage,
            Some(SizeProfileKind::Normal),
            FontFamily::Helvetica,
            PageSize::letter(),
        )
        .unwrap();
        assert_eq!(out.profile, SizeProfileKind::Normal);
        assert!(out.truncated);
    }

    #[test]
    fn test_multi_page_mode_reports_page_count() {
        let out = render_resume(
            &resume_with_bullets(150),
            PageMode::MultiPage,
            None,
            FontFamily::Courier,
            PageSize::a4(),
        )
        .unwrap();
        assert!(!out.truncated);
        assert!(out.page_count > 1);
        assert_eq!(page_count(&out.bytes), out.page_count);
    }
}
