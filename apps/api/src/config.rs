use anyhow::{Context, Result};

use crate::layout::{FontFamily, PageSize};

/// Default upload cap for the documents endpoints: 10 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; a value that does not parse aborts startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Font family for generated résumés and overlay edits.
    pub resume_font: FontFamily,
    pub page_size: PageSize,
    /// Starting font size for overlay re-wrap when a request does not give one.
    pub overlay_font_size: f64,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            resume_font: FontFamily::Helvetica,
            page_size: PageSize::letter(),
            overlay_font_size: 10.0,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let overlay_font_size = env_or("OVERLAY_FONT_SIZE", "10.0")
            .parse::<f64>()
            .context("OVERLAY_FONT_SIZE must be a number")?;
        if !(overlay_font_size.is_finite() && overlay_font_size > 0.0) {
            anyhow::bail!("OVERLAY_FONT_SIZE must be positive, got {overlay_font_size}");
        }

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            resume_font: env_or("RESUME_FONT", "Helvetica")
                .parse::<FontFamily>()
                .context("RESUME_FONT must name a supported font family")?,
            page_size: env_or("PAGE_SIZE", "letter")
                .parse::<PageSize>()
                .context("PAGE_SIZE must be 'letter' or 'a4'")?,
            overlay_font_size,
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
