//! Page-level configuration.
//!
//! Every field has a default, so an absent or partial config block is fine.
//! The web crate reads the JSON from an inline `<script>` element.

use crate::constants::{
    CONTACT_ENDPOINT, CURSOR_EASE, REVEAL_THRESHOLD, SECTION_LINE_THRESHOLD, TOAST_MS,
    TYPEWRITER_DELAY_MS, TYPEWRITER_DURATION_MS,
};
use crate::error::{FolioError, Result};
use crate::scroll::ScrollConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub cursor: CursorConfig,
    pub typewriter: TypewriterConfig,
    pub contact: ContactConfig,
    /// Honor `prefers-reduced-motion` by skipping smooth scrolling, cursor
    /// and parallax.
    pub respect_reduced_motion: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            reveal: RevealConfig::default(),
            cursor: CursorConfig::default(),
            typewriter: TypewriterConfig::default(),
            contact: ContactConfig::default(),
            respect_reduced_motion: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub line_threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            line_threshold: SECTION_LINE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub enabled: bool,
    pub ease: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ease: CURSOR_EASE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub duration_ms: f64,
    pub start_delay_ms: f64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            duration_ms: TYPEWRITER_DURATION_MS,
            start_delay_ms: TYPEWRITER_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContactTransport {
    /// POST to an HTTP endpoint.
    Http { endpoint: String },
    /// Keep submissions in a localStorage outbox.
    Local { storage_key: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub transport: ContactTransport,
    pub draft_key: String,
    pub toast_ms: i32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            transport: ContactTransport::Http {
                endpoint: CONTACT_ENDPOINT.to_string(),
            },
            draft_key: "folio.contact-draft".to_string(),
            toast_ms: TOAST_MS,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: SiteConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let ratio_ok = |r: f64| (0.0..=1.0).contains(&r);
        if !ratio_ok(self.reveal.threshold) || !ratio_ok(self.reveal.line_threshold) {
            return Err(FolioError::Config(
                "reveal thresholds must be within 0..=1".into(),
            ));
        }
        if !(self.cursor.ease > 0.0 && self.cursor.ease <= 1.0) {
            return Err(FolioError::Config("cursor.ease must be within (0, 1]".into()));
        }
        if !(self.scroll.lerp > 0.0 && self.scroll.lerp <= 1.0) {
            return Err(FolioError::Config("scroll.lerp must be within (0, 1]".into()));
        }
        if self.scroll.duration_ms < 0.0
            || self.typewriter.duration_ms < 0.0
            || self.typewriter.start_delay_ms < 0.0
            || self.contact.toast_ms < 0
        {
            return Err(FolioError::Config("durations must not be negative".into()));
        }
        if let ContactTransport::Http { endpoint } = &self.contact.transport {
            if endpoint.trim().is_empty() {
                return Err(FolioError::Config("contact endpoint is empty".into()));
            }
        }
        Ok(())
    }

    /// Parse `raw` if present, falling back to defaults on any problem.
    pub fn load_or_default(raw: Option<&str>) -> Self {
        match raw.map(Self::from_json) {
            None => Self::default(),
            Some(Ok(cfg)) => cfg,
            Some(Err(e)) => {
                log::warn!("[config] ignoring site config: {}", e);
                Self::default()
            }
        }
    }
}
