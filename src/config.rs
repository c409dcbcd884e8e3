use log::{info, warn};
use serde::Deserialize;
use std::path::Path;

/// Site configuration, read from `mindful.toml`.
/// Every section and key is optional; missing values fall back to the
/// behaviour of the published site.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub nav: NavConfig,
    pub carousel: CarouselConfig,
    pub feedback: FeedbackConfig,
    pub reveal: RevealConfig,
    pub submission: SubmissionConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavConfig {
    /// Scroll distance after which the navbar turns solid.
    pub scrolled_threshold: f64,
    /// Sections count as current this many pixels before their top edge.
    pub section_offset: f64,
    /// Fixed header height subtracted from anchor scroll targets.
    pub anchor_offset: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            scrolled_threshold: 50.0,
            section_offset: 100.0,
            anchor_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        CarouselConfig { interval_ms: 5000 }
    }
}

/// Durations of the transient visual-feedback effects.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedbackConfig {
    pub card_press_ms: u64,
    pub post_press_ms: u64,
    pub read_more_ms: u64,
    pub join_delay_ms: u64,
    pub ripple_ms: u64,
    pub reply_close_ms: u64,
    pub fade_in_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        FeedbackConfig {
            card_press_ms: 200,
            post_press_ms: 200,
            read_more_ms: 300,
            join_delay_ms: 1000,
            ripple_ms: 600,
            reply_close_ms: 1500,
            fade_in_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// Pixels shaved off the bottom of the viewport.
    pub bottom_margin: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig {
            threshold: 0.1,
            bottom_margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubmissionConfig {
    /// When set, appointments are POSTed here instead of only being logged.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        SubmissionConfig {
            endpoint: None,
            timeout_secs: 30,
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, String> {
        let config: SiteConfig =
            toml::from_str(s).map_err(|e| format!("Invalid site config: {}", e))?;
        config.check()?;
        Ok(config)
    }

    /// Load from disk. A missing file is not an error: defaults are used.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            warn!("{} not found, using default config", path.display());
            return Ok(SiteConfig::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let config = Self::from_toml_str(&raw)?;
        info!("Loaded site config from {}", path.display());
        Ok(config)
    }

    fn check(&self) -> Result<(), String> {
        if self.carousel.interval_ms == 0 {
            return Err("carousel.interval_ms must be greater than zero".into());
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(format!(
                "reveal.threshold must be within 0..=1, got {}",
                self.reveal.threshold
            ));
        }
        if let Some(endpoint) = &self.submission.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!("submission.endpoint is not an http(s) URL: {}", endpoint));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let c = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(c, SiteConfig::default());
        assert_eq!(c.carousel.interval_ms, 5000);
        assert_eq!(c.nav.anchor_offset, 80.0);
        assert_eq!(c.feedback.reply_close_ms, 1500);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let c = SiteConfig::from_toml_str("[carousel]\ninterval_ms = 8000\n[nav]\nsection_offset = 120.0\n").unwrap();
        assert_eq!(c.carousel.interval_ms, 8000);
        assert_eq!(c.nav.section_offset, 120.0);
        assert_eq!(c.nav.scrolled_threshold, 50.0);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = SiteConfig::from_toml_str("[carousel]\ninterval_ms = 0\n").unwrap_err();
        assert!(err.contains("interval_ms"));
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let err = SiteConfig::from_toml_str("[submission]\nendpoint = \"ftp://x\"\n").unwrap_err();
        assert!(err.contains("endpoint"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let c = SiteConfig::load(Path::new("does/not/exist/mindful.toml")).unwrap();
        assert_eq!(c, SiteConfig::default());
    }
}
