use thiserror::Error;

/// Font-size ratio below which a digit counts as a superscript marker.
pub const DEFAULT_NOISE_RATIO: f32 = 0.85;
/// Margin added around each link rectangle, in page units.
pub const DEFAULT_RECT_MARGIN: f32 = 0.3;
/// Target of the generated links: the ebible.gr collation interface.
pub const DEFAULT_BASE_URL: &str = "https://ebible.gr/collate";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("noise ratio must be within (0, 1], got {0}")]
    NoiseRatio(f32),
    #[error("rect margin must be finite and non-negative, got {0}")]
    RectMargin(f32),
}

/// Configuration for the reference linking pass.
///
/// Use [`LinkerConfigBuilder`] to construct with non-default values; the
/// builder validates and fails fast with a [`ConfigError`].
#[derive(Debug, Clone)]
pub struct LinkerConfig {
    pub(crate) noise_ratio: f32,
    pub(crate) rect_margin: f32,
    pub(crate) base_url: String,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            noise_ratio: DEFAULT_NOISE_RATIO,
            rect_margin: DEFAULT_RECT_MARGIN,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl LinkerConfig {
    pub fn builder() -> LinkerConfigBuilder {
        LinkerConfigBuilder::default()
    }

    pub fn noise_ratio(&self) -> f32 {
        self.noise_ratio
    }

    pub fn rect_margin(&self) -> f32 {
        self.rect_margin
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Builder for [`LinkerConfig`].
#[derive(Debug, Clone, Default)]
pub struct LinkerConfigBuilder {
    noise_ratio: Option<f32>,
    rect_margin: Option<f32>,
    base_url: Option<String>,
}

impl LinkerConfigBuilder {
    pub fn noise_ratio(mut self, ratio: f32) -> Self {
        self.noise_ratio = Some(ratio);
        self
    }

    pub fn rect_margin(mut self, margin: f32) -> Self {
        self.rect_margin = Some(margin);
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<LinkerConfig, ConfigError> {
        let noise_ratio = self.noise_ratio.unwrap_or(DEFAULT_NOISE_RATIO);
        if !noise_ratio.is_finite() || noise_ratio <= 0.0 || noise_ratio > 1.0 {
            return Err(ConfigError::NoiseRatio(noise_ratio));
        }

        let rect_margin = self.rect_margin.unwrap_or(DEFAULT_RECT_MARGIN);
        if !rect_margin.is_finite() || rect_margin < 0.0 {
            return Err(ConfigError::RectMargin(rect_margin));
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(LinkerConfig {
            noise_ratio,
            rect_margin,
            base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = LinkerConfig::default();
        assert_eq!(config.noise_ratio(), DEFAULT_NOISE_RATIO);
        assert_eq!(config.rect_margin(), DEFAULT_RECT_MARGIN);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_overrides() {
        let config = LinkerConfig::builder()
            .noise_ratio(0.9)
            .rect_margin(1.0)
            .base_url("https://example.org/collate/")
            .build()
            .unwrap();
        assert_eq!(config.noise_ratio(), 0.9);
        assert_eq!(config.rect_margin(), 1.0);
        // Trailing slash is trimmed so URI joining stays single-slash
        assert_eq!(config.base_url(), "https://example.org/collate");
    }

    #[test]
    fn test_rejects_bad_ratio() {
        assert!(LinkerConfig::builder().noise_ratio(0.0).build().is_err());
        assert!(LinkerConfig::builder().noise_ratio(1.5).build().is_err());
        assert!(
            LinkerConfig::builder()
                .noise_ratio(f32::NAN)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_rejects_negative_margin() {
        assert!(LinkerConfig::builder().rect_margin(-0.1).build().is_err());
    }
}
