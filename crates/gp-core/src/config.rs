use crate::error::{GlampressError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default system notices dropped from exported transcripts.
pub const DEFAULT_JUNK_SUBSTRINGS: &[&str] = &[
    "Messages and calls are end-to-end encrypted",
    "Only people in this chat can read, listen to, or share them",
    "This message was deleted",
];

pub const DEFAULT_PLAIN_THRESHOLD: f64 = 0.9;
pub const DEFAULT_LZMA_PRESET: u32 = 6;
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "lzma";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlampressConfig {
    pub parser: ParserConfig,
    pub motif: MotifConfig,
    pub codec: CodecConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Case-insensitive substrings marking a message body as a system notice.
    pub junk_substrings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotifConfig {
    /// Plain mode is chosen when `distinct motifs > plain_threshold * messages`.
    pub plain_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// xz preset level, 0..=9.
    pub preset: u32,
    /// Artifact file extension, without the dot.
    pub extension: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            junk_substrings: DEFAULT_JUNK_SUBSTRINGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for MotifConfig {
    fn default() -> Self {
        Self { plain_threshold: DEFAULT_PLAIN_THRESHOLD }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            preset: DEFAULT_LZMA_PRESET,
            extension: DEFAULT_ARTIFACT_EXTENSION.into(),
        }
    }
}

impl GlampressConfig {
    /// Parse a TOML document. Missing sections fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| GlampressError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GlampressError::InputNotFound { path: path.to_path_buf() });
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn with_plain_threshold(mut self, threshold: f64) -> Self {
        self.motif.plain_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let t = self.motif.plain_threshold;
        if !t.is_finite() || t < 0.0 {
            return Err(GlampressError::Config(format!(
                "motif.plain_threshold must be a finite non-negative number, got {t}"
            )));
        }
        if self.codec.preset > 9 {
            return Err(GlampressError::Config(format!(
                "codec.preset must be in 0..=9, got {}",
                self.codec.preset
            )));
        }
        let ext = self.codec.extension.as_str();
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(GlampressError::Config(format!(
                "codec.extension must be a bare extension, got {ext:?}"
            )));
        }
        Ok(())
    }
}
