//! Choosing between motif and plain encoding.

use gp_core::config::{MotifConfig, DEFAULT_PLAIN_THRESHOLD};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionMode {
    /// Original text, xz-compressed.
    Plain,
    /// Symbol-encoded transcript plus dictionary, xz-compressed.
    Motif,
}

impl CompressionMode {
    /// Tag used in artifact file names.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Plain => "plain_lzma",
            Self::Motif => "motif_lzma",
        }
    }

    /// Suffix for the decoded output file.
    pub fn restored_suffix(&self) -> &'static str {
        match self {
            Self::Plain => "_plain_restored",
            Self::Motif => "_motif_restored",
        }
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "PLAIN+LZMA"),
            Self::Motif => write!(f, "MOTIF+LZMA"),
        }
    }
}

/// Repetition heuristic: plain when `distinct > plain_threshold * messages`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeSelector {
    pub plain_threshold: f64,
}

impl ModeSelector {
    pub fn new(plain_threshold: f64) -> Self {
        Self { plain_threshold }
    }

    pub fn from_config(config: &MotifConfig) -> Self {
        Self::new(config.plain_threshold)
    }

    pub fn select(&self, message_count: usize, motif_count: usize) -> CompressionMode {
        if motif_count as f64 > self.plain_threshold * message_count as f64 {
            CompressionMode::Plain
        } else {
            CompressionMode::Motif
        }
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new(DEFAULT_PLAIN_THRESHOLD)
    }
}
