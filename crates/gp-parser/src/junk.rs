//! Blocklist of system notices.

use gp_core::config::ParserConfig;

/// Case-insensitive substring blocklist.
#[derive(Debug, Clone)]
pub struct JunkFilter {
    needles: Vec<String>,
}

impl JunkFilter {
    pub fn new<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let needles = substrings
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { needles }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new(&config.junk_substrings)
    }

    pub fn is_junk(&self, body: &str) -> bool {
        if self.needles.is_empty() {
            return false;
        }
        let lowered = body.to_lowercase();
        self.needles.iter().any(|n| lowered.contains(n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.needles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }
}

impl Default for JunkFilter {
    fn default() -> Self {
        Self::from_config(&ParserConfig::default())
    }
}
