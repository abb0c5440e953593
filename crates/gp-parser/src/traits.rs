use gp_core::{fsio, Result, Transcript};
use std::path::Path;

/// Trait for chat-export parsers.
pub trait TranscriptParser: Send + Sync {
    /// Parse already-decoded transcript text. Never fails: irregular lines are absorbed.
    fn parse_content(&self, content: &str) -> Transcript;

    /// Parse from file path, replacing invalid UTF-8.
    fn parse_file(&self, path: &Path) -> Result<Transcript> {
        let content = fsio::read_text_lossy(path)?;
        Ok(self.parse_content(&content))
    }

    /// Supported file extensions.
    fn supported_extensions(&self) -> Vec<String>;

    /// Check if a file can be parsed.
    fn can_parse(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let ext_with_dot = format!(".{}", ext.to_ascii_lowercase());
        self.supported_extensions().contains(&ext_with_dot)
    }
}
