//! Artifact decoding.
//!
//! ```text
//! Decompress ──err──▶ Failed
//!     │
//!     ▼
//! TryStructuredParse ──motif fields ok──▶ MotifReconstruct ──▶ Done
//!     │
//!     └──────────otherwise──────────────▶ PlainFallback ────▶ Done
//! ```
//!
//! Only decompression can fail. A payload that is not a well-formed motif
//! payload is decoded as plain text.

use crate::codec::{self, MotifPayload, DICTIONARY_FIELD, GRAPH_FIELD};
use crate::selector::CompressionMode;
use gp_core::types::render_line;
use gp_core::{Motif, Result};

/// Sender used when a symbol or key cannot be resolved.
pub const UNKNOWN_SENDER: &str = "UNKNOWN";

/// States of the decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    Decompress,
    TryStructuredParse,
    MotifReconstruct,
    PlainFallback,
    Done,
    Failed,
}

/// Result of probing decompressed bytes for the motif layout.
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    Motif(MotifPayload),
    Plain { reason: String },
}

/// Decide whether `bytes` is a motif payload.
pub fn probe(bytes: &[u8]) -> ProbeOutcome {
    let plain = |reason: String| ProbeOutcome::Plain { reason };

    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(v) => v,
        Err(e) => return plain(format!("not JSON: {e}")),
    };
    let Some(object) = value.as_object() else {
        return plain("top-level value is not an object".into());
    };
    for field in [GRAPH_FIELD, DICTIONARY_FIELD] {
        if !object.contains_key(field) {
            return plain(format!("missing field `{field}`"));
        }
    }
    match serde_json::from_value::<MotifPayload>(value) {
        Ok(payload) => ProbeOutcome::Motif(payload),
        Err(e) => plain(format!("malformed motif payload: {e}")),
    }
}

/// Decoded transcript text and how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    pub mode: CompressionMode,
    pub text: String,
    /// Lines emitted in motif mode; lines of the text in plain mode.
    pub lines: usize,
    /// Symbols that were missing from the dictionary.
    pub unknown_symbols: usize,
}

/// Rebuild transcript lines from a motif payload.
pub fn reconstruct_motif(payload: &MotifPayload) -> Reconstruction {
    let table = payload.symbol_table();
    let mut lines = Vec::with_capacity(payload.message_count());
    let mut unknown_symbols = 0;

    for group in &payload.graph {
        for msg in &group.msgs {
            let (sender, body) = match table.get(msg.pattern.as_str()) {
                Some(key) => match Motif::from_composite_key(key) {
                    Some(m) => (m.sender, m.body),
                    None => (UNKNOWN_SENDER.to_string(), key.to_string()),
                },
                None => {
                    unknown_symbols += 1;
                    (UNKNOWN_SENDER.to_string(), String::new())
                }
            };
            lines.push(render_line(&group.date, &msg.time, &sender, &body));
        }
    }

    if unknown_symbols > 0 {
        tracing::warn!(unknown_symbols, "symbols missing from dictionary");
    }
    Reconstruction {
        mode: CompressionMode::Motif,
        lines: lines.len(),
        text: lines.join("\n"),
        unknown_symbols,
    }
}

/// Treat decompressed bytes as the original text.
pub fn reconstruct_plain(bytes: &[u8]) -> Reconstruction {
    let text = String::from_utf8_lossy(bytes).into_owned();
    Reconstruction {
        mode: CompressionMode::Plain,
        lines: text.lines().count(),
        text,
        unknown_symbols: 0,
    }
}

/// Drives an artifact through the decode states.
#[derive(Debug)]
pub struct Reconstructor {
    state: DecodeState,
}

impl Reconstructor {
    pub fn new() -> Self {
        Self { state: DecodeState::Decompress }
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Run the machine to `Done` or `Failed`.
    pub fn run(&mut self, artifact: &[u8]) -> Result<Reconstruction> {
        self.state = DecodeState::Decompress;
        let bytes = match codec::decompress(artifact) {
            Ok(b) => b,
            Err(e) => {
                self.state = DecodeState::Failed;
                tracing::debug!(error = %e, "decompression failed");
                return Err(e);
            }
        };

        self.state = DecodeState::TryStructuredParse;
        let reconstruction = match probe(&bytes) {
            ProbeOutcome::Motif(payload) => {
                self.state = DecodeState::MotifReconstruct;
                reconstruct_motif(&payload)
            }
            ProbeOutcome::Plain { reason } => {
                self.state = DecodeState::PlainFallback;
                tracing::debug!(%reason, "not a motif payload, using plain text");
                reconstruct_plain(&bytes)
            }
        };

        self.state = DecodeState::Done;
        Ok(reconstruction)
    }
}

impl Default for Reconstructor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode an artifact with a fresh [`Reconstructor`].
pub fn reconstruct(artifact: &[u8]) -> Result<Reconstruction> {
    Reconstructor::new().run(artifact)
}
