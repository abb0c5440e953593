//! Payload serialization and xz (LZMA) compression.
//!
//! Motif payload layout, compact JSON with fields in this order:
//!
//! ```text
//! {"graph":[{"date":"1/2/24","msgs":[{"time":"10:05 am","user":"Alice","pattern":"$P1$"}]}],
//!  "dictionary":{"Alice|||Hello":"$P1$"}}
//! ```
//!
//! Plain payload: the transcript text as UTF-8. There is no header or mode tag;
//! the decoder tells the two apart by probing for the motif fields.

use crate::motif::{EncodedTranscript, MotifDictionary};
use gp_core::{GlampressError, Result, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use xz2::read::{XzDecoder, XzEncoder};

pub const GRAPH_FIELD: &str = "graph";
pub const DICTIONARY_FIELD: &str = "dictionary";

#[derive(Serialize)]
struct MotifPayloadRef<'a> {
    graph: &'a EncodedTranscript,
    dictionary: &'a MotifDictionary,
}

/// Serialize an encoded transcript and its dictionary.
pub fn motif_payload(encoded: &EncodedTranscript, dictionary: &MotifDictionary) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&MotifPayloadRef { graph: encoded, dictionary })?)
}

pub fn plain_payload(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// xz-compress with the given preset (0..=9).
pub fn compress(data: &[u8], preset: u32) -> Result<Vec<u8>> {
    let mut encoder = XzEncoder::new(data, preset);
    let mut out = Vec::new();
    encoder
        .read_to_end(&mut out)
        .map_err(|e| GlampressError::Compression(e.to_string()))?;
    Ok(out)
}

/// Invert [`compress`]. Corrupt or truncated input is an error.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = XzDecoder::new_multi_decoder(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| GlampressError::Decompression(e.to_string()))?;
    Ok(out)
}

/// Encoded message as read back from an artifact. Symbols stay raw strings:
/// an unknown or malformed one only affects its own line.
#[derive(Debug, Clone, Deserialize)]
pub struct WireMessage {
    pub time: String,
    pub user: String,
    pub pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireGroup {
    pub date: String,
    pub msgs: Vec<WireMessage>,
}

/// Motif payload as read back from an artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct MotifPayload {
    pub graph: Vec<WireGroup>,
    pub dictionary: HashMap<String, String>,
}

impl MotifPayload {
    /// Symbol string → composite key.
    ///
    /// Entries are normally `composite → symbol`; a dictionary written the other
    /// way round is accepted too, entry by entry.
    pub fn symbol_table(&self) -> HashMap<&str, &str> {
        self.dictionary
            .iter()
            .map(|(k, v)| {
                if v.parse::<Symbol>().is_err() && k.parse::<Symbol>().is_ok() {
                    (k.as_str(), v.as_str())
                } else {
                    (v.as_str(), k.as_str())
                }
            })
            .collect()
    }

    pub fn message_count(&self) -> usize {
        self.graph.iter().map(|g| g.msgs.len()).sum()
    }
}
